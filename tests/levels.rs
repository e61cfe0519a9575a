use otter_trace::{
    config::Config,
    reports::trace::{reader::TraceReader, TraceState, Tracer},
    types::err::{ErrorKind, TraceError},
};

use rand::{rngs::StdRng, Rng, SeedableRng};

mod decision_levels {
    use super::*;

    #[test]
    fn one_at_a_time() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracer = Tracer::from_basename(dir.path().join("t"), "t.cnf", Config::default()).unwrap();

        assert!(tracer.new_decision_level(1).is_ok());
        assert!(tracer.new_decision_level(2).is_ok());

        assert_eq!(
            tracer.new_decision_level(4),
            Err(ErrorKind::Trace(TraceError::DecisionLevel { from: 2, to: 4 }))
        );
        assert_eq!(tracer.level(), 2);
        assert_eq!(tracer.state(), TraceState::Corrupt);
    }

    #[test]
    fn no_repeat_from_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracer = Tracer::from_basename(dir.path().join("t"), "t.cnf", Config::default()).unwrap();

        assert_eq!(
            tracer.new_decision_level(0),
            Err(ErrorKind::Trace(TraceError::DecisionLevel { from: 0, to: 0 }))
        );
    }

    #[test]
    fn backtrack_below_or_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracer = Tracer::from_basename(dir.path().join("t"), "t.cnf", Config::default()).unwrap();

        assert!(tracer.backtrack(0).is_ok());

        for level in 1..=5 {
            assert!(tracer.new_decision_level(level).is_ok());
        }
        assert!(tracer.backtrack(3).is_ok());
        assert_eq!(tracer.level(), 3);

        assert!(tracer.backtrack(0).is_ok());
        assert_eq!(tracer.level(), 0);
        assert!(tracer.backtrack(0).is_ok());

        assert!(tracer.new_decision_level(1).is_ok());
        assert!(tracer.finalise().is_ok());
    }

    #[test]
    fn backtrack_to_current() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracer = Tracer::from_basename(dir.path().join("t"), "t.cnf", Config::default()).unwrap();

        assert!(tracer.new_decision_level(1).is_ok());
        assert!(tracer.new_decision_level(2).is_ok());

        assert_eq!(
            tracer.backtrack(2),
            Err(ErrorKind::Trace(TraceError::BacktrackLevel { from: 2, to: 2 }))
        );
    }

    #[test]
    fn backtrack_above_current() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracer = Tracer::from_basename(dir.path().join("t"), "t.cnf", Config::default()).unwrap();

        assert!(tracer.new_decision_level(1).is_ok());
        assert!(tracer.backtrack(2).is_err());
    }
}

mod corruption {
    use super::*;

    #[test]
    fn no_events_after_violation() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracer = Tracer::from_basename(dir.path().join("t"), "t.cnf", Config::default()).unwrap();

        assert!(tracer.new_decision_level(2).is_err());
        let written = tracer.bytes_written();

        assert_eq!(tracer.new_decision_level(1), Err(ErrorKind::Trace(TraceError::Corrupt)));
        assert_eq!(tracer.restart(), Err(ErrorKind::Trace(TraceError::Corrupt)));
        assert_eq!(tracer.bytes_written(), written);
    }

    #[test]
    fn header_left_zeroed() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracer = Tracer::from_basename(dir.path().join("t"), "t.cnf", Config::default()).unwrap();
        let path = tracer.trace_path().to_path_buf();

        assert!(tracer.new_decision_level(1).is_ok());
        assert!(tracer.restart().is_ok());
        assert!(tracer.backtrack(1).is_err());

        assert_eq!(tracer.finalise(), Err(ErrorKind::Trace(TraceError::Corrupt)));

        let bytes = std::fs::read(path).unwrap();
        assert_eq!(bytes.len(), 15 + 2 * 5);
        assert!(bytes[0..15].iter().all(|byte| *byte == 0));
    }
}

mod stack_model {
    use super::*;

    /// Random changes of level, checked against the depth of a stack of decisions.
    fn random_walk(seed: u64, steps: usize) {
        let mut rng = StdRng::seed_from_u64(seed);
        let dir = tempfile::tempdir().unwrap();
        let mut tracer = Tracer::from_basename(dir.path().join("t"), "t.cnf", Config::default()).unwrap();
        let path = tracer.trace_path().to_path_buf();

        let mut stack: Vec<u32> = Vec::default();

        for _ in 0..steps {
            if stack.is_empty() || rng.random_bool(0.7) {
                let atom = rng.random_range(1..1000);
                stack.push(atom);
                assert!(tracer.new_decision_level(stack.len() as u32).is_ok());
            } else {
                let target = rng.random_range(0..stack.len());
                stack.truncate(target);
                assert!(tracer.backtrack(target as u32).is_ok());
            }
            assert_eq!(tracer.level() as usize, stack.len());
        }

        assert!(tracer.finalise().is_ok());

        let file = std::fs::File::open(path).unwrap();
        let reader = TraceReader::new(std::io::BufReader::new(file), &Config::default()).unwrap();
        let events = reader.collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(events.len(), steps);
    }

    #[test]
    fn short_walks() {
        for seed in 0..20 {
            random_walk(seed, 50);
        }
    }

    #[test]
    fn long_walk() {
        random_walk(97, 10_000);
    }
}
