use otter_trace::{
    config::Config,
    reports::{
        trace::{event::Event, header::HEADER_ALIGNMENT, reader::TraceReader, Tracer},
        Completion,
    },
    structures::literal::{ABLiteral, Literal},
};

fn i32_at(bytes: &[u8], offset: usize) -> i32 {
    i32::from_ne_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

mod finalised {
    use super::*;

    #[test]
    fn restart_counts() {
        for restarts in [0, 1, 3, 12] {
            let dir = tempfile::tempdir().unwrap();
            let mut tracer = Tracer::from_basename(dir.path().join("t"), "t.cnf", Config::default()).unwrap();
            let path = tracer.trace_path().to_path_buf();

            for _ in 0..restarts {
                assert!(tracer.restart().is_ok());
            }
            let header = tracer.finalise().unwrap();
            assert_eq!(header.restarts, restarts);

            let bytes = std::fs::read(path).unwrap();
            let size = i32_at(&bytes, 0);
            assert_eq!(size % HEADER_ALIGNMENT as i32, 0);
            assert!(size >= 8);
            assert_eq!(i32_at(&bytes, 4), restarts as i32);
            assert_eq!(i32_at(&bytes, 8), 1);
        }
    }

    #[test]
    fn without_flag() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.finalisation_flag.value = false;

        let mut tracer = Tracer::from_basename(dir.path().join("t"), "t.cnf", config).unwrap();
        let path = tracer.trace_path().to_path_buf();
        assert_eq!(tracer.header_size(), 10);

        assert!(tracer.restart().is_ok());
        assert!(tracer.restart().is_ok());
        assert!(tracer.finalise().is_ok());

        let bytes = std::fs::read(path).unwrap();
        assert_eq!(i32_at(&bytes, 0), 10);
        assert_eq!(i32_at(&bytes, 4), 2);
        assert_eq!(bytes[8..10], [0, 0]);
        assert_eq!(bytes[10], b'R');
        assert_eq!(bytes.len(), 10 + 2 * 5);
    }

    #[test]
    fn on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let mut tracer = Tracer::from_basename(dir.path().join("t"), "t.cnf", Config::default()).unwrap();
            assert!(tracer.restart().is_ok());
            tracer.trace_path().to_path_buf()
        };

        let bytes = std::fs::read(path).unwrap();
        assert_eq!(i32_at(&bytes, 0), 15);
        assert_eq!(i32_at(&bytes, 4), 1);
        assert_eq!(i32_at(&bytes, 8), 1);
    }

    #[test]
    fn offsets() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracer = Tracer::from_basename(dir.path().join("t"), "t.cnf", Config::default()).unwrap();
        let path = tracer.trace_path().to_path_buf();
        let header_size = tracer.header_size() as u64;

        let p = ABLiteral::new(4, true);
        let events = [
            Event::DecisionLevel(1),
            Event::Branch(4),
            Event::Conflict(-4),
            Event::Learn {
                id: 1,
                clause: vec![-4, 2, 9],
            },
            Event::Backtrack(0),
        ];

        assert!(tracer.new_decision_level(1).is_ok());
        assert_eq!(tracer.bytes_written(), header_size + 5);
        assert!(tracer.branch(&p).is_ok());
        assert!(tracer.conflict(&p.negate()).is_ok());
        assert!(tracer.learn_clause(1, &vec![-4_i32, 2, 9]).is_ok());
        assert!(tracer.backtrack(0).is_ok());

        let expected: u64 = events.iter().map(|e| e.encoded_len() as u64).sum();
        assert_eq!(tracer.bytes_written(), header_size + expected);

        assert!(tracer.finalise().is_ok());
        assert_eq!(
            std::fs::metadata(path).unwrap().len(),
            header_size + expected
        );
    }
}

mod interrupted {
    use super::*;

    #[test]
    fn zeroed_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.buffer_capacity.value = 0;

        let mut tracer = Tracer::from_basename(dir.path().join("t"), "t.cnf", config.clone()).unwrap();
        let path = tracer.trace_path().to_path_buf();

        assert!(tracer.new_decision_level(1).is_ok());
        assert!(tracer.restart().is_ok());

        // As if the process aborted.
        std::mem::forget(tracer);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 15 + 2 * 5);
        assert!(bytes[0..15].iter().all(|byte| *byte == 0));

        let file = std::fs::File::open(path).unwrap();
        let reader = TraceReader::new(std::io::BufReader::new(file), &config).unwrap();
        assert_eq!(reader.completion(), Completion::Incomplete);

        let events = reader.collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(events, vec![Event::DecisionLevel(1), Event::Restart(0)]);
    }
}

#[cfg(target_os = "linux")]
mod storage_full {
    use otter_trace::types::err::{ErrorKind, TraceError};

    use super::*;

    #[test]
    fn unbuffered_reserve() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.buffer_capacity.value = 0;

        let tracer = Tracer::new("/dev/full", dir.path().join("t.simplified"), "t.cnf", config);
        assert!(matches!(
            tracer.err(),
            Some(ErrorKind::Io(std::io::ErrorKind::StorageFull))
        ));
    }

    #[test]
    fn buffered_finalise() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracer = Tracer::new(
            "/dev/full",
            dir.path().join("t.simplified"),
            "t.cnf",
            Config::default(),
        )
        .unwrap();

        assert!(tracer.restart().is_ok());
        assert!(matches!(
            tracer.finalise(),
            Err(ErrorKind::Io(std::io::ErrorKind::StorageFull))
        ));
    }

    #[test]
    fn corrupt_finalise() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracer = Tracer::new(
            "/dev/full",
            dir.path().join("t.simplified"),
            "t.cnf",
            Config::default(),
        )
        .unwrap();

        assert!(tracer.restart().is_ok());
        assert!(tracer.new_decision_level(2).is_err());

        // The buffered restart fails to flush, though the corruption is reported.
        assert!(matches!(
            tracer.finalise(),
            Err(ErrorKind::Trace(TraceError::Corrupt))
        ));
    }
}
