use otter_trace::{
    config::Config,
    reports::{simplified::SimplifiedWriter, trace::Tracer},
    structures::literal::{ABLiteral, IntLiteral, Literal},
    types::err::{ErrorKind, SimplifiedError},
};

mod simplified_instance {
    use super::*;

    #[test]
    fn through_tracer() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("foo");
        let mut tracer = Tracer::from_basename(&base, "foo.cnf", Config::default()).unwrap();

        let formula: Vec<Vec<IntLiteral>> = vec![vec![1, -2], vec![3]];
        assert!(tracer.write_simplified(&formula).is_ok());
        assert!(tracer.finalise().is_ok());

        let text = std::fs::read_to_string(dir.path().join("foo.simplified")).unwrap();
        assert_eq!(text, "c Simplified from foo.cnf\n1 -2 0\n3 0\n");
    }

    #[test]
    fn written_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracer = Tracer::from_basename(dir.path().join("foo"), "foo.cnf", Config::default()).unwrap();

        let formula: Vec<Vec<ABLiteral>> = vec![vec![ABLiteral::new(1, true)]];
        assert!(tracer.write_simplified(&formula).is_ok());
        assert_eq!(
            tracer.write_simplified(&formula),
            Err(ErrorKind::Simplified(SimplifiedError::AlreadyWritten))
        );
    }

    #[test]
    fn comment_only() {
        let dir = tempfile::tempdir().unwrap();
        drop(Tracer::from_basename(dir.path().join("foo"), "bar/foo.cnf.xz", Config::default()).unwrap());

        let text = std::fs::read_to_string(dir.path().join("foo.simplified")).unwrap();
        assert_eq!(text, "c Simplified from bar/foo.cnf.xz\n");
    }

    #[test]
    fn empty_clause() {
        let mut writer = SimplifiedWriter::new(Vec::new(), "empty.cnf").unwrap();
        let formula: Vec<Vec<IntLiteral>> = vec![vec![], vec![-4]];
        assert!(writer.write_formula(&formula).is_ok());
        assert!(writer.written());

        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, "c Simplified from empty.cnf\n0\n-4 0\n");
    }

    #[test]
    fn order_kept() {
        let mut writer = SimplifiedWriter::new(Vec::new(), "order.cnf").unwrap();
        let clause = vec![
            ABLiteral::new(9, false),
            ABLiteral::new(2, true),
            ABLiteral::new(5, false),
        ];
        assert!(writer.write_formula([clause.as_slice()]).is_ok());

        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text.lines().nth(1), Some("-9 2 -5 0"));
    }
}
