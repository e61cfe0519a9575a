//! A library for recording a trace of a satisfiability solve, so the solve may be replayed or visualised step by step.
//!
//! otter_trace is a companion to conflict-driven clause-learning solvers, such as [otter_sat](https://github.com/teeaychem/otter_sat).
//! A solver reports the events of a solve as they happen, and these are written to a compact binary trace.
//! In addition, the (typically preprocessed) instance solved is written as a plain text clause list, for a viewer to read alongside the trace.
//!
//! # Orientation
//!
//! The library is designed around a single structure, a [Tracer](crate::reports::trace::Tracer), which holds the files written during a solve.
//!
//! - Events (decisions, propagations, conflicts, learnt clauses, restarts, etc.) are written through methods of the tracer, and are encoded as [records](crate::reports::trace::event).
//! - The [header](crate::reports::trace::header) of a trace is written when the tracer is finalised, over space reserved when the tracer was created.
//! - The [simplified instance](crate::reports::simplified) is written through the tracer, once.
//! - A trace may be decoded with a [reader](crate::reports::trace::reader).
//!
//! Atoms, literals, and clauses are given as implementations of the traits found in [structures], and so the representation used by a solver may be passed directly.
//!
//! # Examples
//!
//! + Record a trace of a short solve, and read the trace back.
//!
//! ```rust
//! # use otter_trace::config::Config;
//! # use otter_trace::reports::{Completion, trace::{Tracer, event::Event, reader::TraceReader}};
//! use otter_trace::structures::literal::{ABLiteral, Literal};
//!
//! # let dir = tempfile::tempdir().unwrap();
//! # let base = dir.path().join("example");
//! let mut tracer = Tracer::from_basename(&base, "example.cnf", Config::default()).unwrap();
//!
//! let p = ABLiteral::new(1, true);
//! let q = ABLiteral::new(2, true);
//!
//! tracer.write_simplified(&vec![vec![p, q], vec![p.negate(), q]]).unwrap();
//!
//! tracer.new_decision_level(1).unwrap();
//! tracer.branch(&p.negate()).unwrap();
//! tracer.set_literal(&q).unwrap();
//! tracer.restart().unwrap();
//! tracer.backtrack(0).unwrap();
//!
//! let path = tracer.trace_path().to_path_buf();
//! let header = tracer.finalise().unwrap();
//! assert_eq!(header.restarts, 1);
//!
//! let file = std::fs::File::open(path).unwrap();
//! let reader = TraceReader::new(std::io::BufReader::new(file), &Config::default()).unwrap();
//! assert_eq!(reader.completion(), Completion::Finalised);
//!
//! let events = reader.collect::<Result<Vec<_>, _>>().unwrap();
//! assert_eq!(events.len(), 5);
//! assert_eq!(events[1], Event::Branch(-1));
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made when a trace is opened and finalised, for each event written (at the trace level), and for any error.
//! The targets are listed in [misc::log].
//!
//! For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/):
//! - Logs related to the header of a trace can be filtered with `RUST_LOG=header …`
//! - Each event written can be found with `RUST_LOG=trace=trace …`

pub mod config;
pub mod misc;
pub mod reports;
pub mod structures;
pub mod types;
