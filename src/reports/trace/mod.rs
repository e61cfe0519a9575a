/*!
Tools for recording a trace of a solve.

A trace is a binary log of the events of a depth-first search, from which the search may be replayed step by step.
Events are written by calling the relevant method of a [Tracer] as the event happens during a solve:

- Changes of decision level, through [backtrack](Tracer::backtrack) and [new_decision_level](Tracer::new_decision_level).
- Values given to atoms, through [branch](Tracer::branch) (decisions) and [set_literal](Tracer::set_literal) (propagation).
  A decision should not also be noted as set.
- Conflicts, learnt clauses and unlearnt clauses.
- Restarts.

The tracer does not buffer, reorder, or synthesise events, and so a trace is exactly the sequence of calls made.

# Use

```rust
# use otter_trace::config::Config;
# use otter_trace::reports::trace::Tracer;
# use otter_trace::structures::literal::{ABLiteral, Literal};
# let dir = tempfile::tempdir().unwrap();
# let base = dir.path().join("foo");
let mut tracer = Tracer::from_basename(&base, "foo.cnf", Config::default()).unwrap();

tracer.new_decision_level(1).unwrap();
tracer.branch(&ABLiteral::new(1, true)).unwrap();
tracer.set_literal(&ABLiteral::new(2, false)).unwrap();
tracer.conflict(&ABLiteral::new(2, false)).unwrap();
tracer.learn_clause(7, &vec![ABLiteral::new(1, false), ABLiteral::new(2, true)]).unwrap();
tracer.backtrack(0).unwrap();
tracer.restart().unwrap();

let header = tracer.finalise().unwrap();
assert_eq!(header.restarts, 1);
```

# Finalisation

The header of a trace is written when the tracer is finalised, either by a call to [finalise](Tracer::finalise) or when the tracer is dropped.
Until then the header is zeroed, and so a trace from an interrupted solve is [incomplete](crate::reports::Completion::Incomplete).

<div class="warning">
Any error while recording, whether an impossible change of decision level or a failure to write, is fatal to the trace.
No further events are written, and the header is left zeroed.
</div>
*/

pub mod event;
pub mod header;
pub mod level;
pub mod reader;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use event::{ClauseId, Label, Record, RECORD_SIZE};
use header::{Header, HeaderSize};
use level::{DecisionLevel, LevelTracker};

use crate::{
    config::Config,
    misc::log::targets::{self},
    reports::simplified::SimplifiedWriter,
    structures::{
        atom,
        clause::Clause,
        literal::{IntLiteral, Literal},
    },
    types::err::{self, ErrorKind},
};

/// The state of a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceState {
    /// Events are being recorded.
    Recording,

    /// Some error occurred, and no further events will be recorded.
    Corrupt,

    /// The header has been written.
    Finalised,
}

/// A recording session, holding the trace and simplified instance files of a solve.
pub struct Tracer {
    /// The path to the trace, used to reopen the trace when writing the header.
    path: PathBuf,

    /// The trace, until finalised.
    file: Option<BufWriter<File>>,

    /// The simplified instance.
    simplified: SimplifiedWriter<BufWriter<File>>,

    /// The header to be written, with the layout used when reserving space.
    header: Header,

    /// The bytes reserved for the header.
    header_size: HeaderSize,

    /// Bytes written to the trace, including the reserved header.
    bytes_written: u64,

    levels: LevelTracker,

    restarts: u32,

    state: TraceState,
}

impl Tracer {
    /// A tracer which writes a trace to `trace_path` and the simplified instance to `simplified_path`.
    ///
    /// Space for the header of the trace is reserved, and the comment line noting `source` is written to the simplified instance.
    pub fn new(
        trace_path: impl AsRef<Path>,
        simplified_path: impl AsRef<Path>,
        source: &str,
        config: Config,
    ) -> Result<Self, ErrorKind> {
        let path = trace_path.as_ref().to_path_buf();
        let capacity = config.buffer_capacity.value;

        let mut file = BufWriter::with_capacity(capacity, File::create(&path)?);
        let header = Header::placeholder(config.finalisation_flag.value);
        let header_size = header.reserve(&mut file)?;

        let simplified_file = File::create(simplified_path.as_ref())?;
        let simplified =
            SimplifiedWriter::new(BufWriter::with_capacity(capacity, simplified_file), source)?;

        log::info!(target: targets::TRACE, "Writing trace to {path:?}");
        log::info!(target: targets::SIMPLIFIED, "Writing simplified problem to {:?}", simplified_path.as_ref());

        Ok(Tracer {
            path,
            file: Some(file),
            simplified,
            header,
            header_size,
            bytes_written: header_size as u64,
            levels: LevelTracker::default(),
            restarts: 0,
            state: TraceState::Recording,
        })
    }

    /// A tracer which writes to `<base>.trace` and `<base>.simplified`.
    pub fn from_basename(
        base: impl AsRef<Path>,
        source: &str,
        config: Config,
    ) -> Result<Self, ErrorKind> {
        let mut trace_path = base.as_ref().as_os_str().to_owned();
        trace_path.push(".trace");

        let mut simplified_path = base.as_ref().as_os_str().to_owned();
        simplified_path.push(".simplified");

        Tracer::new(trace_path, simplified_path, source, config)
    }

    /// Records a backtrack to `level`, which must be below the current level or zero.
    pub fn backtrack(&mut self, level: DecisionLevel) -> Result<(), ErrorKind> {
        self.recording()?;
        let payload = self.payload(level)?;
        if let Err(e) = self.levels.backtrack(level) {
            return Err(self.corrupt(e.into()));
        }
        self.write(&[Record::new(Label::Backtrack, payload)])
    }

    /// Records a new decision level, which must be one more than the current level.
    pub fn new_decision_level(&mut self, level: DecisionLevel) -> Result<(), ErrorKind> {
        self.recording()?;
        let payload = self.payload(level)?;
        if let Err(e) = self.levels.new_decision_level(level) {
            return Err(self.corrupt(e.into()));
        }
        self.write(&[Record::new(Label::DecisionLevel, payload)])
    }

    /// Records `literal` as a decision.
    pub fn branch(&mut self, literal: &impl Literal) -> Result<(), ErrorKind> {
        self.write_literal(Label::Branch, literal)
    }

    /// Records `literal` as set by propagation.
    pub fn set_literal(&mut self, literal: &impl Literal) -> Result<(), ErrorKind> {
        self.write_literal(Label::Set, literal)
    }

    /// Records `literal` as conflicting.
    pub fn conflict(&mut self, literal: &impl Literal) -> Result<(), ErrorKind> {
        self.write_literal(Label::Conflict, literal)
    }

    /// Records the addition of `clause` with identifier `id`.
    ///
    /// The identifier should be unique among all learnt clauses which have not been unlearnt, though this is not checked.
    pub fn learn_clause(
        &mut self,
        id: ClauseId,
        clause: &(impl Clause + ?Sized),
    ) -> Result<(), ErrorKind> {
        self.recording()?;

        let mut records = Vec::with_capacity(clause.size() + 2);
        records.push(Record::new(Label::Learn, self.payload(id)?));
        records.push(Record::new(Label::Size, self.payload(clause.size())?));
        for literal in clause.literals() {
            let literal = self.encode_literal(literal)?;
            records.push(Record::new(Label::Literal, literal));
        }

        self.write(&records)
    }

    /// Records the removal of the clause with identifier `id`.
    ///
    /// The clause should have been learnt and not unlearnt, though this is not checked.
    pub fn unlearn_clause(&mut self, id: ClauseId) -> Result<(), ErrorKind> {
        self.recording()?;
        let payload = self.payload(id)?;
        self.write(&[Record::new(Label::Unlearn, payload)])
    }

    /// Records a restart, noting the count of restarts before this restart.
    pub fn restart(&mut self) -> Result<(), ErrorKind> {
        self.recording()?;
        let payload = self.payload(self.restarts)?;
        self.write(&[Record::new(Label::Restart, payload)])?;
        self.restarts += 1;
        Ok(())
    }

    /// Writes the simplified instance.
    ///
    /// The simplified instance may be written at most once.
    pub fn write_simplified<'c, C: Clause + ?Sized + 'c>(
        &mut self,
        formula: impl IntoIterator<Item = &'c C>,
    ) -> Result<(), ErrorKind> {
        self.simplified.write_formula(formula)
    }

    /// Writes the header of the trace, and returns the header written.
    ///
    /// If the trace is corrupt, events are flushed but the header is left zeroed.
    pub fn finalise(mut self) -> Result<Header, ErrorKind> {
        self.finalise_in_place()
    }

    /// The current decision level.
    pub fn level(&self) -> DecisionLevel {
        self.levels.level()
    }

    /// The count of restarts recorded.
    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// The bytes reserved for the header.
    pub fn header_size(&self) -> HeaderSize {
        self.header_size
    }

    /// Bytes written to the trace, and so the offset of the next event.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn state(&self) -> TraceState {
        self.state
    }

    pub fn trace_path(&self) -> &Path {
        &self.path
    }
}

impl Tracer {
    fn recording(&self) -> Result<(), ErrorKind> {
        match self.state {
            TraceState::Recording => Ok(()),
            TraceState::Corrupt => Err(err::TraceError::Corrupt.into()),
            TraceState::Finalised => Err(err::TraceError::Finalised.into()),
        }
    }

    /// Marks the trace as corrupt and returns the error.
    fn corrupt(&mut self, error: ErrorKind) -> ErrorKind {
        log::error!(target: targets::TRACE, "Trace corrupt: {error:?}");
        self.state = TraceState::Corrupt;
        error
    }

    /// `value` as the payload of a record.
    fn payload<T: TryInto<i32>>(&mut self, value: T) -> Result<i32, ErrorKind> {
        match value.try_into() {
            Ok(payload) => Ok(payload),
            Err(_) => Err(self.corrupt(err::TraceError::PayloadOverflow.into())),
        }
    }

    fn encode_literal(&mut self, literal: &impl Literal) -> Result<IntLiteral, ErrorKind> {
        let atom = literal.atom();
        match atom::is_traceable(atom) {
            true => Ok(IntLiteral::new(atom, literal.polarity())),
            false => Err(self.corrupt(err::TraceError::InvalidAtom(atom).into())),
        }
    }

    fn write_literal(&mut self, label: Label, literal: &impl Literal) -> Result<(), ErrorKind> {
        self.recording()?;
        let payload = self.encode_literal(literal)?;
        self.write(&[Record::new(label, payload)])
    }

    fn write(&mut self, records: &[Record]) -> Result<(), ErrorKind> {
        let Some(file) = self.file.as_mut() else {
            return Err(err::TraceError::Finalised.into());
        };

        let mut written = Ok(());
        for record in records {
            log::trace!(target: targets::TRACE, "{} {}", record.label, record.payload);
            written = file.write_all(&record.to_bytes());
            if written.is_err() {
                break;
            }
            self.bytes_written += RECORD_SIZE as u64;
        }

        match written {
            Ok(()) => Ok(()),
            Err(e) => Err(self.corrupt(e.into())),
        }
    }

    /// Flushes events, closes the trace, and writes the header over the reserved space of the reopened trace.
    fn finalise_in_place(&mut self) -> Result<Header, ErrorKind> {
        let Some(mut file) = self.file.take() else {
            return Err(err::TraceError::Finalised.into());
        };

        if self.state == TraceState::Corrupt {
            if let Err(e) = file.flush() {
                log::error!(target: targets::HEADER, "Failed to flush corrupt trace {:?}: {e:?}", self.path);
            }
            if let Err(e) = self.simplified.flush() {
                log::error!(target: targets::SIMPLIFIED, "Failed to flush simplified instance: {e:?}");
            }
            log::error!(target: targets::HEADER, "Header of corrupt trace {:?} left zeroed", self.path);
            return Err(err::TraceError::Corrupt.into());
        }

        let file = match file.into_inner() {
            Ok(file) => file,
            Err(e) => return Err(self.corrupt(e.into_error().into())),
        };
        drop(file);

        let header = Header {
            restarts: self.restarts,
            finalised: true,
            ..self.header
        };

        let patch = std::fs::OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(ErrorKind::from)
            .and_then(|mut file| header.patch(&mut file, self.header_size));
        if let Err(e) = patch {
            return Err(self.corrupt(e));
        }

        self.state = TraceState::Finalised;
        self.simplified.flush()?;

        log::info!(target: targets::TRACE, "Finalised trace {:?} of {} bytes", self.path, self.bytes_written);
        Ok(header)
    }
}

impl Drop for Tracer {
    fn drop(&mut self) {
        if self.file.is_some() {
            if let Err(e) = self.finalise_in_place() {
                log::error!(target: targets::TRACE, "Failed to finalise trace {:?}: {e:?}", self.path);
            }
        }
    }
}
