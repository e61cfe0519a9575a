/*!
A reader for traces.

The reader decodes the header of a trace and then the events of the trace, checking the structure of the trace as it goes:
- Each byte which begins a record is a label.
- Learnt clauses are an `L` record, an `S` record, and as many `x` records as noted by the `S` record.
- Changes of decision level are checked with the same [LevelTracker] used when writing.
- Restarts are numbered from zero.

The reader does not replay a search, as that requires knowledge of the formula solved.

```rust
# use otter_trace::config::Config;
# use otter_trace::reports::{Completion, trace::{Tracer, event::Event, reader::TraceReader}};
# use otter_trace::structures::literal::{ABLiteral, Literal};
# let dir = tempfile::tempdir().unwrap();
# let base = dir.path().join("foo");
let mut tracer = Tracer::from_basename(&base, "foo.cnf", Config::default()).unwrap();
tracer.new_decision_level(1).unwrap();
tracer.branch(&ABLiteral::new(3, false)).unwrap();
let path = tracer.trace_path().to_path_buf();
tracer.finalise().unwrap();

let file = std::fs::File::open(path).unwrap();
let mut reader = TraceReader::new(std::io::BufReader::new(file), &Config::default()).unwrap();
assert_eq!(reader.completion(), Completion::Finalised);

assert_eq!(reader.next_event(), Ok(Some(Event::DecisionLevel(1))));
assert_eq!(reader.next_event(), Ok(Some(Event::Branch(-3))));
assert_eq!(reader.next_event(), Ok(None));
```
*/

use std::io::Read;

use crate::{
    config::Config,
    misc::log::targets::{self},
    reports::{
        trace::{
            event::{Event, Label, Record, RECORD_SIZE},
            header::{Header, HeaderSize, HEADER_ALIGNMENT},
            level::LevelTracker,
        },
        Completion,
    },
    types::err::{self, ErrorKind},
};

/// The most literals reserved for a clause before the literals are read.
const CLAUSE_CAPACITY_LIMIT: usize = 1024;

/// Reads the header and then events of a trace.
pub struct TraceReader<R: Read> {
    reader: R,

    /// The header, as read.
    header: Header,

    /// The offset of the first event.
    header_size: HeaderSize,

    completion: Completion,

    /// Whether the header was zeroed, and so its layout taken from the config.
    zeroed: bool,

    /// The offset of the next record.
    offset: u64,

    levels: LevelTracker,

    /// The count of restart events read.
    restarts: u32,

    /// Set after an error, after which no further events are read.
    failed: bool,
}

impl<R: Read> TraceReader<R> {
    /// Reads the header of a trace from `reader`.
    ///
    /// If the header is zeroed the size of the header is taken from the layout given by `config`.
    pub fn new(mut reader: R, config: &Config) -> Result<Self, ErrorKind> {
        let size = read_i32(&mut reader, 0)?;

        let (header, header_size, completion) = match size {
            0 => {
                let header = Header::placeholder(config.finalisation_flag.value);
                let header_size = header.dry_run()?;
                skip(&mut reader, header_size as u64 - 4)?;

                log::info!(target: targets::READER, "Zeroed header, assuming {header_size} bytes");
                (header, header_size, Completion::Incomplete)
            }

            _ if size < 8 || size % HEADER_ALIGNMENT as i32 != 0 => {
                return Err(err::ReadError::CorruptHeader(size).into());
            }

            _ => {
                let Ok(restarts) = u32::try_from(read_i32(&mut reader, 4)?) else {
                    return Err(err::ReadError::CorruptHeader(size).into());
                };

                let mut position = 8;
                let finalisation_flag = size >= 12;
                let finalised = match finalisation_flag {
                    true => {
                        position += 4;
                        read_i32(&mut reader, 8)? == 1
                    }
                    false => true,
                };
                skip(&mut reader, size as u64 - position)?;

                let header = Header {
                    restarts,
                    finalisation_flag,
                    finalised,
                };
                let completion = match finalised {
                    true => Completion::Finalised,
                    false => Completion::Incomplete,
                };

                log::info!(target: targets::READER, "Read header {header:?}");
                (header, size as HeaderSize, completion)
            }
        };

        Ok(TraceReader {
            reader,
            header,
            header_size,
            completion,
            zeroed: size == 0,
            offset: header_size as u64,
            levels: LevelTracker::default(),
            restarts: 0,
            failed: false,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The offset of the first event.
    pub fn header_size(&self) -> HeaderSize {
        self.header_size
    }

    pub fn completion(&self) -> Completion {
        self.completion
    }

    /// Whether the header was zeroed.
    ///
    /// A zeroed header does not record its own size, so an unknown label shortly after the header may instead indicate a trace written with a different finalisation flag.
    pub fn header_zeroed(&self) -> bool {
        self.zeroed
    }

    /// The offset of the next record.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The count of restart events read.
    pub fn restarts_read(&self) -> u32 {
        self.restarts
    }

    /// The next record, if the trace has not ended.
    pub fn next_record(&mut self) -> Result<Option<Record>, ErrorKind> {
        let mut bytes = [0; RECORD_SIZE];
        let mut filled = 0;
        while filled < RECORD_SIZE {
            match self.reader.read(&mut bytes[filled..]) {
                Ok(0) => break,
                Ok(count) => filled += count,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        match filled {
            0 => Ok(None),

            RECORD_SIZE => match Record::from_bytes(bytes) {
                Some(record) => {
                    self.offset += RECORD_SIZE as u64;
                    Ok(Some(record))
                }
                None => Err(err::ReadError::UnknownLabel {
                    label: bytes[0],
                    offset: self.offset,
                }
                .into()),
            },

            _ => Err(err::ReadError::TruncatedRecord(self.offset).into()),
        }
    }

    /// The next event, if the trace has not ended.
    pub fn next_event(&mut self) -> Result<Option<Event>, ErrorKind> {
        if self.failed {
            return Ok(None);
        }
        let event = self.read_event();
        if event.is_err() {
            self.failed = true;
        }
        event
    }

    fn read_event(&mut self) -> Result<Option<Event>, ErrorKind> {
        let offset = self.offset;
        let Some(record) = self.next_record()? else {
            return Ok(None);
        };

        let invalid = || err::ReadError::InvalidPayload {
            label: record.label,
            offset,
        };

        let event = match record.label {
            Label::Backtrack => {
                let level = u32::try_from(record.payload).map_err(|_| invalid())?;
                self.levels
                    .backtrack(level)
                    .map_err(err::ReadError::Level)?;
                Event::Backtrack(level)
            }

            Label::DecisionLevel => {
                let level = u32::try_from(record.payload).map_err(|_| invalid())?;
                self.levels
                    .new_decision_level(level)
                    .map_err(err::ReadError::Level)?;
                Event::DecisionLevel(level)
            }

            Label::Branch => Event::Branch(self.literal(record, offset)?),

            Label::Set => Event::Set(self.literal(record, offset)?),

            Label::Conflict => Event::Conflict(self.literal(record, offset)?),

            Label::Learn => {
                let id = u32::try_from(record.payload).map_err(|_| invalid())?;

                let size_offset = self.offset;
                let size = match self.next_record()? {
                    Some(Record {
                        label: Label::Size,
                        payload,
                    }) => usize::try_from(payload).map_err(|_| err::ReadError::InvalidPayload {
                        label: Label::Size,
                        offset: size_offset,
                    })?,
                    Some(other) => {
                        return Err(err::ReadError::UnexpectedLabel {
                            label: other.label,
                            offset: size_offset,
                        }
                        .into())
                    }
                    None => return Err(err::ReadError::TruncatedRecord(size_offset).into()),
                };

                // The size is unchecked until each literal is read.
                let mut clause = Vec::with_capacity(size.min(CLAUSE_CAPACITY_LIMIT));
                for _ in 0..size {
                    let literal_offset = self.offset;
                    match self.next_record()? {
                        Some(record) if record.label == Label::Literal => {
                            clause.push(self.literal(record, literal_offset)?)
                        }
                        Some(other) => {
                            return Err(err::ReadError::UnexpectedLabel {
                                label: other.label,
                                offset: literal_offset,
                            }
                            .into())
                        }
                        None => return Err(err::ReadError::TruncatedRecord(literal_offset).into()),
                    }
                }

                Event::Learn { id, clause }
            }

            Label::Size | Label::Literal => {
                return Err(err::ReadError::UnexpectedLabel {
                    label: record.label,
                    offset,
                }
                .into())
            }

            Label::Unlearn => Event::Unlearn(u32::try_from(record.payload).map_err(|_| invalid())?),

            Label::Restart => {
                if record.payload != self.restarts as i32 {
                    return Err(err::ReadError::RestartCount {
                        expected: self.restarts,
                        found: record.payload,
                    }
                    .into());
                }
                self.restarts += 1;
                Event::Restart(record.payload as u32)
            }
        };

        log::trace!(target: targets::READER, "{offset}: {event}");
        Ok(Some(event))
    }

    /// The literal of `record`, which is never zero.
    fn literal(&self, record: Record, offset: u64) -> Result<i32, ErrorKind> {
        match record.payload {
            0 => Err(err::ReadError::InvalidPayload {
                label: record.label,
                offset,
            }
            .into()),
            literal => Ok(literal),
        }
    }
}

impl<R: Read> Iterator for TraceReader<R> {
    type Item = Result<Event, ErrorKind>;

    /// The next event, or the first error found.
    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}

/// Reads a native endian i32 from `reader`, where `offset` is the offset of the i32 in the trace.
fn read_i32(reader: &mut impl Read, offset: u64) -> Result<i32, ErrorKind> {
    let mut bytes = [0; 4];
    match reader.read_exact(&mut bytes) {
        Ok(()) => Ok(i32::from_ne_bytes(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            Err(err::ReadError::TruncatedRecord(offset).into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Skips `count` bytes of `reader`.
fn skip(reader: &mut impl Read, count: u64) -> Result<(), ErrorKind> {
    let skipped = std::io::copy(&mut reader.take(count), &mut std::io::sink())?;
    match skipped == count {
        true => Ok(()),
        false => Err(err::ReadError::TruncatedRecord(skipped).into()),
    }
}
