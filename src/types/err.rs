//! Error types used in the library.
//!
//! - Errors during a trace are either a report of something impossible from the solver (e.g. a [TraceError::DecisionLevel]) or a failure of the file system.
//!   In either case the trace is not continued, as a corrupt trace is worse than no trace.
//! - Errors while reading a trace are noted in [ReadError], and are expected when reading a trace which was never finalised.
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::reports::trace::{event::Label, level::DecisionLevel};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Config(ConfigError),
    Header(HeaderError),
    Read(ReadError),
    Simplified(SimplifiedError),
    Trace(TraceError),

    /// Some failure of the file system, noted by kind.
    Io(std::io::ErrorKind),
}

impl From<std::io::Error> for ErrorKind {
    fn from(e: std::io::Error) -> Self {
        ErrorKind::Io(e.kind())
    }
}

/// Errors when configuring a trace.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// A value outside the bounds of the named option.
    OutOfRange(&'static str),
}

impl From<ConfigError> for ErrorKind {
    fn from(e: ConfigError) -> Self {
        ErrorKind::Config(e)
    }
}

/// Errors with the header of a trace.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HeaderError {
    /// Writing the header would overwrite the first event of the trace.
    Overrun { reserved: u32, written: u32 },

    /// The header is too large to be written.
    Size,
}

impl From<HeaderError> for ErrorKind {
    fn from(e: HeaderError) -> Self {
        ErrorKind::Header(e)
    }
}

/// Errors while reading a trace.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReadError {
    /// The header size is not a multiple of the header alignment, or too small to hold a header.
    CorruptHeader(i32),

    /// A byte which is not the label of any record, at the given offset.
    UnknownLabel { label: u8, offset: u64 },

    /// The trace ends part way through a record, at the given offset.
    ///
    /// Expected of a trace whose writer was interrupted.
    TruncatedRecord(u64),

    /// A record in an unexpected place, e.g. a clause literal without a learnt clause.
    UnexpectedLabel { label: Label, offset: u64 },

    /// A payload which is impossible for the label, e.g. a negative decision level.
    InvalidPayload { label: Label, offset: u64 },

    /// A restart which does not note the count of restarts before it.
    RestartCount { expected: u32, found: i32 },

    /// An impossible change of decision level, as noted by the same checks made while writing.
    Level(TraceError),
}

impl From<ReadError> for ErrorKind {
    fn from(e: ReadError) -> Self {
        ErrorKind::Read(e)
    }
}

/// Errors with the simplified instance.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SimplifiedError {
    /// The simplified instance has already been written.
    AlreadyWritten,
}

impl From<SimplifiedError> for ErrorKind {
    fn from(e: SimplifiedError) -> Self {
        ErrorKind::Simplified(e)
    }
}

/// Errors while recording a trace.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TraceError {
    /// A backtrack to a level which is neither below the current level nor zero.
    BacktrackLevel {
        from: DecisionLevel,
        to: DecisionLevel,
    },

    /// A new decision level which is not one more than the current level.
    DecisionLevel {
        from: DecisionLevel,
        to: DecisionLevel,
    },

    /// The atom `0`, or some atom beyond [ATOM_MAX](crate::structures::atom::ATOM_MAX).
    InvalidAtom(u32),

    /// Some value does not fit within the payload of a record.
    PayloadOverflow,

    /// The trace is corrupt, due to some earlier error, and no further events will be written.
    Corrupt,

    /// The trace has been finalised.
    Finalised,
}

impl From<TraceError> for ErrorKind {
    fn from(e: TraceError) -> Self {
        ErrorKind::Trace(e)
    }
}
