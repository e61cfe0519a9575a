/*!
Events, and the records which encode them.

A trace is a sequence of records, each of which is a one byte [Label] followed by a four byte payload.
There is no padding between records, and no record has a length, so the structure of a trace is entirely positional.

Most events are a single record.
The exception is a learnt clause, which is an `L` record with the id of the clause, an `S` record with the size of the clause, and then an `x` record for each literal of the clause, in order.

| label | event                  | payload                           |
|-------|------------------------|-----------------------------------|
| `<`   | backtrack              | the level backtracked to          |
| `>`   | new decision level     | the new level                     |
| `B`   | branch / decision      | the literal decided               |
| `+`   | set by propagation     | the literal set                   |
| `C`   | conflict               | the conflicting literal           |
| `L`   | learnt clause          | the id of the clause              |
| `S`   | learnt clause size     | the number of literals            |
| `x`   | learnt clause literal  | a literal of the clause           |
| `U`   | unlearnt clause        | the id of the clause              |
| `R`   | restart                | the count of restarts before this |

Payloads are written in native byte order, so a trace may only be read on a machine with the same endianness as the machine which wrote the trace.

```rust
# use otter_trace::reports::trace::event::{Label, Record};
let record = Record::new(Label::Literal, -2);
let bytes = record.to_bytes();

assert_eq!(bytes[0], b'x');
assert_eq!(bytes[1..], (-2_i32).to_ne_bytes());
assert_eq!(Record::from_bytes(bytes), Some(record));
```
*/

use std::fmt::Write;

use crate::{
    reports::trace::level::DecisionLevel,
    structures::literal::IntLiteral,
};

/// The size of a record, in bytes.
pub const RECORD_SIZE: usize = 5;

/// The identifier of a learnt clause, as given by a solver.
pub type ClauseId = u32;

/// The label of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    Backtrack,
    DecisionLevel,
    Branch,
    Set,
    Conflict,
    Learn,
    Size,
    Literal,
    Unlearn,
    Restart,
}

impl Label {
    /// The byte written to a trace for the label.
    pub const fn byte(self) -> u8 {
        match self {
            Self::Backtrack => b'<',
            Self::DecisionLevel => b'>',
            Self::Branch => b'B',
            Self::Set => b'+',
            Self::Conflict => b'C',
            Self::Learn => b'L',
            Self::Size => b'S',
            Self::Literal => b'x',
            Self::Unlearn => b'U',
            Self::Restart => b'R',
        }
    }

    /// The label written as `byte`, if one exists.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'<' => Some(Self::Backtrack),
            b'>' => Some(Self::DecisionLevel),
            b'B' => Some(Self::Branch),
            b'+' => Some(Self::Set),
            b'C' => Some(Self::Conflict),
            b'L' => Some(Self::Learn),
            b'S' => Some(Self::Size),
            b'x' => Some(Self::Literal),
            b'U' => Some(Self::Unlearn),
            b'R' => Some(Self::Restart),
            _ => None,
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.byte() as char)
    }
}

/// A label and payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record {
    pub label: Label,
    pub payload: i32,
}

impl Record {
    pub fn new(label: Label, payload: i32) -> Self {
        Record { label, payload }
    }

    /// The bytes of the record, as written to a trace.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0; RECORD_SIZE];
        bytes[0] = self.label.byte();
        bytes[1..].copy_from_slice(&self.payload.to_ne_bytes());
        bytes
    }

    /// The record written as `bytes`, if the first byte is a label.
    pub fn from_bytes(bytes: [u8; RECORD_SIZE]) -> Option<Self> {
        let label = Label::from_byte(bytes[0])?;
        let payload = i32::from_ne_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
        Some(Record { label, payload })
    }
}

/// An event from a solve, as read from a trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Backtrack(DecisionLevel),
    DecisionLevel(DecisionLevel),
    Branch(IntLiteral),
    Set(IntLiteral),
    Conflict(IntLiteral),
    Learn { id: ClauseId, clause: Vec<IntLiteral> },
    Unlearn(ClauseId),
    Restart(u32),
}

impl Event {
    /// The number of bytes used to write the event to a trace.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Learn { clause, .. } => (2 + clause.len()) * RECORD_SIZE,
            _ => RECORD_SIZE,
        }
    }

    /// The label of the (first) record of the event.
    pub fn label(&self) -> Label {
        match self {
            Self::Backtrack(_) => Label::Backtrack,
            Self::DecisionLevel(_) => Label::DecisionLevel,
            Self::Branch(_) => Label::Branch,
            Self::Set(_) => Label::Set,
            Self::Conflict(_) => Label::Conflict,
            Self::Learn { .. } => Label::Learn,
            Self::Unlearn(_) => Label::Unlearn,
            Self::Restart(_) => Label::Restart,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = self.label();
        match self {
            Self::Backtrack(level) | Self::DecisionLevel(level) => write!(f, "{label} {level}"),

            Self::Branch(literal) | Self::Set(literal) | Self::Conflict(literal) => {
                write!(f, "{label} {literal}")
            }

            Self::Learn { id, clause } => {
                let mut literals = String::new();
                for literal in clause {
                    let _ = write!(literals, "{literal} ");
                }
                write!(f, "{label} {id} {}: {literals}0", clause.len())
            }

            Self::Unlearn(id) => write!(f, "{label} {id}"),

            Self::Restart(count) => write!(f, "{label} {count}"),
        }
    }
}
