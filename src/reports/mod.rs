/*!
Reports written alongside a solve.

- A [trace] of the events of a solve.
- The [simplified] instance solved.
*/

pub mod simplified;
pub mod trace;

/// Whether a trace was finalised, as noted by the header of the trace.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Completion {
    /// The header of the trace was written after the final event.
    Finalised,

    /// The header of the trace was never written, and so the trace may be missing events.
    Incomplete,
}

impl std::fmt::Display for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finalised => write!(f, "Finalised"),
            Self::Incomplete => write!(f, "Incomplete"),
        }
    }
}
