/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information when a trace is not as expected.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [events](crate::reports::trace::event) written to a trace
    pub const TRACE: &str = "trace";

    /// Logs related to the [header](crate::reports::trace::header) of a trace
    pub const HEADER: &str = "header";

    /// Logs related to the [simplified instance](crate::reports::simplified)
    pub const SIMPLIFIED: &str = "simplified";

    /// Logs related to [reading](crate::reports::trace::reader) a trace
    pub const READER: &str = "reader";
}
