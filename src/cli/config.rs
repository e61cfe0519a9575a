/// A collection of configuration options relevant only to the CLI.
#[derive(Default)]
pub struct CliConfig {
    /// Whether to write each event of the trace.
    pub events: bool,

    /// Whether to write only the summary line.
    pub quiet: bool,
}
