//! Common CLI types

/// Output format for `--dry-run`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain command line, as echoed before a real run
    #[default]
    Text,
    /// JSON object with program and arguments
    Json,
}
