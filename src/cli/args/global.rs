//! Options that control how the plugin runs, as opposed to what it scans

use std::time::Duration;

use crate::cli::{Cli, OutputFormat};

/// Run-level options, resolved once per invocation by the scan command handler.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Print the command instead of running it
    pub dry_run: bool,

    /// Dry-run output format
    pub format: OutputFormat,

    /// Cancel the scan after this many seconds
    pub deadline_secs: Option<u64>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            dry_run: cli.dry_run,
            format: cli.format,
            deadline_secs: cli.deadline,
        }
    }

    /// Step deadline; zero disables it
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
