//! Machine-readable dry-run report

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::scan::CommandLine;

/// The command a real run would execute, with secrets masked
#[derive(Debug, Serialize)]
pub struct DryRunReport {
    pub program: String,
    pub args: Vec<String>,
    pub plugin_version: &'static str,
    pub generated_at: DateTime<Utc>,
}

impl DryRunReport {
    pub fn new(command: &CommandLine) -> Self {
        let shown = command.redacted();
        Self {
            program: shown.program,
            args: shown.args,
            plugin_version: env!("CARGO_PKG_VERSION"),
            generated_at: Utc::now(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
