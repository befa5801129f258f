//! Output formatting for dry-run results

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::scan::CommandLine;

pub mod dry_run;

use dry_run::DryRunReport;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;
}

/// Always renders the redacted form
impl Formattable for CommandLine {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => Ok(DryRunReport::new(self).to_json()?),
        }
    }
}

/// Format and print data to stdout
pub fn print<T: Formattable>(data: &T, format: OutputFormat) -> Result<()> {
    let output = data.format(format)?;
    println!("{}", output);
    Ok(())
}
