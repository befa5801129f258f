//! CLI definition and the scan command handler

use clap::Parser;
use std::path::PathBuf;

pub mod args;
pub mod scan;

pub use args::{GlobalOptions, OutputFormat, ScanArgs};

/// Black Duck plugin - run a Detect scan as a CI pipeline step
#[derive(Parser, Debug)]
#[command(name = "blackduck-plugin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// YAML settings file (flags and environment take precedence)
    #[arg(long, env = "PLUGIN_CONFIG", hide_env = true)]
    pub config: Option<PathBuf>,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long, env = "PLUGIN_LOG_LEVEL", default_value = "info", hide_env = true)]
    pub log_level: String,

    /// Validate settings and print the command without running it
    #[arg(
        long,
        env = "PLUGIN_DRY_RUN",
        hide_env = true,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub dry_run: bool,

    /// Dry-run output format (text, json)
    #[arg(
        long,
        env = "PLUGIN_FORMAT",
        default_value = "text",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Cancel the scan after this many seconds
    #[arg(long, env = "PLUGIN_STEP_DEADLINE", hide_env = true)]
    pub deadline: Option<u64>,
}
