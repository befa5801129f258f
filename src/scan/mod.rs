//! Scan invocation: validate, build the Detect command, run it

pub mod command;
pub mod process;

pub use command::{CommandLine, Platform, build_command};

use log::info;
use tokio_util::sync::CancellationToken;

use crate::config::ScanConfig;
use crate::error::Result;

/// Validate `config` and build the command for `platform`.
///
/// Nothing is started; a [`ConfigError`](crate::error::ConfigError) is
/// returned before any command exists.
pub fn prepare(config: &ScanConfig, platform: Platform) -> Result<CommandLine> {
    config.validate()?;
    Ok(build_command(config, platform))
}

/// Run one scan end to end
pub async fn run(
    config: &ScanConfig,
    platform: Platform,
    cancel: &CancellationToken,
) -> Result<()> {
    let command = prepare(config, platform)?;

    info!(
        "Scanning project '{}' against {}",
        config.project_name, config.service_url
    );
    process::execute(&command, cancel).await?;
    info!("Black Duck scan completed");

    Ok(())
}
