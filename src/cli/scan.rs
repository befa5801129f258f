//! Scan command implementation

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::cli::{Cli, GlobalOptions};
use crate::config::ScanConfig;
use crate::error::Result;
use crate::output;
use crate::scan::{self, Platform};

/// Resolve settings and run (or print) the scan
pub async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    let file_config = match cli.config.as_deref() {
        Some(path) => {
            debug!("Loading settings from {}", path.display());
            ScanConfig::load_from(path)?
        }
        None => ScanConfig::default(),
    };
    let config = cli.scan.resolve(file_config);
    debug!("Resolved settings: {:?}", config);

    let platform = Platform::current();

    if opts.dry_run {
        let command = scan::prepare(&config, platform)?;
        return output::print(&command, opts.format);
    }

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(watch_for_cancellation(cancel.clone(), opts.clone()));

    let result = scan::run(&config, platform, &cancel).await;
    watcher.abort();
    result
}

/// Fire `cancel` on Ctrl-C, SIGTERM or when the step deadline passes
async fn watch_for_cancellation(cancel: CancellationToken, opts: GlobalOptions) {
    let deadline = async {
        match opts.deadline() {
            Some(limit) => {
                tokio::time::sleep(limit).await;
                warn!("Step deadline of {}s reached", limit.as_secs());
            }
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        _ = shutdown_signal() => info!("Shutdown signal received"),
        _ = deadline => {}
    }
    cancel.cancel();
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let term = async {
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c() => {}
        _ = term => {}
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    ctrl_c().await;
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
