//! Black Duck plugin - runs a Detect scan as a CI pipeline step

use clap::Parser;

mod cli;
mod config;
mod error;
mod output;
mod scan;

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(err) = cli::scan::run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(err.exit_code());
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the configured level
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}
