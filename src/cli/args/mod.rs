//! CLI argument types
//!
//! Argument groups are flattened into [`Cli`](crate::cli::Cli) with
//! `#[command(flatten)]`.

mod common;
mod global;
mod scan;

pub use common::OutputFormat;
pub use global::GlobalOptions;
pub use scan::ScanArgs;
