//! Detect command-line construction
//!
//! Building is a pure function of [`ScanConfig`] and [`Platform`]: the same
//! inputs always produce the same [`CommandLine`], flag order included.

use serde::Serialize;
use std::fmt;

use crate::config::{REDACTED, ScanConfig, ScanMode};

/// Detect jar location on Linux/macOS runners
pub const POSIX_SCANNER: &str = "java -jar /opt/synopsys-detect-9.7.0.jar";
/// Detect jar location on Windows runners
pub const WINDOWS_SCANNER: &str = r"java -jar 'C:\opt\synopsys-detect-9.7.0.jar'";

/// Shell strategy for the host the scan runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// `powershell.exe -Command <script>`
    Windows,
    /// `bash -c <script>`
    Posix,
}

impl Platform {
    /// Platform of the running host
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    fn quote(self, value: &str) -> String {
        match self {
            Platform::Windows => format!("'{}'", value),
            Platform::Posix => format!("\"{}\"", value),
        }
    }

    fn default_scanner(self) -> &'static str {
        match self {
            Platform::Windows => WINDOWS_SCANNER,
            Platform::Posix => POSIX_SCANNER,
        }
    }

    fn wrap(self, script: String) -> CommandLine {
        match self {
            Platform::Windows => {
                CommandLine::new("powershell.exe", vec!["-Command".to_string(), script])
            }
            Platform::Posix => CommandLine::new("bash", vec!["-c".to_string(), script]),
        }
    }
}

/// A fully resolved process invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandLine {
    /// Program to launch
    pub program: String,

    /// Arguments passed to the program
    pub args: Vec<String>,

    /// Fragments to mask when the command is shown, paired with their masked form
    #[serde(skip)]
    redactions: Vec<(String, String)>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            redactions: Vec::new(),
        }
    }

    /// Mask `fragment` as `masked` whenever this command is displayed
    pub fn with_redaction(mut self, fragment: String, masked: String) -> Self {
        self.redactions.push((fragment, masked));
        self
    }

    /// Copy of this command safe to print or serialize
    pub fn redacted(&self) -> CommandLine {
        let mask = |value: &str| {
            self.redactions
                .iter()
                .fold(value.to_string(), |acc, (fragment, masked)| {
                acc.replace(fragment, masked)
            })
        };

        CommandLine {
            program: mask(self.program.as_str()),
            args: self.args.iter().map(|arg| mask(arg.as_str())).collect(),
            redactions: Vec::new(),
        }
    }
}

/// Renders the redacted command, program and arguments separated by spaces
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.redacted();
        write!(f, "{}", shown.program)?;
        for arg in &shown.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Build the Detect invocation for `config` on `platform`
pub fn build_command(config: &ScanConfig, platform: Platform) -> CommandLine {
    let scanner = config
        .scanner_command
        .as_deref()
        .filter(|cmd| !cmd.is_empty())
        .unwrap_or(platform.default_scanner());

    let token_flag = format!("--blackduck.api.token={}", platform.quote(&config.auth_token));
    let masked_flag = format!("--blackduck.api.token={}", platform.quote(REDACTED));

    let mut script = format!(
        "{} --blackduck.url={} {} --detect.project.name={}",
        scanner,
        platform.quote(&config.service_url),
        token_flag,
        platform.quote(&config.project_name),
    );

    for flag in optional_flags(config) {
        script.push(' ');
        script.push_str(&flag);
    }

    // Trust boundary: appended as-is for the shell to interpret.
    if let Some(extra) = config.extra_arguments() {
        script.push(' ');
        script.push_str(extra);
    }

    platform.wrap(script).with_redaction(token_flag, masked_flag)
}

/// Optional Detect flags in their fixed order
fn optional_flags(config: &ScanConfig) -> Vec<String> {
    let mut flags = Vec::new();

    if config.offline_mode {
        flags.push("--blackduck.offline.mode=true".to_string());
    }
    if config.test_connection_only {
        flags.push("--detect.test.connection=true".to_string());
    }
    if config.offline_bdio_mode {
        flags.push("--blackduck.offline.mode.force.bdio=true".to_string());
    }
    if config.trust_all_certificates {
        flags.push("--blackduck.trust.cert=true".to_string());
    }
    if let Some(timeout) = config.effective_timeout() {
        flags.push(format!("--detect.timeout={}", timeout));
    }
    if let Some(requested) = config.requested_scan_mode() {
        match requested.parse::<ScanMode>() {
            Ok(mode) => flags.push(format!("--detect.blackduck.scan.mode={}", mode)),
            Err(msg) => log::warn!("{}", msg),
        }
    }

    flags
}
