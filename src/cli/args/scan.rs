//! Scan settings accepted as flags or `PLUGIN_*` environment variables

use clap::Args;
use clap::builder::BoolishValueParser;

use crate::config::ScanConfig;

/// Black Duck scan settings.
///
/// Every field can come from its flag or from the environment variable a CI
/// runner injects for the plugin setting of the same name.
#[derive(Debug, Clone, Args, Default)]
pub struct ScanArgs {
    /// Black Duck server URL
    #[arg(long, env = "PLUGIN_BLACKDUCK_URL")]
    pub blackduck_url: Option<String>,

    /// Black Duck API token
    #[arg(long, env = "PLUGIN_BLACKDUCK_TOKEN", hide_env_values = true)]
    pub blackduck_token: Option<String>,

    /// Project name to report under
    #[arg(long, env = "PLUGIN_BLACKDUCK_PROJECT")]
    pub blackduck_project: Option<String>,

    /// Run Detect in offline mode
    #[arg(
        long,
        env = "PLUGIN_BLACKDUCK_OFFLINEMODE",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub offline_mode: Option<bool>,

    /// Only test the connection to Black Duck
    #[arg(
        long,
        env = "PLUGIN_BLACKDUCK_TEST_CONNECTION",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub test_connection: Option<bool>,

    /// Force BDIO generation in offline mode
    #[arg(
        long,
        env = "PLUGIN_BLACKDUCK_OFFLINE_BDIO",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub offline_bdio: Option<bool>,

    /// Trust all Black Duck server certificates
    #[arg(
        long,
        env = "PLUGIN_BLACKDUCK_TRUST_CERTS",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub trust_certs: Option<bool>,

    /// Detect timeout in seconds (0 or less keeps Detect's default)
    #[arg(long, env = "PLUGIN_BLACKDUCK_TIMEOUT", allow_negative_numbers = true)]
    pub timeout: Option<i64>,

    /// Scan mode: RAPID, STATELESS or INTELLIGENT
    #[arg(long, env = "PLUGIN_BLACKDUCK_SCAN_MODE")]
    pub scan_mode: Option<String>,

    /// Extra Detect arguments, appended unmodified
    #[arg(long, env = "PLUGIN_BLACKDUCK_PROPERTIES", allow_hyphen_values = true)]
    pub properties: Option<String>,

    /// Command used to launch Detect instead of the bundled jar
    #[arg(long, env = "PLUGIN_DETECT_COMMAND")]
    pub detect_command: Option<String>,
}

impl ScanArgs {
    /// Layer these settings over values loaded from a settings file.
    ///
    /// Flags and environment win over the file, including an explicit `false`.
    pub fn resolve(self, file: ScanConfig) -> ScanConfig {
        ScanConfig {
            service_url: self.blackduck_url.unwrap_or(file.service_url),
            auth_token: self.blackduck_token.unwrap_or(file.auth_token),
            project_name: self.blackduck_project.unwrap_or(file.project_name),
            offline_mode: self.offline_mode.unwrap_or(file.offline_mode),
            test_connection_only: self.test_connection.unwrap_or(file.test_connection_only),
            offline_bdio_mode: self.offline_bdio.unwrap_or(file.offline_bdio_mode),
            trust_all_certificates: self.trust_certs.unwrap_or(file.trust_all_certificates),
            timeout_seconds: self.timeout.or(file.timeout_seconds),
            scan_mode: self.scan_mode.or(file.scan_mode),
            extra_arguments: self.properties.or(file.extra_arguments),
            scanner_command: self.detect_command.or(file.scanner_command),
        }
    }
}
