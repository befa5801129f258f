//! Scan configuration for the Black Duck plugin

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ConfigError, Result};

/// Environment variable carrying the Black Duck server URL
pub const URL_ENV: &str = "PLUGIN_BLACKDUCK_URL";
/// Environment variable carrying the Black Duck API token
pub const TOKEN_ENV: &str = "PLUGIN_BLACKDUCK_TOKEN";
/// Environment variable carrying the project name
pub const PROJECT_ENV: &str = "PLUGIN_BLACKDUCK_PROJECT";

/// Placeholder printed in place of secrets
pub const REDACTED: &str = "****";

/// Settings for a single scan run.
///
/// Built once per invocation from flags, environment and the optional
/// settings file, then only read.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Black Duck server URL
    pub service_url: String,

    /// Black Duck API token (secret)
    pub auth_token: String,

    /// Project name reported to Black Duck
    pub project_name: String,

    /// Run Detect without contacting the server
    pub offline_mode: bool,

    /// Only test the server connection
    pub test_connection_only: bool,

    /// Force BDIO generation in offline mode
    pub offline_bdio_mode: bool,

    /// Trust all server certificates
    pub trust_all_certificates: bool,

    /// Detect timeout in seconds; zero or negative leaves Detect's default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i64>,

    /// Scan mode name (RAPID, STATELESS or INTELLIGENT)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_mode: Option<String>,

    /// Raw arguments appended after every other flag.
    ///
    /// Caller-controlled and passed to the shell unparsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_arguments: Option<String>,

    /// Replaces the default `java -jar <detect.jar>` invocation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanner_command: Option<String>,
}

impl ScanConfig {
    /// Load settings from a YAML file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: ScanConfig = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Validate that the required settings are present
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&'static str> = [
            (URL_ENV, &self.service_url),
            (TOKEN_ENV, &self.auth_token),
            (PROJECT_ENV, &self.project_name),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingRequired(missing).into());
        }
        Ok(())
    }

    /// Timeout to pass to Detect, if one is set
    pub fn effective_timeout(&self) -> Option<i64> {
        self.timeout_seconds.filter(|secs| *secs > 0)
    }

    /// Raw scan mode, ignoring empty values
    pub fn requested_scan_mode(&self) -> Option<&str> {
        self.scan_mode.as_deref().filter(|mode| !mode.is_empty())
    }

    /// Extra arguments, ignoring empty values
    pub fn extra_arguments(&self) -> Option<&str> {
        self.extra_arguments.as_deref().filter(|args| !args.is_empty())
    }
}

impl fmt::Debug for ScanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.auth_token.is_empty() { "" } else { REDACTED };
        f.debug_struct("ScanConfig")
            .field("service_url", &self.service_url)
            .field("auth_token", &token)
            .field("project_name", &self.project_name)
            .field("offline_mode", &self.offline_mode)
            .field("test_connection_only", &self.test_connection_only)
            .field("offline_bdio_mode", &self.offline_bdio_mode)
            .field("trust_all_certificates", &self.trust_all_certificates)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("scan_mode", &self.scan_mode)
            .field("extra_arguments", &self.extra_arguments)
            .field("scanner_command", &self.scanner_command)
            .finish()
    }
}

/// Detect scan strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Rapid,
    Stateless,
    Intelligent,
}

impl ScanMode {
    /// Names accepted by Detect, in display order
    pub const NAMES: [&'static str; 3] = ["RAPID", "STATELESS", "INTELLIGENT"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Rapid => "RAPID",
            ScanMode::Stateless => "STATELESS",
            ScanMode::Intelligent => "INTELLIGENT",
        }
    }
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "RAPID" => Ok(ScanMode::Rapid),
            "STATELESS" => Ok(ScanMode::Stateless),
            "INTELLIGENT" => Ok(ScanMode::Intelligent),
            other => Err(format!(
                "Unexpected scan mode: {}. Scan mode can be {}.",
                other,
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::tempdir;

    fn valid_config() -> ScanConfig {
        ScanConfig {
            service_url: "https://blackduck.example.com".to_string(),
            auth_token: "test-token".to_string(),
            project_name: "test-project".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert!(config.service_url.is_empty());
        assert!(!config.offline_mode);
        assert!(!config.trust_all_certificates);
        assert!(config.timeout_seconds.is_none());
        assert!(config.scan_mode.is_none());
    }

    #[test]
    fn test_validate_accepts_required_fields() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_each_missing_field() {
        let cases = [
            (
                ScanConfig {
                    service_url: String::new(),
                    ..valid_config()
                },
                vec![URL_ENV],
            ),
            (
                ScanConfig {
                    auth_token: String::new(),
                    ..valid_config()
                },
                vec![TOKEN_ENV],
            ),
            (
                ScanConfig {
                    project_name: String::new(),
                    ..valid_config()
                },
                vec![PROJECT_ENV],
            ),
            (ScanConfig::default(), vec![URL_ENV, TOKEN_ENV, PROJECT_ENV]),
        ];

        for (config, expected) in cases {
            match config.validate() {
                Err(Error::Config(ConfigError::MissingRequired(missing))) => {
                    assert_eq!(missing, expected)
                }
                other => panic!("Expected MissingRequired, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_effective_timeout() {
        let mut config = valid_config();
        assert_eq!(config.effective_timeout(), None);

        config.timeout_seconds = Some(300);
        assert_eq!(config.effective_timeout(), Some(300));

        config.timeout_seconds = Some(0);
        assert_eq!(config.effective_timeout(), None);

        config.timeout_seconds = Some(-5);
        assert_eq!(config.effective_timeout(), None);
    }

    #[test]
    fn test_empty_optional_strings_are_unset() {
        let config = ScanConfig {
            scan_mode: Some(String::new()),
            extra_arguments: Some(String::new()),
            ..valid_config()
        };
        assert_eq!(config.requested_scan_mode(), None);
        assert_eq!(config.extra_arguments(), None);
    }

    #[test]
    fn test_debug_masks_token() {
        let rendered = format!("{:?}", valid_config());
        assert!(!rendered.contains("test-token"));
        assert!(rendered.contains(REDACTED));
    }

    #[test]
    fn test_scan_mode_parsing() {
        assert_eq!("RAPID".parse::<ScanMode>(), Ok(ScanMode::Rapid));
        assert_eq!("STATELESS".parse::<ScanMode>(), Ok(ScanMode::Stateless));
        assert_eq!("INTELLIGENT".parse::<ScanMode>(), Ok(ScanMode::Intelligent));

        let err = "rapid".parse::<ScanMode>().unwrap_err();
        assert!(err.contains("RAPID, STATELESS, INTELLIGENT"));
        assert!("INVALID".parse::<ScanMode>().is_err());
    }

    #[test]
    fn test_load_from_yaml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("blackduck.yaml");
        fs::write(
            &path,
            "service_url: https://bd.internal\n\
             project_name: api\n\
             offline_mode: true\n\
             timeout_seconds: 120\n",
        )
        .unwrap();

        let config = ScanConfig::load_from(&path).unwrap();
        assert_eq!(config.service_url, "https://bd.internal");
        assert_eq!(config.project_name, "api");
        assert!(config.auth_token.is_empty());
        assert!(config.offline_mode);
        assert_eq!(config.timeout_seconds, Some(120));
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("absent.yaml");

        match ScanConfig::load_from(&path) {
            Err(Error::Config(ConfigError::NotFound(p))) => assert_eq!(p, path),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_malformed_yaml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("broken.yaml");
        fs::write(&path, "service_url: [unclosed").unwrap();

        assert!(matches!(
            ScanConfig::load_from(&path),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }
}
