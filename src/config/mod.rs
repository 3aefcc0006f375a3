#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_range, validate_url, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_COURSES_ENDPOINT: &str = "https://cs571.cs.wisc.edu/api/react/classes";
pub const DEFAULT_COMPLETED_ENDPOINT: &str =
    "https://cs571.cs.wisc.edu/api/react/students/5022025924/classes/completed/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Where the two startup fetches go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    pub courses_endpoint: String,
    pub completed_endpoint: String,
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            courses_endpoint: DEFAULT_COURSES_ENDPOINT.to_string(),
            completed_endpoint: DEFAULT_COMPLETED_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ConfigProvider for SourceSettings {
    fn courses_endpoint(&self) -> &str {
        &self.courses_endpoint
    }

    fn completed_endpoint(&self) -> &str {
        &self.completed_endpoint
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

impl Validate for SourceSettings {
    fn validate(&self) -> Result<()> {
        validate_url("courses_endpoint", &self.courses_endpoint)?;
        validate_url("completed_endpoint", &self.completed_endpoint)?;
        validate_range("timeout_secs", self.timeout_secs, 1, MAX_TIMEOUT_SECS)?;
        Ok(())
    }
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub courses_endpoint: Option<String>,
    pub completed_endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub verbose: bool,
    pub log_format: Option<LogFormat>,
}

/// Effective settings: defaults, then the config file, then overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub source: SourceSettings,
    pub verbose: bool,
    pub log_format: LogFormat,
}

impl Settings {
    pub fn resolve(file: Option<TomlConfig>, overrides: Overrides) -> Self {
        let mut settings = Settings::default();

        if let Some(file) = file {
            if let Some(source) = file.source {
                if let Some(endpoint) = source.courses_endpoint {
                    settings.source.courses_endpoint = endpoint;
                }
                if let Some(endpoint) = source.completed_endpoint {
                    settings.source.completed_endpoint = endpoint;
                }
                if let Some(timeout) = source.timeout_seconds {
                    settings.source.timeout_secs = timeout;
                }
            }
            if let Some(logging) = file.logging {
                settings.verbose = logging.verbose.unwrap_or(false);
                settings.log_format = logging.format.unwrap_or_default();
            }
        }

        if let Some(endpoint) = overrides.courses_endpoint {
            settings.source.courses_endpoint = endpoint;
        }
        if let Some(endpoint) = overrides.completed_endpoint {
            settings.source.completed_endpoint = endpoint;
        }
        if let Some(timeout) = overrides.timeout_secs {
            settings.source.timeout_secs = timeout;
        }
        settings.verbose |= overrides.verbose;
        if let Some(format) = overrides.log_format {
            settings.log_format = format;
        }

        settings
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        self.source.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::resolve(None, Overrides::default());
        assert_eq!(settings.source.courses_endpoint, DEFAULT_COURSES_ENDPOINT);
        assert_eq!(settings.log_format, LogFormat::Compact);
        assert!(!settings.verbose);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[source]
courses_endpoint = "https://file.example.com/classes"
timeout_seconds = 12

[logging]
format = "json"
"#,
        )
        .unwrap();

        let settings = Settings::resolve(
            Some(file),
            Overrides {
                courses_endpoint: Some("http://localhost:8080/classes".to_string()),
                verbose: true,
                ..Overrides::default()
            },
        );

        assert_eq!(settings.source.courses_endpoint, "http://localhost:8080/classes");
        assert_eq!(settings.source.completed_endpoint, DEFAULT_COMPLETED_ENDPOINT);
        assert_eq!(settings.source.timeout_secs, 12);
        assert_eq!(settings.log_format, LogFormat::Json);
        assert!(settings.verbose);
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let settings = Settings::resolve(
            None,
            Overrides {
                timeout_secs: Some(0),
                ..Overrides::default()
            },
        );
        assert!(settings.validate().is_err());
    }
}
