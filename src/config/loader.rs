//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ConfigWarning, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A validated configuration plus anything worth warning about.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ServiceConfig,
    pub warnings: Vec<ConfigWarning>,
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<LoadedConfig, ConfigError> {
    let config: ServiceConfig = toml::from_str(content)?;
    let warnings = validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(LoadedConfig { config, warnings })
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;

    #[test]
    fn test_parse_full_config() {
        let loaded = parse_config(
            r#"
            [authorizer]
            required_header = "x-api-key"
            allowed_values = ["secret1", "secret2"]

            [observability]
            log_level = "debug"
            log_format = "json"
            "#,
        )
        .unwrap();

        let cfg = loaded.config;
        assert_eq!(cfg.authorizer.required_header, "x-api-key");
        assert!(cfg.authorizer.allows("secret1"));
        assert!(cfg.authorizer.allows("secret2"));
        assert_eq!(cfg.observability.log_level, "debug");
        assert_eq!(cfg.observability.log_format, LogFormat::Json);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_empty_file_uses_defaults_with_warnings() {
        let loaded = parse_config("").unwrap();

        assert_eq!(loaded.config, ServiceConfig::default());
        assert_eq!(
            loaded.warnings,
            vec![ConfigWarning::EmptyRequiredHeader, ConfigWarning::EmptyAllowedValues]
        );
    }

    #[test]
    fn test_unknown_authorizer_field_is_parse_error() {
        let err = parse_config(
            r#"
            [authorizer]
            header = "x-api-key"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_log_format_is_parse_error() {
        let err = parse_config(
            r#"
            [observability]
            log_format = "xml"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_errors_are_all_reported() {
        let err = parse_config(
            r#"
            [authorizer]
            required_header = "x api key"
            allowed_values = ["ok", "bad\r\nvalue"]

            [observability]
            log_level = "required_header_authz=loud"
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("required-header-authz-does-not-exist.toml");
        let err = load_config(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Io(_)));
    }
}
