//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject header names and values that no HTTP request can carry
//! - Check the log filter directive parses
//! - Warn about settings that are legal but deny every request
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<Vec<ConfigWarning>, Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ServiceConfig;

/// A configuration the service refuses to start with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("authorizer.required_header {name:?} is not a valid HTTP header name")]
    InvalidHeaderName { name: String },

    #[error("authorizer.allowed_values has {count} value(s) containing CR, LF or NUL")]
    InvalidAllowedValues { count: usize },

    #[error("observability.log_level {directive:?} is not a valid filter directive")]
    InvalidLogLevel { directive: String },
}

/// A legal configuration that is probably not what the operator meant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No required header is configured; every request will be denied.
    EmptyRequiredHeader,
    /// The allow-list is empty; every request will be denied.
    EmptyAllowedValues,
    /// Proxies deliver lower-cased header names, so this name will not match.
    UppercaseHeaderName { name: String },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::EmptyRequiredHeader => {
                write!(f, "authorizer.required_header is empty, all requests will be denied")
            }
            ConfigWarning::EmptyAllowedValues => {
                write!(f, "authorizer.allowed_values is empty, all requests will be denied")
            }
            ConfigWarning::UppercaseHeaderName { name } => write!(
                f,
                "authorizer.required_header {name:?} has upper-case letters; \
                 header names usually arrive lower-cased and matching is exact"
            ),
        }
    }
}

/// RFC 9110 token characters.
fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_'
                | b'`' | b'|' | b'~'
        )
}

/// A token, optionally prefixed with ':' for HTTP/2 pseudo-headers such as
/// `:authority`, which ext_authz requests carry alongside regular headers.
fn is_valid_header_name(name: &str) -> bool {
    let token = name.strip_prefix(':').unwrap_or(name);
    !token.is_empty() && token.bytes().all(is_token_char)
}

/// Check that `directive` parses as a tracing filter.
pub fn validate_log_level(directive: &str) -> Result<(), ValidationError> {
    EnvFilter::try_new(directive)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidLogLevel {
            directive: directive.to_string(),
        })
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<Vec<ConfigWarning>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let authz = &config.authorizer;

    if authz.required_header.is_empty() {
        warnings.push(ConfigWarning::EmptyRequiredHeader);
    } else if !is_valid_header_name(&authz.required_header) {
        errors.push(ValidationError::InvalidHeaderName {
            name: authz.required_header.clone(),
        });
    } else if authz.required_header.bytes().any(|b| b.is_ascii_uppercase()) {
        warnings.push(ConfigWarning::UppercaseHeaderName {
            name: authz.required_header.clone(),
        });
    }

    if authz.allowed_values.is_empty() {
        warnings.push(ConfigWarning::EmptyAllowedValues);
    }

    let unusable = authz
        .allowed_values
        .iter()
        .filter(|v| v.contains(['\r', '\n', '\0']))
        .count();
    if unusable > 0 {
        errors.push(ValidationError::InvalidAllowedValues { count: unusable });
    }

    if let Err(e) = validate_log_level(&config.observability.log_level) {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::AuthorizerConfig;

    fn with_authorizer(authorizer: AuthorizerConfig) -> ServiceConfig {
        ServiceConfig {
            authorizer,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config_has_no_warnings() {
        let cfg = with_authorizer(AuthorizerConfig::new("x-api-key", ["secret1"]));
        assert_eq!(validate_config(&cfg), Ok(vec![]));
    }

    #[test]
    fn test_pseudo_header_is_valid() {
        let cfg = with_authorizer(AuthorizerConfig::new(":authority", ["example.com"]));
        assert_eq!(validate_config(&cfg), Ok(vec![]));
    }

    #[test]
    fn test_invalid_header_names() {
        for name in ["x api key", "x-api-key:", ":", "x-\u{e9}", "x\tkey"] {
            let cfg = with_authorizer(AuthorizerConfig::new(name, ["v"]));
            assert_eq!(
                validate_config(&cfg),
                Err(vec![ValidationError::InvalidHeaderName { name: name.to_string() }]),
                "{name:?}"
            );
        }
    }

    #[test]
    fn test_uppercase_header_warns() {
        let cfg = with_authorizer(AuthorizerConfig::new("X-Api-Key", ["v"]));
        assert_eq!(
            validate_config(&cfg),
            Ok(vec![ConfigWarning::UppercaseHeaderName {
                name: "X-Api-Key".to_string()
            }])
        );
    }

    #[test]
    fn test_empty_values_warn_but_pass() {
        let cfg = with_authorizer(AuthorizerConfig::new("", Vec::<String>::new()));
        assert_eq!(
            validate_config(&cfg),
            Ok(vec![ConfigWarning::EmptyRequiredHeader, ConfigWarning::EmptyAllowedValues])
        );
    }

    #[test]
    fn test_control_characters_in_values() {
        let cfg = with_authorizer(AuthorizerConfig::new("x-api-key", ["ok", "a\nb", "c\0"]));
        assert_eq!(
            validate_config(&cfg),
            Err(vec![ValidationError::InvalidAllowedValues { count: 2 }])
        );
    }

    #[test]
    fn test_log_level_directives() {
        let mut cfg = with_authorizer(AuthorizerConfig::new("x-api-key", ["v"]));

        cfg.observability.log_level = "warn,required_header_authz=debug".to_string();
        assert!(validate_config(&cfg).is_ok());

        cfg.observability.log_level = "required_header_authz=loud".to_string();
        assert_eq!(
            validate_config(&cfg),
            Err(vec![ValidationError::InvalidLogLevel {
                directive: "required_header_authz=loud".to_string()
            }])
        );
    }
}
