//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks, warnings)
//!     → ServiceConfig (validated, immutable)
//!     → authorizer section handed to the plugin
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Settings that are legal but deny everything are warnings, not errors

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError, LoadedConfig};
pub use schema::{LogFormat, ObservabilityConfig, ServiceConfig};
pub use validation::{validate_config, validate_log_level, ConfigWarning, ValidationError};
