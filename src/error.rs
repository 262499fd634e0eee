//! Plugin error types.

use thiserror::Error;

/// Errors surfaced to the plugin host.
///
/// All of these happen while the host wires the plugin up. A decision itself
/// never fails.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The host handed over a config object this plugin did not create.
    #[error("unexpected config type {found}")]
    UnexpectedConfigType {
        /// Type name of the config object that was received
        found: &'static str,
    },

    /// The raw host configuration could not be parsed.
    #[error("invalid plugin config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// A response header produced by a decision cannot be encoded as HTTP.
    #[error("invalid response header {key:?}")]
    InvalidResponseHeader {
        /// Header name
        key: String,
    },
}

/// Result alias for plugin operations.
pub type Result<T> = std::result::Result<T, PluginError>;
