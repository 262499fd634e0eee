//! Host plugin contract.
//!
//! # Lifecycle
//! ```text
//! host loads plugin (dyn ExtAuthPlugin)
//!     → new_config_instance(raw host config)   → Box<dyn PluginConfig>
//!     → get_auth_service(config)               → Box<dyn AuthService>
//!     → start(log)                             once, before any decision
//!     → authorize(request, log)                per request, concurrently
//! ```
//!
//! Config objects travel through the host opaquely, so a service only accepts
//! the config type its own plugin produced.

use std::any::Any;
use std::fmt;

use crate::authz::{AuthorizationDecision, AuthorizationRequest};
use crate::error::Result;
use crate::observability::PluginLog;

pub mod required_header;

pub use required_header::{RequiredHeaderAuthService, RequiredHeaderPlugin, PLUGIN_NAME};

/// Opaque plugin configuration as held by the host.
pub trait PluginConfig: Any + Send + Sync + fmt::Debug {
    /// Concrete type name, for error reporting.
    fn type_name(&self) -> &'static str;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

/// An authorization plugin the host can instantiate.
pub trait ExtAuthPlugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Parse the raw configuration the host holds for this plugin.
    fn new_config_instance(&self, raw: serde_json::Value) -> Result<Box<dyn PluginConfig>>;

    /// Build an auth service from a config instance.
    ///
    /// Fails with [`PluginError::UnexpectedConfigType`](crate::PluginError::UnexpectedConfigType)
    /// when handed a config this plugin did not create.
    fn get_auth_service(&self, config: Box<dyn PluginConfig>) -> Result<Box<dyn AuthService>>;
}

/// A ready-to-use authorization service.
pub trait AuthService: Send + Sync {
    /// Lifecycle hook, called once before the first `authorize`.
    fn start(&self, log: &dyn PluginLog) -> Result<()>;

    /// Decide one request. Never fails.
    fn authorize(&self, request: &AuthorizationRequest, log: &dyn PluginLog)
        -> AuthorizationDecision;
}

/// Parse `raw` and build the plugin's auth service in one step.
pub fn initialize(
    plugin: &dyn ExtAuthPlugin,
    raw: serde_json::Value,
) -> Result<Box<dyn AuthService>> {
    let config = plugin.new_config_instance(raw)?;
    plugin.get_auth_service(config)
}
