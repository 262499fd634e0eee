//! Required-header authorization plugin for Envoy-style `ext_authz` sidecars.

pub mod authz;
pub mod config;
pub mod error;
pub mod observability;
pub mod plugin;

pub use authz::{AuthorizationDecision, AuthorizationRequest, AuthorizerConfig, HeaderAuthorizer};
pub use config::ServiceConfig;
pub use error::PluginError;
pub use plugin::{AuthService, ExtAuthPlugin, RequiredHeaderPlugin};
