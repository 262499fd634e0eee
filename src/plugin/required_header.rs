//! Plugin that allows requests carrying an allow-listed value in one header.

use std::any::Any;

use crate::authz::{AuthorizationDecision, AuthorizationRequest, AuthorizerConfig, HeaderAuthorizer};
use crate::error::{PluginError, Result};
use crate::observability::metrics;
use crate::observability::plugin_log::{LogEvent, PluginLog};
use crate::plugin::{AuthService, ExtAuthPlugin, PluginConfig};

/// Name the plugin registers under.
pub const PLUGIN_NAME: &str = "required_header";

impl PluginConfig for AuthorizerConfig {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
}

/// Required-header plugin. Stateless; all state lives in the services it builds.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredHeaderPlugin;

impl ExtAuthPlugin for RequiredHeaderPlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn new_config_instance(&self, raw: serde_json::Value) -> Result<Box<dyn PluginConfig>> {
        let config: AuthorizerConfig = serde_json::from_value(raw)?;
        Ok(Box::new(config))
    }

    fn get_auth_service(&self, config: Box<dyn PluginConfig>) -> Result<Box<dyn AuthService>> {
        let found = config.type_name();
        let config = config
            .into_any()
            .downcast::<AuthorizerConfig>()
            .map_err(|_| PluginError::UnexpectedConfigType { found })?;

        Ok(Box::new(RequiredHeaderAuthService::new(*config)))
    }
}

/// Auth service built by [`RequiredHeaderPlugin`].
#[derive(Debug, Clone)]
pub struct RequiredHeaderAuthService {
    authorizer: HeaderAuthorizer,
}

impl RequiredHeaderAuthService {
    pub fn new(config: AuthorizerConfig) -> Self {
        Self {
            authorizer: HeaderAuthorizer::new(config),
        }
    }

    pub fn config(&self) -> &AuthorizerConfig {
        self.authorizer.config()
    }
}

impl AuthService for RequiredHeaderAuthService {
    fn start(&self, log: &dyn PluginLog) -> Result<()> {
        metrics::record_service_started(PLUGIN_NAME);
        log.record(LogEvent::ServiceStarted {
            plugin: PLUGIN_NAME,
        });
        Ok(())
    }

    fn authorize(
        &self,
        request: &AuthorizationRequest,
        log: &dyn PluginLog,
    ) -> AuthorizationDecision {
        let outcome = self.authorizer.check(request, log);
        metrics::record_decision(outcome);
        outcome.into_decision()
    }
}
