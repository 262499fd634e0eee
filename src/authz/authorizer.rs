//! The required-header decision rule.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::authz::decision::{AuthorizationDecision, CheckOutcome};
use crate::authz::request::AuthorizationRequest;
use crate::observability::plugin_log::{LogEvent, PluginLog};

/// Response header attached to every allowed request.
pub const MATCHED_ALLOWED_HEADERS: &str = "matched-allowed-headers";

/// Which header is required and which of its values are accepted.
///
/// An empty header name or an empty allow-list is accepted here and simply
/// denies everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorizerConfig {
    /// Header that must be present (exact name, case-sensitive).
    pub required_header: String,

    /// Accepted values for the required header (exact match).
    pub allowed_values: BTreeSet<String>,
}

impl AuthorizerConfig {
    pub fn new<I, S>(required_header: impl Into<String>, allowed_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_header: required_header.into(),
            allowed_values: allowed_values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `value` is on the allow-list.
    pub fn allows(&self, value: &str) -> bool {
        self.allowed_values.contains(value)
    }
}

/// Decides requests against one shared, immutable [`AuthorizerConfig`].
///
/// Cloning is cheap and clones share the config.
#[derive(Debug, Clone)]
pub struct HeaderAuthorizer {
    config: Arc<AuthorizerConfig>,
}

impl HeaderAuthorizer {
    pub fn new(config: impl Into<Arc<AuthorizerConfig>>) -> Self {
        Self {
            config: config.into(),
        }
    }

    pub fn config(&self) -> &AuthorizerConfig {
        &self.config
    }

    /// Run the check and report which branch was taken.
    pub fn check(&self, request: &AuthorizationRequest, log: &dyn PluginLog) -> CheckOutcome {
        check(request, &self.config, log)
    }

    /// Decide a request.
    pub fn authorize(
        &self,
        request: &AuthorizationRequest,
        log: &dyn PluginLog,
    ) -> AuthorizationDecision {
        self.check(request, log).into_decision()
    }
}

/// Evaluate `request` against `config`, logging the branch taken.
pub fn check(
    request: &AuthorizationRequest,
    config: &AuthorizerConfig,
    log: &dyn PluginLog,
) -> CheckOutcome {
    let header = config.required_header.as_str();

    let Some(value) = request.header(header) else {
        log.record(LogEvent::HeaderMissing { header });
        return CheckOutcome::HeaderMissing;
    };

    log.record(LogEvent::HeaderFound { header, value });

    if config.allows(value) {
        log.record(LogEvent::ValueMatched { header });
        CheckOutcome::Allowed
    } else {
        log.record(LogEvent::ValueMismatched { header });
        CheckOutcome::ValueMismatch
    }
}

/// Decide `request` against `config`.
pub fn authorize(
    request: &AuthorizationRequest,
    config: &AuthorizerConfig,
    log: &dyn PluginLog,
) -> AuthorizationDecision {
    check(request, config, log).into_decision()
}
