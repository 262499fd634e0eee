//! Decision metrics.
//!
//! # Metrics
//! - `authz_decisions_total` (counter): decisions by outcome
//!   (`allowed`, `value_mismatch`, `header_missing`)
//! - `authz_services_started_total` (counter): auth services started, by plugin
//!
//! Nothing is exported from here; the host installs the recorder.

use metrics::counter;

use crate::authz::CheckOutcome;

/// Record one decision.
pub fn record_decision(outcome: CheckOutcome) {
    counter!("authz_decisions_total", "outcome" => outcome.as_str()).increment(1);
}

/// Record an auth service start.
pub fn record_service_started(plugin: &'static str) {
    counter!("authz_services_started_total", "plugin" => plugin).increment(1);
}
