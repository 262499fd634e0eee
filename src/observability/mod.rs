//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Plugin calls produce:
//!     → plugin_log.rs (events through the logger injected per call)
//!     → metrics.rs (decision counters via the metrics facade)
//!
//! The binary wires:
//!     → logging.rs (tracing subscriber, stderr, pretty or JSON)
//! ```
//!
//! # Design Decisions
//! - The decision core never touches a global logger; hosts pass one in
//! - RUST_LOG overrides the configured level
//! - Metrics are recorded against whatever recorder the host installs

pub mod logging;
pub mod metrics;
pub mod plugin_log;

pub use plugin_log::{LogEvent, NoopLog, PluginLog, RecordingLog, TracingLog};
