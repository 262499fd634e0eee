//! Logger passed into every plugin call.
//!
//! The host hands a [`PluginLog`] to each `start`/`authorize` call instead of
//! the plugin reaching for a global logger. Production hosts use
//! [`TracingLog`]; tests use [`NoopLog`] or [`RecordingLog`].

use std::fmt;
use std::sync::Mutex;

/// Logger name attached to every event emitted by [`TracingLog::default`].
pub const DEFAULT_LOGGER_NAME: &str = "header_value_plugin";

/// Something worth logging during a plugin call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEvent<'a> {
    /// The service finished its start hook.
    ServiceStarted { plugin: &'a str },
    /// The required header is present; its value is about to be checked.
    HeaderFound { header: &'a str, value: &'a str },
    /// The header value is on the allow-list.
    ValueMatched { header: &'a str },
    /// The header value is not on the allow-list.
    ValueMismatched { header: &'a str },
    /// The required header is absent.
    HeaderMissing { header: &'a str },
}

impl LogEvent<'_> {
    /// Short machine-readable name of the event.
    pub fn kind(&self) -> &'static str {
        match self {
            LogEvent::ServiceStarted { .. } => "service_started",
            LogEvent::HeaderFound { .. } => "header_found",
            LogEvent::ValueMatched { .. } => "value_matched",
            LogEvent::ValueMismatched { .. } => "value_mismatched",
            LogEvent::HeaderMissing { .. } => "header_missing",
        }
    }
}

impl fmt::Display for LogEvent<'_> {
    /// Header values are left out; they are usually credentials.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEvent::ServiceStarted { plugin } => write!(f, "Plugin {plugin} started"),
            LogEvent::HeaderFound { header, .. } => {
                write!(f, "Found required header {header}, checking value")
            }
            LogEvent::ValueMatched { .. } => write!(f, "Header value match, allowing request"),
            LogEvent::ValueMismatched { .. } => {
                write!(f, "Header value does not match allowed values, denying access")
            }
            LogEvent::HeaderMissing { header } => {
                write!(f, "Required header {header} not found, denying access")
            }
        }
    }
}

/// Sink for plugin log events.
pub trait PluginLog: Send + Sync {
    fn record(&self, event: LogEvent<'_>);
}

/// Emits events through `tracing`, tagged with a logger name.
#[derive(Debug, Clone, Copy)]
pub struct TracingLog {
    name: &'static str,
}

impl TracingLog {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for TracingLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOGGER_NAME)
    }
}

impl PluginLog for TracingLog {
    fn record(&self, event: LogEvent<'_>) {
        let kind = event.kind();
        match event {
            LogEvent::HeaderFound { header, value } => {
                tracing::info!(logger = self.name, event = kind, header, "{}", event);
                tracing::debug!(logger = self.name, header, value, "Required header value");
            }
            LogEvent::ValueMatched { header }
            | LogEvent::ValueMismatched { header }
            | LogEvent::HeaderMissing { header } => {
                tracing::info!(logger = self.name, event = kind, header, "{}", event);
            }
            LogEvent::ServiceStarted { plugin } => {
                tracing::info!(logger = self.name, event = kind, plugin, "{}", event);
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl PluginLog for NoopLog {
    fn record(&self, _event: LogEvent<'_>) {}
}

/// An event captured by [`RecordingLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub kind: &'static str,
    pub message: String,
}

/// Keeps events in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingLog {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().expect("recording log mutex poisoned").clone()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .expect("recording log mutex poisoned")
            .iter()
            .map(|e| e.kind)
            .collect()
    }
}

impl PluginLog for RecordingLog {
    fn record(&self, event: LogEvent<'_>) {
        self.events
            .lock()
            .expect("recording log mutex poisoned")
            .push(RecordedEvent {
                kind: event.kind(),
                message: event.to_string(),
            });
    }
}
