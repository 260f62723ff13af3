//! Diagnostics sinks.

use parking_lot::Mutex;
use tracing::debug;

use crate::ports::Diagnostics;

/// Forwards diagnostics to `tracing` at debug level.
#[derive(Debug, Clone, Copy)]
pub struct TracingDiagnostics {
    component: &'static str,
}

impl TracingDiagnostics {
    /// `component` is attached to every event, e.g. `"lookup"`.
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl Diagnostics for TracingDiagnostics {
    fn record(&self, message: &str) {
        debug!(component = self.component, "{}", message);
    }
}

/// Keeps diagnostics in memory, for callers that report them themselves.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Whether any recorded message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.lock().iter().any(|m| m.contains(needle))
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn record(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
