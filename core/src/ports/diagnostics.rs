//! Diagnostics port (interface).

/// Sink for diagnostic messages.
///
/// Components receive one at construction instead of logging through a
/// global logger.
pub trait Diagnostics: Send + Sync {
    /// Record a diagnostic message.
    fn record(&self, message: &str);
}
