//! Error types for the lsaddr-core library.

use thiserror::Error;

/// Result type alias for lsaddr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while looking up and encoding network files.
#[derive(Error, Debug)]
pub enum Error {
    /// A line had fewer fields than its format requires.
    #[error("unable to chunk line: expected at least {expected} items, found {found}: line \"{line}\"")]
    MalformedLine {
        expected: usize,
        found: usize,
        line: String,
    },

    /// The network kind is neither TCP nor UDP.
    #[error("unsupported network {0}")]
    UnsupportedNetwork(String),

    /// An address could not be split into host and port.
    #[error("invalid address \"{addr}\": {reason}")]
    InvalidAddress { addr: String, reason: String },

    /// Bundle metadata is missing, unreadable or malformed.
    #[error("bundle metadata error: {0}")]
    BundleMetadata(String),

    /// No running process matched the bundle executable.
    #[error("cannot find any PID associated with {0}")]
    NoMatchingPids(String),

    /// Failed to execute a system command.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// The filter expression is not a valid regular expression.
    #[error("invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
