//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Each adapter handles communication with one external system.

mod bundle;
mod command;
mod diagnostics;
mod process;
mod resolver;

// Re-export main types for convenience
pub use bundle::DefaultsMetadata;
pub use command::CommandLineSource;
pub use diagnostics::{MemoryDiagnostics, TracingDiagnostics};
pub use process::PgrepLookup;
pub use resolver::PlatformResolver;
