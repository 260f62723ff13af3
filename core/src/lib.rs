//! lsaddr Core Library
//!
//! Finds the network connections owned by a process and encodes them.
//! Provides functionality to:
//! - Decode `lsof` and `netstat` listings into uniform records
//! - Select processes by name, PID pattern or (macOS) application bundle
//! - Encode the connections as CSV, a packet-filter expression or JSON
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure data models
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services
//!
//! # Platform Support
//! - macOS: Uses `lsof`, plus `defaults` and `pgrep` for bundles
//! - Linux: Uses `lsof`
//! - Windows: Uses `netstat -nabo`

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod filter;

use std::sync::Arc;

// Re-export domain types (primary API)
pub use domain::{hosts, parse_net_addr, NetAddr, NetFile, Network, OpenFile, Platform};

// Re-export other commonly used types
pub use adapters::TracingDiagnostics;
pub use application::NetFileLookup;
pub use config::{ConfigStore, LookupConfig, ToolCommand};
pub use encoder::{encode, Encoder, OutputFormat};
pub use error::{Error, Result};

/// Look up the network files matching `selector` on `platform`.
///
/// Diagnostics go to `tracing` under the `lookup` component.
pub async fn open_net_files(
    selector: &str,
    platform: Platform,
    config: &LookupConfig,
) -> Result<Vec<NetFile>> {
    let lookup = NetFileLookup::for_platform(
        platform,
        config,
        Arc::new(TracingDiagnostics::new("lookup")),
    );
    lookup.open_net_files(selector).await
}
