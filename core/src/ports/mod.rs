//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces the lookup uses to reach the outside
//! world: running listing tools, querying the process table, reading bundle
//! metadata and recording diagnostics. Implementations live in `adapters`.

mod bundle;
mod diagnostics;
mod process;
mod resolver;
mod source;

pub use bundle::BundleMetadata;
pub use diagnostics::Diagnostics;
pub use process::ProcessLookup;
pub use resolver::SelectorResolver;
pub use source::LineSource;
