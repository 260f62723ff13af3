//! Application layer - Use case services.
//!
//! This module contains application services that orchestrate
//! domain logic and adapter interactions.
//!
//! Services are designed to be thin orchestrators that:
//! - Accept plain selectors as inputs
//! - Use ports (traits) for external dependencies
//! - Return domain types as outputs

mod lookup_service;

pub use lookup_service::NetFileLookup;
