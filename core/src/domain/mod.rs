//! Domain layer - Pure data models.
//!
//! This module contains the records produced by a lookup.
//! These types have no I/O dependencies and can be tested in isolation.

mod addr;
mod net_file;
mod open_file;
mod platform;
mod services;

// Re-export all domain types
pub use addr::{parse_net_addr, NetAddr, Network};
pub use net_file::{hosts, NetFile};
pub use open_file::OpenFile;
pub use platform::Platform;
pub use services::port_by_name;
