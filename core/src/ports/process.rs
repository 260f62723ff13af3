//! Process lookup port (interface).

use crate::error::Result;

/// Port for querying the OS process table.
pub trait ProcessLookup: Send + Sync {
    /// Identifiers of all running processes whose name matches `name`.
    ///
    /// No match is an empty list, not an error.
    fn pids_by_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}
