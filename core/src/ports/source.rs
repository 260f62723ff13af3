//! Line source port (interface).

use crate::config::ToolCommand;
use crate::error::Result;

/// Port for obtaining raw connection listings.
///
/// Implementations run the listing tool described by a [`ToolCommand`] and
/// return its complete output, minus the leading lines the command asks to
/// skip.
pub trait LineSource: Send + Sync {
    /// Run `command` and return its raw output.
    fn read(
        &self,
        command: &ToolCommand,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}
