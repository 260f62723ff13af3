//! Bundle metadata port (interface).

use std::path::Path;

use crate::error::Result;

/// Port for inspecting application bundles on disk.
pub trait BundleMetadata: Send + Sync {
    /// Whether `path` exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Read the string value of `key` from the property list at `plist`.
    fn read_string(
        &self,
        plist: &Path,
        key: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
