//! macOS application bundle resolution.
//!
//! A selector such as `/Applications/Spotify.app` is turned into a pattern
//! matching the PIDs of the bundle's running executable.

use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ports::{BundleMetadata, Diagnostics, ProcessLookup, SelectorResolver};

/// Directory suffix of application bundles.
pub const BUNDLE_SUFFIX: &str = ".app";

/// Property naming the bundle's primary executable.
const EXECUTABLE_KEY: &str = "CFBundleExecutable";

/// Resolves bundle paths to a disjunction of PIDs.
///
/// Every failure falls back to the unmodified selector; the reason is only
/// recorded as a diagnostic.
pub struct BundleResolver<M, P> {
    metadata: M,
    processes: P,
    diagnostics: Arc<dyn Diagnostics>,
}

impl<M: BundleMetadata, P: ProcessLookup> BundleResolver<M, P> {
    pub fn new(metadata: M, processes: P, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            metadata,
            processes,
            diagnostics,
        }
    }

    /// `pid1|pid2|...` for the running instances of the bundle at `bundle`.
    async fn resolve_bundle(&self, bundle: &Path) -> Result<String> {
        let plist = bundle.join("Contents").join("Info.plist");
        let name = self
            .metadata
            .read_string(&plist, EXECUTABLE_KEY)
            .await
            .map_err(|e| match e {
                Error::BundleMetadata(_) => e,
                other => Error::BundleMetadata(other.to_string()),
            })?;
        self.diagnostics
            .record(&format!("app name: {}, path: {}", name, bundle.display()));

        let pids = self.processes.pids_by_name(&name).await?;
        if pids.is_empty() {
            return Err(Error::NoMatchingPids(name));
        }
        Ok(pids.join("|"))
    }
}

impl<M: BundleMetadata, P: ProcessLookup> SelectorResolver for BundleResolver<M, P> {
    async fn resolve(&self, selector: &str) -> String {
        if !self.metadata.exists(Path::new(selector)) {
            return selector.to_string();
        }
        let path = selector.trim_end_matches('/');
        if !path.ends_with(BUNDLE_SUFFIX) {
            // a path, but not one we know how to handle
            return selector.to_string();
        }

        match self.resolve_bundle(Path::new(path)).await {
            Ok(expr) => expr,
            Err(Error::NoMatchingPids(name)) => {
                self.diagnostics
                    .record(&format!("no matching PIDs for {}", name));
                selector.to_string()
            }
            Err(e) => {
                self.diagnostics
                    .record(&format!("unable to resolve {}: {}", path, e));
                selector.to_string()
            }
        }
    }
}
