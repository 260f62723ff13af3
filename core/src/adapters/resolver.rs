//! Selector resolver chosen by platform.

use std::sync::Arc;

use super::bundle::DefaultsMetadata;
use super::process::PgrepLookup;
use crate::config::LookupConfig;
use crate::domain::Platform;
use crate::filter::{BundleResolver, PassthroughResolver};
use crate::ports::{Diagnostics, SelectorResolver};

/// The selector resolution strategy of the host platform.
pub enum PlatformResolver {
    /// Selectors are used verbatim.
    Passthrough(PassthroughResolver),
    /// Application bundle paths are resolved to PIDs (macOS).
    Bundle(BundleResolver<DefaultsMetadata, PgrepLookup>),
}

impl PlatformResolver {
    /// Pick the strategy for `platform`.
    pub fn for_platform(
        platform: Platform,
        config: &LookupConfig,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        if platform.supports_bundles() {
            PlatformResolver::Bundle(BundleResolver::new(
                DefaultsMetadata::new(config.defaults_program.clone()),
                PgrepLookup::new(config.pgrep_program.clone()),
                diagnostics,
            ))
        } else {
            PlatformResolver::Passthrough(PassthroughResolver)
        }
    }
}

impl SelectorResolver for PlatformResolver {
    async fn resolve(&self, selector: &str) -> String {
        match self {
            PlatformResolver::Passthrough(resolver) => resolver.resolve(selector).await,
            PlatformResolver::Bundle(resolver) => resolver.resolve(selector).await,
        }
    }
}
