//! Net-file lookup application service.

use std::sync::Arc;

use crate::adapters::{CommandLineSource, PlatformResolver};
use crate::config::{LookupConfig, ToolCommand};
use crate::decoder::Decoder;
use crate::domain::{NetFile, Platform};
use crate::error::Result;
use crate::filter::build_filter;
use crate::ports::{Diagnostics, LineSource, SelectorResolver};

/// Application service finding the network files owned by a process.
///
/// One lookup is a sequential pipeline: resolve the selector into a
/// pattern, run the listing tool, keep the matching records, decode them
/// and resolve their addresses. Any failing stage fails the whole lookup.
pub struct NetFileLookup<S: LineSource, R: SelectorResolver> {
    source: S,
    resolver: R,
    decoder: Decoder,
    command: ToolCommand,
    diagnostics: Arc<dyn Diagnostics>,
}

impl<S: LineSource, R: SelectorResolver> NetFileLookup<S, R> {
    /// Create a lookup from its collaborators.
    pub fn new(
        source: S,
        resolver: R,
        decoder: Decoder,
        command: ToolCommand,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            source,
            resolver,
            decoder,
            command,
            diagnostics,
        }
    }

    /// List the network files whose listing entry matches `selector`.
    ///
    /// On macOS `selector` may be the path of an application bundle, in
    /// which case the bundle's running processes are matched by PID.
    pub async fn open_net_files(&self, selector: &str) -> Result<Vec<NetFile>> {
        let pattern = build_filter(&self.resolver, selector).await?;
        self.diagnostics
            .record(&format!("regexp built: \"{}\"", pattern.as_str()));

        let output = self.source.read(&self.command).await?;
        self.diagnostics.record(&format!(
            "{} returned {} bytes",
            self.command.display(),
            output.len()
        ));

        let filtered = pattern.filter_output(&output, self.decoder)?;
        let files = self.decoder.decode(&filtered)?;
        self.diagnostics
            .record(&format!("decoded {} open files", files.len()));

        files.iter().map(NetFile::from_open_file).collect()
    }
}

impl NetFileLookup<CommandLineSource, PlatformResolver> {
    /// Wire the subprocess adapters for `platform`.
    pub fn for_platform(
        platform: Platform,
        config: &LookupConfig,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self::new(
            CommandLineSource::new(),
            PlatformResolver::for_platform(platform, config, diagnostics.clone()),
            Decoder::for_platform(platform),
            config.tool_command(platform).clone(),
            diagnostics,
        )
    }
}
