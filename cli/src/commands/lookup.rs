//! Lookup command - print the connections of a process.

use std::io::Write;

use anyhow::{Context, Result};
use lsaddr_core::{encode, ConfigStore, OutputFormat, Platform};
use tracing::debug;

pub async fn run(store: &ConfigStore, selector: &str, out: Option<OutputFormat>) -> Result<()> {
    let config = store.load().await?;
    let format = out.unwrap_or(config.output_format);
    let platform = Platform::current();
    debug!(%platform, %format, selector, "looking up network files");

    let files = lsaddr_core::open_net_files(selector, platform, &config)
        .await
        .with_context(|| format!("unable to look up network files of \"{}\"", selector))?;
    debug!(count = files.len(), "network files found");

    let mut stdout = std::io::stdout().lock();
    encode(format, &files, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}
