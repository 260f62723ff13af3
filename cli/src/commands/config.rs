//! Config command - show or initialize the configuration file.

use anyhow::Result;
use lsaddr_core::{ConfigStore, LookupConfig};
use tracing::info;

pub async fn show(store: &ConfigStore) -> Result<()> {
    let config = store.load().await?;

    println!("# {}", store.path().display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Write the defaults, leaving an existing file untouched.
pub async fn init(store: &ConfigStore) -> Result<()> {
    if store.path().exists() {
        info!(path = %store.path().display(), "config file already exists");
        return Ok(());
    }

    store.save(&LookupConfig::default()).await?;
    info!(path = %store.path().display(), "wrote default config");
    Ok(())
}
