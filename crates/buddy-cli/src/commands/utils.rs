use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use buddy_infrastructure::{ConfigStorage, HttpTransport};
use buddy_interaction::BuddyClient;

/// Storage at `path`, or at the default location.
pub fn storage(path: Option<PathBuf>) -> Result<ConfigStorage> {
    match path {
        Some(path) => Ok(ConfigStorage::with_path(path)),
        None => ConfigStorage::new_default().context("Failed to locate config file"),
    }
}

/// A client over HTTP, configured from `storage` and `BUDDY_*` variables.
pub fn client(storage: &ConfigStorage) -> Result<BuddyClient> {
    let config = storage
        .load()
        .with_context(|| format!("Failed to load {}", storage.path().display()))?;
    let transport = HttpTransport::new(&config)?;
    tracing::debug!(endpoint = transport.endpoint(), app = %config.app_name, "client ready");
    BuddyClient::new(config, Arc::new(transport))
        .context("Application name and password must be set (config file or BUDDY_APP_NAME / BUDDY_APP_PASSWORD)")
}
