//! TOML-backed storage for [`ClientConfig`].
//!
//! Precedence is environment over file over defaults. A missing file is not
//! an error; it simply yields the defaults.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use buddy_core::{BuddyError, BuddyResult, ClientConfig};

use crate::paths::BuddyPaths;

pub const ENV_APP_NAME: &str = "BUDDY_APP_NAME";
pub const ENV_APP_PASSWORD: &str = "BUDDY_APP_PASSWORD";
pub const ENV_ENDPOINT: &str = "BUDDY_ENDPOINT";
pub const ENV_APP_VERSION: &str = "BUDDY_APP_VERSION";

/// Reads and writes `config.toml`.
#[derive(Debug, Clone)]
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Storage at the platform default location (`~/.config/buddy/config.toml`).
    pub fn new_default() -> BuddyResult<Self> {
        Ok(Self::with_path(BuddyPaths::config_file()?))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File contents only, without environment overrides.
    pub fn load_file(&self) -> BuddyResult<ClientConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            BuddyError::config(format!(
                "Failed to read config file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }

        Ok(toml::from_str(&content)?)
    }

    /// File contents with `BUDDY_*` environment variables applied on top.
    pub fn load(&self) -> BuddyResult<ClientConfig> {
        let config = self.load_file()?;
        Ok(apply_overrides(config, |key| std::env::var(key).ok()))
    }

    /// Writes the config through a temporary file and an atomic rename.
    pub fn save(&self, config: &ClientConfig) -> BuddyResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.exists()
        {
            fs::create_dir_all(dir)?;
        }

        let toml_str = toml::to_string_pretty(config)?;

        let tmp_path = self.path.with_extension("toml.tmp");
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_str.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            BuddyError::config(format!(
                "Failed to rename temp file '{}' to '{}': {}",
                tmp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::info!(path = %self.path.display(), "saved client config");
        Ok(())
    }
}

/// Applies `BUDDY_*` overrides read through `lookup`. Empty values are ignored.
pub fn apply_overrides<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(name) = read(ENV_APP_NAME) {
        config.app_name = name;
    }
    if let Some(password) = read(ENV_APP_PASSWORD) {
        config.app_password = password;
    }
    if let Some(endpoint) = read(ENV_ENDPOINT) {
        config.endpoint = endpoint;
    }
    if let Some(version) = read(ENV_APP_VERSION) {
        config.app_version = Some(version);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use buddy_core::NotificationPlatform;
    use buddy_core::config::DEFAULT_ENDPOINT;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(dir.path().join("config.toml"));

        let config = storage.load_file().expect("Should fall back to defaults");

        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let storage = ConfigStorage::with_path(&path);

        let mut config = ClientConfig::new("demo", "secret").with_app_version("2.1");
        config.push_platform = NotificationPlatform::Android;
        storage.save(&config).expect("Should save config");

        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());

        let loaded = storage.load_file().expect("Should load config");
        assert_eq!(loaded.app_name, "demo");
        assert_eq!(loaded.app_version.as_deref(), Some("2.1"));
        assert_eq!(loaded.push_platform, NotificationPlatform::Android);
        assert_eq!(loaded.device, config.device);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "app_name = [").unwrap();

        let err = ConfigStorage::with_path(&path).load_file().unwrap_err();

        assert!(matches!(err, BuddyError::Serialization { .. }));
    }

    #[test]
    fn test_environment_wins_over_file() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_APP_NAME, "from-env"),
            (ENV_ENDPOINT, "http://localhost:8080/Service.ashx"),
            (ENV_APP_PASSWORD, "  "),
        ]);
        let file = ClientConfig::new("from-file", "file-secret");

        let config = apply_overrides(file, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.app_name, "from-env");
        assert_eq!(config.app_password, "file-secret");
        assert_eq!(config.endpoint, "http://localhost:8080/Service.ashx");
        assert!(config.app_version.is_none());
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let config = apply_overrides(ClientConfig::default(), |_| None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }
}
