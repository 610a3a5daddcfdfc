//! Where the SDK keeps its files.
//!
//! ```text
//! ~/.config/buddy/
//! └── config.toml     # ClientConfig
//! ```

use std::path::PathBuf;

use buddy_core::{BuddyError, BuddyResult};

const APP_DIR: &str = "buddy";
const CONFIG_FILE: &str = "config.toml";

pub struct BuddyPaths;

impl BuddyPaths {
    /// Platform config directory for the SDK (`~/.config/buddy` on Linux).
    pub fn config_dir() -> BuddyResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| BuddyError::config("Cannot find config directory"))
    }

    pub fn config_file() -> BuddyResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }
}
