use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::TripError;

const DEFAULT_DIR_NAME: &str = ".trip_ledger";
const HOME_ENV: &str = "TRIP_LEDGER_HOME";
const CONFIG_FILE: &str = "config.json";

/// Resolves on-disk locations used by the CLI.
pub struct PathResolver;

impl PathResolver {
    /// Application data directory: `$TRIP_LEDGER_HOME`, else `~/.trip_ledger`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> Result<(), TripError> {
    fs::create_dir_all(path)?;
    Ok(())
}
