#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use tempfile::TempDir;
use trip_ledger::{config::ConfigManager, core::TripSession};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a fresh directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates a config manager backed by a unique directory.
pub fn setup_config_manager() -> ConfigManager {
    ConfigManager::with_base_dir(temp_home()).expect("create config manager for temp dir")
}

/// Session with three participants named A, B, and C, in that order.
pub fn abc_session() -> TripSession {
    TripSession::with_participants("Weekend", ["A", "B", "C"]).expect("create session")
}
