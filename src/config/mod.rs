use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::utils::{ensure_dir, PathResolver};
use crate::errors::TripError;
use crate::ledger::SETTLEMENT_TOLERANCE;

const TMP_SUFFIX: &str = "tmp";
const MAX_PRECISION: u8 = 6;

/// User preferences for the CLI front end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub currency: String,
    pub precision: u8,
    pub settlement_tolerance: f64,
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            precision: 2,
            settlement_tolerance: SETTLEMENT_TOLERANCE,
            quiet: false,
        }
    }
}

impl Config {
    /// Applies a `key value` pair as entered on the command line.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), TripError> {
        match key {
            "currency" => {
                let code = value.trim();
                if code.is_empty() {
                    return Err(TripError::InvalidInput("currency must not be empty".into()));
                }
                self.currency = code.to_uppercase();
            }
            "precision" => {
                let precision: u8 = value.trim().parse().map_err(|_| {
                    TripError::InvalidInput(format!("`{}` is not a valid precision", value))
                })?;
                if precision > MAX_PRECISION {
                    return Err(TripError::InvalidInput(format!(
                        "precision must be at most {}",
                        MAX_PRECISION
                    )));
                }
                self.precision = precision;
            }
            "settlement_tolerance" => {
                let tolerance: f64 = value.trim().parse().map_err(|_| {
                    TripError::InvalidInput(format!("`{}` is not a valid tolerance", value))
                })?;
                if !tolerance.is_finite() || tolerance < 0.0 {
                    return Err(TripError::InvalidInput(
                        "tolerance must be a non-negative number".into(),
                    ));
                }
                self.settlement_tolerance = tolerance;
            }
            "quiet" => {
                self.quiet = match value.trim().to_ascii_lowercase().as_str() {
                    "on" | "true" | "yes" => true,
                    "off" | "false" | "no" => false,
                    other => {
                        return Err(TripError::InvalidInput(format!(
                            "`{}` is not on/off",
                            other
                        )))
                    }
                };
            }
            other => {
                return Err(TripError::ConfigError(format!(
                    "unknown setting `{}`",
                    other
                )))
            }
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["currency", "precision", "settlement_tolerance", "quiet"]
    }
}

/// Loads and stores [`Config`] as JSON under the application data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, TripError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, TripError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Reads the stored configuration, falling back to defaults when no file
    /// has been written yet.
    pub fn load(&self) -> Result<Config, TripError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the configuration through a temporary file and renames it into
    /// place so readers never observe a partial file.
    pub fn save(&self, config: &Config) -> Result<(), TripError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), TripError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
