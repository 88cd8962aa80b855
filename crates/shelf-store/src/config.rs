//! # Store Configuration
//!
//! Settings for where the catalog file lives and the default report
//! thresholds.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHELF_DATA_FILE=/srv/shelf/produtos.csv                            │
//! │     SHELF_NEAR_EXPIRY_DAYS=15                                          │
//! │     SHELF_LOW_STOCK_THRESHOLD=5                                        │
//! │     SHELF_IMPORT_MODE=merge                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/shelf/shelf.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.shelf.shelf/shelf.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! data_file = "produtos.csv"
//! near_expiry_days = 30
//! low_stock_threshold = 10
//! import_mode = "replace"  # replace | merge
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::catalog::ImportMode;
use crate::error::{StoreError, StoreResult};

/// Default catalog file name.
pub const DEFAULT_DATA_FILE: &str = "produtos.csv";

const ENV_DATA_FILE: &str = "SHELF_DATA_FILE";
const ENV_NEAR_EXPIRY_DAYS: &str = "SHELF_NEAR_EXPIRY_DAYS";
const ENV_LOW_STOCK_THRESHOLD: &str = "SHELF_LOW_STOCK_THRESHOLD";
const ENV_IMPORT_MODE: &str = "SHELF_IMPORT_MODE";

impl FromStr for ImportMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "replace" => Ok(ImportMode::Replace),
            "merge" | "append" => Ok(ImportMode::Merge),
            other => Err(StoreError::Config(format!(
                "Unknown import mode: '{}'. Valid options: replace, merge",
                other
            ))),
        }
    }
}

// =============================================================================
// Store Config
// =============================================================================

/// Catalog file and report settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Where export writes and import reads.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Width of the near-expiry window, in days.
    #[serde(default = "default_near_expiry_days")]
    pub near_expiry_days: u32,

    /// Products with stock strictly below this are "low stock".
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,

    #[serde(default)]
    pub import_mode: ImportMode,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_near_expiry_days() -> u32 {
    30
}

fn default_low_stock_threshold() -> i64 {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_file: default_data_file(),
            near_expiry_days: default_near_expiry_days(),
            low_stock_threshold: default_low_stock_threshold(),
            import_mode: ImportMode::default(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration: defaults, then the TOML file (explicit path or
    /// the per-user default location), then environment overrides.
    ///
    /// A missing file is not an error; an unreadable or invalid one is.
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    fn load_with(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Like [`StoreConfig::load`], falling back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml(contents: &str) -> StoreResult<Self> {
        toml::from_str(contents).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Checks value ranges.
    pub fn validate(&self) -> StoreResult<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(StoreError::Config("data_file must not be empty".into()));
        }

        if self.low_stock_threshold < 0 {
            return Err(StoreError::Config(
                "low_stock_threshold must not be negative".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a key lookup. Unparsable values are logged and
    /// ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_DATA_FILE) {
            debug!(path = %path, "Overriding data file from environment");
            self.data_file = PathBuf::from(path);
        }

        if let Some(days) = lookup(ENV_NEAR_EXPIRY_DAYS) {
            match days.parse::<u32>() {
                Ok(d) => self.near_expiry_days = d,
                Err(_) => warn!(value = %days, "Invalid {} in environment", ENV_NEAR_EXPIRY_DAYS),
            }
        }

        if let Some(threshold) = lookup(ENV_LOW_STOCK_THRESHOLD) {
            match threshold.parse::<i64>() {
                Ok(t) => self.low_stock_threshold = t,
                Err(_) => warn!(value = %threshold, "Invalid {} in environment", ENV_LOW_STOCK_THRESHOLD),
            }
        }

        if let Some(mode) = lookup(ENV_IMPORT_MODE) {
            match mode.parse() {
                Ok(parsed) => self.import_mode = parsed,
                Err(_) => warn!(mode = %mode, "Unknown import mode in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shelf", "shelf")
            .map(|dirs| dirs.config_dir().join("shelf.toml"))
    }
}
