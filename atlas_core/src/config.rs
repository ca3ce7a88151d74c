//! Engine configuration, loaded from TOML.
//!
//! Every field has a default, so an empty document yields
//! [`AtlasConfig::default()`].
//!
//! ```toml
//! [dataset]
//! dir = "data"
//!
//! [index]
//! base = 48
//! include_opposition = false
//!
//! [feed]
//! max_entries = 8
//! include_opposition = false
//!
//! [map]
//! hidden_categories = ["contested"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use atlas_data::{Dataset, DatasetError};

use crate::selectors::DEFAULT_POWER_BASE;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },
}

/// Top-level atlas configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub dataset: DatasetConfig,
    pub index: IndexConfig,
    pub feed: FeedConfig,
    pub map: MapConfig,
}

impl AtlasConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load the dataset directory named by `[dataset] dir`.
    pub fn load_dataset(&self) -> Result<Dataset, DatasetError> {
        Dataset::load_dir(&self.dataset.dir)
    }
}

/// Where the collection files live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub dir: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
        }
    }
}

/// Power index parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Score before any event delta is applied.
    pub base: i32,
    pub include_opposition: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_POWER_BASE,
            include_opposition: false,
        }
    }
}

/// Event feed parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Cap applied after the focused event is pinned.
    pub max_entries: usize,
    pub include_opposition: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_entries: 8,
            include_opposition: false,
        }
    }
}

/// Map reveal parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Build categories that are never revealed.
    pub hidden_categories: BTreeSet<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            hidden_categories: BTreeSet::from(["contested".to_string()]),
        }
    }
}
