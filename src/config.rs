use crate::favorites::FAVORITES_KEY;
use crate::schedule::{GridConfig, GridConfigError, MatchPolicy, WeeklyGrid};
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "course-catalog";

pub const ENV_CONFIG: &str = "COURSE_CATALOG_CONFIG";
pub const ENV_SOURCE: &str = "COURSE_CATALOG_SOURCE";
pub const ENV_DATA_DIR: &str = "COURSE_CATALOG_DATA_DIR";

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Serialization(SerdeJsonError),
    Grid(GridConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "io error: {err}"),
            ConfigError::Serialization(err) => write!(f, "invalid config: {err}"),
            ConfigError::Grid(err) => write!(f, "invalid grid: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SerdeJsonError> for ConfigError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<GridConfigError> for ConfigError {
    fn from(value: GridConfigError) -> Self {
        Self::Grid(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// CSV path or published-sheet URL loaded at startup.
    pub source: Option<String>,
    /// Directory holding the favorites blob.
    pub data_dir: PathBuf,
    pub favorites_key: String,
    pub grid: GridConfig,
    pub policy: MatchPolicy,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: None,
            data_dir: default_data_dir(),
            favorites_key: FAVORITES_KEY.to_string(),
            grid: GridConfig::default(),
            policy: MatchPolicy::default(),
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl CatalogConfig {
    /// Missing keys take their defaults. The grid is checked eagerly so a bad
    /// file fails here rather than at first render.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: CatalogConfig = serde_json::from_str(&contents)?;
        config.weekly_grid()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Config file named by `COURSE_CATALOG_CONFIG` (or defaults), then the
    /// `COURSE_CATALOG_SOURCE` / `COURSE_CATALOG_DATA_DIR` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = match non_empty(ENV_CONFIG) {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(source) = non_empty(ENV_SOURCE) {
            config.source = Some(source);
        }
        if let Some(dir) = non_empty(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn weekly_grid(&self) -> Result<WeeklyGrid, GridConfigError> {
        WeeklyGrid::from_config(&self.grid)
    }
}
