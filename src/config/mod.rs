use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};

pub mod defaults;

use defaults::*;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the reference JSON files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Root of the playlist tree that `validate` walks
    #[serde(default = "default_streams_dir")]
    pub streams_dir: PathBuf,
    /// Stream database: a JSON-lines file path or a `sqlite:` URL
    #[serde(default = "default_database")]
    pub database: String,
    /// Where `generate` writes playlist artifacts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Files with any other extension are skipped
    #[serde(default = "default_playlist_extension")]
    pub playlist_extension: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_streams_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STREAMS_DIR)
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LOGS_DIR)
}

fn default_playlist_extension() -> String {
    DEFAULT_PLAYLIST_EXTENSION.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            streams_dir: default_streams_dir(),
            database: default_database(),
            output_dir: default_output_dir(),
            logs_dir: default_logs_dir(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            playlist_extension: default_playlist_extension(),
        }
    }
}

impl Config {
    /// Load configuration layered as defaults, then the TOML file, then
    /// `PLAYLIST_CATALOG_*` environment variables (`__` separates nesting).
    ///
    /// A missing file is not an error; the defaults and environment apply.
    pub fn load_from_file<P: AsRef<Path>>(config_file: P) -> AppResult<Self> {
        let config_file = config_file.as_ref();
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if config_file.exists() {
            info!("Loading configuration from {}", config_file.display());
            figment = figment.merge(Toml::file(config_file));
        } else {
            debug!(
                "Config file {} not found, using defaults",
                config_file.display()
            );
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| AppError::configuration(e.to_string()))
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> AppResult<String> {
        toml::to_string_pretty(self).map_err(|e| AppError::configuration(e.to_string()))
    }
}
