/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Config file
pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";
pub const ENV_PREFIX: &str = "PLAYLIST_CATALOG_";

// Storage defaults
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_STREAMS_DIR: &str = "./streams";
pub const DEFAULT_DATABASE: &str = "./database/streams.db";
pub const DEFAULT_OUTPUT_DIR: &str = "./.gh-pages";
pub const DEFAULT_LOGS_DIR: &str = "./scripts/logs";

// Validation defaults
pub const DEFAULT_PLAYLIST_EXTENSION: &str = "m3u";
