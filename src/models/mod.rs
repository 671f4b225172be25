//! Catalog data model
//!
//! Reference entities (channels, categories, languages, countries, regions,
//! subdivisions, blocklist) are deserialized straight from the catalog's JSON
//! files and are immutable for the rest of the run. [`Stream`] is the only
//! record that is mutated, during reconciliation.

use serde::{Deserialize, Serialize};

pub mod log_item;
pub mod stream;

pub use log_item::{LogItem, LogType};
pub use stream::{Playlist, Stream, StreamRecord};

/// Canonical catalog channel a stream may reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default, alias = "broadcastArea")]
    pub broadcast_area: Vec<String>,
    #[serde(default, alias = "isNSFW")]
    pub is_nsfw: bool,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub flag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub countries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subdivision {
    pub code: String,
    pub name: String,
    pub country: String,
}

/// Blocklist entry withheld from publication on a rights-holder claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blocked {
    /// Channel identifier or display name
    pub channel: String,
    /// Justification, usually a takedown reference
    #[serde(rename = "ref")]
    pub reference: String,
}
