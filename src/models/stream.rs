use serde::{Deserialize, Serialize};

use super::{Category, Language};

/// One playable playlist entry, optionally bound to a catalog channel
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stream {
    /// Declared catalog identifier (`tvg-id`); never `Some("")`
    pub channel: Option<String>,
    pub name: String,
    pub url: String,
    pub logo: Option<String>,
    pub group_title: Option<String>,
    pub http_referrer: Option<String>,
    pub user_agent: Option<String>,
    /// Source playlist path relative to the streams directory
    pub filepath: Option<String>,
    pub categories: Vec<Category>,
    pub languages: Vec<Language>,
    pub broadcast_area: Vec<String>,
    pub is_nsfw: bool,
    /// 1-based line of the `#EXTINF` directive, 0 for database rows
    pub line: usize,
}

impl Stream {
    /// Declared channel id, if any
    pub fn channel_id(&self) -> Option<&str> {
        self.channel.as_deref()
    }
}

/// Raw stream database row, before reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRecord {
    #[serde(default)]
    pub channel: Option<String>,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub filepath: Option<String>,
    #[serde(default, alias = "http_referrer")]
    pub http_referrer: Option<String>,
    #[serde(default, alias = "user_agent", alias = "httpUserAgent")]
    pub user_agent: Option<String>,
}

impl From<StreamRecord> for Stream {
    fn from(record: StreamRecord) -> Self {
        Stream {
            channel: record.channel.filter(|c| !c.is_empty()),
            name: record.name,
            url: record.url,
            filepath: record.filepath,
            http_referrer: record.http_referrer.filter(|v| !v.is_empty()),
            user_agent: record.user_agent.filter(|v| !v.is_empty()),
            ..Stream::default()
        }
    }
}

/// Parsed playlist document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Playlist {
    pub streams: Vec<Stream>,
}
