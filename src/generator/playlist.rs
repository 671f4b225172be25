//! M3U rendering for generated artifacts

use crate::models::Stream;

pub const UNDEFINED_GROUP: &str = "Undefined";

/// A stream placed under a group title in an output playlist
#[derive(Debug, Clone, Copy)]
pub struct PlaylistEntry<'a> {
    pub stream: &'a Stream,
    pub group: &'a str,
}

impl<'a> PlaylistEntry<'a> {
    pub fn new(stream: &'a Stream, group: &'a str) -> Self {
        Self { stream, group }
    }
}

/// Group title a stream carries in the flat index playlists
pub fn default_group(stream: &Stream) -> String {
    if stream.categories.is_empty() {
        UNDEFINED_GROUP.to_string()
    } else {
        stream
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Render a complete playlist document
pub fn render_playlist(entries: &[PlaylistEntry<'_>]) -> String {
    let mut m3u = String::from("#EXTM3U\n");
    for entry in entries {
        m3u.push_str(&render_entry(entry));
    }
    m3u
}

fn render_entry(entry: &PlaylistEntry<'_>) -> String {
    let stream = entry.stream;

    let mut extinf = format!(
        "#EXTINF:-1 tvg-id=\"{}\" tvg-logo=\"{}\" group-title=\"{}\"",
        stream.channel.as_deref().unwrap_or_default(),
        stream.logo.as_deref().unwrap_or_default(),
        entry.group
    );
    if let Some(user_agent) = &stream.user_agent {
        extinf.push_str(&format!(" user-agent=\"{}\"", user_agent));
    }
    if let Some(referrer) = &stream.http_referrer {
        extinf.push_str(&format!(" http-referrer=\"{}\"", referrer));
    }
    extinf.push_str(&format!(",{}\n", stream.name));

    if let Some(referrer) = &stream.http_referrer {
        extinf.push_str(&format!("#EXTVLCOPT:http-referrer={}\n", referrer));
    }
    if let Some(user_agent) = &stream.user_agent {
        extinf.push_str(&format!("#EXTVLCOPT:http-user-agent={}\n", user_agent));
    }

    extinf.push_str(&format!("{}\n", stream.url));
    extinf
}
