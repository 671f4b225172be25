//! M3U playlist parser
//!
//! Turns a catalog playlist into [`Stream`] records. The accepted structure is
//! the extended M3U dialect used across IPTV tooling:
//!
//! ```text
//! #EXTM3U
//! #EXTINF:-1 tvg-id="CNN.us" tvg-logo="https://i.imgur.com/cnn.png" group-title="News",CNN (720p)
//! #EXTVLCOPT:http-referrer=https://cnn.com/
//! https://cnn-cnninternational-1-de.samsung.wurl.com/manifest/playlist.m3u8
//! ```
//!
//! Each `#EXTINF` directive must be followed by exactly one URL line. Unknown
//! `#` directives are treated as comments.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{ParseError, ParseResult};
use crate::models::{Playlist, Stream};

const HEADER: &str = "#EXTM3U";
const EXTINF: &str = "#EXTINF:";
const EXTVLCOPT: &str = "#EXTVLCOPT:";

/// Reads playlists from a streams directory and parses them
#[derive(Debug, Clone)]
pub struct PlaylistParser {
    root: PathBuf,
}

impl PlaylistParser {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parse the playlist at `relative`, resolved against the streams directory.
    ///
    /// Absolute paths are read as-is. Streams carry `relative` as their
    /// `filepath`.
    pub async fn parse<P: AsRef<Path>>(&self, relative: P) -> ParseResult<Playlist> {
        let relative = relative.as_ref();
        let full_path = self.root.join(relative);

        let content =
            tokio::fs::read_to_string(&full_path)
                .await
                .map_err(|source| ParseError::Io {
                    path: full_path.clone(),
                    source,
                })?;

        let filepath = relative.to_string_lossy().into_owned();
        let playlist = parse_m3u(&content, Some(filepath.as_str()))?;
        debug!(
            "Parsed {} streams from {}",
            playlist.streams.len(),
            full_path.display()
        );
        Ok(playlist)
    }
}

/// Partially parsed entry waiting for its URL line
struct PendingStream {
    stream: Stream,
}

/// Parse playlist content into streams, preserving document order
pub fn parse_m3u(content: &str, filepath: Option<&str>) -> ParseResult<Playlist> {
    let mut streams = Vec::new();
    let mut pending: Option<PendingStream> = None;
    let mut seen_header = false;

    for (index, raw_line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim_start_matches('\u{feff}').trim();

        if line.is_empty() {
            continue;
        }

        if !seen_header {
            if !line.starts_with(HEADER) {
                return Err(ParseError::MissingHeader);
            }
            seen_header = true;
            continue;
        }

        if let Some(directive) = line.strip_prefix(EXTINF) {
            if let Some(open) = pending.take() {
                return Err(ParseError::MissingUrl {
                    line: open.stream.line,
                });
            }

            let mut stream = parse_extinf(directive, line_number)?;
            stream.filepath = filepath.map(str::to_string);
            pending = Some(PendingStream { stream });
        } else if let Some(option) = line.strip_prefix(EXTVLCOPT) {
            if let Some(open) = pending.as_mut() {
                apply_vlc_option(&mut open.stream, option);
            }
        } else if line.starts_with('#') {
            continue;
        } else {
            let Some(PendingStream { mut stream }) = pending.take() else {
                return Err(ParseError::UrlWithoutMetadata { line: line_number });
            };
            stream.url = line.to_string();
            streams.push(stream);
        }
    }

    if !seen_header {
        return Err(ParseError::MissingHeader);
    }

    if let Some(open) = pending {
        return Err(ParseError::MissingUrl {
            line: open.stream.line,
        });
    }

    Ok(Playlist { streams })
}

/// Parse the body of an `#EXTINF:` directive (everything after the colon)
fn parse_extinf(directive: &str, line_number: usize) -> ParseResult<Stream> {
    let separator = title_separator(directive).ok_or(ParseError::MissingTitleSeparator {
        line: line_number,
    })?;

    let (duration_and_attrs, title) = directive.split_at(separator);
    let title = title[1..].trim();
    let mut attributes = parse_attributes(duration_and_attrs);

    Ok(Stream {
        channel: non_empty(attributes.remove("tvg-id")),
        name: title.to_string(),
        logo: non_empty(attributes.remove("tvg-logo")),
        group_title: non_empty(attributes.remove("group-title")),
        user_agent: non_empty(attributes.remove("user-agent")),
        http_referrer: non_empty(attributes.remove("http-referrer")),
        line: line_number,
        ..Stream::default()
    })
}

/// Position of the first comma outside a quoted attribute value
fn title_separator(directive: &str) -> Option<usize> {
    let mut in_quotes = false;
    for (position, ch) in directive.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => return Some(position),
            _ => {}
        }
    }
    None
}

/// Parse `key="value"` pairs; the leading duration token is ignored
fn parse_attributes(attrs_part: &str) -> HashMap<String, String> {
    let mut attributes = HashMap::new();
    let mut chars = attrs_part.chars().peekable();
    let mut current_key = String::new();
    let mut current_value = String::new();
    let mut in_quotes = false;
    let mut in_value = false;

    while let Some(ch) = chars.next() {
        match ch {
            ' ' | '\t' if !in_quotes => {
                if in_value && !current_key.is_empty() {
                    attributes.insert(current_key.to_lowercase(), current_value.clone());
                }
                current_key.clear();
                current_value.clear();
                in_value = false;
            }
            '=' if !in_quotes && !in_value => {
                in_value = true;
                if chars.peek() == Some(&'"') {
                    chars.next();
                    in_quotes = true;
                }
            }
            '"' if in_quotes => {
                in_quotes = false;
                attributes.insert(current_key.to_lowercase(), current_value.clone());
                current_key.clear();
                current_value.clear();
                in_value = false;
            }
            _ => {
                if in_value {
                    current_value.push(ch);
                } else {
                    current_key.push(ch);
                }
            }
        }
    }

    if in_value && !current_key.is_empty() {
        attributes.insert(current_key.to_lowercase(), current_value);
    }

    attributes
}

/// Apply an `#EXTVLCOPT:key=value` option to the open stream
fn apply_vlc_option(stream: &mut Stream, option: &str) {
    let Some((key, value)) = option.split_once('=') else {
        return;
    };
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    match key.trim() {
        "http-referrer" => stream.http_referrer = Some(value.to_string()),
        "http-user-agent" => stream.user_agent = Some(value.to_string()),
        _ => {}
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
