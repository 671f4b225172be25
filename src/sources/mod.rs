//! Playlist sources

pub mod m3u;

pub use m3u::{PlaylistParser, parse_m3u};
