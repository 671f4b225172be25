//! Error type definitions for the playlist catalog
//!
//! This module defines the error types used throughout the crate. Playlist
//! parse failures are kept separate from data-loading failures because the
//! validation run recovers from the former and aborts on the latter.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Reference or stream data could not be loaded
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Filesystem errors outside of playlist parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed playlist structure
///
/// The validation engine downgrades every variant to a single line-0 log item,
/// so the messages are written to read well in lower case.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The playlist could not be read from disk
    #[error("Failed to read playlist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// First non-empty line is not the `#EXTM3U` header
    #[error("Playlist is missing the #EXTM3U header")]
    MissingHeader,

    /// A URL line appeared with no preceding `#EXTINF` directive
    #[error("Stream url without a preceding #EXTINF directive at line {line}")]
    UrlWithoutMetadata { line: usize },

    /// An `#EXTINF` directive without the comma that separates the title
    #[error("Invalid #EXTINF directive at line {line}: missing comma before the display name")]
    MissingTitleSeparator { line: usize },

    /// An `#EXTINF` directive that is never followed by a URL
    #[error("Missing stream url for #EXTINF directive at line {line}")]
    MissingUrl { line: usize },
}

/// Failures while loading reference datasets or the stream database
#[derive(Error, Debug)]
pub enum DataError {
    /// A data file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file is not valid JSON or is missing required fields
    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record violates a load-time constraint
    #[error("Invalid record in {dataset}: {message}")]
    InvalidRecord { dataset: String, message: String },

    /// Database errors from SeaORM
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl DataError {
    /// Create an invalid record error for the named dataset
    pub fn invalid_record<D: Into<String>, M: Into<String>>(dataset: D, message: M) -> Self {
        Self::InvalidRecord {
            dataset: dataset.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_messages_lowercase_cleanly() {
        let err = ParseError::UrlWithoutMetadata { line: 3 };
        assert_eq!(
            err.to_string().to_lowercase(),
            "stream url without a preceding #extinf directive at line 3"
        );
    }

    #[test]
    fn data_error_converts_into_app_error() {
        let err: AppError = DataError::invalid_record("channels", "duplicate id \"a.us\"").into();
        assert_eq!(
            err.to_string(),
            "Data error: Invalid record in channels: duplicate id \"a.us\""
        );
    }
}
