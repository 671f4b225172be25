//! Centralized error handling for the playlist catalog
//!
//! # Error Categories
//!
//! - **Parse Errors**: malformed playlist documents, recovered per file
//! - **Data Errors**: reference JSON and stream database loading, fatal
//! - **Configuration Errors**: invalid or unreadable configuration
//!
//! # Usage
//!
//! ```rust
//! use playlist_catalog::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for playlist parsing Results
pub type ParseResult<T> = Result<T, ParseError>;

/// Convenience type alias for data loading Results
pub type DataResult<T> = Result<T, DataError>;
