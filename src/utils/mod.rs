//! Utility modules for the playlist catalog
//!
//! Small, pure helpers shared by the parser, the reconciler and the
//! validation engine.

pub mod channel_id;
pub mod collection;
pub mod file;
pub mod transliterate;

pub use channel_id::derive_id;
pub use collection::{key_by, order_by, uniq_by};
pub use file::{country_code_from_path, has_extension, list_files, relative_to};
pub use transliterate::transliterate;
