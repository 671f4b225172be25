//! Catalog storage
//!
//! Two kinds of data live outside the playlists themselves: the reference
//! datasets (channels, categories, countries ...) shipped as JSON files, and
//! the stream database that the generation stage reads. Both are loaded once,
//! up front, and any problem with them aborts the run.

use async_trait::async_trait;
use tracing::info;

use crate::errors::DataResult;
use crate::models::Stream;

pub mod json_store;
pub mod reference;
pub mod sqlite_store;

pub use json_store::JsonLinesStreamStore;
pub use reference::ReferenceData;
pub use sqlite_store::SqliteStreamStore;

/// Read access to the stream database
#[async_trait]
pub trait StreamStore: Send + Sync {
    /// Every stored stream, in storage order
    async fn load_streams(&self) -> DataResult<Vec<Stream>>;
}

/// Open the stream store named by `database`.
///
/// `sqlite:` URLs select the SQLite backend, anything else is treated as the
/// path of a JSON-lines file.
pub async fn open_store(database: &str) -> DataResult<Box<dyn StreamStore>> {
    if database.starts_with("sqlite:") {
        info!("Opening SQLite stream store at {}", database);
        let store = SqliteStreamStore::connect(database).await?;
        Ok(Box::new(store))
    } else {
        info!("Opening JSON-lines stream store at {}", database);
        Ok(Box::new(JsonLinesStreamStore::new(database)))
    }
}
