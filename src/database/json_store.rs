use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use super::StreamStore;
use crate::errors::{DataError, DataResult};
use crate::models::{Stream, StreamRecord};

/// Stream database stored as one JSON document per line.
///
/// Extra document fields such as `_id` are ignored.
#[derive(Debug, Clone)]
pub struct JsonLinesStreamStore {
    path: PathBuf,
}

impl JsonLinesStreamStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StreamStore for JsonLinesStreamStore {
    async fn load_streams(&self) -> DataResult<Vec<Stream>> {
        let content =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| DataError::Io {
                    path: self.path.clone(),
                    source,
                })?;

        let mut streams = Vec::new();
        for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let record: StreamRecord =
                serde_json::from_str(line).map_err(|source| DataError::Json {
                    path: self.path.clone(),
                    source,
                })?;
            streams.push(Stream::from(record));
        }

        debug!(
            "Loaded {} streams from {}",
            streams.len(),
            self.path.display()
        );
        Ok(streams)
    }
}
