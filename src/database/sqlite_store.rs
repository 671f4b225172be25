use async_trait::async_trait;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};
use tracing::debug;

use super::StreamStore;
use crate::errors::DataResult;
use crate::models::{Stream, StreamRecord};

const SELECT_STREAMS: &str = r#"
    SELECT channel, filepath, name, url, http_referrer, user_agent
    FROM streams
    ORDER BY rowid
"#;

/// Stream database held in an SQLite `streams` table
#[derive(Clone)]
pub struct SqliteStreamStore {
    connection: DatabaseConnection,
}

impl SqliteStreamStore {
    pub async fn connect(url: &str) -> DataResult<Self> {
        let connection = Database::connect(url).await?;
        Ok(Self { connection })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }
}

#[async_trait]
impl StreamStore for SqliteStreamStore {
    async fn load_streams(&self) -> DataResult<Vec<Stream>> {
        let rows = self
            .connection
            .query_all(Statement::from_string(
                DbBackend::Sqlite,
                SELECT_STREAMS.to_string(),
            ))
            .await?;

        let mut streams = Vec::with_capacity(rows.len());
        for row in rows {
            let record = StreamRecord {
                channel: row.try_get("", "channel")?,
                filepath: row.try_get("", "filepath")?,
                name: row.try_get("", "name")?,
                url: row.try_get("", "url")?,
                http_referrer: row.try_get("", "http_referrer")?,
                user_agent: row.try_get("", "user_agent")?,
            };
            streams.push(Stream::from(record));
        }

        debug!("Loaded {} streams from SQLite", streams.len());
        Ok(streams)
    }
}
