//! Reference dataset loading
//!
//! Each dataset is a JSON array in `<data_dir>/<name>.json`. Records are
//! deserialized into typed models, so a missing required field fails the load
//! with the offending file named in the error.

use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::{DataError, DataResult};
use crate::models::{Blocked, Category, Channel, Country, Language, Region, Subdivision};

pub const CHANNELS_FILE: &str = "channels.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const COUNTRIES_FILE: &str = "countries.json";
pub const LANGUAGES_FILE: &str = "languages.json";
pub const REGIONS_FILE: &str = "regions.json";
pub const SUBDIVISIONS_FILE: &str = "subdivisions.json";
pub const BLOCKLIST_FILE: &str = "blocklist.json";

/// Every reference dataset, loaded once per run
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub channels: Vec<Channel>,
    pub categories: Vec<Category>,
    pub countries: Vec<Country>,
    pub languages: Vec<Language>,
    pub regions: Vec<Region>,
    pub subdivisions: Vec<Subdivision>,
    pub blocklist: Vec<Blocked>,
}

impl ReferenceData {
    pub async fn load(data_dir: &Path) -> DataResult<Self> {
        info!("Loading reference data from {}", data_dir.display());

        let data = Self {
            channels: read_dataset(data_dir, CHANNELS_FILE).await?,
            categories: read_dataset(data_dir, CATEGORIES_FILE).await?,
            countries: read_dataset(data_dir, COUNTRIES_FILE).await?,
            languages: read_dataset(data_dir, LANGUAGES_FILE).await?,
            regions: read_dataset(data_dir, REGIONS_FILE).await?,
            subdivisions: read_dataset(data_dir, SUBDIVISIONS_FILE).await?,
            blocklist: read_dataset(data_dir, BLOCKLIST_FILE).await?,
        };
        data.check()?;

        info!(
            "Loaded {} channels, {} categories, {} languages, {} countries, {} blocklist entries",
            data.channels.len(),
            data.categories.len(),
            data.languages.len(),
            data.countries.len(),
            data.blocklist.len()
        );
        Ok(data)
    }

    /// Load only the datasets a validation run needs: channels and blocklist
    pub async fn load_for_validation(data_dir: &Path) -> DataResult<Self> {
        info!("Loading channels and blocklist from {}", data_dir.display());

        let data = Self {
            channels: read_dataset(data_dir, CHANNELS_FILE).await?,
            blocklist: read_dataset(data_dir, BLOCKLIST_FILE).await?,
            ..Self::default()
        };
        data.check()?;

        info!("Found {} blocklist records", data.blocklist.len());
        Ok(data)
    }

    /// Enforce the load-time constraints that serde cannot express
    pub fn check(&self) -> DataResult<()> {
        let mut ids = HashSet::with_capacity(self.channels.len());
        for channel in &self.channels {
            if channel.id.trim().is_empty() {
                return Err(DataError::invalid_record(
                    "channels",
                    format!("channel \"{}\" has an empty id", channel.name),
                ));
            }
            if !ids.insert(channel.id.as_str()) {
                return Err(DataError::invalid_record(
                    "channels",
                    format!("duplicate id \"{}\"", channel.id),
                ));
            }
        }

        if let Some(entry) = self
            .blocklist
            .iter()
            .find(|entry| entry.channel.trim().is_empty())
        {
            return Err(DataError::invalid_record(
                "blocklist",
                format!("entry \"{}\" has an empty channel", entry.reference),
            ));
        }

        Ok(())
    }
}

async fn read_dataset<T: DeserializeOwned>(data_dir: &Path, file: &str) -> DataResult<Vec<T>> {
    let path = data_dir.join(file);
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| DataError::Io {
            path: path.clone(),
            source,
        })?;

    let records: Vec<T> =
        serde_json::from_str(&content).map_err(|source| DataError::Json { path, source })?;
    debug!("Read {} records from {}", records.len(), file);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn write_dataset(dir: &Path, blocklist: &str, channels: &str) {
        let files = [
            (CHANNELS_FILE, channels),
            (
                CATEGORIES_FILE,
                r#"[{"id":"news","name":"News"},{"id":"kids","name":"Kids"}]"#,
            ),
            (
                COUNTRIES_FILE,
                r#"[{"code":"US","name":"United States","languages":["eng"],"flag":"🇺🇸"}]"#,
            ),
            (LANGUAGES_FILE, r#"[{"code":"eng","name":"English"}]"#),
            (
                REGIONS_FILE,
                r#"[{"code":"NAM","name":"North America","countries":["US","CA"]}]"#,
            ),
            (
                SUBDIVISIONS_FILE,
                r#"[{"code":"US-CA","name":"California","country":"US"}]"#,
            ),
            (BLOCKLIST_FILE, blocklist),
        ];
        for (file, content) in files {
            tokio::fs::write(dir.join(file), content).await.unwrap();
        }
    }

    const CHANNELS: &str = r#"[
        {"id":"CNN.us","name":"CNN","country":"US","categories":["news"],"languages":["eng"],"broadcast_area":["c/US"],"is_nsfw":false,"logo":"https://i.imgur.com/cnn.png"},
        {"id":"Adult.us","name":"Adult","categories":[],"languages":[],"broadcastArea":["r/NAM"],"isNSFW":true}
    ]"#;

    #[tokio::test]
    async fn loads_all_datasets() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(
            dir.path(),
            r#"[{"channel":"Pirate.us","ref":"DMCA-123"}]"#,
            CHANNELS,
        )
        .await;

        let data = ReferenceData::load(dir.path()).await.unwrap();
        assert_eq!(data.channels.len(), 2);
        assert!(data.channels[1].is_nsfw);
        assert_eq!(data.channels[1].broadcast_area, vec!["r/NAM"]);
        assert_eq!(data.categories.len(), 2);
        assert_eq!(data.regions[0].countries, vec!["US", "CA"]);
        assert_eq!(data.subdivisions[0].country, "US");
        assert_eq!(data.blocklist[0].reference, "DMCA-123");
    }

    #[tokio::test]
    async fn duplicate_channel_id_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(
            dir.path(),
            "[]",
            r#"[{"id":"CNN.us","name":"CNN"},{"id":"CNN.us","name":"CNN HD"}]"#,
        )
        .await;

        let err = ReferenceData::load(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("duplicate id \"CNN.us\""));
    }

    #[tokio::test]
    async fn empty_blocklist_channel_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), r#"[{"channel":"","ref":"DMCA-9"}]"#, CHANNELS).await;

        let err = ReferenceData::load(dir.path()).await.unwrap_err();
        assert!(matches!(err, DataError::InvalidRecord { ref dataset, .. } if dataset == "blocklist"));
    }

    #[tokio::test]
    async fn missing_required_field_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), r#"[{"channel":"X.us"}]"#, CHANNELS).await;

        let err = ReferenceData::load(dir.path()).await.unwrap_err();
        match err {
            DataError::Json { path, .. } => assert!(path.ends_with(BLOCKLIST_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn validation_load_reads_two_datasets() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(CHANNELS_FILE), CHANNELS)
            .await
            .unwrap();
        tokio::fs::write(
            dir.path().join(BLOCKLIST_FILE),
            r#"[{"channel":"Pirate.us","ref":"DMCA-123"}]"#,
        )
        .await
        .unwrap();

        let data = ReferenceData::load_for_validation(dir.path()).await.unwrap();
        assert_eq!(data.channels.len(), 2);
        assert_eq!(data.blocklist.len(), 1);
        assert!(data.categories.is_empty());
    }

    #[tokio::test]
    async fn missing_dataset_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReferenceData::load(dir.path()).await.unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
