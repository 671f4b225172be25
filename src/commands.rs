//! End-to-end runs behind the CLI subcommands

use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::Config;
use crate::database::{ReferenceData, open_store};
use crate::errors::AppResult;
use crate::generator::{GeneratedFile, PlaylistGenerator};
use crate::services::{
    BlocklistMatcher, ChannelIndex, StreamReconciler, ValidationEngine, ValidationSummary,
};
use crate::sources::PlaylistParser;
use crate::utils::list_files;

/// Validate `files`, or every playlist under the streams directory when empty
pub async fn run_validation(config: &Config, files: Vec<PathBuf>) -> AppResult<ValidationSummary> {
    let data = ReferenceData::load_for_validation(&config.storage.data_dir).await?;
    let index = ChannelIndex::new(data.channels, vec![], vec![], vec![]);
    let blocklist = BlocklistMatcher::new(data.blocklist);
    debug!("Indexed {} channels for validation", index.channel_count());

    let extension = &config.validation.playlist_extension;
    let files = if files.is_empty() {
        list_files(&config.storage.streams_dir, extension).await?
    } else {
        files
    };
    info!("Validating {} playlist files", files.len());

    let engine = ValidationEngine::new(
        PlaylistParser::new(&config.storage.streams_dir),
        &index,
        &blocklist,
        extension.as_str(),
    );
    Ok(engine.validate_files(&files).await)
}

/// Reconcile the stream database and write every playlist artifact
pub async fn run_generation(config: &Config) -> AppResult<Vec<GeneratedFile>> {
    let data = ReferenceData::load(&config.storage.data_dir).await?;
    let index = ChannelIndex::from_reference(&data);
    info!("Indexed {} channels", index.channel_count());

    let store = open_store(&config.storage.database).await?;
    let raw = store.load_streams().await?;
    info!("Loaded {} streams from the database", raw.len());

    let streams = StreamReconciler::new(&index).reconcile(raw);
    PlaylistGenerator::from_config(&config.storage)
        .generate(&streams, &data, &index)
        .await
}
