//! Playlist artifact generation
//!
//! Publishes the reconciled stream set as a family of playlists:
//!
//! - `index.m3u` and `index.nsfw.m3u`, every stream in one list
//! - `index.{category,language,country,region}.m3u`, one entry per group
//! - `categories/`, `languages/`, `countries/`, `regions/`, one file per
//!   group plus `undefined.m3u` for streams that belong to none
//!
//! NSFW streams only ever appear in `index.nsfw.m3u`. Every file written is
//! recorded in `generators.log` as a JSON line.

use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};

use crate::config::StorageConfig;
use crate::database::ReferenceData;
use crate::errors::AppResult;
use crate::models::{Language, Stream};
use crate::services::ChannelIndex;
use crate::utils::order_by;

pub mod area;
pub mod playlist;

pub use area::AreaResolver;
pub use playlist::{PlaylistEntry, UNDEFINED_GROUP, default_group, render_playlist};

pub const GENERATORS_LOG: &str = "generators.log";

/// One written artifact, as recorded in `generators.log`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub filepath: String,
    pub count: usize,
}

pub struct PlaylistGenerator {
    output_dir: PathBuf,
    logs_dir: PathBuf,
}

impl PlaylistGenerator {
    pub fn new<O: Into<PathBuf>, L: Into<PathBuf>>(output_dir: O, logs_dir: L) -> Self {
        Self {
            output_dir: output_dir.into(),
            logs_dir: logs_dir.into(),
        }
    }

    pub fn from_config(storage: &StorageConfig) -> Self {
        Self::new(&storage.output_dir, &storage.logs_dir)
    }

    /// Write every artifact for `streams` and return what was written, in order.
    ///
    /// Country codes missing from `index` are left out of the grouped country
    /// playlist, so such streams fall under `Undefined` there.
    pub async fn generate(
        &self,
        streams: &[Stream],
        data: &ReferenceData,
        index: &ChannelIndex,
    ) -> AppResult<Vec<GeneratedFile>> {
        let sorted = order_by(streams.iter().collect::<Vec<_>>(), |s| s.name.clone());
        let safe: Vec<&Stream> = sorted.iter().copied().filter(|s| !s.is_nsfw).collect();
        let resolver = AreaResolver::new(&data.regions, &data.subdivisions);

        let mut written = Vec::new();

        info!("Generating categories/...");
        self.generate_categories(&safe, data, &mut written).await?;
        info!("Generating countries/...");
        self.generate_countries(&safe, data, &resolver, &mut written)
            .await?;
        info!("Generating languages/...");
        self.generate_languages(&safe, &mut written).await?;
        info!("Generating regions/...");
        self.generate_regions(&safe, data, &resolver, &mut written)
            .await?;

        info!("Generating index playlists...");
        let groups: Vec<String> = safe.iter().map(|s| default_group(s)).collect();
        let entries: Vec<_> = safe
            .iter()
            .zip(&groups)
            .map(|(s, g)| PlaylistEntry::new(s, g))
            .collect();
        self.write("index.m3u", &entries, &mut written).await?;

        let nsfw_groups: Vec<String> = sorted.iter().map(|s| default_group(s)).collect();
        let entries: Vec<_> = sorted
            .iter()
            .zip(&nsfw_groups)
            .map(|(s, g)| PlaylistEntry::new(s, g))
            .collect();
        self.write("index.nsfw.m3u", &entries, &mut written).await?;

        let by_category = grouped(&safe, |s| {
            s.categories.iter().map(|c| c.name.clone()).collect()
        });
        self.write_grouped("index.category.m3u", &by_category, &mut written)
            .await?;

        let by_language = grouped(&safe, |s| {
            s.languages.iter().map(|l| l.name.clone()).collect()
        });
        self.write_grouped("index.language.m3u", &by_language, &mut written)
            .await?;

        let by_country = grouped(&safe, |s| {
            resolver
                .countries(s)
                .iter()
                .filter_map(|code| index.get_country(code))
                .map(|c| c.name.clone())
                .collect()
        });
        self.write_grouped("index.country.m3u", &by_country, &mut written)
            .await?;

        let by_region = grouped(&safe, |s| {
            resolver
                .regions(s)
                .iter()
                .map(|r| r.name.clone())
                .collect()
        });
        self.write_grouped("index.region.m3u", &by_region, &mut written)
            .await?;

        self.write_log(&written).await?;
        info!("Generated {} playlists", written.len());
        Ok(written)
    }

    async fn generate_categories(
        &self,
        streams: &[&Stream],
        data: &ReferenceData,
        written: &mut Vec<GeneratedFile>,
    ) -> AppResult<()> {
        for category in &data.categories {
            let group = category.name.as_str();
            let entries: Vec<_> = streams
                .iter()
                .filter(|s| s.categories.iter().any(|c| c.id == category.id))
                .map(|s| PlaylistEntry::new(s, group))
                .collect();
            let file = format!("categories/{}.m3u", category.id);
            self.write(&file, &entries, written).await?;
        }

        let undefined: Vec<_> = streams
            .iter()
            .filter(|s| s.categories.is_empty())
            .map(|s| PlaylistEntry::new(s, UNDEFINED_GROUP))
            .collect();
        self.write("categories/undefined.m3u", &undefined, written)
            .await
    }

    async fn generate_countries(
        &self,
        streams: &[&Stream],
        data: &ReferenceData,
        resolver: &AreaResolver<'_>,
        written: &mut Vec<GeneratedFile>,
    ) -> AppResult<()> {
        let countries: Vec<Vec<String>> = streams.iter().map(|s| resolver.countries(s)).collect();

        for country in &data.countries {
            let entries: Vec<_> = streams
                .iter()
                .zip(&countries)
                .filter(|(_, codes)| codes.contains(&country.code))
                .map(|(s, _)| PlaylistEntry::new(s, country.name.as_str()))
                .collect();
            let file = format!("countries/{}.m3u", country.code.to_lowercase());
            self.write(&file, &entries, written).await?;
        }

        let undefined: Vec<_> = streams
            .iter()
            .zip(&countries)
            .filter(|(_, codes)| codes.is_empty())
            .map(|(s, _)| PlaylistEntry::new(s, UNDEFINED_GROUP))
            .collect();
        self.write("countries/undefined.m3u", &undefined, written)
            .await
    }

    async fn generate_languages(
        &self,
        streams: &[&Stream],
        written: &mut Vec<GeneratedFile>,
    ) -> AppResult<()> {
        let mut seen = HashSet::new();
        let languages: Vec<&Language> = streams
            .iter()
            .flat_map(|s| s.languages.iter())
            .filter(|l| seen.insert(l.code.as_str()))
            .collect();
        let languages = order_by(languages, |l| l.name.clone());

        for language in languages {
            let entries: Vec<_> = streams
                .iter()
                .filter(|s| s.languages.iter().any(|l| l.code == language.code))
                .map(|s| PlaylistEntry::new(s, language.name.as_str()))
                .collect();
            let file = format!("languages/{}.m3u", language.code);
            self.write(&file, &entries, written).await?;
        }

        let undefined: Vec<_> = streams
            .iter()
            .filter(|s| s.languages.is_empty())
            .map(|s| PlaylistEntry::new(s, UNDEFINED_GROUP))
            .collect();
        self.write("languages/undefined.m3u", &undefined, written)
            .await
    }

    async fn generate_regions(
        &self,
        streams: &[&Stream],
        data: &ReferenceData,
        resolver: &AreaResolver<'_>,
        written: &mut Vec<GeneratedFile>,
    ) -> AppResult<()> {
        let memberships: Vec<Vec<String>> = streams
            .iter()
            .map(|s| resolver.regions(s).iter().map(|r| r.code.clone()).collect())
            .collect();

        for region in &data.regions {
            let entries: Vec<_> = streams
                .iter()
                .zip(&memberships)
                .filter(|(_, codes)| codes.contains(&region.code))
                .map(|(s, _)| PlaylistEntry::new(s, region.name.as_str()))
                .collect();
            let file = format!("regions/{}.m3u", region.code.to_lowercase());
            self.write(&file, &entries, written).await?;
        }

        let undefined: Vec<_> = streams
            .iter()
            .zip(&memberships)
            .filter(|(_, codes)| codes.is_empty())
            .map(|(s, _)| PlaylistEntry::new(s, UNDEFINED_GROUP))
            .collect();
        self.write("regions/undefined.m3u", &undefined, written)
            .await
    }

    async fn write_grouped(
        &self,
        file: &str,
        groups: &[(&Stream, String)],
        written: &mut Vec<GeneratedFile>,
    ) -> AppResult<()> {
        let entries: Vec<_> = groups
            .iter()
            .map(|(s, g)| PlaylistEntry::new(s, g.as_str()))
            .collect();
        self.write(file, &entries, written).await
    }

    async fn write(
        &self,
        file: &str,
        entries: &[PlaylistEntry<'_>],
        written: &mut Vec<GeneratedFile>,
    ) -> AppResult<()> {
        let path = self.output_dir.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, render_playlist(entries)).await?;
        debug!("Wrote {} streams to {}", entries.len(), path.display());

        written.push(GeneratedFile {
            filepath: file.to_string(),
            count: entries.len(),
        });
        Ok(())
    }

    async fn write_log(&self, written: &[GeneratedFile]) -> AppResult<()> {
        fs::create_dir_all(&self.logs_dir).await?;
        let mut log = String::new();
        for file in written {
            let line = serde_json::to_string(file).map_err(std::io::Error::other)?;
            log.push_str(&line);
            log.push('\n');
        }
        fs::write(self.logs_dir.join(GENERATORS_LOG), log).await?;
        Ok(())
    }
}

/// One `(stream, group)` pair per group a stream belongs to.
///
/// Streams with no group go under `Undefined`. Pairs are sorted by group name
/// with `Undefined` last; `streams` order is kept within a group.
fn grouped<'s, F>(streams: &[&'s Stream], mut groups_of: F) -> Vec<(&'s Stream, String)>
where
    F: FnMut(&Stream) -> Vec<String>,
{
    let mut pairs = Vec::new();
    for &stream in streams {
        let groups = groups_of(stream);
        if groups.is_empty() {
            pairs.push((stream, UNDEFINED_GROUP.to_string()));
        } else {
            pairs.extend(groups.into_iter().map(|g| (stream, g)));
        }
    }
    order_by(pairs, |(_, group)| (group == UNDEFINED_GROUP, group.clone()))
}
