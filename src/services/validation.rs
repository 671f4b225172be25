//! Playlist validation
//!
//! Each playlist is checked on its own: a file that cannot be parsed is
//! recorded as a single error and the run moves on, so one broken file never
//! hides problems in the rest of the catalog. Only the aggregate error count
//! decides whether the run fails.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::blocklist::BlocklistMatcher;
use super::channel_index::ChannelIndex;
use crate::models::{LogItem, Stream};
use crate::sources::PlaylistParser;
use crate::utils::{country_code_from_path, derive_id, has_extension, relative_to};

/// Findings for one playlist file, in the order the checks fired
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub items: Vec<LogItem>,
}

impl FileReport {
    pub fn errors(&self) -> usize {
        self.items.iter().filter(|item| item.is_error()).count()
    }

    pub fn warnings(&self) -> usize {
        self.items.len() - self.errors()
    }
}

/// Outcome of a validation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationSummary {
    /// Only files with at least one finding, in processing order
    pub reports: Vec<FileReport>,
    pub errors: usize,
    pub warnings: usize,
    /// Files that were actually checked (extension matched)
    pub files_checked: usize,
}

impl ValidationSummary {
    pub fn problems(&self) -> usize {
        self.errors + self.warnings
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.has_errors() { 1 } else { 0 }
    }

    fn push(&mut self, report: FileReport) {
        self.errors += report.errors();
        self.warnings += report.warnings();
        if !report.items.is_empty() {
            self.reports.push(report);
        }
    }
}

/// Runs the per-file checks against the channel index and blocklist
pub struct ValidationEngine<'a> {
    parser: PlaylistParser,
    index: &'a ChannelIndex,
    blocklist: &'a BlocklistMatcher,
    extension: String,
}

impl<'a> ValidationEngine<'a> {
    pub fn new(
        parser: PlaylistParser,
        index: &'a ChannelIndex,
        blocklist: &'a BlocklistMatcher,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            parser,
            index,
            blocklist,
            extension: extension.into(),
        }
    }

    /// Validate `files` strictly in the order given
    pub async fn validate_files(&self, files: &[PathBuf]) -> ValidationSummary {
        let mut summary = ValidationSummary::default();

        for path in files {
            if !has_extension(path, &self.extension) {
                debug!("Skipping {}: not a .{} file", path.display(), self.extension);
                continue;
            }
            summary.files_checked += 1;
            let report = self.validate_file(path).await;
            summary.push(report);
        }

        info!(
            "Validated {} files: {} errors, {} warnings",
            summary.files_checked, summary.errors, summary.warnings
        );
        summary
    }

    /// Validate a single playlist; parse failures become one line-0 error
    pub async fn validate_file(&self, path: &Path) -> FileReport {
        let country_hint = country_code_from_path(path).unwrap_or_default();
        let relative = relative_to(self.parser.root(), path);

        let items = match self.parser.parse(&relative).await {
            Ok(playlist) => self.check_streams(&playlist.streams, &country_hint),
            Err(err) => {
                debug!("Failed to parse {}: {}", path.display(), err);
                vec![LogItem::error(0, err.to_string().to_lowercase())]
            }
        };

        FileReport {
            path: path.to_path_buf(),
            items,
        }
    }

    /// Run the unknown-channel, duplicate-url and blocklist checks in order
    pub fn check_streams(&self, streams: &[Stream], country_hint: &str) -> Vec<LogItem> {
        let mut items = Vec::new();
        let mut seen_urls: HashSet<&str> = HashSet::new();

        for stream in streams {
            if let Some(channel) = stream.channel_id()
                && !self.index.contains_channel(channel)
            {
                items.push(LogItem::warning(
                    stream.line,
                    format!("\"{channel}\" is not in the database"),
                ));
            }

            if !stream.url.is_empty() && !seen_urls.insert(stream.url.as_str()) {
                items.push(LogItem::warning(
                    stream.line,
                    format!("\"{}\" is already on the playlist", stream.url),
                ));
            }

            let derived = derive_id(&stream.name, country_hint);
            if let Some(blocked) = self.blocklist.find(stream.channel_id(), &derived) {
                items.push(LogItem::error(
                    stream.line,
                    format!(
                        "\"{}\" is on the blocklist due to claims of copyright holders ({})",
                        stream.name, blocked.reference
                    ),
                ));
            }
        }

        items
    }
}
