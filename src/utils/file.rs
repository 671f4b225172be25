//! Playlist file helpers

use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;
use tokio::fs;
use tracing::warn;

fn country_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([a-z]{2})(_|$)").expect("country prefix pattern is valid"))
}

/// Two-letter lowercase country code leading a playlist's file name.
///
/// The code must be followed by `_` or end the name (extension excluded):
/// `fr_news.m3u` and `fr.m3u` yield `fr`, `news.m3u` and `FR.m3u` yield nothing.
pub fn country_code_from_path<P: AsRef<Path>>(path: P) -> Option<String> {
    let stem = path.as_ref().file_stem()?.to_str()?;
    country_prefix()
        .captures(stem)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Whether `path` carries the given extension (without the leading dot)
pub fn has_extension<P: AsRef<Path>>(path: P, extension: &str) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == extension)
}

/// Express `path` relative to `root` when it lies under it.
///
/// `.` components are ignored on both sides; paths outside `root` are
/// returned unchanged apart from that cleanup.
pub fn relative_to(root: &Path, path: &Path) -> PathBuf {
    let clean = |p: &Path| -> PathBuf {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    };
    let (root, path) = (clean(root), clean(path));
    match path.strip_prefix(&root) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => path,
    }
}

/// Recursively list files under `root` with the given extension, sorted by path.
///
/// A missing `root` yields an empty list.
pub async fn list_files(root: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>> {
    if !fs::try_exists(root).await? {
        warn!("Playlist directory {} does not exist", root.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                pending.push(path);
            } else if has_extension(&path, extension) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tracing_test::traced_test;

    #[rstest]
    #[case("streams/fr_news.m3u", Some("fr"))]
    #[case("fr.m3u", Some("fr"))]
    #[case("us_pluto.m3u", Some("us"))]
    #[case("news.m3u", None)]
    #[case("FR_news.m3u", None)]
    #[case("fra.m3u", None)]
    #[case("unsorted.m3u", None)]
    fn extracts_country_prefix(#[case] path: &str, #[case] expected: Option<&str>) {
        assert_eq!(country_code_from_path(path).as_deref(), expected);
    }

    #[test]
    fn checks_extension() {
        assert!(has_extension("a/b/us.m3u", "m3u"));
        assert!(!has_extension("a/b/us.m3u8", "m3u"));
        assert!(!has_extension("README", "m3u"));
    }

    #[rstest]
    #[case("./streams", "streams/us.m3u", "us.m3u")]
    #[case("streams", "./streams/nested/fr.m3u", "nested/fr.m3u")]
    #[case("/srv/streams", "/srv/streams/ca.m3u", "ca.m3u")]
    #[case("./streams", "elsewhere/uk.m3u", "elsewhere/uk.m3u")]
    fn resolves_relative_paths(#[case] root: &str, #[case] path: &str, #[case] expected: &str) {
        assert_eq!(
            relative_to(Path::new(root), Path::new(path)),
            PathBuf::from(expected)
        );
    }

    #[tokio::test]
    async fn lists_nested_playlists_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir_all(&nested).await.unwrap();
        fs::write(dir.path().join("us.m3u"), "#EXTM3U\n").await.unwrap();
        fs::write(dir.path().join("fr.m3u"), "#EXTM3U\n").await.unwrap();
        fs::write(dir.path().join("notes.txt"), "").await.unwrap();
        fs::write(nested.join("ca.m3u"), "#EXTM3U\n").await.unwrap();

        let files = list_files(dir.path(), "m3u").await.unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["fr.m3u", "nested/ca.m3u", "us.m3u"]);
    }

    #[tokio::test]
    #[traced_test]
    async fn missing_root_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("streams");

        let files = list_files(&missing, "m3u").await.unwrap();
        assert!(files.is_empty());
        assert!(logs_contain("does not exist"));
    }
}
