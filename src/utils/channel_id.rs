//! Derived channel identifiers
//!
//! Playlists frequently carry streams with no `tvg-id`. For blocklist checks
//! such streams are given an identifier derived from their display name and
//! the country code of the playlist they live in, in the same `Name.cc` shape
//! as catalog ids.

use regex::Regex;
use std::sync::OnceLock;

use super::transliterate::transliterate;

fn parenthesized() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" *\([^)]*\) *").expect("parenthesized pattern is valid"))
}

// Matches the historical pattern: the bracket body excludes `)` rather than `]`.
fn bracketed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" *\[[^)]*\] *").expect("bracketed pattern is valid"))
}

fn non_alphanumeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9]+").expect("alphanumeric pattern is valid"))
}

/// Derive a catalog-style identifier from a display name and region code.
///
/// Returns an empty string when either input is empty.
///
/// ```rust
/// use playlist_catalog::utils::channel_id::derive_id;
///
/// assert_eq!(derive_id("RT (Arabic)", "fr"), "RT.fr");
/// assert_eq!(derive_id("Al Jazeera+", "qa"), "AlJazeeraPlus.qa");
/// assert_eq!(derive_id("", "us"), "");
/// ```
pub fn derive_id(name: &str, region_code: &str) -> String {
    if name.is_empty() || region_code.is_empty() {
        return String::new();
    }

    let name = parenthesized().replace_all(name, "");
    let name = bracketed().replace_all(&name, "");
    let name = name.replace('+', "Plus");
    let name = non_alphanumeric().replace_all(&name, "");
    let name = transliterate(name.trim());

    format!("{}.{}", name, region_code.to_lowercase())
}
