use std::collections::HashMap;

use crate::models::Blocked;

/// Case-insensitive lookup over blocklist entries.
///
/// When several entries share a channel the earliest one in the list is
/// reported.
#[derive(Debug, Clone, Default)]
pub struct BlocklistMatcher {
    entries: Vec<Blocked>,
    by_channel: HashMap<String, usize>,
}

impl BlocklistMatcher {
    pub fn new(entries: Vec<Blocked>) -> Self {
        let mut by_channel = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            by_channel
                .entry(entry.channel.to_lowercase())
                .or_insert(position);
        }
        Self {
            entries,
            by_channel,
        }
    }

    /// Blocklist entry matching the declared id or the derived id, if any.
    ///
    /// If both candidates match different entries the one listed first wins.
    pub fn find(&self, declared: Option<&str>, derived: &str) -> Option<&Blocked> {
        [declared.unwrap_or_default(), derived]
            .into_iter()
            .filter(|candidate| !candidate.is_empty())
            .filter_map(|candidate| self.by_channel.get(&candidate.to_lowercase()))
            .min()
            .map(|&position| &self.entries[position])
    }

}
