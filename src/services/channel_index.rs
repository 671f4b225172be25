//! Lookup tables over the reference datasets

use std::collections::HashMap;

use crate::database::ReferenceData;
use crate::models::{Category, Channel, Country, Language};
use crate::utils::key_by;

/// Read-only keyed access to channels, categories, languages and countries.
///
/// Built once per run. When a dataset repeats a key the later record wins;
/// channel ids are already unique by the time data reaches the index.
#[derive(Debug, Clone, Default)]
pub struct ChannelIndex {
    channels: HashMap<String, Channel>,
    categories: HashMap<String, Category>,
    languages: HashMap<String, Language>,
    countries: HashMap<String, Country>,
}

impl ChannelIndex {
    pub fn new(
        channels: Vec<Channel>,
        categories: Vec<Category>,
        languages: Vec<Language>,
        countries: Vec<Country>,
    ) -> Self {
        Self {
            channels: key_by(channels, |c| c.id.clone()),
            categories: key_by(categories, |c| c.id.clone()),
            languages: key_by(languages, |l| l.code.clone()),
            countries: key_by(countries, |c| c.code.clone()),
        }
    }

    pub fn from_reference(data: &ReferenceData) -> Self {
        Self::new(
            data.channels.clone(),
            data.categories.clone(),
            data.languages.clone(),
            data.countries.clone(),
        )
    }

    pub fn get_channel(&self, id: &str) -> Option<&Channel> {
        self.channels.get(id)
    }

    pub fn get_category(&self, id: &str) -> Option<&Category> {
        self.categories.get(id)
    }

    pub fn get_language(&self, code: &str) -> Option<&Language> {
        self.languages.get(code)
    }

    pub fn get_country(&self, code: &str) -> Option<&Country> {
        self.countries.get(code)
    }

    pub fn contains_channel(&self, id: &str) -> bool {
        self.channels.contains_key(id)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}
