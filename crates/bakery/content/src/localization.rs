//! Localized display names and descriptions.
//!
//! Configs carry per-language text keyed by language name. On a language
//! change every config pushes its name under its localization key and its
//! description under `<key>_Desc`, falling back to English.

use std::collections::BTreeMap;

use bakery_core::EntityConfig;
use tracing::{debug, info};

/// Languages the host reports.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Language {
    #[default]
    English,
    ChineseSimplified,
    ChineseTraditional,
    Russian,
    French,
    German,
    Japanese,
    Korean,
    Spanish,
}

impl Language {
    /// Parses a host language name. Unknown languages map to English.
    pub fn from_host(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Key used in config text maps.
    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// Destination of localized text.
pub trait LocalizationSink {
    fn set_override(&mut self, key: &str, text: &str);
}

/// Override table kept in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryLocalization {
    overrides: BTreeMap<String, String>,
}

impl MemoryLocalization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.overrides.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl LocalizationSink for MemoryLocalization {
    fn set_override(&mut self, key: &str, text: &str) {
        self.overrides.insert(key.to_owned(), text.to_owned());
    }
}

fn pick(texts: &BTreeMap<String, String>, language: Language) -> Option<&str> {
    texts
        .get(language.key())
        .or_else(|| texts.get(Language::English.key()))
        .map(String::as_str)
}

/// Pushes localized text for every config. Returns the number of overrides set.
pub fn apply_language<'a>(
    configs: impl IntoIterator<Item = &'a EntityConfig>,
    language: Language,
    sink: &mut dyn LocalizationSink,
) -> usize {
    let mut applied = 0;
    for config in configs {
        if let Some(name) = pick(&config.display_names, language) {
            sink.set_override(&config.localization_key, name);
            applied += 1;
        }
        if let Some(description) = pick(&config.localization_desc_values, language) {
            sink.set_override(&config.localization_desc_key(), description);
            applied += 1;
        } else {
            debug!(target: "bakery::content", key = %config.localization_key, "no description");
        }
    }
    info!(target: "bakery::content", %language, applied, "updated localization overrides");
    applied
}
