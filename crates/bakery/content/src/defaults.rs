//! Sample config written on first run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bakery_core::EntityConfig;
use tracing::info;

use crate::loaders::LoadResult;

fn names(entries: [(&str, &str); 3]) -> BTreeMap<String, String> {
    entries
        .into_iter()
        .map(|(language, text)| (language.to_owned(), text.to_owned()))
        .collect()
}

/// A luxury valuable derived from template 135.
pub fn ocean_tear() -> EntityConfig {
    EntityConfig {
        display_names: names([
            ("English", "Ocean's Tear"),
            ("ChineseSimplified", "海洋之泪"),
            ("Russian", "Слеза океана"),
        ]),
        localization_desc_values: names([
            (
                "English",
                "A new T0 grand-red from the Delta Restricted Zone, comparable to the Heart of Africa. \
                 Often found in the Tidal Prison, it seems to be a treasured item brought by a veteran, \
                 valued at over 20 million.",
            ),
            (
                "ChineseSimplified",
                "三角洲暗区新T0级大红，对标非洲之心，多刷新于潮汐监狱貌似是某位退伍老兵带来的珍藏品，价值超2000W",
            ),
            (
                "Russian",
                "Новый ценный предмет T0 из запретной зоны Дельты, сравнимый с Сердцем Африки. \
                 Часто встречается в Приливной тюрьме, по-видимому, это ценный предмет, \
                 принесенный ветераном, стоимостью более 20 миллионов.",
            ),
        ]),
        weight: Some(0.2),
        value: Some(50_000_000),
        quality: Some(9),
        tags: vec!["Luxury".to_owned()],
        icon_file_name: Some("ocean_tear.png".to_owned()),
        ..EntityConfig::new(135, 95001, "OceanTear")
    }
}

/// File name a config is written under.
pub fn config_file_name(config: &EntityConfig) -> String {
    format!("{}_{}.json", config.new_item_id, config.localization_key)
}

/// Writes the sample configs into `dir` as indented JSON, creating the
/// directory if needed.
pub fn write_default_configs(dir: &Path) -> LoadResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create config directory {}", dir.display()))?;

    let mut written = Vec::new();
    for config in [ocean_tear()] {
        let path = dir.join(config_file_name(&config));
        let json = serde_json::to_string_pretty(&config)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(target: "bakery::content", file = %path.display(), "generated default config");
        written.push(path);
    }
    Ok(written)
}
