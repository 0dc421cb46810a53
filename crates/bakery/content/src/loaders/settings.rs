//! Mod settings loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Settings read from `settings.toml` in the mod directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModSettings {
    /// Config directory, relative to the mod directory.
    pub configs_dir: String,
    /// Language used before the host reports one.
    pub language: String,
    /// Write the sample config when the config directory has none.
    pub generate_defaults: bool,
    /// Template file for offline runs, relative to the mod directory.
    pub templates: Option<String>,
}

impl Default for ModSettings {
    fn default() -> Self {
        Self {
            configs_dir: "configs".to_owned(),
            language: "English".to_owned(),
            generate_defaults: true,
            templates: None,
        }
    }
}

/// Loader for mod settings.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> LoadResult<ModSettings> {
        let content = read_file(path)?;
        toml::from_str(&content).map_err(|e| anyhow::anyhow!("Failed to parse settings TOML: {}", e))
    }

    /// Like [`SettingsLoader::load`], but a missing file yields defaults.
    pub fn load_or_default(path: &Path) -> LoadResult<ModSettings> {
        if !path.exists() {
            debug!(target: "bakery::content", path = %path.display(), "no settings file, using defaults");
            return Ok(ModSettings::default());
        }
        Self::load(path)
    }
}
