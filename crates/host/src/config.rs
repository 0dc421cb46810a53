//! Host configuration from the process environment.
use std::env;
use std::path::PathBuf;

use bakery_content::Language;

/// Host configuration.
#[derive(Clone, Debug)]
pub struct HostConfig {
    /// Mod directory holding `settings.toml`, `configs/` and `logs/`.
    pub mod_dir: PathBuf,
    /// Language override; settings apply when unset.
    pub language: Option<Language>,
    /// Template catalog for offline runs.
    pub templates: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            mod_dir: default_mod_dir(),
            language: None,
            templates: None,
        }
    }
}

impl HostConfig {
    /// Construct host configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BAKERY_MOD_DIR` - Mod directory (default: platform data dir)
    /// - `BAKERY_LANGUAGE` - Language name, e.g. `Russian` (default: from settings)
    /// - `BAKERY_TEMPLATES` - Template catalog RON file
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = env::var_os("BAKERY_MOD_DIR") {
            config.mod_dir = PathBuf::from(dir);
        }
        if let Ok(language) = env::var("BAKERY_LANGUAGE") {
            config.language = Some(Language::from_host(&language));
        }
        if let Some(path) = env::var_os("BAKERY_TEMPLATES") {
            config.templates = Some(PathBuf::from(path));
        }

        config
    }
}

/// Platform data directory for the mod, or the working directory.
fn default_mod_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "bakery")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
