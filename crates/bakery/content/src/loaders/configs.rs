//! Entity config loader.
//!
//! A config directory holds one entity per file. `*.json` files use the
//! original mod's format; `*.ron` files carry the same fields. Files are
//! processed in file-name order. A file that fails to parse or validate is
//! skipped and reported; the rest still load.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bakery_core::{BakeryError, EntityConfig};
use tracing::{error, info};

use crate::loaders::{LoadResult, read_file, ron_options};

/// Result of loading a config directory.
#[derive(Debug, Default)]
pub struct LoadedConfigs {
    pub configs: Vec<EntityConfig>,
    /// Files that were skipped, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

impl LoadedConfigs {
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

/// Format of a config file, from its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Json,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if extension.eq_ignore_ascii_case("ron") {
            Some(Self::Ron)
        } else {
            None
        }
    }
}

/// Loader for entity configs.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parses one config file. The format follows the file extension.
    pub fn load_file(path: &Path) -> LoadResult<EntityConfig> {
        let format = Format::of(path)
            .ok_or_else(|| anyhow::anyhow!("Unsupported config format: {}", path.display()))?;
        let content = read_file(path)?;
        Self::parse(&content, format).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn parse(content: &str, format: Format) -> LoadResult<EntityConfig> {
        let config = match format {
            Format::Json => serde_json::from_str(content)?,
            Format::Ron => ron_options().from_str(content)?,
        };
        Ok(config)
    }

    /// Config files in `dir`, sorted by file name.
    pub fn config_files(dir: &Path) -> LoadResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read config directory {}", dir.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && Format::of(&path).is_some() {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Whether `dir` holds at least one config file.
    pub fn has_config_files(dir: &Path) -> bool {
        Self::config_files(dir).is_ok_and(|files| !files.is_empty())
    }

    /// Loads every config in `dir`, skipping files that fail to parse or
    /// that have no display names or a non-positive new id.
    pub fn load_dir(dir: &Path) -> LoadResult<LoadedConfigs> {
        let mut loaded = LoadedConfigs::default();

        for path in Self::config_files(dir)? {
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            let config = match Self::load_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    error!(target: "bakery::content", file = %name, "failed to process config: {e:#}");
                    loaded.skipped.push((path, format!("{e:#}")));
                    continue;
                }
            };
            if let Err(e) = config.validate_intake() {
                error!(
                    target: "bakery::content",
                    file = %name,
                    code = e.error_code(),
                    "invalid config, skipping: {e}"
                );
                loaded.skipped.push((path, e.to_string()));
                continue;
            }

            info!(
                target: "bakery::content",
                key = %config.localization_key,
                id = config.new_item_id,
                "loaded item config"
            );
            loaded.configs.push(config);
        }

        if loaded.configs.is_empty() {
            error!(target: "bakery::content", dir = %dir.display(), "no usable configs found");
        }
        Ok(loaded)
    }
}
