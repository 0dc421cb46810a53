//! Content loaders for reading engine data from files.

pub mod configs;
pub mod settings;
pub mod templates;

pub use configs::{ConfigLoader, LoadedConfigs};
pub use settings::{ModSettings, SettingsLoader};
pub use templates::{TemplateFile, TemplateLoader, TemplateWorld};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// RON options shared by the loaders. Optional fields may be written bare,
/// as in JSON.
pub(crate) fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
