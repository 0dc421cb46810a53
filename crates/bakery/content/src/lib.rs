//! Data-driven content for the bakery engine.
//!
//! This crate reads everything the engine consumes from disk:
//! - Entity configs (JSON as written by the original mod, or RON)
//! - Template catalogs for offline runs (RON)
//! - Mod settings (TOML)
//!
//! It also generates the default sample config and pushes localized names
//! and descriptions to the host's localization table on language change.

pub mod defaults;
pub mod loaders;
pub mod localization;

pub use defaults::{config_file_name, ocean_tear, write_default_configs};
pub use loaders::{
    ConfigLoader, LoadResult, LoadedConfigs, ModSettings, SettingsLoader, TemplateFile,
    TemplateLoader, TemplateWorld,
};
pub use localization::{Language, LocalizationSink, MemoryLocalization, apply_language};
