//! Patch application and registry lifecycle engine.
//!
//! `bakery-core` derives new items from templates it does not own: a config
//! names a template, the [`pipeline::Augmenter`] clones it, patches its
//! private fields through per-type field tables, attaches capability modules,
//! applies stat deltas, registers the result with the host catalog under its
//! final id and publishes crafting artifacts into a [`registry::RegistryContext`]
//! that can later remove exactly what was added.
//!
//! The host collaborators (template catalog, tag catalog, buff service) are
//! traits in [`env`]; in-memory implementations are provided for tools and
//! tests.
pub mod access;
pub mod collection;
pub mod config;
pub mod env;
pub mod error;
pub mod item;
pub mod modules;
pub mod pipeline;
pub mod registry;
pub mod stats;

pub use access::{FieldError, FieldValue, Fields, Reflect};
pub use collection::{BoundedList, CollectionAdapter, CollectionError, CollectionShape, Method};
pub use config::{ConfigError, EntityConfig};
pub use env::{
    BuffCopy, BuffLibrary, BuffPrototype, BuffService, Env, MemoryCatalog, TagCatalog, TagLibrary,
    TemplateCatalog,
};
pub use error::{BakeryError, ErrorSeverity};
pub use item::{DisplayQuality, Item, ItemBuilder, Tag};
pub use modules::{ModuleKind, ModuleSet, ensure_module};
pub use pipeline::{AugmentReport, Augmenter, BatchReport, FeatureBlock, PatchError, PipelineStage};
pub use registry::{
    Cost, DecomposeFormula, ItemAmount, Recipe, RecipeFlags, RegistryContext, RegistryError,
    SharedRegistry, TeardownReport,
};
pub use stats::{DeltaMode, DeltaOutcome, StatDelta, apply_delta};
