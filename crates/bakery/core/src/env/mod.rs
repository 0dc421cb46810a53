//! Collaborators the engine consumes but does not implement.
//!
//! The template catalog, the tag catalog and the buff service belong to the
//! host. The engine only talks to them through the traits below; [`Env`]
//! bundles one of each for a pipeline run. In-memory implementations back
//! the dry-run binary and the tests.

mod buffs;
mod catalog;
mod error;
mod tags;

pub use buffs::{BuffCopy, BuffLibrary, BuffPrototype};
pub use catalog::MemoryCatalog;
pub use error::{RegistrationRejected, RejectReason};
pub use tags::{TagLibrary, resolve_or_create};

use crate::item::{Item, Tag};

/// Source of template items and sink for derived ones.
pub trait TemplateCatalog {
    /// Template (or any registered item) to clone from.
    fn template(&self, id: i32) -> Option<&Item>;

    /// Lookup-by-id as seen by other subsystems.
    fn get(&self, id: i32) -> Option<&Item>;

    /// Takes ownership of `item` under its current type id.
    ///
    /// # Errors
    ///
    /// Hands the item back inside [`RegistrationRejected`] when the id is
    /// invalid or already taken.
    fn register(&mut self, item: Item) -> Result<(), RegistrationRejected>;

    /// Removes a previously registered item.
    fn unregister(&mut self, id: i32) -> Option<Item>;
}

/// Global tag catalog.
pub trait TagCatalog {
    /// Case-insensitive lookup.
    fn find_tag(&self, name: &str) -> Option<Tag>;

    fn create_tag(&mut self, name: &str) -> Tag;
}

/// Buff collaborator operating on an item's buff effects.
pub trait BuffService {
    fn replace_or_modify_duration(
        &mut self,
        item: &mut Item,
        duration: f32,
        replace: bool,
        replacement_id: i32,
    );

    fn copy_and_add_buffs(&mut self, item: &mut Item, copies: &[BuffCopy]);
}

/// Collaborators for one pipeline run.
pub struct Env<'a> {
    catalog: &'a mut dyn TemplateCatalog,
    tags: &'a mut dyn TagCatalog,
    buffs: &'a mut dyn BuffService,
}

impl<'a> Env<'a> {
    pub fn new(
        catalog: &'a mut dyn TemplateCatalog,
        tags: &'a mut dyn TagCatalog,
        buffs: &'a mut dyn BuffService,
    ) -> Self {
        Self {
            catalog,
            tags,
            buffs,
        }
    }

    pub fn catalog(&mut self) -> &mut dyn TemplateCatalog {
        &mut *self.catalog
    }

    pub fn tags(&mut self) -> &mut dyn TagCatalog {
        &mut *self.tags
    }

    pub fn buffs(&mut self) -> &mut dyn BuffService {
        &mut *self.buffs
    }
}
