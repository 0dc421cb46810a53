use std::collections::BTreeMap;

use tracing::debug;

use super::{RegistrationRejected, RejectReason, TemplateCatalog};
use crate::item::Item;

/// In-memory catalog: fixed templates plus dynamically registered items.
#[derive(Clone, Debug, Default)]
pub struct MemoryCatalog {
    templates: BTreeMap<i32, Item>,
    dynamic: BTreeMap<i32, Item>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template, replacing any template with the same id.
    pub fn insert_template(&mut self, mut item: Item) {
        item.mark_published();
        self.templates.insert(item.type_id(), item);
    }

    pub fn template_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.templates.keys().copied()
    }

    pub fn dynamic_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.dynamic.keys().copied()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.templates.contains_key(&id) || self.dynamic.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.templates.len() + self.dynamic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Item> for MemoryCatalog {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for item in iter {
            catalog.insert_template(item);
        }
        catalog
    }
}

impl TemplateCatalog for MemoryCatalog {
    fn template(&self, id: i32) -> Option<&Item> {
        self.get(id)
    }

    fn get(&self, id: i32) -> Option<&Item> {
        self.dynamic.get(&id).or_else(|| self.templates.get(&id))
    }

    fn register(&mut self, mut item: Item) -> Result<(), RegistrationRejected> {
        let id = item.type_id();
        let reason = if id <= 0 {
            Some(RejectReason::InvalidId)
        } else if self.contains(id) {
            Some(RejectReason::DuplicateId)
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(RegistrationRejected {
                id,
                reason,
                item: Box::new(item),
            });
        }

        item.mark_published();
        self.dynamic.insert(id, item);
        debug!(target: "bakery::env", id, "item registered with catalog");
        Ok(())
    }

    fn unregister(&mut self, id: i32) -> Option<Item> {
        let mut item = self.dynamic.remove(&id)?;
        item.mark_unpublished();
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_invalid_and_duplicate_ids() {
        let mut catalog: MemoryCatalog = [Item::builder(135).build()].into_iter().collect();

        let rejected = catalog.register(Item::builder(0).build()).unwrap_err();
        assert_eq!(rejected.reason, RejectReason::InvalidId);

        let rejected = catalog.register(Item::builder(135).build()).unwrap_err();
        assert_eq!(rejected.reason, RejectReason::DuplicateId);
        assert_eq!(rejected.item.type_id(), 135);

        catalog.register(Item::builder(95001).build()).unwrap();
        assert!(catalog.get(95001).unwrap().is_published());
    }

    #[test]
    fn unregister_only_touches_dynamic_items() {
        let mut catalog: MemoryCatalog = [Item::builder(135).build()].into_iter().collect();
        catalog.register(Item::builder(95001).build()).unwrap();

        assert!(catalog.unregister(135).is_none());
        let removed = catalog.unregister(95001).unwrap();
        assert!(!removed.is_published());
        assert!(catalog.get(95001).is_none());
        assert!(catalog.template(135).is_some());
    }
}
