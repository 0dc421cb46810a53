use std::collections::BTreeMap;

use tracing::debug;

use super::TagCatalog;
use crate::item::Tag;

/// In-memory tag catalog keyed by lowercase name.
#[derive(Clone, Debug, Default)]
pub struct TagLibrary {
    tags: BTreeMap<String, Tag>,
}

impl TagLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut library = Self::new();
        for name in names {
            library.create_tag(name);
        }
        library
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.values().map(Tag::name)
    }
}

impl TagCatalog for TagLibrary {
    fn find_tag(&self, name: &str) -> Option<Tag> {
        self.tags.get(&name.to_ascii_lowercase()).cloned()
    }

    /// Returns the existing tag if one matches, so creating twice is harmless.
    fn create_tag(&mut self, name: &str) -> Tag {
        self.tags
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| {
                debug!(target: "bakery::env", tag = name, "created tag");
                Tag::new(name)
            })
            .clone()
    }
}

/// Finds `name` in the catalog, creating it if absent.
pub fn resolve_or_create(catalog: &mut dyn TagCatalog, name: &str) -> Tag {
    match catalog.find_tag(name) {
        Some(tag) => tag,
        None => catalog.create_tag(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let library = TagLibrary::with_tags(["Luxury", "Food"]);
        assert_eq!(library.find_tag("luxury").map(|t| t.name().to_owned()), Some("Luxury".into()));
        assert!(library.find_tag("Weapon").is_none());
    }

    #[test]
    fn resolve_or_create_reuses_existing() {
        let mut library = TagLibrary::with_tags(["Food"]);
        let food = resolve_or_create(&mut library, "FOOD");
        assert_eq!(food.name(), "Food");
        resolve_or_create(&mut library, "Scope");
        assert_eq!(library.len(), 2);
    }
}
