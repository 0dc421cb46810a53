//! Tags and the item's tag container.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

use crate::collection::{CollectionShape, InvokeError, Method};

/// A named tag handle. Cheap to clone; compared case-insensitively.
#[derive(Clone)]
pub struct Tag(Arc<str>);

impl Tag {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.is(other.name())
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.0)
    }
}

/// The host's tag container.
///
/// It has no list interface of its own (no indexer, no positional edits);
/// the pipeline drives it through [`TagCollection::shape`].
#[derive(Clone, Debug, Default)]
pub struct TagCollection {
    entries: Vec<Tag>,
}

impl TagCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `tag` unless an equal tag is already present.
    pub fn push_tag(&mut self, tag: Tag) -> Result<(), InvokeError> {
        if self.entries.contains(&tag) {
            return Err(InvokeError::new(format!("tag {} already present", tag.name())));
        }
        self.entries.push(tag);
        Ok(())
    }

    pub fn tag_count(&self) -> usize {
        self.entries.len()
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|tag| tag.is(name))
    }

    pub fn enumerate(&self) -> impl Iterator<Item = &Tag> {
        self.entries.iter()
    }

    pub fn remove_tag(&mut self, tag: &Tag) -> bool {
        let before = self.entries.len();
        self.entries.retain(|existing| existing != tag);
        self.entries.len() != before
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Method table used by the collection adapter.
    pub fn shape() -> &'static CollectionShape<TagCollection, Tag> {
        static SHAPE: LazyLock<CollectionShape<TagCollection, Tag>> = LazyLock::new(|| {
            CollectionShape::<TagCollection, Tag>::new("TagCollection")
                .with("Add", Method::Add(TagCollection::push_tag))
                .with("Count", Method::Count(|tags| Ok(tags.tag_count())))
                .with(
                    "GetEnumerator",
                    Method::GetEnumerator(|tags| Ok(tags.enumerate().cloned().collect())),
                )
                .with(
                    "Clear",
                    Method::Clear(|tags| {
                        tags.clear_all();
                        Ok(())
                    }),
                )
                .with("Remove", Method::Remove(|tags, tag| Ok(tags.remove_tag(tag))))
        });
        &SHAPE
    }
}

impl fmt::Display for TagCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.entries.iter().map(Tag::name).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

impl FromIterator<Tag> for TagCollection {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut collection = Self::new();
        for tag in iter {
            // Duplicates are dropped, matching push_tag.
            let _ = collection.push_tag(tag);
        }
        collection
    }
}
