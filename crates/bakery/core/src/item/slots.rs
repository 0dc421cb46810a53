//! Item slots (attachment points) and their container.

use std::sync::LazyLock;

use super::Tag;
use crate::collection::{CollectionShape, InvokeError, Method};

/// A single attachment slot. Keys are unique within a container.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    key: String,
    required_tags: Vec<Tag>,
}

impl Slot {
    pub fn new(key: impl Into<String>, required_tags: Vec<Tag>) -> Self {
        Self {
            key: key.into(),
            required_tags,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn required_tags(&self) -> &[Tag] {
        &self.required_tags
    }
}

#[derive(Clone, Debug, Default)]
pub struct SlotCollection {
    slots: Vec<Slot>,
}

impl SlotCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, slot: Slot) -> Result<(), InvokeError> {
        if self.slot(slot.key()).is_some() {
            return Err(InvokeError::new(format!("slot key {} already used", slot.key())));
        }
        self.slots.push(slot);
        Ok(())
    }

    pub fn slot(&self, key: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.key == key)
    }

    pub fn at(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn shape() -> &'static CollectionShape<SlotCollection, Slot> {
        static SHAPE: LazyLock<CollectionShape<SlotCollection, Slot>> = LazyLock::new(|| {
            CollectionShape::<SlotCollection, Slot>::new("SlotCollection")
                .with("Add", Method::Add(SlotCollection::append))
                .with("Count", Method::Count(|slots| Ok(slots.len())))
                .with("Item", Method::Item(|slots, index| Ok(slots.at(index).cloned())))
                .with(
                    "GetEnumerator",
                    Method::GetEnumerator(|slots| Ok(slots.slots.clone())),
                )
                .with(
                    "Clear",
                    Method::Clear(|slots| {
                        slots.slots.clear();
                        Ok(())
                    }),
                )
                .with(
                    "Remove",
                    Method::Remove(|slots, slot| {
                        let before = slots.slots.len();
                        slots.slots.retain(|existing| existing.key != slot.key);
                        Ok(slots.slots.len() != before)
                    }),
                )
        });
        &SHAPE
    }
}

impl FromIterator<Slot> for SlotCollection {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        let mut collection = Self::new();
        for slot in iter {
            let _ = collection.append(slot);
        }
        collection
    }
}
