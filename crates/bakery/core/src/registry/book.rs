use std::cell::OnceCell;
use std::collections::BTreeMap;

use super::entry::{DecomposeFormula, Keyed, Recipe};

/// A shared registry: entries in insertion order plus a lazily built
/// key → position index. Every mutation drops the index.
#[derive(Clone, Debug)]
pub struct Book<E: Keyed> {
    entries: Vec<E>,
    index: OnceCell<BTreeMap<E::Key, usize>>,
}

pub type RecipeBook = Book<Recipe>;
pub type DecomposeBook = Book<DecomposeFormula>;

impl<E: Keyed> Default for Book<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: OnceCell::new(),
        }
    }
}

impl<E: Keyed> Book<E> {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(&self) -> &BTreeMap<E::Key, usize> {
        self.index.get_or_init(|| {
            self.entries
                .iter()
                .enumerate()
                .map(|(position, entry)| (entry.key().clone(), position))
                .collect()
        })
    }

    pub fn is_index_built(&self) -> bool {
        self.index.get().is_some()
    }

    pub fn invalidate(&mut self) {
        self.index.take();
    }

    pub fn contains(&self, key: &E::Key) -> bool {
        self.index().contains_key(key)
    }

    pub fn get(&self, key: &E::Key) -> Option<&E> {
        self.index().get(key).and_then(|&position| self.entries.get(position))
    }

    pub fn push(&mut self, entry: E) {
        self.entries.push(entry);
        self.invalidate();
    }

    pub fn remove(&mut self, key: &E::Key) -> Option<E> {
        let position = self.entries.iter().position(|entry| entry.key() == key)?;
        let removed = self.entries.remove(position);
        self.invalidate();
        Some(removed)
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: Keyed> FromIterator<E> for Book<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            index: OnceCell::new(),
        }
    }
}

/// Ids this engine inserted and has not yet removed. Ordered, no duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProvenanceSet<K> {
    ids: Vec<K>,
}

impl<K> Default for ProvenanceSet<K> {
    fn default() -> Self {
        Self { ids: Vec::new() }
    }
}

impl<K: PartialEq> ProvenanceSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: K) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: &K) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Empties the set, returning its ids in insertion order.
    pub fn drain(&mut self) -> Vec<K> {
        std::mem::take(&mut self.ids)
    }
}
