//! Named numeric stat slots owned by an item.

/// A numeric stat slot.
///
/// Every write bumps `revision`, which is what host-side observers react to.
/// Writing the same value still counts as a write.
#[derive(Clone, Debug, PartialEq)]
pub struct Stat {
    key: String,
    base_value: f32,
    revision: u64,
}

impl Stat {
    pub fn new(key: impl Into<String>, base_value: f32) -> Self {
        Self {
            key: key.into(),
            base_value,
            revision: 0,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> f32 {
        self.base_value
    }

    pub fn set_value(&mut self, value: f32) {
        self.base_value = value;
        self.revision += 1;
    }

    /// Number of writes since the stat was created (or cloned).
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatCollection {
    stats: Vec<Stat>,
}

impl StatCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive lookup by key.
    pub fn get(&self, key: &str) -> Option<&Stat> {
        self.stats.iter().find(|stat| stat.key.eq_ignore_ascii_case(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Stat> {
        self.stats
            .iter_mut()
            .find(|stat| stat.key.eq_ignore_ascii_case(key))
    }

    pub fn value(&self, key: &str) -> Option<f32> {
        self.get(key).map(Stat::value)
    }

    /// Adds a stat, replacing any existing stat with the same key.
    pub fn insert(&mut self, stat: Stat) {
        match self.get_mut(&stat.key) {
            Some(existing) => *existing = stat,
            None => self.stats.push(stat),
        }
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stat> {
        self.stats.iter()
    }
}
