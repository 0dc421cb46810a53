//! Character modifiers granted by an item.

/// How a modifier combines with the character's stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierKind {
    #[default]
    Add,
    PercentageAdd,
    PercentageMultiply,
}

/// Who the modifier applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierTarget {
    Item,
    #[default]
    Character,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierDescription {
    pub key: String,
    pub value: f32,
    pub kind: ModifierKind,
    pub target: ModifierTarget,
    pub display: bool,
}

impl ModifierDescription {
    /// A displayed, additive character modifier.
    pub fn new(key: impl Into<String>, value: f32) -> Self {
        Self {
            key: key.into(),
            value,
            kind: ModifierKind::Add,
            target: ModifierTarget::Character,
            display: true,
        }
    }
}

/// Outcome of [`ModifierCollection::upsert`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Upsert {
    Updated { previous: f32 },
    Appended,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModifierCollection {
    entries: Vec<ModifierDescription>,
}

impl ModifierCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge-by-key: updates the value of an existing entry with the same key
    /// in place (keeping its kind, target and position), otherwise appends.
    pub fn upsert(&mut self, key: &str, value: f32) -> Upsert {
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => {
                let previous = entry.value;
                entry.value = value;
                Upsert::Updated { previous }
            }
            None => {
                self.entries.push(ModifierDescription::new(key, value));
                Upsert::Appended
            }
        }
    }

    pub fn push(&mut self, modifier: ModifierDescription) {
        self.entries.push(modifier);
    }

    pub fn get(&self, key: &str) -> Option<&ModifierDescription> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModifierDescription> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_updates_in_place() {
        let mut modifiers = ModifierCollection::new();
        modifiers.push(ModifierDescription {
            kind: ModifierKind::PercentageAdd,
            ..ModifierDescription::new("MovementSpeed", 0.1)
        });
        modifiers.push(ModifierDescription::new("Stamina", 5.0));

        assert_eq!(
            modifiers.upsert("MovementSpeed", 0.05),
            Upsert::Updated { previous: 0.1 }
        );
        assert_eq!(modifiers.upsert("Armor", 2.0), Upsert::Appended);

        let keys: Vec<&str> = modifiers.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["MovementSpeed", "Stamina", "Armor"]);
        let speed = modifiers.get("MovementSpeed").unwrap();
        assert_eq!(speed.value, 0.05);
        assert_eq!(speed.kind, ModifierKind::PercentageAdd);
    }
}
