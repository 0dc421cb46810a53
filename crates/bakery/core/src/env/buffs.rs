//! Buff prototypes and the in-memory buff service.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::BuffService;
use crate::item::Item;
use crate::modules::{BuffEffect, BuffEffects};

/// Request to clone an existing buff effect as a new buff.
///
/// Ids are strings because configs write them that way; `new_buff_id` must
/// parse as an integer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BuffCopy {
    pub original_buff_id: String,
    pub new_buff_id: String,
    /// Duration of the copy; non-positive keeps the source effect's duration.
    #[cfg_attr(feature = "serde", serde(default = "BuffCopy::inherit_duration"))]
    pub new_duration: f32,
}

impl BuffCopy {
    pub fn new(original: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            original_buff_id: original.into(),
            new_buff_id: new.into(),
            new_duration: Self::inherit_duration(),
        }
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.new_duration = duration;
        self
    }

    const fn inherit_duration() -> f32 {
        -1.0
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffPrototype {
    pub id: i32,
    pub name: String,
    pub duration: f32,
}

/// Known buffs by id.
#[derive(Clone, Debug, Default)]
pub struct BuffLibrary {
    buffs: BTreeMap<i32, BuffPrototype>,
}

impl BuffLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, buff: BuffPrototype) {
        self.buffs.insert(buff.id, buff);
    }

    pub fn find(&self, id: i32) -> Option<&BuffPrototype> {
        self.buffs.get(&id)
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }

    fn copy_one(&self, effects: &mut BuffEffects, copy: &BuffCopy) {
        let Some(source) = effects
            .entries
            .iter()
            .find(|effect| effect.buff_id.to_string() == copy.original_buff_id)
            .cloned()
        else {
            debug!(target: "bakery::env", source = %copy.original_buff_id, "no effect to copy");
            return;
        };
        let Ok(new_id) = copy.new_buff_id.parse::<i32>() else {
            warn!(target: "bakery::env", new_id = %copy.new_buff_id, "buff id is not numeric");
            return;
        };
        if self.find(new_id).is_none() {
            warn!(target: "bakery::env", new_id, "unknown buff");
            return;
        }

        let duration = if copy.new_duration > 0.0 {
            copy.new_duration
        } else {
            source.duration
        };
        effects.entries.push(BuffEffect {
            buff_id: new_id,
            chance: source.chance,
            duration,
        });
        debug!(target: "bakery::env", from = source.buff_id, to = new_id, duration, "copied buff");
    }
}

impl FromIterator<BuffPrototype> for BuffLibrary {
    fn from_iter<I: IntoIterator<Item = BuffPrototype>>(iter: I) -> Self {
        let mut library = Self::new();
        for buff in iter {
            library.insert(buff);
        }
        library
    }
}

impl BuffService for BuffLibrary {
    fn replace_or_modify_duration(
        &mut self,
        item: &mut Item,
        duration: f32,
        replace: bool,
        replacement_id: i32,
    ) {
        if duration <= 0.0 {
            return;
        }
        let replacement = (replace && replacement_id > 0)
            .then(|| self.find(replacement_id))
            .flatten()
            .map(|buff| buff.id);
        let Some(effects) = item.modules_mut().module_mut::<BuffEffects>() else {
            return;
        };

        for effect in &mut effects.entries {
            if let Some(id) = replacement {
                effect.buff_id = id;
            }
            effect.duration = duration;
        }
    }

    fn copy_and_add_buffs(&mut self, item: &mut Item, copies: &[BuffCopy]) {
        let Some(effects) = item.modules_mut().module_mut::<BuffEffects>() else {
            return;
        };
        for copy in copies {
            if copy.original_buff_id.is_empty() || copy.new_buff_id.is_empty() {
                continue;
            }
            self.copy_one(effects, copy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> BuffLibrary {
        [
            BuffPrototype { id: 1001, name: "Regen".into(), duration: 10.0 },
            BuffPrototype { id: 1002, name: "Haste".into(), duration: 5.0 },
        ]
        .into_iter()
        .collect()
    }

    fn item_with_effect() -> Item {
        let mut item = Item::builder(200).build();
        item.modules_mut().ensure::<BuffEffects>().entries.push(BuffEffect {
            buff_id: 1001,
            chance: 0.5,
            duration: 10.0,
        });
        item
    }

    #[test]
    fn replace_requires_known_replacement() {
        let mut buffs = library();
        let mut item = item_with_effect();

        buffs.replace_or_modify_duration(&mut item, 30.0, true, 9999);
        let effect = &item.modules().module::<BuffEffects>().unwrap().entries[0];
        assert_eq!((effect.buff_id, effect.duration), (1001, 30.0));

        buffs.replace_or_modify_duration(&mut item, 20.0, true, 1002);
        let effect = &item.modules().module::<BuffEffects>().unwrap().entries[0];
        assert_eq!((effect.buff_id, effect.duration), (1002, 20.0));
    }

    #[test]
    fn copy_inherits_chance_and_duration() {
        let mut buffs = library();
        let mut item = item_with_effect();

        buffs.copy_and_add_buffs(
            &mut item,
            &[
                BuffCopy::new("1001", "1002"),
                BuffCopy::new("1001", "abc"),
                BuffCopy::new("7", "1002"),
                BuffCopy::new("1001", "1002").with_duration(3.0),
            ],
        );

        let entries = &item.modules().module::<BuffEffects>().unwrap().entries;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1], BuffEffect { buff_id: 1002, chance: 0.5, duration: 10.0 });
        assert_eq!(entries[2].duration, 3.0);
    }
}
