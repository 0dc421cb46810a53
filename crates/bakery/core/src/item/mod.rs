//! Host-side object model: the live item the pipeline clones and patches.
//!
//! Most of an item's state is private and reachable only through its field
//! table (see [`crate::access`]), the same way the host game keeps these
//! fields internal. Containers (tags, slots, stats, modifiers, modules) are
//! exposed through accessors.

mod modifiers;
mod slots;
mod stats;
mod tags;

pub use modifiers::{ModifierCollection, ModifierDescription, ModifierKind, ModifierTarget, Upsert};
pub use slots::{Slot, SlotCollection};
pub use stats::{Stat, StatCollection};
pub use tags::{Tag, TagCollection};

use std::sync::LazyLock;

use strum::{IntoEnumIterator, VariantNames};

use crate::access::{FieldTable, Fields};
use crate::modules::ModuleSet;

/// Rarity color shown in the inventory.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::VariantNames,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayQuality {
    #[default]
    None,
    White,
    Green,
    Blue,
    Purple,
    Orange,
    Red,
}

impl DisplayQuality {
    pub fn index(self) -> i64 {
        Self::iter().position(|quality| quality == self).unwrap_or(0) as i64
    }

    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index).ok().and_then(|index| Self::iter().nth(index))
    }
}

/// A live item instance.
#[derive(Clone, Debug, Default)]
pub struct Item {
    type_id: i32,
    display_name: String,
    weight: f32,
    value: i32,
    quality: i32,
    display_quality: DisplayQuality,
    order: i32,
    max_durability: f32,
    durability: f32,
    durability_loss: f32,
    tags: TagCollection,
    slots: Option<SlotCollection>,
    stats: StatCollection,
    modifiers: ModifierCollection,
    modules: ModuleSet,
    published: bool,
}

impl Item {
    pub fn builder(type_id: i32) -> ItemBuilder {
        ItemBuilder {
            item: Item {
                type_id,
                ..Item::default()
            },
        }
    }

    pub fn type_id(&self) -> i32 {
        self.type_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn quality(&self) -> i32 {
        self.quality
    }

    pub fn display_quality(&self) -> DisplayQuality {
        self.display_quality
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn max_durability(&self) -> f32 {
        self.max_durability
    }

    pub fn durability(&self) -> f32 {
        self.durability
    }

    pub fn durability_loss(&self) -> f32 {
        self.durability_loss
    }

    pub fn tags(&self) -> &TagCollection {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut TagCollection {
        &mut self.tags
    }

    pub fn slots(&self) -> Option<&SlotCollection> {
        self.slots.as_ref()
    }

    pub fn slots_mut(&mut self) -> Option<&mut SlotCollection> {
        self.slots.as_mut()
    }

    /// Returns the slot container, creating an empty one if the item has none.
    pub fn ensure_slots(&mut self) -> &mut SlotCollection {
        self.slots.get_or_insert_with(SlotCollection::new)
    }

    pub fn stats(&self) -> &StatCollection {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut StatCollection {
        &mut self.stats
    }

    pub fn modifiers(&self) -> &ModifierCollection {
        &self.modifiers
    }

    pub fn modifiers_mut(&mut self) -> &mut ModifierCollection {
        &mut self.modifiers
    }

    pub fn modules(&self) -> &ModuleSet {
        &self.modules
    }

    pub fn modules_mut(&mut self) -> &mut ModuleSet {
        &mut self.modules
    }

    /// Whether the item is visible to the catalog.
    pub fn is_published(&self) -> bool {
        self.published
    }

    pub fn mark_published(&mut self) {
        self.published = true;
    }

    pub fn mark_unpublished(&mut self) {
        self.published = false;
    }
}

fn saturating_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl Fields for Item {
    fn field_table() -> &'static FieldTable<Self> {
        static TABLE: LazyLock<FieldTable<Item>> = LazyLock::new(|| {
            FieldTable::<Item>::builder("Item")
                .int("typeID", |i| i64::from(i.type_id), |i, v| i.type_id = saturating_i32(v))
                .text("displayName", |i| i.display_name.clone(), |i, v| i.display_name = v)
                .float("weight", |i| f64::from(i.weight), |i, v| i.weight = v as f32)
                .int("value", |i| i64::from(i.value), |i, v| i.value = saturating_i32(v))
                .int("quality", |i| i64::from(i.quality), |i, v| i.quality = saturating_i32(v))
                .enumeration(
                    "displayQuality",
                    DisplayQuality::VARIANTS,
                    |i| i.display_quality.index(),
                    |i, v| {
                        if let Some(quality) = DisplayQuality::from_index(v) {
                            i.display_quality = quality;
                        }
                    },
                )
                .int("order", |i| i64::from(i.order), |i, v| i.order = saturating_i32(v))
                .float("maxDurability", |i| f64::from(i.max_durability), |i, v| {
                    i.max_durability = v as f32
                })
                .float("durability", |i| f64::from(i.durability), |i, v| i.durability = v as f32)
                .float("durabilityLoss", |i| f64::from(i.durability_loss), |i, v| {
                    i.durability_loss = v as f32
                })
                .build()
        });
        &TABLE
    }
}

/// Builds template items for catalogs and tests.
#[derive(Debug)]
pub struct ItemBuilder {
    item: Item,
}

impl ItemBuilder {
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.item.display_name = name.into();
        self
    }

    pub fn weight(mut self, weight: f32) -> Self {
        self.item.weight = weight;
        self
    }

    pub fn value(mut self, value: i32) -> Self {
        self.item.value = value;
        self
    }

    pub fn quality(mut self, quality: i32) -> Self {
        self.item.quality = quality;
        self
    }

    pub fn display_quality(mut self, quality: DisplayQuality) -> Self {
        self.item.display_quality = quality;
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.item.order = order;
        self
    }

    pub fn durability(mut self, max: f32, loss: f32) -> Self {
        self.item.max_durability = max;
        self.item.durability_loss = loss;
        self.item.durability = max * (1.0 - loss);
        self
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        let _ = self.item.tags.push_tag(tag);
        self
    }

    pub fn slot(mut self, slot: Slot) -> Self {
        let _ = self.item.ensure_slots().append(slot);
        self
    }

    pub fn stat(mut self, key: &str, value: f32) -> Self {
        self.item.stats.insert(Stat::new(key, value));
        self
    }

    pub fn modifier(mut self, modifier: ModifierDescription) -> Self {
        self.item.modifiers.push(modifier);
        self
    }

    pub fn modules(mut self, modules: ModuleSet) -> Self {
        self.item.modules = modules;
        self
    }

    pub fn build(self) -> Item {
        self.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{self, FieldValue, Reflect};

    #[test]
    fn private_fields_reachable_by_host_names() {
        let mut item = Item::builder(135).weight(1.0).build();

        assert!(access::set_logged(&mut item, "weight", 0.2_f32));
        assert!(access::set_logged(&mut item, "displayQuality", "purple"));
        assert!(access::set_logged(&mut item, "TypeId", 95001));

        assert_eq!(item.weight(), 0.2);
        assert_eq!(item.display_quality(), DisplayQuality::Purple);
        assert_eq!(item.type_id(), 95001);
        assert_eq!(item.get_field("displayQuality"), Some(FieldValue::Int(4)));
    }

    #[test]
    fn clone_is_independent() {
        let template = Item::builder(135).tag(Tag::new("Food")).stat("Damage", 10.0).build();
        let mut copy = template.clone();
        copy.tags_mut().push_tag(Tag::new("Luxury")).unwrap();
        copy.stats_mut().get_mut("Damage").unwrap().set_value(20.0);

        assert_eq!(template.tags().tag_count(), 1);
        assert_eq!(template.stats().value("Damage"), Some(10.0));
    }

    #[test]
    fn int_fields_saturate() {
        let mut item = Item::default();
        access::set(&mut item, "value", FieldValue::Int(i64::MAX)).unwrap();
        assert_eq!(item.value(), i32::MAX);
    }
}
