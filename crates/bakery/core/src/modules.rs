//! Capability Module Manager: attachable behavior modules owned by an item.
//!
//! Every module kind has one fixed slot in [`ModuleSet`] that is either empty
//! or populated. "Ensure" is lazy-initialize-if-empty: idempotent, never
//! produces a duplicate, and hands back the module for field-by-field
//! configuration through the [`Reflect`] surface.
//!
//! The manager performs no activation gating. Whether a module should be
//! attached at all is decided by the pipeline from the config's feature
//! blocks.

use std::sync::LazyLock;

use tracing::debug;

use crate::access::{FieldTable, Fields, Reflect};
use crate::item::Item;

/// Kinds of capability modules an item can carry.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ModuleKind {
    /// Restores energy and water when consumed.
    FoodDrink,
    /// Restores health when used.
    Drug,
    /// Usage timing (how long using the item takes).
    UsageUtilities,
    /// Buffs applied on use.
    BuffEffects,
    /// Weighted item rewards rolled when opened.
    RewardPool,
}

/// A module type with a fixed slot in [`ModuleSet`].
pub trait Module: Fields + Default {
    const KIND: ModuleKind;

    fn slot(set: &ModuleSet) -> Option<&Self>;

    fn slot_mut(set: &mut ModuleSet) -> &mut Option<Self>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FoodDrink {
    pub energy_value: f32,
    pub water_value: f32,
    pub use_durability: f32,
    pub energy_key: String,
    pub water_key: String,
}

impl Fields for FoodDrink {
    fn field_table() -> &'static FieldTable<Self> {
        static TABLE: LazyLock<FieldTable<FoodDrink>> = LazyLock::new(|| {
            FieldTable::<FoodDrink>::builder("FoodDrink")
                .float("energyValue", |m| f64::from(m.energy_value), |m, v| m.energy_value = v as f32)
                .float("waterValue", |m| f64::from(m.water_value), |m, v| m.water_value = v as f32)
                .float("UseDurability", |m| f64::from(m.use_durability), |m, v| {
                    m.use_durability = v as f32
                })
                .text("energyKey", |m| m.energy_key.clone(), |m, v| m.energy_key = v)
                .text("waterKey", |m| m.water_key.clone(), |m, v| m.water_key = v)
                .build()
        });
        &TABLE
    }
}

impl Module for FoodDrink {
    const KIND: ModuleKind = ModuleKind::FoodDrink;

    fn slot(set: &ModuleSet) -> Option<&Self> {
        set.food_drink.as_ref()
    }

    fn slot_mut(set: &mut ModuleSet) -> &mut Option<Self> {
        &mut set.food_drink
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Drug {
    pub heal_value: f32,
    pub use_durability: f32,
}

impl Fields for Drug {
    fn field_table() -> &'static FieldTable<Self> {
        static TABLE: LazyLock<FieldTable<Drug>> = LazyLock::new(|| {
            FieldTable::<Drug>::builder("Drug")
                .float("healValue", |m| f64::from(m.heal_value), |m, v| m.heal_value = v as f32)
                .float("useDurability", |m| f64::from(m.use_durability), |m, v| {
                    m.use_durability = v as f32
                })
                .build()
        });
        &TABLE
    }
}

impl Module for Drug {
    const KIND: ModuleKind = ModuleKind::Drug;

    fn slot(set: &ModuleSet) -> Option<&Self> {
        set.drug.as_ref()
    }

    fn slot_mut(set: &mut ModuleSet) -> &mut Option<Self> {
        &mut set.drug
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsageUtilities {
    pub use_time: f32,
    pub use_sound: String,
}

impl Fields for UsageUtilities {
    fn field_table() -> &'static FieldTable<Self> {
        static TABLE: LazyLock<FieldTable<UsageUtilities>> = LazyLock::new(|| {
            FieldTable::<UsageUtilities>::builder("UsageUtilities")
                .float("useTime", |m| f64::from(m.use_time), |m, v| m.use_time = v as f32)
                .text("useSound", |m| m.use_sound.clone(), |m, v| m.use_sound = v)
                .build()
        });
        &TABLE
    }
}

impl Module for UsageUtilities {
    const KIND: ModuleKind = ModuleKind::UsageUtilities;

    fn slot(set: &ModuleSet) -> Option<&Self> {
        set.usage.as_ref()
    }

    fn slot_mut(set: &mut ModuleSet) -> &mut Option<Self> {
        &mut set.usage
    }
}

/// One buff applied on use.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffEffect {
    pub buff_id: i32,
    pub chance: f32,
    pub duration: f32,
}

/// Buffs applied on use. Has no scalar fields; entries are edited by the
/// buff collaborator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuffEffects {
    pub entries: Vec<BuffEffect>,
}

impl Fields for BuffEffects {
    fn field_table() -> &'static FieldTable<Self> {
        static TABLE: LazyLock<FieldTable<BuffEffects>> =
            LazyLock::new(|| FieldTable::<BuffEffects>::builder("BuffEffects").build());
        &TABLE
    }
}

impl Module for BuffEffects {
    const KIND: ModuleKind = ModuleKind::BuffEffects;

    fn slot(set: &ModuleSet) -> Option<&Self> {
        set.buffs.as_ref()
    }

    fn slot_mut(set: &mut ModuleSet) -> &mut Option<Self> {
        &mut set.buffs
    }
}

/// A weighted reward pool entry.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct RewardEntry {
    pub item_id: i32,
    pub weight: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RewardPool {
    pub entries: Vec<RewardEntry>,
    pub draw_count: i32,
    pub allow_duplicates: bool,
}

impl Default for RewardPool {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            draw_count: 1,
            allow_duplicates: true,
        }
    }
}

impl RewardPool {
    pub fn total_weight(&self) -> f32 {
        self.entries.iter().map(|entry| entry.weight).sum()
    }
}

impl Fields for RewardPool {
    fn field_table() -> &'static FieldTable<Self> {
        static TABLE: LazyLock<FieldTable<RewardPool>> = LazyLock::new(|| {
            FieldTable::<RewardPool>::builder("RewardPool")
                .int("drawCount", |m| i64::from(m.draw_count), |m, v| {
                    m.draw_count = v.clamp(0, i64::from(i32::MAX)) as i32
                })
                .boolean("allowDuplicates", |m| m.allow_duplicates, |m, v| {
                    m.allow_duplicates = v
                })
                .build()
        });
        &TABLE
    }
}

impl Module for RewardPool {
    const KIND: ModuleKind = ModuleKind::RewardPool;

    fn slot(set: &ModuleSet) -> Option<&Self> {
        set.reward_pool.as_ref()
    }

    fn slot_mut(set: &mut ModuleSet) -> &mut Option<Self> {
        &mut set.reward_pool
    }
}

/// One slot per module kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModuleSet {
    food_drink: Option<FoodDrink>,
    drug: Option<Drug>,
    usage: Option<UsageUtilities>,
    buffs: Option<BuffEffects>,
    reward_pool: Option<RewardPool>,
}

impl ModuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn module<M: Module>(&self) -> Option<&M> {
        M::slot(self)
    }

    pub fn module_mut<M: Module>(&mut self) -> Option<&mut M> {
        M::slot_mut(self).as_mut()
    }

    /// Returns the module of type `M`, attaching a default one first if absent.
    pub fn ensure<M: Module>(&mut self) -> &mut M {
        let slot = M::slot_mut(self);
        if slot.is_none() {
            debug!(target: "bakery::modules", module = %M::KIND, "attached module");
        }
        slot.get_or_insert_with(M::default)
    }

    /// Inserts `module`, replacing any existing module of the same kind.
    pub fn insert<M: Module>(&mut self, module: M) -> Option<M> {
        M::slot_mut(self).replace(module)
    }

    pub fn remove(&mut self, kind: ModuleKind) -> bool {
        match kind {
            ModuleKind::FoodDrink => self.food_drink.take().is_some(),
            ModuleKind::Drug => self.drug.take().is_some(),
            ModuleKind::UsageUtilities => self.usage.take().is_some(),
            ModuleKind::BuffEffects => self.buffs.take().is_some(),
            ModuleKind::RewardPool => self.reward_pool.take().is_some(),
        }
    }

    pub fn has(&self, kind: ModuleKind) -> bool {
        self.reflect(kind).is_some()
    }

    /// Kinds currently attached, in declaration order.
    pub fn kinds(&self) -> Vec<ModuleKind> {
        use strum::IntoEnumIterator;
        ModuleKind::iter().filter(|kind| self.has(*kind)).collect()
    }

    pub fn reflect(&self, kind: ModuleKind) -> Option<&dyn Reflect> {
        match kind {
            ModuleKind::FoodDrink => self.food_drink.as_ref().map(|m| m as &dyn Reflect),
            ModuleKind::Drug => self.drug.as_ref().map(|m| m as &dyn Reflect),
            ModuleKind::UsageUtilities => self.usage.as_ref().map(|m| m as &dyn Reflect),
            ModuleKind::BuffEffects => self.buffs.as_ref().map(|m| m as &dyn Reflect),
            ModuleKind::RewardPool => self.reward_pool.as_ref().map(|m| m as &dyn Reflect),
        }
    }

    pub fn reflect_mut(&mut self, kind: ModuleKind) -> Option<&mut dyn Reflect> {
        match kind {
            ModuleKind::FoodDrink => self.food_drink.as_mut().map(|m| m as &mut dyn Reflect),
            ModuleKind::Drug => self.drug.as_mut().map(|m| m as &mut dyn Reflect),
            ModuleKind::UsageUtilities => self.usage.as_mut().map(|m| m as &mut dyn Reflect),
            ModuleKind::BuffEffects => self.buffs.as_mut().map(|m| m as &mut dyn Reflect),
            ModuleKind::RewardPool => self.reward_pool.as_mut().map(|m| m as &mut dyn Reflect),
        }
    }

    /// Kind-addressed [`ModuleSet::ensure`].
    pub fn ensure_kind(&mut self, kind: ModuleKind) -> &mut dyn Reflect {
        match kind {
            ModuleKind::FoodDrink => self.ensure::<FoodDrink>(),
            ModuleKind::Drug => self.ensure::<Drug>(),
            ModuleKind::UsageUtilities => self.ensure::<UsageUtilities>(),
            ModuleKind::BuffEffects => self.ensure::<BuffEffects>(),
            ModuleKind::RewardPool => self.ensure::<RewardPool>(),
        }
    }
}

/// Returns the item's module of `kind`, attaching a new one if absent.
pub fn ensure_module(item: &mut Item, kind: ModuleKind) -> &mut dyn Reflect {
    item.modules_mut().ensure_kind(kind)
}
