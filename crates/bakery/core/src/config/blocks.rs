//! Feature blocks. Each block is inert unless `is_active` holds.

use crate::env::BuffCopy;
use crate::modules::RewardEntry;
use crate::registry::{Cost, ItemAmount, RecipeFlags};
use crate::stats::{DeltaMode, StatDelta};

/// Energy and water restored on consumption.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct ConsumableBlock {
    pub energy_value: f32,
    pub water_value: f32,
    pub use_durability: f32,
}

impl ConsumableBlock {
    pub fn is_active(&self) -> bool {
        self.energy_value > 0.0 || self.water_value > 0.0
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct DurabilityBlock {
    pub max_durability: f32,
    /// Fraction of max durability already lost, in `[0, 1]`.
    pub durability_loss: f32,
    pub repairable: bool,
}

impl DurabilityBlock {
    pub fn is_active(&self) -> bool {
        self.max_durability > 0.0
    }

    pub fn current_durability(&self) -> f32 {
        self.max_durability * (1.0 - self.durability_loss.clamp(0.0, 1.0))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct HealingBlock {
    pub heal_value: f32,
    pub use_durability: f32,
}

impl HealingBlock {
    pub fn is_active(&self) -> bool {
        self.heal_value > 0.0
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct UseTimeBlock {
    pub use_time: f32,
}

impl UseTimeBlock {
    pub fn is_active(&self) -> bool {
        self.use_time > 0.0
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct SlotBlock {
    pub slot_count: u32,
    pub replace_existing: bool,
    /// Names by position; missing positions get a generated name.
    pub slot_names: Vec<String>,
    /// Required tags, cycled over the new slots.
    pub slot_tags: Vec<String>,
}

impl SlotBlock {
    pub fn is_active(&self) -> bool {
        self.slot_count > 0 || self.replace_existing
    }

    pub fn slot_name(&self, index: usize) -> String {
        self.slot_names
            .get(index)
            .filter(|name| !name.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Slot_{index}"))
    }

    pub fn slot_tag(&self, index: usize) -> Option<&str> {
        if self.slot_tags.is_empty() {
            return None;
        }
        Some(self.slot_tags[index % self.slot_tags.len()].as_str())
    }
}

fn deltas(entries: &[(&str, f32, DeltaMode)], extra: &[StatDelta]) -> Vec<StatDelta> {
    entries
        .iter()
        .filter(|(_, value, mode)| !mode.is_neutral(*value))
        .map(|&(stat, value, mode)| StatDelta::new(stat, value, mode))
        .chain(extra.iter().cloned())
        .collect()
}

/// Gun stat changes. Multipliers default to 1, additive fields to 0.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct WeaponBlock {
    pub damage_multiplier: f32,
    pub crit_rate_multiplier: f32,
    pub crit_damage_multiplier: f32,
    pub shoot_speed_multiplier: f32,
    pub reload_time_multiplier: f32,
    pub bullet_speed_multiplier: f32,
    pub bullet_distance_multiplier: f32,
    pub scatter_multiplier: f32,
    pub capacity_add: f32,
    pub armor_piercing_add: f32,
    pub extra: Vec<StatDelta>,
}

impl Default for WeaponBlock {
    fn default() -> Self {
        Self {
            damage_multiplier: 1.0,
            crit_rate_multiplier: 1.0,
            crit_damage_multiplier: 1.0,
            shoot_speed_multiplier: 1.0,
            reload_time_multiplier: 1.0,
            bullet_speed_multiplier: 1.0,
            bullet_distance_multiplier: 1.0,
            scatter_multiplier: 1.0,
            capacity_add: 0.0,
            armor_piercing_add: 0.0,
            extra: Vec::new(),
        }
    }
}

impl WeaponBlock {
    /// Non-neutral deltas in application order, followed by `extra`.
    pub fn to_deltas(&self) -> Vec<StatDelta> {
        use DeltaMode::{Add, Multiply};
        deltas(
            &[
                ("Damage", self.damage_multiplier, Multiply),
                ("CritRate", self.crit_rate_multiplier, Multiply),
                ("CritDamageFactor", self.crit_damage_multiplier, Multiply),
                ("ShootSpeed", self.shoot_speed_multiplier, Multiply),
                ("ReloadTime", self.reload_time_multiplier, Multiply),
                ("BulletSpeed", self.bullet_speed_multiplier, Multiply),
                ("BulletDistance", self.bullet_distance_multiplier, Multiply),
                ("ScatterFactor", self.scatter_multiplier, Multiply),
                ("Capacity", self.capacity_add, Add),
                ("ArmorPiercing", self.armor_piercing_add, Add),
            ],
            &self.extra,
        )
    }

    pub fn is_active(&self) -> bool {
        !self.to_deltas().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct AmmoBlock {
    pub damage_multiplier: f32,
    pub crit_rate_gain_add: f32,
    pub armor_piercing_gain_add: f32,
    pub bleed_chance_add: f32,
    pub extra: Vec<StatDelta>,
}

impl Default for AmmoBlock {
    fn default() -> Self {
        Self {
            damage_multiplier: 1.0,
            crit_rate_gain_add: 0.0,
            armor_piercing_gain_add: 0.0,
            bleed_chance_add: 0.0,
            extra: Vec::new(),
        }
    }
}

impl AmmoBlock {
    pub fn to_deltas(&self) -> Vec<StatDelta> {
        use DeltaMode::{Add, Multiply};
        deltas(
            &[
                ("Damage", self.damage_multiplier, Multiply),
                ("CritRateGain", self.crit_rate_gain_add, Add),
                ("ArmorPiercingGain", self.armor_piercing_gain_add, Add),
                ("BleedChance", self.bleed_chance_add, Add),
            ],
            &self.extra,
        )
    }

    pub fn is_active(&self) -> bool {
        !self.to_deltas().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct MeleeBlock {
    pub damage_multiplier: f32,
    pub crit_rate_multiplier: f32,
    pub attack_speed_multiplier: f32,
    pub attack_range_multiplier: f32,
    pub stamina_cost_multiplier: f32,
    pub extra: Vec<StatDelta>,
}

impl Default for MeleeBlock {
    fn default() -> Self {
        Self {
            damage_multiplier: 1.0,
            crit_rate_multiplier: 1.0,
            attack_speed_multiplier: 1.0,
            attack_range_multiplier: 1.0,
            stamina_cost_multiplier: 1.0,
            extra: Vec::new(),
        }
    }
}

impl MeleeBlock {
    pub fn to_deltas(&self) -> Vec<StatDelta> {
        use DeltaMode::Multiply;
        deltas(
            &[
                ("Damage", self.damage_multiplier, Multiply),
                ("CritRate", self.crit_rate_multiplier, Multiply),
                ("AttackSpeed", self.attack_speed_multiplier, Multiply),
                ("AttackRange", self.attack_range_multiplier, Multiply),
                ("StaminaCost", self.stamina_cost_multiplier, Multiply),
            ],
            &self.extra,
        )
    }

    pub fn is_active(&self) -> bool {
        !self.to_deltas().is_empty()
    }
}

/// Buff duration override and buff copies.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct BuffBlock {
    pub duration: f32,
    pub replace_original: bool,
    pub replacement_buff_id: i32,
    pub copies: Vec<BuffCopy>,
}

impl BuffBlock {
    pub fn is_active(&self) -> bool {
        self.duration > 0.0 || !self.copies.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct RewardPoolBlock {
    pub entries: Vec<RewardEntry>,
    pub draw_count: i32,
}

impl RewardPoolBlock {
    pub fn is_active(&self) -> bool {
        !self.entries.is_empty()
    }

    /// First entry without a positive item id and a positive weight.
    pub fn invalid_entry(&self) -> Option<(usize, &RewardEntry)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.item_id <= 0 || entry.weight <= 0.0)
    }
}

/// A crafting recipe producing the derived item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct RecipeBlock {
    /// Requested recipe id; defaults to `"{NewItemId}_craft"`.
    pub id: Option<String>,
    pub money: i64,
    pub cost: Vec<ItemAmount>,
    pub result_amount: i32,
    pub tags: Vec<String>,
    pub unlock_by_default: bool,
    pub hide_in_index: bool,
    pub locked_in_demo: bool,
}

impl Default for RecipeBlock {
    fn default() -> Self {
        Self {
            id: None,
            money: 0,
            cost: Vec::new(),
            result_amount: 1,
            tags: Vec::new(),
            unlock_by_default: true,
            hide_in_index: false,
            locked_in_demo: false,
        }
    }
}

impl RecipeBlock {
    pub fn recipe_id(&self, new_item_id: i32) -> String {
        match &self.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => format!("{new_item_id}_craft"),
        }
    }

    pub fn cost(&self) -> Cost {
        Cost::new(self.money, self.cost.clone())
    }

    pub fn flags(&self) -> RecipeFlags {
        let mut flags = RecipeFlags::empty();
        flags.set(RecipeFlags::UNLOCK_BY_DEFAULT, self.unlock_by_default);
        flags.set(RecipeFlags::HIDE_IN_INDEX, self.hide_in_index);
        flags.set(RecipeFlags::LOCKED_IN_DEMO, self.locked_in_demo);
        flags
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct DecomposeBlock {
    pub money: i64,
    pub results: Vec<ItemAmount>,
    pub time: f32,
}

impl DecomposeBlock {
    pub fn is_active(&self) -> bool {
        self.money > 0 || !self.results.is_empty()
    }

    pub fn result(&self) -> Cost {
        Cost::new(self.money, self.results.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_blocks_are_inactive() {
        assert!(!ConsumableBlock::default().is_active());
        assert!(!DurabilityBlock::default().is_active());
        assert!(!HealingBlock::default().is_active());
        assert!(!UseTimeBlock::default().is_active());
        assert!(!SlotBlock::default().is_active());
        assert!(!WeaponBlock::default().is_active());
        assert!(!AmmoBlock::default().is_active());
        assert!(!MeleeBlock::default().is_active());
        assert!(!BuffBlock::default().is_active());
        assert!(!RewardPoolBlock::default().is_active());
        assert!(!DecomposeBlock::default().is_active());
    }

    #[test]
    fn weapon_deltas_skip_neutral_entries() {
        let block = WeaponBlock {
            damage_multiplier: 1.2,
            capacity_add: 10.0,
            extra: vec![StatDelta::new("Recoil", 0.5, DeltaMode::Overwrite)],
            ..WeaponBlock::default()
        };
        let deltas = block.to_deltas();
        let stats: Vec<&str> = deltas.iter().map(|d| d.stat.as_str()).collect();
        assert_eq!(stats, vec!["Damage", "Capacity", "Recoil"]);
    }

    #[test]
    fn slot_names_and_tags_cycle() {
        let block = SlotBlock {
            slot_count: 3,
            slot_names: vec!["Scope".into()],
            slot_tags: vec!["Scope".into(), "Muzzle".into()],
            ..SlotBlock::default()
        };
        assert_eq!(block.slot_name(0), "Scope");
        assert_eq!(block.slot_name(2), "Slot_2");
        assert_eq!(block.slot_tag(2), Some("Scope"));
        assert_eq!(block.slot_tag(1), Some("Muzzle"));
    }

    #[test]
    fn recipe_defaults() {
        let block = RecipeBlock::default();
        assert_eq!(block.recipe_id(95001), "95001_craft");
        assert_eq!(block.flags(), RecipeFlags::UNLOCK_BY_DEFAULT);
    }
}
