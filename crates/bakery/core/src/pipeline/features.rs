//! Feature block application. Each function applies one active block.

use tracing::{debug, info, warn};

use super::PatchError;
use crate::access;
use crate::collection::{BoundedList, CollectionAdapter};
use crate::config::{
    BuffBlock, ConsumableBlock, DurabilityBlock, EntityConfig, HealingBlock, RewardPoolBlock,
    SlotBlock, UseTimeBlock,
};
use crate::env::{Env, resolve_or_create};
use crate::item::{Item, Slot, SlotCollection, Tag, TagCollection, Upsert};
use crate::modules::{ModuleKind, RewardPool, ensure_module};
use crate::stats::{self, DeltaOutcome, StatDelta};

const REPAIRABLE_TAG: &str = "Repairable";

/// Feature blocks in application order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum FeatureBlock {
    Consumable,
    Durability,
    Healing,
    UseTime,
    Slots,
    Modifiers,
    Weapon,
    Ammo,
    Melee,
    Buffs,
    RewardPool,
}

impl FeatureBlock {
    /// Activation gate: an inactive block causes no mutation.
    pub fn is_active(self, config: &EntityConfig) -> bool {
        match self {
            Self::Consumable => config.consumable_block().is_active(),
            Self::Durability => config.durability.is_active(),
            Self::Healing => config.healing.is_active(),
            Self::UseTime => config.use_time.is_active(),
            Self::Slots => config.slots.is_active(),
            Self::Modifiers => !config.modifiers.is_empty(),
            Self::Weapon => config.weapon.is_active(),
            Self::Ammo => config.ammo.is_active(),
            Self::Melee => config.melee.is_active(),
            Self::Buffs => config.buffs.is_active(),
            Self::RewardPool => config.reward_pool.is_active(),
        }
    }

    pub(super) fn apply(
        self,
        item: &mut Item,
        config: &EntityConfig,
        env: &mut Env<'_>,
    ) -> Result<(), PatchError> {
        match self {
            Self::Consumable => apply_consumable(item, &config.consumable_block()),
            Self::Durability => apply_durability(item, &config.durability, env),
            Self::Healing => apply_healing(item, &config.healing),
            Self::UseTime => apply_use_time(item, &config.use_time),
            Self::Slots => apply_slots(item, &config.slots, env),
            Self::Modifiers => {
                apply_modifiers(item, config.modifiers.iter().map(|(k, v)| (k.as_str(), *v)));
                Ok(())
            }
            Self::Weapon => {
                apply_deltas(item, &config.weapon.to_deltas());
                Ok(())
            }
            Self::Ammo => {
                apply_deltas(item, &config.ammo.to_deltas());
                Ok(())
            }
            Self::Melee => {
                apply_deltas(item, &config.melee.to_deltas());
                Ok(())
            }
            Self::Buffs => {
                apply_buffs(item, &config.buffs, env);
                Ok(())
            }
            Self::RewardPool => apply_reward_pool(item, &config.reward_pool),
        }
    }
}

fn apply_consumable(item: &mut Item, block: &ConsumableBlock) -> Result<(), PatchError> {
    let module = ensure_module(item, ModuleKind::FoodDrink);
    access::set(module, "energyValue", block.energy_value)?;
    access::set(module, "waterValue", block.water_value)?;
    access::set(module, "UseDurability", block.use_durability)?;
    access::set(module, "energyKey", "Usage_Energy")?;
    access::set(module, "waterKey", "Usage_Water")?;
    debug!(
        target: "bakery::pipeline",
        energy = block.energy_value,
        water = block.water_value,
        "configured food module"
    );
    Ok(())
}

fn apply_durability(
    item: &mut Item,
    block: &DurabilityBlock,
    env: &mut Env<'_>,
) -> Result<(), PatchError> {
    access::set(item, "maxDurability", block.max_durability)?;
    access::set(item, "durabilityLoss", block.durability_loss)?;
    access::set(item, "durability", block.current_durability())?;

    if block.repairable && !item.tags().has(REPAIRABLE_TAG) {
        match env.tags().find_tag(REPAIRABLE_TAG) {
            Some(tag) => {
                add_tags(item.tags_mut(), [tag])?;
            }
            None => warn!(target: "bakery::pipeline", tag = REPAIRABLE_TAG, "tag does not exist, skipped"),
        }
    }
    Ok(())
}

fn apply_healing(item: &mut Item, block: &HealingBlock) -> Result<(), PatchError> {
    let module = ensure_module(item, ModuleKind::Drug);
    access::set(module, "healValue", block.heal_value)?;
    access::set(module, "useDurability", block.use_durability)?;
    Ok(())
}

fn apply_use_time(item: &mut Item, block: &UseTimeBlock) -> Result<(), PatchError> {
    let module = ensure_module(item, ModuleKind::UsageUtilities);
    access::set(module, "useTime", block.use_time)?;
    Ok(())
}

fn apply_slots(item: &mut Item, block: &SlotBlock, env: &mut Env<'_>) -> Result<(), PatchError> {
    let new_slots: Vec<Slot> = (0..block.slot_count as usize)
        .map(|index| {
            let required = block
                .slot_tag(index)
                .map(|name| resolve_or_create(env.tags(), name))
                .into_iter()
                .collect();
            Slot::new(block.slot_name(index), required)
        })
        .collect();

    let mut slots = CollectionAdapter::wrap(item.ensure_slots(), SlotCollection::shape())?;
    if block.replace_existing {
        let removed = slots.count();
        slots.clear();
        info!(target: "bakery::pipeline", removed, "cleared existing slots");
    }
    for slot in new_slots {
        let key = slot.key().to_owned();
        if slots.add(slot).is_none() {
            warn!(target: "bakery::pipeline", slot = %key, "slot not added");
        }
    }
    Ok(())
}

/// Merge-by-key modifier application.
fn apply_modifiers<'a>(item: &mut Item, modifiers: impl IntoIterator<Item = (&'a str, f32)>) {
    for (key, value) in modifiers {
        match item.modifiers_mut().upsert(key, value) {
            Upsert::Updated { previous } => {
                debug!(target: "bakery::pipeline", key, previous, value, "updated modifier")
            }
            Upsert::Appended => debug!(target: "bakery::pipeline", key, value, "added modifier"),
        }
    }
}

fn apply_deltas(item: &mut Item, deltas: &[StatDelta]) {
    for (delta, outcome) in deltas.iter().zip(stats::apply_all(item, deltas)) {
        if outcome == DeltaOutcome::Missing {
            debug!(target: "bakery::pipeline", stat = %delta.stat, "item has no such stat");
        }
    }
}

fn apply_buffs(item: &mut Item, block: &BuffBlock, env: &mut Env<'_>) {
    if block.duration > 0.0 {
        env.buffs().replace_or_modify_duration(
            item,
            block.duration,
            block.replace_original,
            block.replacement_buff_id,
        );
    }
    if !block.copies.is_empty() {
        env.buffs().copy_and_add_buffs(item, &block.copies);
    }
}

fn apply_reward_pool(item: &mut Item, block: &RewardPoolBlock) -> Result<(), PatchError> {
    if let Some((index, entry)) = block.invalid_entry() {
        return Err(PatchError::InvalidRewardPool {
            index,
            item_id: entry.item_id,
            weight: entry.weight,
        });
    }

    let pool = item.modules_mut().ensure::<RewardPool>();
    pool.entries = block.entries.clone();
    if block.draw_count > 0 {
        access::set(pool, "drawCount", block.draw_count)?;
    }
    Ok(())
}

/// Adds `tags` through the collection adapter. Tags already present are skipped.
pub(super) fn add_tags(
    target: &mut TagCollection,
    tags: impl IntoIterator<Item = Tag>,
) -> Result<usize, PatchError> {
    let mut list = CollectionAdapter::wrap(target, TagCollection::shape())?;
    let mut added = 0;
    for tag in tags {
        if list.contains(&tag) {
            continue;
        }
        if list.add(tag).is_some() {
            added += 1;
        }
    }
    Ok(added)
}
