//! Stat Delta Applier: combine a named numeric stat with a delta.
//!
//! A stat name resolves to a slot in the item's [`StatCollection`] (matched
//! case-insensitively) or, for dotted names such as `FoodDrink.energyValue`,
//! to a float field on an already attached capability module. Unresolvable
//! names are a silent no-op.
//!
//! `Multiply` by 1 and `Add` of 0 are skipped before resolution and never
//! write the slot, since stat slots notify observers on every write.
//! `Overwrite` is always written.
//!
//! [`StatCollection`]: crate::item::StatCollection

use tracing::debug;

use crate::access::FieldValue;
use crate::item::Item;
use crate::modules::ModuleKind;

/// How a delta combines with the current value.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeltaMode {
    #[default]
    Multiply,
    Add,
    Overwrite,
}

impl DeltaMode {
    /// True when applying `delta` under this mode cannot change the value.
    pub fn is_neutral(self, delta: f32) -> bool {
        match self {
            Self::Multiply => delta == 1.0,
            Self::Add => delta == 0.0,
            Self::Overwrite => false,
        }
    }

    pub fn combine(self, current: f32, delta: f32) -> f32 {
        match self {
            Self::Multiply => current * delta,
            Self::Add => current + delta,
            Self::Overwrite => delta,
        }
    }
}

/// One named stat change.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct StatDelta {
    pub stat: String,
    pub value: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: DeltaMode,
}

impl StatDelta {
    pub fn new(stat: impl Into<String>, value: f32, mode: DeltaMode) -> Self {
        Self {
            stat: stat.into(),
            value,
            mode,
        }
    }

    pub fn multiply(stat: impl Into<String>, value: f32) -> Self {
        Self::new(stat, value, DeltaMode::Multiply)
    }

    pub fn add(stat: impl Into<String>, value: f32) -> Self {
        Self::new(stat, value, DeltaMode::Add)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeltaOutcome {
    Applied { before: f32, after: f32 },
    /// Neutral delta; the slot was not touched.
    Skipped,
    /// No slot with that name.
    Missing,
}

impl DeltaOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Applies one delta to `stat` on `item`.
pub fn apply_delta(item: &mut Item, stat: &str, delta: f32, mode: DeltaMode) -> DeltaOutcome {
    if mode.is_neutral(delta) {
        return DeltaOutcome::Skipped;
    }

    if let Some(slot) = item.stats_mut().get_mut(stat) {
        let before = slot.value();
        let after = mode.combine(before, delta);
        slot.set_value(after);
        debug!(target: "bakery::stats", stat, %mode, before, after, "applied stat delta");
        return DeltaOutcome::Applied { before, after };
    }

    match apply_to_module(item, stat, delta, mode) {
        Some(outcome) => outcome,
        None => {
            debug!(target: "bakery::stats", stat, "stat not found, skipped");
            DeltaOutcome::Missing
        }
    }
}

fn apply_to_module(item: &mut Item, path: &str, delta: f32, mode: DeltaMode) -> Option<DeltaOutcome> {
    let (module, field) = path.split_once('.')?;
    let kind: ModuleKind = module.parse().ok()?;
    let target = item.modules_mut().reflect_mut(kind)?;

    let before = match target.get_field(field)? {
        FieldValue::Float(value) => value as f32,
        _ => return None,
    };
    let after = mode.combine(before, delta);
    target
        .set_field(field, FieldValue::Float(f64::from(after)))
        .ok()?;

    debug!(target: "bakery::stats", stat = path, %mode, before, after, "applied module delta");
    Some(DeltaOutcome::Applied { before, after })
}

/// Applies `deltas` strictly in order.
pub fn apply_all<'a>(
    item: &mut Item,
    deltas: impl IntoIterator<Item = &'a StatDelta>,
) -> Vec<DeltaOutcome> {
    deltas
        .into_iter()
        .map(|delta| apply_delta(item, &delta.stat, delta.value, delta.mode))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::FoodDrink;

    fn weapon() -> Item {
        Item::builder(862).stat("Damage", 40.0).stat("ShootSpeed", 5.0).build()
    }

    #[test]
    fn combination_modes() {
        let mut item = weapon();
        assert_eq!(
            apply_delta(&mut item, "damage", 1.5, DeltaMode::Multiply),
            DeltaOutcome::Applied { before: 40.0, after: 60.0 }
        );
        apply_delta(&mut item, "Damage", 5.0, DeltaMode::Add);
        assert_eq!(item.stats().value("Damage"), Some(65.0));
        apply_delta(&mut item, "ShootSpeed", 7.0, DeltaMode::Overwrite);
        assert_eq!(item.stats().value("ShootSpeed"), Some(7.0));
    }

    #[test]
    fn neutral_deltas_do_not_write() {
        let mut item = weapon();
        assert_eq!(apply_delta(&mut item, "Damage", 1.0, DeltaMode::Multiply), DeltaOutcome::Skipped);
        assert_eq!(apply_delta(&mut item, "Damage", 0.0, DeltaMode::Add), DeltaOutcome::Skipped);
        assert_eq!(item.stats().get("Damage").unwrap().revision(), 0);

        apply_delta(&mut item, "Damage", 40.0, DeltaMode::Overwrite);
        assert_eq!(item.stats().get("Damage").unwrap().revision(), 1);
    }

    #[test]
    fn missing_stat_is_noop() {
        let mut item = weapon();
        assert_eq!(apply_delta(&mut item, "Recoil", 2.0, DeltaMode::Add), DeltaOutcome::Missing);
        assert_eq!(
            apply_delta(&mut item, "FoodDrink.energyValue", 2.0, DeltaMode::Add),
            DeltaOutcome::Missing
        );
        assert!(!item.modules().has(ModuleKind::FoodDrink));
    }

    #[test]
    fn module_fields_resolve_by_path() {
        let mut item = weapon();
        item.modules_mut().ensure::<FoodDrink>().energy_value = 10.0;

        let outcome = apply_delta(&mut item, "FoodDrink.energyValue", 2.0, DeltaMode::Multiply);
        assert!(outcome.is_applied());
        assert_eq!(item.modules().module::<FoodDrink>().unwrap().energy_value, 20.0);

        // Text fields are not numeric stats.
        let outcome = apply_delta(&mut item, "FoodDrink.energyKey", 2.0, DeltaMode::Add);
        assert_eq!(outcome, DeltaOutcome::Missing);
    }

    #[test]
    fn apply_all_keeps_declared_order() {
        let mut item = weapon();
        let deltas = [StatDelta::add("Damage", 10.0), StatDelta::multiply("Damage", 2.0)];
        apply_all(&mut item, &deltas);
        assert_eq!(item.stats().value("Damage"), Some(100.0));
    }
}
