mod common;

use bakery_core::config::{BuffBlock, WeaponBlock};
use bakery_core::item::SlotCollection;
use bakery_core::{
    Augmenter, BuffLibrary, DeltaMode, EntityConfig, Env, Item, RegistryContext, StatDelta,
    TemplateCatalog,
};
use common::{ObservedCatalog, RecordingBuffs, init_tracing, tags, templates};

fn slot_keys(slots: Option<&SlotCollection>) -> Vec<String> {
    slots
        .map(|slots| slots.iter().map(|slot| slot.key().to_owned()).collect())
        .unwrap_or_default()
}

/// Every feature block left at its default: only base properties may change.
#[test]
fn test_default_blocks_leave_entity_untouched() {
    init_tracing();
    let mut catalog = templates();
    let mut tags = tags();
    let mut buffs = BuffLibrary::new();
    let mut registry = RegistryContext::new();

    for original_id in [135, 200, 862] {
        let template: Item = catalog.get(original_id).cloned().expect("template exists");
        let new_id = 96000 + original_id;
        let config = EntityConfig::new(original_id, new_id, format!("Derived_{original_id}"));

        let report = Augmenter::new(Env::new(&mut catalog, &mut tags, &mut buffs), &mut registry)
            .augment(&config)
            .expect("augmentation should succeed");
        assert!(report.applied.is_empty());
        assert!(report.failed.is_empty());

        let derived = catalog.get(new_id).expect("derived item registered");
        assert_eq!(derived.modules(), template.modules());
        assert_eq!(derived.stats(), template.stats());
        assert_eq!(derived.modifiers(), template.modifiers());
        assert_eq!(slot_keys(derived.slots()), slot_keys(template.slots()));
        assert_eq!(derived.max_durability(), template.max_durability());
        assert_eq!(derived.durability(), template.durability());
        assert_eq!(derived.weight(), template.weight());
        assert_eq!(derived.tags().tag_count(), template.tags().tag_count());
    }
    assert!(registry.recipes().is_empty());
    assert!(registry.decomposes().is_empty());
}

/// Multiply by 1 and Add 0 never write a stat; Overwrite always does.
#[test]
fn test_neutral_deltas_never_touch_slots() {
    init_tracing();
    let mut catalog = templates();
    let mut tags = tags();
    let mut buffs = BuffLibrary::new();
    let mut registry = RegistryContext::new();

    let config = EntityConfig {
        weapon: WeaponBlock {
            capacity_add: 0.0,
            extra: vec![
                StatDelta::new("Damage", 1.0, DeltaMode::Multiply),
                StatDelta::new("Capacity", 0.0, DeltaMode::Add),
                StatDelta::new("ShootSpeed", 6.0, DeltaMode::Overwrite),
            ],
            ..WeaponBlock::default()
        },
        ..EntityConfig::new(862, 95100, "Rifle_Same")
    };

    Augmenter::new(Env::new(&mut catalog, &mut tags, &mut buffs), &mut registry)
        .augment(&config)
        .expect("augmentation should succeed");

    let stats = catalog.get(95100).expect("registered").stats();
    assert_eq!(stats.get("Damage").map(|s| s.revision()), Some(0));
    assert_eq!(stats.get("Capacity").map(|s| s.revision()), Some(0));
    let speed = stats.get("ShootSpeed").expect("stat exists");
    assert_eq!((speed.value(), speed.revision()), (6.0, 1));
}

/// Weapon multipliers and additive deltas combine in declared order.
#[test]
fn test_weapon_block_combines_deltas() {
    let mut catalog = templates();
    let mut tags = tags();
    let mut buffs = BuffLibrary::new();
    let mut registry = RegistryContext::new();

    let config = EntityConfig {
        weapon: WeaponBlock {
            damage_multiplier: 1.5,
            capacity_add: 10.0,
            extra: vec![StatDelta::new("Damage", 5.0, DeltaMode::Add)],
            ..WeaponBlock::default()
        },
        ..EntityConfig::new(862, 95101, "Rifle_Plus")
    };
    Augmenter::new(Env::new(&mut catalog, &mut tags, &mut buffs), &mut registry)
        .augment(&config)
        .expect("augmentation should succeed");

    let stats = catalog.get(95101).expect("registered").stats();
    assert_eq!(stats.value("Damage"), Some(65.0));
    assert_eq!(stats.value("Capacity"), Some(40.0));
    // The template is untouched.
    assert_eq!(catalog.get(862).expect("template").stats().value("Damage"), Some(40.0));
}

/// During feature application the entity still carries its template id and
/// is not in the catalog; the final id appears only at registration.
#[test]
fn test_identity_assigned_last() {
    init_tracing();
    let mut catalog = ObservedCatalog::new(templates());
    let mut tags = tags();
    let mut buffs = RecordingBuffs::default();
    let mut registry = RegistryContext::new();

    let config = EntityConfig {
        buffs: BuffBlock {
            duration: 30.0,
            ..BuffBlock::default()
        },
        ..EntityConfig::new(200, 95200, "LongCanteen")
    };
    assert!(catalog.get(95200).is_none());

    Augmenter::new(Env::new(&mut catalog, &mut tags, &mut buffs), &mut registry)
        .augment(&config)
        .expect("augmentation should succeed");

    assert_eq!(buffs.seen, vec![(200, false)]);
    assert_eq!(catalog.registered, vec![(95200, false)]);
    assert!(catalog.get(95200).expect("registered").is_published());
}

/// Ocean's Tear: 135 → 95001 with a weight and one modifier.
#[test]
fn test_end_to_end_ocean_tear() {
    init_tracing();
    let mut catalog = templates();
    let mut tags = tags();
    let mut buffs = BuffLibrary::new();
    let mut registry = RegistryContext::new();

    let config = EntityConfig {
        weight: Some(0.2),
        modifiers: [("MovementSpeed".to_owned(), 0.05)].into_iter().collect(),
        ..EntityConfig::new(135, 95001, "OceanTear")
    };

    let report = Augmenter::new(Env::new(&mut catalog, &mut tags, &mut buffs), &mut registry)
        .augment(&config)
        .expect("augmentation should succeed");
    assert!(report.is_clean());
    assert!(report.recipes.is_empty());

    let template = catalog.get(135).expect("template").clone();
    let item = catalog.get(95001).expect("retrievable by new id");
    assert_eq!(item.type_id(), 95001);
    assert_eq!(item.weight(), 0.2);
    assert_eq!(item.value(), template.value());
    assert_eq!(item.quality(), template.quality());
    assert!(item.tags().has("Luxury"));
    assert_eq!(item.modifiers().len(), 1);
    let modifier = item.modifiers().get("MovementSpeed").expect("modifier present");
    assert_eq!(modifier.value, 0.05);

    let teardown = registry.remove_all_added();
    assert!(teardown.is_empty());
}
