//! Shared fixtures for the engine tests.
#![allow(dead_code)]

use bakery_core::env::RegistrationRejected;
use bakery_core::item::{ModifierDescription, Slot};
use bakery_core::modules::{BuffEffect, BuffEffects, FoodDrink, ModuleSet};
use bakery_core::{BuffCopy, BuffService, Item, MemoryCatalog, Tag, TagLibrary, TemplateCatalog};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("bakery=debug")
        .try_init();
}

/// Templates resembling the host's: a valuable (135), a canteen with a food
/// module (200) and a rifle with stats and slots (862).
pub fn templates() -> MemoryCatalog {
    let mut canteen_modules = ModuleSet::new();
    canteen_modules.ensure::<FoodDrink>().water_value = 15.0;
    canteen_modules.ensure::<BuffEffects>().entries.push(BuffEffect {
        buff_id: 1001,
        chance: 1.0,
        duration: 10.0,
    });

    [
        Item::builder(135)
            .display_name("Item_135")
            .weight(0.5)
            .value(20_000)
            .quality(5)
            .tag(Tag::new("Luxury"))
            .build(),
        Item::builder(200)
            .display_name("Item_200")
            .weight(0.8)
            .durability(50.0, 0.0)
            .modules(canteen_modules)
            .modifier(ModifierDescription::new("Stamina", 2.0))
            .build(),
        Item::builder(862)
            .display_name("Item_862")
            .weight(3.2)
            .stat("Damage", 40.0)
            .stat("ShootSpeed", 6.0)
            .stat("Capacity", 30.0)
            .slot(Slot::new("Scope", vec![Tag::new("Scope")]))
            .slot(Slot::new("Muzzle", vec![Tag::new("Muzzle")]))
            .build(),
    ]
    .into_iter()
    .collect()
}

pub fn tags() -> TagLibrary {
    TagLibrary::with_tags(["Luxury", "Food", "Repairable", "Scope", "Muzzle"])
}

/// Catalog wrapper recording what other subsystems could observe.
pub struct ObservedCatalog {
    pub inner: MemoryCatalog,
    /// (type id, published) of every item handed to `register`.
    pub registered: Vec<(i32, bool)>,
}

impl ObservedCatalog {
    pub fn new(inner: MemoryCatalog) -> Self {
        Self {
            inner,
            registered: Vec::new(),
        }
    }
}

impl TemplateCatalog for ObservedCatalog {
    fn template(&self, id: i32) -> Option<&Item> {
        self.inner.template(id)
    }

    fn get(&self, id: i32) -> Option<&Item> {
        self.inner.get(id)
    }

    fn register(&mut self, item: Item) -> Result<(), RegistrationRejected> {
        self.registered.push((item.type_id(), item.is_published()));
        self.inner.register(item)
    }

    fn unregister(&mut self, id: i32) -> Option<Item> {
        self.inner.unregister(id)
    }
}

/// Buff service that records the identity of every item it is handed.
#[derive(Default)]
pub struct RecordingBuffs {
    pub seen: Vec<(i32, bool)>,
}

impl BuffService for RecordingBuffs {
    fn replace_or_modify_duration(&mut self, item: &mut Item, _: f32, _: bool, _: i32) {
        self.seen.push((item.type_id(), item.is_published()));
    }

    fn copy_and_add_buffs(&mut self, item: &mut Item, _: &[BuffCopy]) {
        self.seen.push((item.type_id(), item.is_published()));
    }
}
