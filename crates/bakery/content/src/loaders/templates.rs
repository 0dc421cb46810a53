//! Template catalog loader.
//!
//! Offline runs have no game to clone from, so the dry-run host reads its
//! templates, tags, buffs and pre-existing registry entries from a RON file.

use std::collections::BTreeMap;
use std::path::Path;

use bakery_core::item::{ModifierDescription, Slot};
use bakery_core::modules::{BuffEffect, BuffEffects, Drug, FoodDrink, UsageUtilities};
use bakery_core::registry::{DecomposeBook, RecipeBook};
use bakery_core::{
    BuffLibrary, BuffPrototype, DecomposeFormula, DisplayQuality, Item, MemoryCatalog, ModuleSet,
    Recipe, RegistryContext, TagCatalog, TagLibrary,
};
use serde::Deserialize;
use tracing::info;

use crate::loaders::{LoadResult, read_file, ron_options};

/// Root of a templates file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TemplateFile {
    /// Tags known to the global catalog before any config runs.
    pub tags: Vec<String>,
    pub buffs: Vec<BuffPrototype>,
    pub items: Vec<TemplateSpec>,
    /// Third-party recipes already present in the registry.
    pub recipes: Vec<Recipe>,
    /// Third-party decompose formulas already present in the registry.
    pub decomposes: Vec<DecomposeFormula>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TemplateSpec {
    pub id: i32,
    pub name: String,
    pub weight: f32,
    pub value: i32,
    pub quality: i32,
    pub display_quality: DisplayQuality,
    pub order: i32,
    pub max_durability: f32,
    pub durability_loss: f32,
    pub tags: Vec<String>,
    pub stats: BTreeMap<String, f32>,
    pub slots: Vec<SlotSpec>,
    pub modifiers: Vec<ModifierDescription>,
    pub food: Option<FoodSpec>,
    pub heal: Option<f32>,
    pub use_time: Option<f32>,
    pub buffs: Vec<BuffEffect>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SlotSpec {
    pub key: String,
    pub required_tags: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FoodSpec {
    pub energy: f32,
    pub water: f32,
    pub use_durability: f32,
}

impl TemplateSpec {
    fn modules(&self) -> ModuleSet {
        let mut modules = ModuleSet::new();
        if let Some(food) = &self.food {
            modules.insert(FoodDrink {
                energy_value: food.energy,
                water_value: food.water,
                use_durability: food.use_durability,
                ..FoodDrink::default()
            });
        }
        if let Some(heal) = self.heal {
            modules.insert(Drug {
                heal_value: heal,
                ..Drug::default()
            });
        }
        if let Some(use_time) = self.use_time {
            modules.insert(UsageUtilities {
                use_time,
                ..UsageUtilities::default()
            });
        }
        if !self.buffs.is_empty() {
            modules.insert(BuffEffects {
                entries: self.buffs.clone(),
            });
        }
        modules
    }

    /// Builds the live template, resolving tag names through `tags`.
    fn build(&self, tags: &mut TagLibrary) -> Item {
        let mut builder = Item::builder(self.id)
            .display_name(&self.name)
            .weight(self.weight)
            .value(self.value)
            .quality(self.quality)
            .display_quality(self.display_quality)
            .order(self.order)
            .modules(self.modules());

        if self.max_durability > 0.0 {
            builder = builder.durability(self.max_durability, self.durability_loss);
        }
        for name in &self.tags {
            builder = builder.tag(tags.create_tag(name));
        }
        for slot in &self.slots {
            let required = slot.required_tags.iter().map(|name| tags.create_tag(name)).collect();
            builder = builder.slot(Slot::new(&slot.key, required));
        }
        for (key, value) in &self.stats {
            builder = builder.stat(key, *value);
        }
        for modifier in &self.modifiers {
            builder = builder.modifier(modifier.clone());
        }
        builder.build()
    }
}

/// Everything an offline pipeline run needs.
#[derive(Debug, Default)]
pub struct TemplateWorld {
    pub catalog: MemoryCatalog,
    pub tags: TagLibrary,
    pub buffs: BuffLibrary,
    pub registry: RegistryContext,
}

impl TemplateFile {
    pub fn into_world(self) -> TemplateWorld {
        let mut tags = TagLibrary::with_tags(self.tags.iter().map(String::as_str));

        let mut catalog = MemoryCatalog::new();
        for spec in &self.items {
            catalog.insert_template(spec.build(&mut tags));
        }

        let buffs: BuffLibrary = self.buffs.into_iter().collect();
        let registry = RegistryContext::with_books(
            self.recipes.into_iter().collect::<RecipeBook>(),
            self.decomposes.into_iter().collect::<DecomposeBook>(),
        );

        TemplateWorld {
            catalog,
            tags,
            buffs,
            registry,
        }
    }
}

/// Loader for template catalogs.
pub struct TemplateLoader;

impl TemplateLoader {
    /// Load a template file from a RON file.
    pub fn load_file(path: &Path) -> LoadResult<TemplateFile> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TemplateFile> {
        ron_options()
            .from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse templates RON: {}", e))
    }

    /// Loads a template file and builds the offline world from it.
    pub fn load(path: &Path) -> LoadResult<TemplateWorld> {
        let file = Self::load_file(path)?;
        let world = file.into_world();
        info!(
            target: "bakery::content",
            templates = world.catalog.len(),
            tags = world.tags.len(),
            buffs = world.buffs.len(),
            "loaded template world"
        );
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use bakery_core::{RecipeFlags, TemplateCatalog};

    use super::*;

    const TEMPLATES: &str = r#"(
        tags: ["Food", "Luxury"],
        buffs: [(id: 1001, name: "Energized", duration: 30.0)],
        items: [
            (
                id: 200,
                name: "Energy Bar",
                weight: 0.3,
                value: 120,
                tags: ["Food", "Snack"],
                food: Some((energy: 15.0, water: 0.0)),
                buffs: [(buff_id: 1001, chance: 1.0, duration: 30.0)],
            ),
            (
                id: 862,
                name: "Rifle",
                stats: {"Damage": 40.0, "Capacity": 30.0},
                slots: [(key: "Scope", required_tags: ["Scope"])],
            ),
        ],
        recipes: [
            (
                id: "energy_bar_craft",
                cost: (Money: 50),
                result: (ItemId: 200, Amount: 2),
                tags: ["WorkBenchAdvanced"],
                flags: "UNLOCK_BY_DEFAULT | HIDE_IN_INDEX",
            ),
        ],
        decomposes: [(item_id: 200, result: (Money: 10), time: 1.0)],
    )"#;

    #[test]
    fn builds_world_from_ron() {
        let world = TemplateLoader::parse(TEMPLATES).unwrap().into_world();

        let bar = world.catalog.template(200).unwrap();
        assert_eq!(bar.display_name(), "Energy Bar");
        assert!(bar.tags().has("Snack"));
        assert_eq!(bar.modules().module::<FoodDrink>().unwrap().energy_value, 15.0);
        assert_eq!(bar.modules().module::<BuffEffects>().unwrap().entries.len(), 1);

        let rifle = world.catalog.template(862).unwrap();
        assert_eq!(rifle.stats().value("damage"), Some(40.0));
        assert_eq!(rifle.slots().unwrap().len(), 1);

        // Tags referenced only by items are created too.
        assert!(world.tags.find_tag("scope").is_some());
        assert_eq!(world.buffs.find(1001).unwrap().name, "Energized");
        assert!(world.registry.decomposes().contains(&200));
        let recipe = world.registry.recipes().get(&"energy_bar_craft".to_owned()).unwrap();
        assert_eq!(recipe.flags, RecipeFlags::UNLOCK_BY_DEFAULT | RecipeFlags::HIDE_IN_INDEX);
        assert!(world.registry.added_recipes().is_empty());
        assert!(world.registry.added_decomposes().is_empty());
    }

    #[test]
    fn rejects_malformed_file() {
        let err = TemplateLoader::parse("(items: [ (id: \"oops\") ])").unwrap_err();
        assert!(err.to_string().contains("Failed to parse templates RON"));
    }
}
