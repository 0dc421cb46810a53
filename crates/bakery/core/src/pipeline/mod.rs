//! Entity Augmentation Pipeline.
//!
//! One config produces one derived item, strictly in this order:
//!
//! 1. fetch the template by `OriginalItemId` (abort if absent)
//! 2. clone it and mark the clone unpublished
//! 3. base properties (scalars, display key, tag union)
//! 4. active feature blocks, each failure recorded without stopping the rest
//! 5. assign `NewItemId` as the last mutation
//! 6. register with the catalog; a rejected item is dropped
//! 7. publish recipes and the decompose formula under the final id
//!
//! Nothing reachable from the catalog sees the item before step 6, and the
//! item carries its template's id until step 5.

mod error;
mod features;
mod report;

pub use error::PatchError;
pub use features::FeatureBlock;
pub use report::{AugmentReport, BatchReport};

use strum::IntoEnumIterator;
use tracing::{debug, error, info, warn};

use crate::access::{self, FieldValue};
use crate::config::EntityConfig;
use crate::env::{Env, RegistrationRejected};
use crate::error::BakeryError;
use crate::item::{Item, Tag};
use crate::registry::{ItemAmount, RegistryContext};

/// Steps of one augmentation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PipelineStage {
    FetchTemplate,
    Clone,
    BaseProperties,
    FeatureBlocks,
    AssignIdentity,
    Register,
    PublishArtifacts,
}

/// Runs configs against a set of collaborators and a registry context.
pub struct Augmenter<'a> {
    env: Env<'a>,
    registry: &'a mut RegistryContext,
}

impl<'a> Augmenter<'a> {
    pub fn new(env: Env<'a>, registry: &'a mut RegistryContext) -> Self {
        Self { env, registry }
    }

    /// Augments every config in order. Failures are logged and collected;
    /// the batch always runs to the end.
    pub fn augment_all<'c>(&mut self, configs: impl IntoIterator<Item = &'c EntityConfig>) -> BatchReport {
        let mut batch = BatchReport::default();
        for config in configs {
            match self.augment(config) {
                Ok(report) => batch.succeeded.push(report),
                Err(error) => {
                    error!(
                        target: "bakery::pipeline",
                        key = %config.localization_key,
                        new_id = config.new_item_id,
                        stage = %error.stage(),
                        code = error.error_code(),
                        "failed to create item: {error}"
                    );
                    batch.failed.push((config.new_item_id, error));
                }
            }
        }
        info!(
            target: "bakery::pipeline",
            created = batch.succeeded.len(),
            failed = batch.failed.len(),
            "batch finished"
        );
        batch
    }

    /// Runs the full pipeline for one config.
    ///
    /// # Errors
    ///
    /// Only an invalid config, a missing template or a rejected registration
    /// abort the run. Feature block and publication failures are reported in
    /// the returned [`AugmentReport`].
    pub fn augment(&mut self, config: &EntityConfig) -> Result<AugmentReport, PatchError> {
        config.validate()?;

        let stage = PipelineStage::FetchTemplate;
        debug!(target: "bakery::pipeline", %stage, original_id = config.original_item_id);
        let template = self
            .env
            .catalog()
            .template(config.original_item_id)
            .cloned()
            .ok_or(PatchError::TemplateNotFound {
                original_id: config.original_item_id,
            })?;

        let stage = PipelineStage::Clone;
        debug!(target: "bakery::pipeline", %stage, key = %config.localization_key);
        let mut item = template;
        item.mark_unpublished();

        let mut report = AugmentReport {
            original_id: config.original_item_id,
            new_id: config.new_item_id,
            ..AugmentReport::default()
        };

        self.apply_base(&mut item, config);
        self.apply_features(&mut item, config, &mut report);

        let stage = PipelineStage::AssignIdentity;
        debug!(target: "bakery::pipeline", %stage, new_id = config.new_item_id);
        access::set(&mut item, "typeID", config.new_item_id).map_err(|source| {
            PatchError::Identity {
                id: config.new_item_id,
                source,
            }
        })?;

        self.register(item)?;
        info!(
            target: "bakery::pipeline",
            key = %config.localization_key,
            new_id = config.new_item_id,
            "item registered"
        );

        self.publish_artifacts(config, &mut report);
        Ok(report)
    }

    fn apply_base(&mut self, item: &mut Item, config: &EntityConfig) {
        let stage = PipelineStage::BaseProperties;
        debug!(target: "bakery::pipeline", %stage);

        if let Some(weight) = config.weight {
            access::set_logged(item, "weight", weight);
        }
        if let Some(value) = config.value {
            access::set_logged(item, "value", value);
        }
        if let Some(quality) = config.quality {
            access::set_logged(item, "quality", quality);
        }
        if let Some(display_quality) = config.display_quality {
            access::set_logged(
                item,
                "displayQuality",
                FieldValue::Text(display_quality.to_string()),
            );
        }
        if !config.localization_key.is_empty() {
            access::set_logged(item, "displayName", config.localization_key.as_str());
        }
        access::set_logged(item, "order", 0);

        let mut known: Vec<Tag> = Vec::with_capacity(config.tags.len());
        for name in &config.tags {
            match self.env.tags().find_tag(name) {
                Some(tag) => known.push(tag),
                None => warn!(target: "bakery::pipeline", tag = %name, "tag does not exist, skipped"),
            }
        }
        if let Err(error) = features::add_tags(item.tags_mut(), known) {
            warn!(target: "bakery::pipeline", code = error.error_code(), "tags not applied: {error}");
        }
    }

    fn apply_features(&mut self, item: &mut Item, config: &EntityConfig, report: &mut AugmentReport) {
        let stage = PipelineStage::FeatureBlocks;
        for block in FeatureBlock::iter().filter(|block| block.is_active(config)) {
            debug!(target: "bakery::pipeline", %stage, %block, "applying block");
            match block.apply(item, config, &mut self.env) {
                Ok(()) => report.applied.push(block),
                Err(error) => {
                    warn!(
                        target: "bakery::pipeline",
                        %block,
                        code = error.error_code(),
                        "feature block failed: {error}"
                    );
                    report.failed.push((block, error));
                }
            }
        }
    }

    fn register(&mut self, item: Item) -> Result<(), PatchError> {
        let stage = PipelineStage::Register;
        debug!(target: "bakery::pipeline", %stage, id = item.type_id());
        self.env.catalog().register(item).map_err(|rejected| {
            let RegistrationRejected { id, reason, item } = rejected;
            drop(item);
            error!(target: "bakery::pipeline", id, %reason, "registration failed, clone released");
            PatchError::RegistrationFailed { id, reason }
        })
    }

    fn publish_artifacts(&mut self, config: &EntityConfig, report: &mut AugmentReport) {
        let stage = PipelineStage::PublishArtifacts;
        let new_id = config.new_item_id;

        for recipe in &config.recipes {
            let requested = recipe.recipe_id(new_id);
            debug!(target: "bakery::pipeline", %stage, recipe = %requested);
            match self.registry.add_recipe(
                &requested,
                recipe.cost(),
                ItemAmount::new(new_id, recipe.result_amount),
                recipe.tags.clone(),
                recipe.flags(),
            ) {
                Ok(stored) => report.recipes.push(stored),
                Err(error) => {
                    warn!(target: "bakery::pipeline", recipe = %requested, "recipe not added: {error}");
                    report.artifact_errors.push(error.into());
                }
            }
        }

        if config.decompose.is_active() {
            match self
                .registry
                .add_decompose(new_id, config.decompose.result(), config.decompose.time)
            {
                Ok(outcome) => report.decompose = Some(outcome),
                Err(error) => {
                    warn!(target: "bakery::pipeline", new_id, "decompose not added: {error}");
                    report.artifact_errors.push(error.into());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{BuffLibrary, MemoryCatalog, TagCatalog, TagLibrary, TemplateCatalog};
    use crate::modules::{Drug, FoodDrink, ModuleKind, RewardEntry, RewardPool};
    use crate::config::{DurabilityBlock, HealingBlock, RecipeBlock, RewardPoolBlock, SlotBlock};
    use crate::error::ErrorSeverity;

    struct World {
        catalog: MemoryCatalog,
        tags: TagLibrary,
        buffs: BuffLibrary,
        registry: RegistryContext,
    }

    impl World {
        fn new() -> Self {
            let catalog = [
                Item::builder(135).display_name("Gem").weight(1.0).value(100).tag(Tag::new("Luxury")).build(),
                Item::builder(200).display_name("Canteen").build(),
            ]
            .into_iter()
            .collect();
            Self {
                catalog,
                tags: TagLibrary::with_tags(["Luxury", "Food", "Repairable", "Scope"]),
                buffs: BuffLibrary::new(),
                registry: RegistryContext::new(),
            }
        }

        fn run(&mut self, config: &EntityConfig) -> Result<AugmentReport, PatchError> {
            let env = Env::new(&mut self.catalog, &mut self.tags, &mut self.buffs);
            Augmenter::new(env, &mut self.registry).augment(config)
        }
    }

    #[test]
    fn base_properties_and_tag_union() {
        let mut world = World::new();
        let config = EntityConfig {
            weight: Some(0.5),
            tags: vec!["Food".into(), "Unknown".into(), "luxury".into()],
            ..EntityConfig::new(135, 95001, "Snack")
        };

        let report = world.run(&config).unwrap();
        assert!(report.is_clean());

        let item = world.catalog.get(95001).unwrap();
        assert_eq!(item.weight(), 0.5);
        assert_eq!(item.value(), 100);
        assert_eq!(item.display_name(), "Snack");
        assert_eq!(item.tags().tag_count(), 2);
        assert!(item.tags().has("Food"));
        assert!(world.tags.find_tag("Unknown").is_none());
    }

    #[test]
    fn missing_template_aborts() {
        let mut world = World::new();
        let error = world.run(&EntityConfig::new(999, 95001, "Ghost")).unwrap_err();
        assert_eq!(error, PatchError::TemplateNotFound { original_id: 999 });
        assert_eq!(error.severity(), ErrorSeverity::LookupMiss);
        assert!(world.catalog.get(95001).is_none());
    }

    #[test]
    fn rejected_registration_publishes_nothing() {
        let mut world = World::new();
        let config = EntityConfig {
            recipes: vec![RecipeBlock::default()],
            ..EntityConfig::new(135, 200, "Clash")
        };
        let error = world.run(&config).unwrap_err();
        assert!(matches!(error, PatchError::RegistrationFailed { id: 200, .. }));
        assert!(world.registry.recipes().is_empty());
        assert_eq!(world.catalog.get(200).unwrap().display_name(), "Canteen");
    }

    #[test]
    fn modules_are_attached_for_active_blocks() {
        let mut world = World::new();
        let config = EntityConfig {
            energy_value: Some(30.0),
            healing: HealingBlock { heal_value: 25.0, use_durability: 1.0 },
            durability: DurabilityBlock { max_durability: 100.0, durability_loss: 0.25, repairable: true },
            ..EntityConfig::new(200, 95002, "Ration")
        };

        let report = world.run(&config).unwrap();
        assert_eq!(
            report.applied,
            vec![FeatureBlock::Consumable, FeatureBlock::Durability, FeatureBlock::Healing]
        );

        let item = world.catalog.get(95002).unwrap();
        let food = item.modules().module::<FoodDrink>().unwrap();
        assert_eq!(food.energy_value, 30.0);
        assert_eq!(food.energy_key, "Usage_Energy");
        assert_eq!(item.modules().module::<Drug>().unwrap().heal_value, 25.0);
        assert!(!item.modules().has(ModuleKind::UsageUtilities));
        assert_eq!(item.durability(), 75.0);
        assert!(item.tags().has("Repairable"));
    }

    #[test]
    fn slots_cycle_tags_and_replace() {
        let mut world = World::new();
        world.catalog.insert_template(
            Item::builder(300)
                .slot(crate::item::Slot::new("Old", vec![]))
                .build(),
        );
        let config = EntityConfig {
            slots: SlotBlock {
                slot_count: 3,
                replace_existing: true,
                slot_names: vec!["Optic".into()],
                slot_tags: vec!["Scope".into(), "Grip".into()],
            },
            ..EntityConfig::new(300, 95003, "Rifle")
        };

        world.run(&config).unwrap();
        let slots = world.catalog.get(95003).unwrap().slots().unwrap();
        let keys: Vec<&str> = slots.iter().map(|slot| slot.key()).collect();
        assert_eq!(keys, vec!["Optic", "Slot_1", "Slot_2"]);
        assert!(slots.at(1).unwrap().required_tags()[0].is("Grip"));
        assert!(slots.at(2).unwrap().required_tags()[0].is("Scope"));
        // Slot tags may be created on demand.
        assert!(world.tags.find_tag("Grip").is_some());
    }

    #[test]
    fn invalid_reward_pool_fails_only_that_block() {
        let mut world = World::new();
        let config = EntityConfig {
            modifiers: [("Stamina".to_owned(), 5.0)].into_iter().collect(),
            reward_pool: RewardPoolBlock {
                entries: vec![
                    RewardEntry { item_id: 135, weight: 1.0 },
                    RewardEntry { item_id: 136, weight: 0.0 },
                ],
                draw_count: 2,
            },
            ..EntityConfig::new(135, 95004, "Crate")
        };

        let report = world.run(&config).unwrap();
        assert_eq!(report.applied, vec![FeatureBlock::Modifiers]);
        assert!(matches!(
            report.failed.as_slice(),
            [(FeatureBlock::RewardPool, PatchError::InvalidRewardPool { index: 1, .. })]
        ));
        let item = world.catalog.get(95004).unwrap();
        assert!(item.modules().module::<RewardPool>().is_none());
        assert_eq!(item.modifiers().get("Stamina").unwrap().value, 5.0);
    }

    #[test]
    fn new_modifiers_append_in_key_order() {
        let mut world = World::new();
        let config = EntityConfig {
            modifiers: [("Zeal".to_owned(), 1.0), ("Armor".to_owned(), 2.0)].into_iter().collect(),
            ..EntityConfig::new(200, 95006, "Flask")
        };

        world.run(&config).unwrap();
        let item = world.catalog.get(95006).unwrap();
        let keys: Vec<&str> = item.modifiers().iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["Armor", "Zeal"]);
    }

    #[test]
    fn recipes_use_final_id() {
        let mut world = World::new();
        let config = EntityConfig {
            recipes: vec![RecipeBlock::default(), RecipeBlock::default()],
            ..EntityConfig::new(135, 95005, "Gem2")
        };

        let report = world.run(&config).unwrap();
        assert_eq!(report.recipes, vec!["95005_craft".to_owned(), "95005_craft_1".to_owned()]);
        let recipe = world.registry.recipes().get(&"95005_craft".to_owned()).unwrap();
        assert_eq!(recipe.result, ItemAmount::new(95005, 1));
        assert!(report.decompose.is_none());
    }

    #[test]
    fn batch_continues_after_failures() {
        let mut world = World::new();
        let configs = [
            EntityConfig::new(999, 95010, "Missing"),
            EntityConfig::new(135, 0, "BadId"),
            EntityConfig::new(135, 95011, "Good"),
        ];
        let env = Env::new(&mut world.catalog, &mut world.tags, &mut world.buffs);
        let batch = Augmenter::new(env, &mut world.registry).augment_all(&configs);

        assert_eq!(batch.registered_ids().collect::<Vec<_>>(), vec![95011]);
        assert_eq!(batch.failed.len(), 2);
        assert_eq!(batch.failed[1].1.stage(), PipelineStage::FetchTemplate);
    }
}
