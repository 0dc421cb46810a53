//! Offline pipeline run against a template file.

use std::fs;

use bakery_content::{TemplateLoader, ocean_tear};
use bakery_core::{Augmenter, Env, ItemAmount, RecipeFlags, TemplateCatalog};
use tempfile::TempDir;

const TEMPLATES: &str = r#"(
    tags: ["Luxury", "Valuables"],
    items: [
        (id: 135, name: "Gold Bar", weight: 1.0, value: 20000, quality: 5, tags: ["Valuables"]),
    ],
)"#;

/// The sample config derives 95001 from the loaded template.
#[test]
fn test_sample_augments_against_loaded_templates() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("templates.ron");
    fs::write(&path, TEMPLATES).expect("write");

    let mut world = TemplateLoader::load(&path).expect("Failed to load templates");
    let config = ocean_tear();

    let report = {
        let env = Env::new(&mut world.catalog, &mut world.tags, &mut world.buffs);
        let mut augmenter = Augmenter::new(env, &mut world.registry);
        augmenter.augment(&config).expect("augment")
    };
    assert!(report.is_clean());

    let item = world.catalog.get(95001).expect("registered");
    assert_eq!(item.value(), 50_000_000);
    assert_eq!(item.weight(), 0.2);
    assert_eq!(item.display_name(), "OceanTear");
    assert!(item.tags().has("Luxury"));
    assert!(item.tags().has("Valuables"));
    // The template is untouched.
    assert_eq!(world.catalog.template(135).expect("template").value(), 20000);
}

/// Third-party recipes in a template file load with their flags and are
/// never counted as added by this engine.
#[test]
fn test_template_recipes_carry_flags() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("templates.ron");
    fs::write(
        &path,
        r#"(
            items: [(id: 200, name: "Canteen")],
            recipes: [
                (
                    id: "canteen_craft",
                    cost: (Money: 5, Items: [(ItemId: 135, Amount: 1)]),
                    result: (ItemId: 200, Amount: 1),
                    tags: [],
                    flags: "UNLOCK_BY_DEFAULT | LOCKED_IN_DEMO",
                ),
            ],
        )"#,
    )
    .expect("write");

    let world = TemplateLoader::load(&path).expect("Failed to load templates");

    let recipe = world
        .registry
        .recipes()
        .get(&"canteen_craft".to_owned())
        .expect("recipe");
    assert_eq!(
        recipe.flags,
        RecipeFlags::UNLOCK_BY_DEFAULT | RecipeFlags::LOCKED_IN_DEMO
    );
    assert_eq!(recipe.cost.items, vec![ItemAmount::new(135, 1)]);
    assert!(world.registry.added_recipes().is_empty());
}
