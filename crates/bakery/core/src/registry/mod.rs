//! Registry Lifecycle Manager.
//!
//! Derived artifacts (crafting recipes, decompose formulas) go into shared
//! registries that third parties also write to. [`RegistryContext`] owns both
//! registries together with the provenance of every entry this engine added,
//! so teardown removes exactly those entries and nothing else.
//!
//! The context is injected into the pipeline and the host rather than living
//! in process-wide statics. Hosts that share it across threads wrap it in a
//! [`SharedRegistry`].

mod book;
mod entry;

pub use book::{Book, DecomposeBook, ProvenanceSet, RecipeBook};
pub use entry::{Cost, DecomposeFormula, ItemAmount, Keyed, Recipe, RecipeFlags};

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use crate::error::{BakeryError, ErrorSeverity};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("recipe id must not be empty")]
    EmptyRecipeId,

    #[error("decompose formula needs a positive item id, got {0}")]
    InvalidItemId(i32),

    #[error("registry lock poisoned")]
    Poisoned,
}

impl BakeryError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyRecipeId | Self::InvalidItemId(_) => ErrorSeverity::MalformedConfig,
            Self::Poisoned => ErrorSeverity::Registration,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyRecipeId => "REGISTRY_EMPTY_RECIPE_ID",
            Self::InvalidItemId(_) => "REGISTRY_INVALID_ITEM_ID",
            Self::Poisoned => "REGISTRY_POISONED",
        }
    }
}

/// Result of [`RegistryContext::add_decompose`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecomposeOutcome {
    Added,
    /// A formula for the item already existed; nothing changed.
    AlreadyPresent,
}

/// Entries removed by [`RegistryContext::remove_all_added`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub recipes: Vec<String>,
    pub decomposes: Vec<i32>,
}

impl TeardownReport {
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty() && self.decomposes.is_empty()
    }
}

/// Shared registries plus the provenance of what this engine added.
#[derive(Clone, Debug, Default)]
pub struct RegistryContext {
    recipes: RecipeBook,
    decomposes: DecomposeBook,
    added_recipes: ProvenanceSet<String>,
    added_decomposes: ProvenanceSet<i32>,
}

pub type SharedRegistry = Arc<Mutex<RegistryContext>>;

impl RegistryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context over registries that already hold third-party entries.
    pub fn with_books(recipes: RecipeBook, decomposes: DecomposeBook) -> Self {
        Self {
            recipes,
            decomposes,
            ..Self::default()
        }
    }

    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(Mutex::new(self))
    }

    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    pub fn decomposes(&self) -> &DecomposeBook {
        &self.decomposes
    }

    pub fn added_recipes(&self) -> &ProvenanceSet<String> {
        &self.added_recipes
    }

    pub fn added_decomposes(&self) -> &ProvenanceSet<i32> {
        &self.added_decomposes
    }

    /// Adds a recipe under `id`, or under the first free `id_1`, `id_2`, ...
    /// if `id` is taken in the registry or was added earlier by this engine.
    ///
    /// Returns the id actually stored.
    ///
    /// # Errors
    ///
    /// [`RegistryError::EmptyRecipeId`] if `id` is empty.
    pub fn add_recipe(
        &mut self,
        id: &str,
        cost: Cost,
        result: ItemAmount,
        tags: Vec<String>,
        flags: RecipeFlags,
    ) -> Result<String, RegistryError> {
        if id.is_empty() {
            return Err(RegistryError::EmptyRecipeId);
        }

        let final_id = self.free_recipe_id(id);
        if final_id != id {
            debug!(target: "bakery::registry", requested = id, stored = %final_id, "recipe id taken, suffixed");
        }

        self.recipes.push(Recipe {
            id: final_id.clone(),
            cost,
            result,
            tags,
            flags,
        });
        self.added_recipes.insert(final_id.clone());
        info!(target: "bakery::registry", id = %final_id, item = result.item_id, "added recipe");
        Ok(final_id)
    }

    fn free_recipe_id(&self, id: &str) -> String {
        let taken = |candidate: &String| {
            self.recipes.contains(candidate) || self.added_recipes.contains(candidate)
        };

        let mut candidate = id.to_owned();
        let mut suffix = 0_u32;
        while taken(&candidate) {
            suffix += 1;
            candidate = format!("{id}_{suffix}");
        }
        candidate
    }

    /// Adds a decompose formula for `item_id` unless one exists already.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidItemId`] if `item_id` is not positive.
    pub fn add_decompose(
        &mut self,
        item_id: i32,
        result: Cost,
        time: f32,
    ) -> Result<DecomposeOutcome, RegistryError> {
        if item_id <= 0 {
            return Err(RegistryError::InvalidItemId(item_id));
        }
        if self.decomposes.contains(&item_id) {
            info!(target: "bakery::registry", item_id, "decompose formula already present, skipped");
            return Ok(DecomposeOutcome::AlreadyPresent);
        }

        self.decomposes.push(DecomposeFormula {
            item_id,
            result,
            time,
        });
        self.added_decomposes.insert(item_id);
        info!(target: "bakery::registry", item_id, "added decompose formula");
        Ok(DecomposeOutcome::Added)
    }

    /// Removes every entry this engine added and clears the provenance sets.
    /// Calling it again is a no-op.
    pub fn remove_all_added(&mut self) -> TeardownReport {
        let mut report = TeardownReport::default();

        for id in self.added_recipes.drain() {
            if self.recipes.remove(&id).is_some() {
                report.recipes.push(id);
            }
        }
        for item_id in self.added_decomposes.drain() {
            if self.decomposes.remove(&item_id).is_some() {
                report.decomposes.push(item_id);
            }
        }
        self.recipes.invalidate();
        self.decomposes.invalidate();

        if !report.is_empty() {
            info!(
                target: "bakery::registry",
                recipes = report.recipes.len(),
                decomposes = report.decomposes.len(),
                "removed added registry entries"
            );
        }
        report
    }
}

/// Locks a shared registry.
///
/// # Errors
///
/// [`RegistryError::Poisoned`] if a previous holder panicked.
pub fn lock(registry: &SharedRegistry) -> Result<MutexGuard<'_, RegistryContext>, RegistryError> {
    registry.lock().map_err(|_| RegistryError::Poisoned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn third_party(id: &str) -> Recipe {
        Recipe {
            id: id.into(),
            cost: Cost::new(100, vec![]),
            result: ItemAmount::new(135, 1),
            tags: vec!["WorkBenchAdvanced".into()],
            flags: RecipeFlags::UNLOCK_BY_DEFAULT,
        }
    }

    fn add(ctx: &mut RegistryContext, id: &str) -> String {
        ctx.add_recipe(
            id,
            Cost::new(10, vec![ItemAmount::new(135, 2)]),
            ItemAmount::new(95001, 1),
            Vec::new(),
            RecipeFlags::UNLOCK_BY_DEFAULT,
        )
        .unwrap()
    }

    #[test]
    fn colliding_ids_are_suffixed() {
        let mut ctx = RegistryContext::with_books(
            [third_party("95001_craft")].into_iter().collect(),
            DecomposeBook::new(),
        );

        assert_eq!(add(&mut ctx, "95001_craft"), "95001_craft_1");
        assert_eq!(add(&mut ctx, "95001_craft"), "95001_craft_2");
        assert_eq!(add(&mut ctx, "fresh"), "fresh");
        assert_eq!(ctx.recipes().len(), 4);
    }

    #[test]
    fn decompose_first_writer_wins() {
        let mut ctx = RegistryContext::new();
        let result = Cost::new(0, vec![ItemAmount::new(1, 3)]);
        assert_eq!(ctx.add_decompose(95001, result.clone(), 2.0), Ok(DecomposeOutcome::Added));
        assert_eq!(
            ctx.add_decompose(95001, Cost::default(), 9.0),
            Ok(DecomposeOutcome::AlreadyPresent)
        );
        assert_eq!(ctx.decomposes().get(&95001).map(|f| f.time), Some(2.0));
        assert_eq!(ctx.add_decompose(0, result, 1.0), Err(RegistryError::InvalidItemId(0)));
    }

    #[test]
    fn teardown_removes_only_added_entries() {
        let mut ctx = RegistryContext::with_books(
            [third_party("shared")].into_iter().collect(),
            [DecomposeFormula { item_id: 135, result: Cost::default(), time: 1.0 }]
                .into_iter()
                .collect(),
        );
        add(&mut ctx, "shared");
        ctx.add_decompose(95001, Cost::default(), 1.0).unwrap();
        ctx.add_decompose(135, Cost::default(), 1.0).unwrap();

        let report = ctx.remove_all_added();
        assert!(!ctx.recipes().is_index_built());
        assert_eq!(report.recipes, vec!["shared_1".to_owned()]);
        assert_eq!(report.decomposes, vec![95001]);
        assert!(ctx.recipes().contains(&"shared".to_owned()));
        assert!(ctx.decomposes().contains(&135));

        assert!(ctx.remove_all_added().is_empty());
    }

    #[test]
    fn empty_recipe_id_is_rejected() {
        let mut ctx = RegistryContext::new();
        let error = ctx
            .add_recipe("", Cost::default(), ItemAmount::new(1, 1), vec![], RecipeFlags::empty())
            .unwrap_err();
        assert_eq!(error.severity(), ErrorSeverity::MalformedConfig);
    }

    #[test]
    fn shared_registry_locks() {
        let shared = RegistryContext::new().into_shared();
        add(&mut lock(&shared).unwrap(), "x");
        assert_eq!(lock(&shared).unwrap().added_recipes().len(), 1);
    }
}
