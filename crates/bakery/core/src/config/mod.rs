//! Entity configs: one derived item per config.
//!
//! Field names serialize in PascalCase so config files written for the
//! original mod load unchanged. Every block defaults to its inert state.

mod blocks;

pub use blocks::{
    AmmoBlock, BuffBlock, ConsumableBlock, DecomposeBlock, DurabilityBlock, HealingBlock,
    MeleeBlock, RecipeBlock, RewardPoolBlock, SlotBlock, UseTimeBlock, WeaponBlock,
};

use std::collections::BTreeMap;

use crate::error::{BakeryError, ErrorSeverity};
use crate::item::DisplayQuality;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("new item id must be positive, got {0}")]
    InvalidNewId(i32),

    #[error("original item id must be positive, got {0}")]
    InvalidOriginalId(i32),

    #[error("config for item {0} has no display names")]
    MissingDisplayNames(i32),
}

impl BakeryError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::MalformedConfig
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidNewId(_) => "CONFIG_INVALID_NEW_ID",
            Self::InvalidOriginalId(_) => "CONFIG_INVALID_ORIGINAL_ID",
            Self::MissingDisplayNames(_) => "CONFIG_MISSING_DISPLAY_NAMES",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct EntityConfig {
    pub original_item_id: i32,
    pub new_item_id: i32,
    pub localization_key: String,
    /// Language key → display name.
    pub display_names: BTreeMap<String, String>,
    /// Language key → description.
    pub localization_desc_values: BTreeMap<String, String>,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub weight: Option<f32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub value: Option<i32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub quality: Option<i32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub display_quality: Option<DisplayQuality>,
    pub tags: Vec<String>,
    /// Icon asset name; icons are handled by the host.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub icon_file_name: Option<String>,

    // Flat consumable fields of the first config format.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub energy_value: Option<f32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub water_value: Option<f32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub use_durability: Option<f32>,

    pub consumable: ConsumableBlock,
    pub durability: DurabilityBlock,
    pub healing: HealingBlock,
    pub use_time: UseTimeBlock,
    pub slots: SlotBlock,
    /// Modifier key → value. New keys are appended in key order, not file
    /// order; existing keys are updated in place either way.
    pub modifiers: BTreeMap<String, f32>,
    pub weapon: WeaponBlock,
    pub ammo: AmmoBlock,
    pub melee: MeleeBlock,
    pub buffs: BuffBlock,
    pub reward_pool: RewardPoolBlock,
    pub recipes: Vec<RecipeBlock>,
    pub decompose: DecomposeBlock,
}

impl EntityConfig {
    pub fn new(original_item_id: i32, new_item_id: i32, localization_key: impl Into<String>) -> Self {
        Self {
            original_item_id,
            new_item_id,
            localization_key: localization_key.into(),
            ..Self::default()
        }
    }

    /// Description key derived from the localization key.
    pub fn localization_desc_key(&self) -> String {
        format!("{}_Desc", self.localization_key)
    }

    /// Consumable block with the flat fields folded in. A flat field wins
    /// only when it is positive; first-format files always write all three,
    /// zero meaning unset.
    pub fn consumable_block(&self) -> ConsumableBlock {
        fn flat(value: Option<f32>, block: f32) -> f32 {
            value.filter(|value| *value > 0.0).unwrap_or(block)
        }

        ConsumableBlock {
            energy_value: flat(self.energy_value, self.consumable.energy_value),
            water_value: flat(self.water_value, self.consumable.water_value),
            use_durability: flat(self.use_durability, self.consumable.use_durability),
        }
    }

    /// Checks the identifiers the pipeline depends on.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] naming the first invalid id.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.new_item_id <= 0 {
            return Err(ConfigError::InvalidNewId(self.new_item_id));
        }
        if self.original_item_id <= 0 {
            return Err(ConfigError::InvalidOriginalId(self.original_item_id));
        }
        Ok(())
    }

    /// [`EntityConfig::validate`] plus the loader's requirement of at least
    /// one display name.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] describing the first problem.
    pub fn validate_intake(&self) -> Result<(), ConfigError> {
        if self.display_names.is_empty() {
            return Err(ConfigError::MissingDisplayNames(self.new_item_id));
        }
        self.validate()
    }
}
