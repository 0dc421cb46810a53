//! Registry entry types: crafting recipes and decompose formulas.

use bitflags::bitflags;

/// An item id with a count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct ItemAmount {
    pub item_id: i32,
    pub amount: i32,
}

impl ItemAmount {
    pub const fn new(item_id: i32, amount: i32) -> Self {
        Self { item_id, amount }
    }
}

/// Currency plus a set of items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct Cost {
    pub money: i64,
    pub items: Vec<ItemAmount>,
}

impl Cost {
    pub fn new(money: i64, items: Vec<ItemAmount>) -> Self {
        Self { money, items }
    }

    pub fn is_empty(&self) -> bool {
        self.money == 0 && self.items.is_empty()
    }
}

bitflags! {
    /// Visibility flags of a crafting recipe.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct RecipeFlags: u8 {
        const UNLOCK_BY_DEFAULT = 1 << 0;
        const HIDE_IN_INDEX     = 1 << 1;
        const LOCKED_IN_DEMO    = 1 << 2;
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recipe {
    pub id: String,
    pub cost: Cost,
    pub result: ItemAmount,
    pub tags: Vec<String>,
    pub flags: RecipeFlags,
}

/// Breakdown of one item into resources. Keyed by item id.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecomposeFormula {
    pub item_id: i32,
    pub result: Cost,
    pub time: f32,
}

/// Entries addressable by a unique key.
pub trait Keyed {
    type Key: Ord + Clone + core::fmt::Debug;

    fn key(&self) -> &Self::Key;
}

impl Keyed for Recipe {
    type Key = String;

    fn key(&self) -> &String {
        &self.id
    }
}

impl Keyed for DecomposeFormula {
    type Key = i32;

    fn key(&self) -> &i32 {
        &self.item_id
    }
}
