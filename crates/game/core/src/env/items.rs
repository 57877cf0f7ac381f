//! Item definitions and oracle interface.

use serde::{Deserialize, Serialize};

pub trait ItemOracle: Send + Sync {
    fn definition(&self, id: u32) -> Option<ItemDefinition>;
}

/// Master-data record for an item that can be found or dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: u32,
    pub name: String,
    /// Shop price; drives trap difficulty of chests containing the item.
    pub base_price: i64,
    #[serde(default)]
    pub rarity: ItemRarity,
}

impl ItemDefinition {
    pub fn is_super_rare(&self) -> bool {
        self.rarity == ItemRarity::SuperRare
    }
}

/// Drop category. Super-rare drops are gated by the daily limit.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemRarity {
    #[default]
    Common,
    SuperRare,
}
