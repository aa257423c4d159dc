//! The closed set of item kinds carried by belts, inserters, and inventories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An item that can occupy a belt cell, an inserter's hand, or a chest slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    IronOre,
    IronPlate,
    IronGear,
    Coal,
    Wood,
}

impl ItemKind {
    pub const ALL: [ItemKind; 5] = [
        ItemKind::IronOre,
        ItemKind::IronPlate,
        ItemKind::IronGear,
        ItemKind::Coal,
        ItemKind::Wood,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::IronOre => "iron-ore",
            ItemKind::IronPlate => "iron-plate",
            ItemKind::IronGear => "iron-gear",
            ItemKind::Coal => "coal",
            ItemKind::Wood => "wood",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
