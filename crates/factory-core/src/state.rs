//! Per-kind entity state.
//!
//! The engine treats an entity's state as opaque (§3, §9 Design Notes); this
//! crate resolves that to a closed tagged union rather than a downcast box,
//! since the full set of built-in kinds is known statically and a `match`
//! over an enum costs nothing extra at runtime. Behavior over these states
//! lives in `factory-transport`, which depends on this crate but not the
//! reverse.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::item::ItemKind;

/// A recipe an assembler (or its smelter specialization) crafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub inputs: Vec<(ItemKind, u32)>,
    pub output: (ItemKind, u32),
    pub cadence: u32,
}

impl Recipe {
    /// The smelter's one built-in specialization: one `iron-ore` in,
    /// one `iron-plate` out, 180-tick cadence.
    pub fn smelter() -> Self {
        Self {
            inputs: vec![(ItemKind::IronOre, 1)],
            output: (ItemKind::IronPlate, 1),
            cadence: 180,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorState {
    pub resource: Option<ItemKind>,
    pub holding: Option<ItemKind>,
    pub local_ticks: u64,
    pub attempts: u64,
    pub moved: u64,
    pub blocked: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeltState {
    pub item: Option<ItemKind>,
    pub local_ticks: u64,
    pub attempts: u64,
    pub moved: u64,
    pub blocked: u64,
    /// Set for exactly one tick when this cell receives an item, so a second
    /// sender in the same tick sees the cell as already spoken for.
    pub received_this_tick: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InserterState {
    pub holding: Option<ItemKind>,
    pub local_ticks: u64,
    pub attempts: u64,
    pub picked_up: u64,
    pub dropped: u64,
    pub blocked: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblerState {
    pub recipe: Recipe,
    pub input_counts: BTreeMap<ItemKind, u32>,
    pub output_count: u32,
    pub crafting: bool,
    pub progress: u32,
    pub completed: u64,
    pub local_ticks: u64,
    /// Output slot capacity; crafting refuses to start a batch that would
    /// push `output_count` past this.
    pub output_cap: u32,
}

impl AssemblerState {
    pub fn new(recipe: Recipe) -> Self {
        Self {
            recipe,
            input_counts: BTreeMap::new(),
            output_count: 0,
            crafting: false,
            progress: 0,
            completed: 0,
            local_ticks: 0,
            output_cap: 50,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChestState {
    pub inventory: BTreeMap<ItemKind, u32>,
    pub capacity: u32,
}

impl ChestState {
    pub fn new(capacity: u32) -> Self {
        Self {
            inventory: BTreeMap::new(),
            capacity,
        }
    }

    pub fn total_items(&self) -> u32 {
        self.inventory.values().sum()
    }

    /// Add up to `n` of `kind`, bounded by remaining capacity. Returns the
    /// number actually accepted.
    pub fn accept(&mut self, kind: ItemKind, n: u32) -> u32 {
        let room = self.capacity.saturating_sub(self.total_items());
        let accepted = n.min(room);
        if accepted > 0 {
            *self.inventory.entry(kind).or_insert(0) += accepted;
        }
        accepted
    }

    /// Remove up to `n` of `kind` that are present. Returns the number
    /// actually withdrawn.
    pub fn withdraw(&mut self, kind: ItemKind, n: u32) -> u32 {
        match self.inventory.get_mut(&kind) {
            Some(count) => {
                let withdrawn = n.min(*count);
                *count -= withdrawn;
                if *count == 0 {
                    self.inventory.remove(&kind);
                }
                withdrawn
            }
            None => 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerSourceState {
    pub supply: u32,
}

/// The opaque per-entity state, tagged by the kind that created it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntityState {
    Extractor(ExtractorState),
    Belt(BeltState),
    Inserter(InserterState),
    Assembler(AssemblerState),
    Chest(ChestState),
    PowerSource(PowerSourceState),
    /// Resource deposits and any other unphased kind with no mutable state.
    None,
}
