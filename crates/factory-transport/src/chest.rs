//! Chest: a passive, unphased inventory host (§4.7.1).
//!
//! A chest never acts on its own tick; it only changes through inserters
//! (or any other collaborator) calling [`ChestState::accept`]/
//! [`ChestState::withdraw`] against it.

use serde::Deserialize;

use factory_core::prelude::*;
use factory_world::prelude::CreateContext;
use factory_world::registry::EntityInit;

const DEFAULT_CAPACITY: u32 = 100;

#[derive(Debug, Default, Deserialize)]
struct ChestParams {
    capacity: Option<u32>,
    #[serde(default)]
    inventory: Vec<(ItemKind, u32)>,
}

pub fn create(init: &EntityInit, _ctx: &CreateContext<'_>) -> EntityState {
    let params: ChestParams = serde_json::from_value(init.params.clone()).unwrap_or_default();
    let mut state = ChestState::new(params.capacity.unwrap_or(DEFAULT_CAPACITY));
    for (kind, n) in params.inventory {
        state.accept(kind, n);
    }
    EntityState::Chest(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_applies_with_no_params() {
        let map = EmptyResourceMap {
            width: 8,
            height: 8,
        };
        let create_ctx = CreateContext {
            width: 8,
            height: 8,
            seed: 0,
            map: &map,
        };
        let init = EntityInit::new(GridCoord::new(0, 0));
        let state = create(&init, &create_ctx);
        let EntityState::Chest(chest) = &state else {
            panic!()
        };
        assert_eq!(chest.capacity, DEFAULT_CAPACITY);
        assert_eq!(chest.total_items(), 0);
    }

    #[test]
    fn explicit_capacity_and_starting_inventory_are_applied() {
        let map = EmptyResourceMap {
            width: 8,
            height: 8,
        };
        let create_ctx = CreateContext {
            width: 8,
            height: 8,
            seed: 0,
            map: &map,
        };
        let init = EntityInit::new(GridCoord::new(0, 0)).with_params(serde_json::json!({
            "capacity": 20,
            "inventory": [["iron-plate", 5]],
        }));
        let state = create(&init, &create_ctx);
        let EntityState::Chest(chest) = &state else {
            panic!()
        };
        assert_eq!(chest.capacity, 20);
        assert_eq!(chest.inventory.get(&ItemKind::IronPlate), Some(&5));
    }
}
