//! Inserter: every cadence, either picks one item up from behind itself or
//! drops the one it is holding ahead of itself (§4.7).
//!
//! An inserter never does both in the same activation -- it behaves like a
//! single-item arm that takes one full swing per cadence window.

use factory_core::prelude::*;
use factory_world::prelude::{CreateContext, TickContext};
use factory_world::registry::EntityInit;

pub const CADENCE: u64 = 20;

pub fn create(_init: &EntityInit, _ctx: &CreateContext<'_>) -> EntityState {
    EntityState::Inserter(InserterState::default())
}

pub fn update(entity: &mut Entity, _dt: u64, ctx: &mut TickContext<'_>) {
    let ready = match &mut entity.state {
        EntityState::Inserter(state) => {
            state.local_ticks += 1;
            state.local_ticks % CADENCE == 0
        }
        _ => return,
    };
    if !ready {
        return;
    }

    let holding = match &entity.state {
        EntityState::Inserter(state) => state.holding,
        _ => return,
    };

    if let Some(item) = holding {
        try_drop(entity, item, ctx);
    } else {
        try_pick_up(entity, ctx);
    }
}

fn try_pick_up(entity: &mut Entity, ctx: &mut TickContext<'_>) {
    let behind = entity.pos.step(entity.rot.opposite());
    let candidate_ids = ctx.live_ids_at(behind).to_vec();

    let mut taken: Option<ItemKind> = None;
    for id in candidate_ids {
        if let Some(source) = ctx.live_entity_mut(id) {
            taken = take_one(source);
            if taken.is_some() {
                break;
            }
        }
    }

    let EntityState::Inserter(state) = &mut entity.state else {
        return;
    };
    state.attempts += 1;
    match taken {
        Some(item) => {
            state.holding = Some(item);
            state.picked_up += 1;
        }
        None => state.blocked += 1,
    }
}

fn try_drop(entity: &mut Entity, item: ItemKind, ctx: &mut TickContext<'_>) {
    let ahead = entity.pos.step(entity.rot);
    let candidate_ids = ctx.live_ids_at(ahead).to_vec();

    let mut delivered = false;
    for id in candidate_ids {
        if let Some(target) = ctx.live_entity_mut(id) {
            if give_one(target, item) {
                delivered = true;
                break;
            }
        }
    }

    let EntityState::Inserter(state) = &mut entity.state else {
        return;
    };
    state.attempts += 1;
    if delivered {
        state.holding = None;
        state.dropped += 1;
    } else {
        state.blocked += 1;
    }
}

/// Remove and return one item from `source`'s single-slot holding state, if
/// it has one.
fn take_one(source: &mut Entity) -> Option<ItemKind> {
    match &mut source.state {
        EntityState::Extractor(state) => state.holding.take(),
        EntityState::Belt(state) => state.item.take(),
        EntityState::Assembler(state) => {
            if state.output_count > 0 {
                state.output_count -= 1;
                Some(state.recipe.output.0)
            } else {
                None
            }
        }
        EntityState::Chest(state) => {
            let kind = *state.inventory.keys().next()?;
            let withdrawn = state.withdraw(kind, 1);
            (withdrawn > 0).then_some(kind)
        }
        _ => None,
    }
}

/// Attempt to deposit one `item` into `target`. Returns whether it landed.
fn give_one(target: &mut Entity, item: ItemKind) -> bool {
    match &mut target.state {
        EntityState::Belt(state) => {
            if state.item.is_none() && !state.received_this_tick {
                state.item = Some(item);
                state.received_this_tick = true;
                true
            } else {
                false
            }
        }
        EntityState::Chest(state) => state.accept(item, 1) == 1,
        EntityState::Assembler(state) => {
            // While output is occupied, the smelter/assembler refuses new
            // input entirely, so the inserter's drop blocks too (§4.7, S3).
            if state.output_count == 0
                && state.recipe.inputs.iter().any(|(kind, _)| *kind == item)
            {
                *state.input_counts.entry(item).or_insert(0) += 1;
                true
            } else {
                false
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factory_world::snapshot::WorldSnapshot;
    use factory_world::spatial::SpatialIndex;
    use std::collections::HashMap;

    fn inserter(pos: GridCoord, rot: Direction, holding: Option<ItemKind>) -> Entity {
        Entity {
            id: EntityIdAllocator::new().alloc(),
            kind: EntityKind::Inserter,
            pos,
            rot,
            state: EntityState::Inserter(InserterState {
                holding,
                local_ticks: CADENCE - 1,
                ..Default::default()
            }),
        }
    }

    fn ready_ctx<'a>(
        snapshot: &'a WorldSnapshot,
        live: &'a mut HashMap<EntityId, Entity>,
        spatial: &'a SpatialIndex,
        map: &'a dyn ResourceMap,
    ) -> TickContext<'a> {
        TickContext::new(0, 8, 8, map, snapshot, live, spatial)
    }

    #[test]
    fn picks_up_from_an_extractor_behind_it() {
        let mut arm = inserter(GridCoord::new(1, 0), Direction::E, None);
        let extractor = Entity {
            id: EntityIdAllocator::new().alloc(),
            kind: EntityKind::Extractor,
            pos: GridCoord::new(0, 0),
            rot: Direction::N,
            state: EntityState::Extractor(ExtractorState {
                holding: Some(ItemKind::IronOre),
                ..Default::default()
            }),
        };
        let extractor_id = extractor.id;

        let snapshot = WorldSnapshot::default();
        let mut spatial = SpatialIndex::new();
        spatial.attach(extractor_id, extractor.pos);
        let mut live = HashMap::new();
        live.insert(extractor_id, extractor);

        let map = EmptyResourceMap {
            width: 8,
            height: 8,
        };
        let mut ctx = ready_ctx(&snapshot, &mut live, &spatial, &map);
        update(&mut arm, 16, &mut ctx);

        let EntityState::Inserter(state) = &arm.state else {
            panic!()
        };
        assert_eq!(state.holding, Some(ItemKind::IronOre));
        assert_eq!(state.picked_up, 1);

        let EntityState::Extractor(ext) = &live[&extractor_id].state else {
            panic!()
        };
        assert_eq!(ext.holding, None);
    }

    #[test]
    fn drops_into_a_chest_ahead_of_it() {
        let mut arm = inserter(GridCoord::new(0, 0), Direction::E, Some(ItemKind::Coal));
        let chest = Entity {
            id: EntityIdAllocator::new().alloc(),
            kind: EntityKind::Chest,
            pos: GridCoord::new(1, 0),
            rot: Direction::N,
            state: EntityState::Chest(ChestState::new(10)),
        };
        let chest_id = chest.id;

        let snapshot = WorldSnapshot::default();
        let mut spatial = SpatialIndex::new();
        spatial.attach(chest_id, chest.pos);
        let mut live = HashMap::new();
        live.insert(chest_id, chest);

        let map = EmptyResourceMap {
            width: 8,
            height: 8,
        };
        let mut ctx = ready_ctx(&snapshot, &mut live, &spatial, &map);
        update(&mut arm, 16, &mut ctx);

        let EntityState::Inserter(state) = &arm.state else {
            panic!()
        };
        assert_eq!(state.holding, None);
        assert_eq!(state.dropped, 1);

        let EntityState::Chest(chest_state) = &live[&chest_id].state else {
            panic!()
        };
        assert_eq!(chest_state.inventory.get(&ItemKind::Coal), Some(&1));
    }

    #[test]
    fn blocks_when_nothing_to_pick_up() {
        let mut arm = inserter(GridCoord::new(1, 0), Direction::E, None);
        let snapshot = WorldSnapshot::default();
        let spatial = SpatialIndex::new();
        let mut live = HashMap::new();
        let map = EmptyResourceMap {
            width: 8,
            height: 8,
        };
        let mut ctx = ready_ctx(&snapshot, &mut live, &spatial, &map);
        update(&mut arm, 16, &mut ctx);

        let EntityState::Inserter(state) = &arm.state else {
            panic!()
        };
        assert_eq!(state.blocked, 1);
        assert_eq!(state.holding, None);
    }

    #[test]
    fn blocks_drop_into_a_smelter_with_occupied_output() {
        let mut arm = inserter(GridCoord::new(0, 0), Direction::E, Some(ItemKind::IronOre));
        let mut smelter_state = AssemblerState::new(Recipe::smelter());
        smelter_state.output_count = 1;
        let smelter = Entity {
            id: EntityIdAllocator::new().alloc(),
            kind: EntityKind::Smelter,
            pos: GridCoord::new(1, 0),
            rot: Direction::N,
            state: EntityState::Assembler(smelter_state),
        };
        let smelter_id = smelter.id;

        let snapshot = WorldSnapshot::default();
        let mut spatial = SpatialIndex::new();
        spatial.attach(smelter_id, smelter.pos);
        let mut live = HashMap::new();
        live.insert(smelter_id, smelter);

        let map = EmptyResourceMap {
            width: 8,
            height: 8,
        };
        let mut ctx = ready_ctx(&snapshot, &mut live, &spatial, &map);
        update(&mut arm, 16, &mut ctx);

        let EntityState::Inserter(state) = &arm.state else {
            panic!()
        };
        assert_eq!(state.holding, Some(ItemKind::IronOre), "the drop must be blocked");
        assert_eq!(state.blocked, 1);
        assert_eq!(state.dropped, 0);

        let EntityState::Assembler(smelter_state) = &live[&smelter_id].state else {
            panic!()
        };
        assert_eq!(smelter_state.output_count, 1);
        assert!(smelter_state.input_counts.is_empty());
    }
}
