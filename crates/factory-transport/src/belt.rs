//! Belt: pushes its held item one cell forward in `rot`, never pulls (§4.7).
//!
//! Transfers onto machines (extractors, smelters, chests) are exclusively
//! mediated by inserters; a belt only ever talks to the belt ahead of it.

use factory_core::prelude::*;
use factory_world::prelude::{CreateContext, TickContext};
use factory_world::registry::EntityInit;

pub const CADENCE: u64 = 15;

pub fn create(_init: &EntityInit, _ctx: &CreateContext<'_>) -> EntityState {
    EntityState::Belt(BeltState::default())
}

/// Clears the same-tick contention guard before any belt runs its own
/// `Update` this tick, independent of dispatch order within the phase.
pub fn pre_tick(entity: &mut Entity) {
    if let EntityState::Belt(state) = &mut entity.state {
        state.received_this_tick = false;
    }
}

/// A target cell only accepts a transfer if it was empty at the tick's
/// snapshot *and* is still empty and unclaimed in the live view -- so a
/// chain of belts that all activate on the same tick advances each item at
/// most one cell, never a cascading multi-cell hop (§4.5, §4.7).
pub fn update(entity: &mut Entity, _dt: u64, ctx: &mut TickContext<'_>) {
    let target_pos = entity.pos.step(entity.rot);

    let ready = match &mut entity.state {
        EntityState::Belt(state) => {
            state.local_ticks += 1;
            state.local_ticks % CADENCE == 0 && state.item.is_some()
        }
        _ => return,
    };
    if !ready {
        return;
    }

    let item = match &mut entity.state {
        EntityState::Belt(state) => {
            state.attempts += 1;
            state.item
        }
        _ => return,
    };
    let Some(item) = item else {
        return;
    };

    // The target must have been empty at the tick's start, not merely empty
    // right now -- otherwise a belt that forwards its own item earlier this
    // same tick could immediately accept this one too, letting an item hop
    // two cells in a single activation instead of one.
    let snapshot_clear = ctx
        .snapshot_entities_at(target_pos)
        .iter()
        .all(|e| !matches!(&e.state, EntityState::Belt(belt) if belt.item.is_some()));

    let mut delivered = false;
    if snapshot_clear {
        let target_ids = ctx.live_ids_at(target_pos).to_vec();
        for target_id in target_ids {
            if let Some(target) = ctx.live_entity_mut(target_id) {
                if let EntityState::Belt(target_state) = &mut target.state {
                    if target_state.item.is_none() && !target_state.received_this_tick {
                        target_state.item = Some(item);
                        target_state.received_this_tick = true;
                        delivered = true;
                        break;
                    }
                }
            }
        }
    }

    if let EntityState::Belt(state) = &mut entity.state {
        if delivered {
            state.item = None;
            state.moved += 1;
        } else {
            state.blocked += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factory_world::snapshot::WorldSnapshot;
    use factory_world::spatial::SpatialIndex;
    use std::collections::HashMap;

    fn belt(pos: GridCoord, rot: Direction, item: Option<ItemKind>) -> Entity {
        Entity {
            id: EntityIdAllocator::new().alloc(),
            kind: EntityKind::Belt,
            pos,
            rot,
            state: EntityState::Belt(BeltState {
                item,
                local_ticks: CADENCE - 1,
                ..Default::default()
            }),
        }
    }

    #[test]
    fn pushes_item_into_an_empty_downstream_belt() {
        let source = belt(GridCoord::new(0, 0), Direction::E, Some(ItemKind::IronOre));
        let target = belt(GridCoord::new(1, 0), Direction::E, None);
        let target_id = target.id;

        let snapshot = WorldSnapshot::capture([&source, &target]);
        let mut spatial = SpatialIndex::new();
        spatial.attach(target_id, target.pos);
        let mut live = HashMap::new();
        live.insert(target_id, target);

        let map = EmptyResourceMap {
            width: 8,
            height: 8,
        };
        let mut ctx = TickContext::new(0, 8, 8, &map, &snapshot, &mut live, &spatial);

        let mut source = source;
        update(&mut source, 16, &mut ctx);

        let EntityState::Belt(source_state) = &source.state else {
            panic!()
        };
        assert_eq!(source_state.item, None);
        assert_eq!(source_state.moved, 1);

        let EntityState::Belt(target_state) = &live[&target_id].state else {
            panic!()
        };
        assert_eq!(target_state.item, Some(ItemKind::IronOre));
        assert!(target_state.received_this_tick);
    }

    #[test]
    fn blocks_when_downstream_already_received_this_tick() {
        let mut source = belt(GridCoord::new(0, 0), Direction::E, Some(ItemKind::Coal));
        let mut target = belt(GridCoord::new(1, 0), Direction::E, None);
        let EntityState::Belt(target_state) = &mut target.state else {
            panic!()
        };
        target_state.received_this_tick = true;
        let target_id = target.id;

        let snapshot = WorldSnapshot::capture([&source, &target]);
        let mut spatial = SpatialIndex::new();
        spatial.attach(target_id, target.pos);
        let mut live = HashMap::new();
        live.insert(target_id, target);

        let map = EmptyResourceMap {
            width: 8,
            height: 8,
        };
        let mut ctx = TickContext::new(0, 8, 8, &map, &snapshot, &mut live, &spatial);
        update(&mut source, 16, &mut ctx);

        let EntityState::Belt(source_state) = &source.state else {
            panic!()
        };
        assert_eq!(source_state.item, Some(ItemKind::Coal));
        assert_eq!(source_state.blocked, 1);
    }

    /// A belt that had an item at the tick's snapshot but pushed it away
    /// earlier in this same tick must not turn around and accept a new item
    /// from upstream before the next tick -- only the snapshot state counts.
    #[test]
    fn a_belt_that_already_emptied_itself_this_tick_still_blocks_new_input() {
        let mut source = belt(GridCoord::new(0, 0), Direction::E, Some(ItemKind::IronOre));
        let mut target = belt(GridCoord::new(1, 0), Direction::E, Some(ItemKind::Coal));
        let target_id = target.id;

        // Snapshot is taken before `target` forwards its own item downstream.
        let snapshot = WorldSnapshot::capture([&source, &target]);

        // `target` already emptied out earlier in dispatch order this tick.
        let EntityState::Belt(target_state) = &mut target.state else {
            panic!()
        };
        target_state.item = None;

        let mut spatial = SpatialIndex::new();
        spatial.attach(target_id, target.pos);
        let mut live = HashMap::new();
        live.insert(target_id, target);

        let map = EmptyResourceMap {
            width: 8,
            height: 8,
        };
        let mut ctx = TickContext::new(0, 8, 8, &map, &snapshot, &mut live, &spatial);
        update(&mut source, 16, &mut ctx);

        let EntityState::Belt(source_state) = &source.state else {
            panic!()
        };
        assert_eq!(source_state.item, Some(ItemKind::IronOre));
        assert_eq!(source_state.blocked, 1);

        let EntityState::Belt(target_state) = &live[&target_id].state else {
            panic!()
        };
        assert_eq!(target_state.item, None);
    }

    #[test]
    fn pre_tick_resets_the_guard() {
        let mut entity = belt(GridCoord::new(0, 0), Direction::N, None);
        let EntityState::Belt(state) = &mut entity.state else {
            panic!()
        };
        state.received_this_tick = true;
        pre_tick(&mut entity);
        let EntityState::Belt(state) = &entity.state else {
            panic!()
        };
        assert!(!state.received_this_tick);
    }
}
