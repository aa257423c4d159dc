//! Extractor: harvests whatever the resource map says sits under its
//! footprint and pushes it onto the belt one tile ahead (§4.7).

use factory_core::prelude::*;
use factory_world::prelude::{CreateContext, TickContext};

pub const CADENCE: u64 = 60;

pub fn create(init: &factory_world::registry::EntityInit, ctx: &CreateContext<'_>) -> EntityState {
    let resource = if ctx.map.is_ore(init.pos) {
        Some(ItemKind::IronOre)
    } else if ctx.map.is_coal(init.pos) {
        Some(ItemKind::Coal)
    } else if ctx.map.is_tree(init.pos) {
        Some(ItemKind::Wood)
    } else {
        None
    };
    EntityState::Extractor(ExtractorState {
        resource,
        ..Default::default()
    })
}

/// Every [`CADENCE`] ticks: produce into the holding slot if empty, then try
/// to deposit onto the belt one tile ahead in `rot`. A deposit only succeeds
/// when that belt cell is empty both in the tick-start snapshot and in the
/// live view (no earlier entity this same tick already filled it); otherwise
/// the item is retained and the attempt counts as blocked.
pub fn update(entity: &mut Entity, _dt: u64, ctx: &mut TickContext<'_>) {
    let ready = match &mut entity.state {
        EntityState::Extractor(state) => {
            state.local_ticks += 1;
            state.local_ticks % CADENCE == 0
        }
        _ => return,
    };
    if !ready {
        return;
    }

    if let EntityState::Extractor(state) = &mut entity.state {
        if state.holding.is_none() {
            state.holding = state.resource;
        }
    }

    let Some(item) = (match &entity.state {
        EntityState::Extractor(state) => state.holding,
        _ => None,
    }) else {
        return;
    };

    if let EntityState::Extractor(state) = &mut entity.state {
        state.attempts += 1;
    }

    let target_pos = entity.pos.step(entity.rot);
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
                    if target_state.item.is_none() {
                        target_state.item = Some(item);
                        delivered = true;
                        break;
                    }
                }
            }
        }
    }

    if let EntityState::Extractor(state) = &mut entity.state {
        if delivered {
            state.holding = None;
            state.moved += 1;
        } else {
            state.blocked += 1;
        }
    }
}
