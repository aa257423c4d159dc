//! Snapshot persistence: serialize a world to a self-verifying record and
//! load it back (§6.3).
//!
//! The payload is hashed with `blake3` before it is written, and the hash is
//! checked before any byte of it reaches a live [`WorldStore`] -- a corrupt
//! or hand-edited save file is rejected outright rather than partially
//! applied.

use serde::{Deserialize, Serialize};

use factory_core::prelude::*;

use crate::store::WorldStore;

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Payload {
    version: u32,
    width: u32,
    height: u32,
    seed: u64,
    tick: u64,
    elapsed_ms: u64,
    paused: bool,
    next_id: u64,
    entities: Vec<Entity>,
}

/// An on-disk world snapshot: the payload plus a content hash of it.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedState {
    payload: Payload,
    hash: String,
}

fn hash_payload(payload: &Payload) -> Result<String, WorldError> {
    let bytes = serde_json::to_vec(payload).map_err(|e| WorldError::InvariantViolation {
        detail: format!("failed to serialize snapshot payload: {e}"),
    })?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

/// Capture `world` into a hashed, serializable record.
pub fn save_snapshot(world: &WorldStore) -> Result<PersistedState, WorldError> {
    let mut entities: Vec<Entity> = world.entities.values().cloned().collect();
    entities.sort_by_key(|e| e.id.to_raw());

    let next_id = entities.iter().map(|e| e.id.to_raw()).max().unwrap_or(0);

    let payload = Payload {
        version: FORMAT_VERSION,
        width: world.width,
        height: world.height,
        seed: world.seed,
        tick: world.tick,
        elapsed_ms: world.elapsed_ms,
        paused: world.is_paused(),
        next_id,
        entities,
    };
    let hash = hash_payload(&payload)?;
    tracing::info!(tick = payload.tick, entities = payload.entities.len(), "snapshot saved");
    Ok(PersistedState { payload, hash })
}

/// Validate `state`'s hash and replay it onto a fresh [`WorldStore`].
///
/// Rejects a version mismatch, a hash mismatch, or any entity positioned
/// outside the snapshot's own `[0, width) x [0, height)` before constructing
/// anything, so a tampered or truncated save can never partially load.
pub fn load_snapshot(
    state: &PersistedState,
    map: Box<dyn ResourceMap>,
) -> Result<WorldStore, WorldError> {
    if state.payload.version != FORMAT_VERSION {
        return Err(WorldError::InvariantViolation {
            detail: format!(
                "snapshot format version {} is not supported (expected {})",
                state.payload.version, FORMAT_VERSION
            ),
        });
    }

    let recomputed = hash_payload(&state.payload)?;
    if recomputed != state.hash {
        return Err(WorldError::InvariantViolation {
            detail: "snapshot hash mismatch; refusing to load a corrupted save".to_string(),
        });
    }

    // Kind and direction are closed enums, so deserialization alone already
    // rejects anything but a canonical value; position is a bare (x, y) pair
    // and needs an explicit bounds check against the snapshot's own
    // width/height before any of it reaches a live store.
    for entity in &state.payload.entities {
        if !entity.pos.in_bounds(state.payload.width, state.payload.height) {
            return Err(WorldError::OutOfBounds {
                pos: entity.pos,
                width: state.payload.width,
                height: state.payload.height,
            });
        }
    }

    let mut world = WorldStore::new(state.payload.width, state.payload.height, map)
        .with_seed(state.payload.seed);
    world.tick = state.payload.tick;
    world.elapsed_ms = state.payload.elapsed_ms;
    if state.payload.paused {
        world.pause();
    }
    world.restore_allocator(state.payload.next_id);

    for (order, entity) in state.payload.entities.iter().enumerate() {
        world.spatial.attach(entity.id, entity.pos);
        world.entities.insert(entity.id, entity.clone());
        world.insertion_order.insert(entity.id, order as u64);
    }
    world.next_order = state.payload.entities.len() as u64;

    tracing::info!(
        tick = world.tick,
        entities = world.entities.len(),
        "snapshot loaded"
    );
    Ok(world)
}
