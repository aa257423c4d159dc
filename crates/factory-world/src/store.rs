//! The World Store: authoritative entity storage, placement validation, and
//! pause state (§4.1, §4.4).

use std::collections::HashMap;

use factory_core::prelude::*;

use crate::registry::{EntityInit, EntityRegistry};
use crate::spatial::SpatialIndex;

/// The seed used when a caller doesn't supply one, so headless runs stay
/// reproducible by default (§6.1).
pub const DEFAULT_SEED: u64 = 0x5EED_F4C7_0012_2024;

/// Owns every entity, the spatial index, and the id allocator. `WorldStore`
/// never schedules ticks itself -- that is [`crate::scheduler`]'s job -- it
/// only guarantees that whatever entities exist are consistently indexed.
pub struct WorldStore {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) map: Box<dyn ResourceMap>,
    pub(crate) entities: HashMap<EntityId, Entity>,
    pub(crate) spatial: SpatialIndex,
    alloc: EntityIdAllocator,
    pub(crate) insertion_order: HashMap<EntityId, u64>,
    pub(crate) next_order: u64,
    pub(crate) tick: u64,
    pub(crate) elapsed_ms: u64,
    paused: bool,
    pub(crate) seed: u64,
}

impl WorldStore {
    pub fn new(width: u32, height: u32, map: Box<dyn ResourceMap>) -> Self {
        tracing::info!(width, height, "world store constructed");
        Self {
            width,
            height,
            map,
            entities: HashMap::new(),
            spatial: SpatialIndex::new(),
            alloc: EntityIdAllocator::new(),
            insertion_order: HashMap::new(),
            next_order: 0,
            tick: 0,
            elapsed_ms: 0,
            paused: false,
            seed: DEFAULT_SEED,
        }
    }

    /// Override the seed passed to kind `Create` functions via
    /// [`crate::context::CreateContext::rng`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn map(&self) -> &dyn ResourceMap {
        self.map.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Validate placement, invoke the kind's `Create` function, and insert
    /// the resulting entity. Rejects unknown kinds and out-of-bounds
    /// placements (§4.4) before touching any state.
    pub fn add_entity(
        &mut self,
        kind: EntityKind,
        init: EntityInit,
        registry: &EntityRegistry,
    ) -> Result<EntityId, WorldError> {
        let def = registry
            .get(kind)
            .ok_or_else(|| WorldError::UnknownKind {
                kind: kind.to_string(),
            })?;

        if !init.pos.in_bounds(self.width, self.height) {
            return Err(WorldError::OutOfBounds {
                pos: init.pos,
                width: self.width,
                height: self.height,
            });
        }

        let state = match def.create {
            Some(create) => {
                let ctx = crate::context::CreateContext {
                    width: self.width,
                    height: self.height,
                    seed: self.seed,
                    map: self.map.as_ref(),
                };
                create(&init, &ctx)
            }
            None => EntityState::None,
        };

        let id = self.alloc.alloc();
        let entity = Entity {
            id,
            kind,
            pos: init.pos,
            rot: init.rot.unwrap_or_default(),
            state,
        };

        self.spatial.attach(id, entity.pos);
        self.insertion_order.insert(id, self.next_order);
        self.next_order += 1;
        self.entities.insert(id, entity);

        tracing::debug!(%id, %kind, pos = %init.pos, "entity added");
        Ok(id)
    }

    /// `RemoveEntity(id)` (§4.3): returns `true` if an entity was removed,
    /// `false` if `id` was already absent. Never errors -- an unknown id is
    /// not an invalid input, just a no-op.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        if self.entities.remove(&id).is_none() {
            return false;
        }
        self.spatial.detach(id);
        self.insertion_order.remove(&id);
        tracing::debug!(%id, "entity removed");
        true
    }

    pub fn get_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_entities_at(&self, pos: GridCoord) -> Vec<&Entity> {
        self.spatial
            .at(pos)
            .iter()
            .filter_map(|id| self.entities.get(id))
            .collect()
    }

    pub fn get_all_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub(crate) fn insertion_order_of(&self, id: EntityId) -> u64 {
        self.insertion_order.get(&id).copied().unwrap_or(u64::MAX)
    }

    /// Restore the id allocator past a watermark, for loading a persisted
    /// world whose entities already carry ids.
    pub(crate) fn restore_allocator(&mut self, high_watermark: u64) {
        self.alloc.restore(high_watermark);
    }
}
