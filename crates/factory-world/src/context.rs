//! The two collaborator contexts handed to `Create` and `Update` (§4.1, §4.5).

use std::collections::HashMap;

use rand::SeedableRng;

use factory_core::prelude::*;

use crate::spatial::SpatialIndex;
use crate::snapshot::WorldSnapshot;

/// What a kind's `Create` function sees: the world's static dimensions, its
/// external resource-map collaborator, and the world's configured seed, so
/// e.g. an extractor can read the resource under its own footprint at
/// construction time and a kind with randomized construction can derive a
/// deterministic RNG from [`CreateContext::rng`] (§6.1).
pub struct CreateContext<'a> {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub map: &'a dyn ResourceMap,
}

impl<'a> CreateContext<'a> {
    /// A PCG RNG seeded from the world's configured seed. None of the
    /// built-in kinds consume randomness today, but construction-time
    /// variance (e.g. a non-uniform starting inventory) is reproducible
    /// through this rather than through an ambient global RNG.
    pub fn rng(&self) -> rand_pcg::Pcg64 {
        rand_pcg::Pcg64::seed_from_u64(self.seed)
    }
}

/// What a kind's `Update` function sees during a tick (§4.5).
///
/// `snapshot` is frozen for the whole tick. `live` is the in-progress world:
/// every entity except the one currently being updated (the scheduler holds
/// that one out as `&mut Entity` so it can never alias a `live` lookup).
pub struct TickContext<'a> {
    pub tick: u64,
    pub width: u32,
    pub height: u32,
    pub map: &'a dyn ResourceMap,
    snapshot: &'a WorldSnapshot,
    live_entities: &'a mut HashMap<EntityId, Entity>,
    live_spatial: &'a SpatialIndex,
}

impl<'a> TickContext<'a> {
    pub fn new(
        tick: u64,
        width: u32,
        height: u32,
        map: &'a dyn ResourceMap,
        snapshot: &'a WorldSnapshot,
        live_entities: &'a mut HashMap<EntityId, Entity>,
        live_spatial: &'a SpatialIndex,
    ) -> Self {
        Self {
            tick,
            width,
            height,
            map,
            snapshot,
            live_entities,
            live_spatial,
        }
    }

    // -- frozen snapshot queries --------------------------------------

    pub fn snapshot_entity(&self, id: EntityId) -> Option<&Entity> {
        self.snapshot.entity(id)
    }

    pub fn snapshot_entities_at(&self, pos: GridCoord) -> Vec<&Entity> {
        self.snapshot.entities_at(pos)
    }

    pub fn snapshot_all(&self) -> impl Iterator<Item = &Entity> {
        self.snapshot.all()
    }

    // -- in-progress live queries --------------------------------------

    /// Ids currently occupying `pos`, excluding whichever entity the
    /// scheduler is mid-update for (it has been pulled out of the live map).
    pub fn live_ids_at(&self, pos: GridCoord) -> &[EntityId] {
        self.live_spatial.at(pos)
    }

    pub fn live_entity(&self, id: EntityId) -> Option<&Entity> {
        self.live_entities.get(&id)
    }

    pub fn live_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.live_entities.get_mut(&id)
    }

    pub fn live_entities_at_mut(&mut self, pos: GridCoord) -> Vec<&mut Entity> {
        let ids = self.live_spatial.at(pos).to_vec();
        self.live_entities
            .iter_mut()
            .filter(|(id, _)| ids.contains(id))
            .map(|(_, e)| e)
            .collect()
    }
}
