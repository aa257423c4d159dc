//! Per-tick snapshot isolation (§4.3).
//!
//! Every `Update` call in a tick reads the same frozen view of the world as
//! it stood at the tick's start, regardless of what earlier updates in that
//! same tick have already mutated. The snapshot is a deep clone taken once
//! per tick; it is deliberately simple rather than copy-on-write, since the
//! entity count this simulation targets keeps a full clone cheap.

use std::collections::HashMap;

use factory_core::prelude::*;

use crate::spatial::SpatialIndex;

#[derive(Debug, Clone, Default)]
pub struct WorldSnapshot {
    entities: HashMap<EntityId, Entity>,
    spatial: SpatialIndex,
}

impl WorldSnapshot {
    pub fn capture<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> Self {
        let mut snapshot = WorldSnapshot::default();
        for entity in entities {
            snapshot.spatial.attach(entity.id, entity.pos);
            snapshot.entities.insert(entity.id, entity.clone());
        }
        snapshot
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entities_at(&self, pos: GridCoord) -> Vec<&Entity> {
        self.spatial
            .at(pos)
            .iter()
            .filter_map(|id| self.entities.get(id))
            .collect()
    }

    pub fn all(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
