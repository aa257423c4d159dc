//! Entity identity, kind tags, and opaque per-kind state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::{Direction, GridCoord};
use crate::state::EntityState;

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// A monotonically assigned entity identifier, rendered as a decimal string.
///
/// Unlike a generational ID, an `EntityId` is never recycled: once an id is
/// handed out it belongs to that entity (or to nothing, after removal) for
/// the lifetime of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    #[inline]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn to_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(EntityId)
    }
}

/// Issues strictly increasing [`EntityId`]s, starting at 1.
#[derive(Debug, Default)]
pub struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Restore the allocator so the next id continues after `high_watermark`.
    pub fn restore(&mut self, high_watermark: u64) {
        self.next = self.next.max(high_watermark + 1);
    }
}

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// The tag enumerated by the [`crate::registry::EntityRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Extractor,
    Belt,
    Inserter,
    Smelter,
    Chest,
    Assembler,
    PowerSource,
    Resource,
}

impl EntityKind {
    pub const BUILTIN: [EntityKind; 8] = [
        EntityKind::Extractor,
        EntityKind::Belt,
        EntityKind::Inserter,
        EntityKind::Smelter,
        EntityKind::Chest,
        EntityKind::Assembler,
        EntityKind::PowerSource,
        EntityKind::Resource,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Extractor => "extractor",
            EntityKind::Belt => "belt",
            EntityKind::Inserter => "inserter",
            EntityKind::Smelter => "smelter",
            EntityKind::Chest => "chest",
            EntityKind::Assembler => "assembler",
            EntityKind::PowerSource => "power-source",
            EntityKind::Resource => "resource",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A single grid-bound entity: its identity, placement, and opaque state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: GridCoord,
    pub rot: Direction,
    pub state: EntityState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_monotonically_and_never_repeat() {
        let mut alloc = EntityIdAllocator::new();
        let ids: Vec<_> = (0..5).map(|_| alloc.alloc()).collect();
        for pair in ids.windows(2) {
            assert!(pair[1].to_raw() > pair[0].to_raw());
        }
    }

    #[test]
    fn display_renders_decimal_string() {
        let mut alloc = EntityIdAllocator::new();
        let id = alloc.alloc();
        assert_eq!(id.to_string(), "1");
    }

    #[test]
    fn restore_continues_past_watermark() {
        let mut alloc = EntityIdAllocator::new();
        alloc.restore(41);
        let id = alloc.alloc();
        assert_eq!(id.to_raw(), 42);
    }

    #[test]
    fn from_str_parses_decimal() {
        let id: EntityId = "7".parse().unwrap();
        assert_eq!(id.to_raw(), 7);
    }
}
