//! The Entity Registry: kind tag -> constructor, updater, and phase (§4.1).

use std::collections::HashMap;

use factory_core::prelude::*;

use crate::context::{CreateContext, TickContext};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The coarse scheduling bucket a kind runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Extractor,
    Belt,
    Smelter,
    Inserter,
    Unphased,
}

impl Phase {
    /// Lower ranks run first within a tick; ties break on insertion order.
    pub fn rank(self) -> u8 {
        match self {
            Phase::Extractor => 0,
            Phase::Belt => 1,
            Phase::Smelter => 2,
            Phase::Inserter => 3,
            Phase::Unphased => 4,
        }
    }
}

// ---------------------------------------------------------------------------
// EntityInit
// ---------------------------------------------------------------------------

/// The caller-supplied placement and per-kind parameters for `AddEntity`.
#[derive(Debug, Clone)]
pub struct EntityInit {
    pub pos: GridCoord,
    pub rot: Option<Direction>,
    /// Per-kind construction parameters (e.g. the extractor's configured
    /// resource, an assembler's recipe, a chest's starting inventory).
    pub params: serde_json::Value,
}

impl EntityInit {
    pub fn new(pos: GridCoord) -> Self {
        Self {
            pos,
            rot: None,
            params: serde_json::Value::Null,
        }
    }

    pub fn with_rot(mut self, rot: Direction) -> Self {
        self.rot = Some(rot);
        self
    }

    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }

    /// Build an [`EntityInit`] from the untyped `(x, y, rot)` a collaborator
    /// without Rust's type system at its boundary hands the core -- a
    /// recorded command plan or a hand-edited save file may carry a
    /// non-integer coordinate or an unrecognized direction string. `pos`'s
    /// in-bounds check still happens later in `WorldStore::add_entity`; this
    /// only rejects the two shapes that can't even be parsed into
    /// [`GridCoord`]/[`Direction`] (§7: `InvalidCoord`, `InvalidDirection`).
    pub fn from_raw(
        x: f64,
        y: f64,
        rot: Option<&str>,
        params: serde_json::Value,
    ) -> Result<Self, WorldError> {
        if x.fract() != 0.0 || y.fract() != 0.0 || !x.is_finite() || !y.is_finite() {
            return Err(WorldError::InvalidCoord { x, y });
        }
        let rot = match rot {
            None => None,
            Some(s) => Some(Direction::parse(s).ok_or_else(|| WorldError::InvalidDirection {
                value: s.to_string(),
            })?),
        };
        Ok(Self {
            pos: GridCoord::new(x as i32, y as i32),
            rot,
            params,
        })
    }
}

// ---------------------------------------------------------------------------
// KindDefinition
// ---------------------------------------------------------------------------

pub type CreateFn = fn(&EntityInit, &CreateContext<'_>) -> EntityState;
pub type UpdateFn = fn(&mut Entity, u64, &mut TickContext<'_>);
/// Runs once per tick, before any `Update`, so transient per-tick markers
/// (e.g. a belt's `received_this_tick` guard) reset independent of dispatch
/// order (§4.5).
pub type PreTickFn = fn(&mut Entity);

/// Everything the registry knows about one entity kind.
#[derive(Clone, Copy)]
pub struct KindDefinition {
    pub phase: Phase,
    pub create: Option<CreateFn>,
    pub update: Option<UpdateFn>,
    pub pre_tick: Option<PreTickFn>,
}

impl KindDefinition {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            create: None,
            update: None,
            pre_tick: None,
        }
    }

    pub fn with_create(mut self, f: CreateFn) -> Self {
        self.create = Some(f);
        self
    }

    pub fn with_update(mut self, f: UpdateFn) -> Self {
        self.update = Some(f);
        self
    }

    pub fn with_pre_tick(mut self, f: PreTickFn) -> Self {
        self.pre_tick = Some(f);
        self
    }
}

// ---------------------------------------------------------------------------
// EntityRegistry
// ---------------------------------------------------------------------------

/// Maps an [`EntityKind`] tag to its [`KindDefinition`].
///
/// An explicit, owned handle rather than a process-wide singleton (§9 Design
/// Notes), so more than one simulation can coexist in a process.
#[derive(Default)]
pub struct EntityRegistry {
    defs: HashMap<EntityKind, KindDefinition>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            defs: HashMap::new(),
        }
    }

    /// Register `kind`. Fails with [`WorldError::AlreadyRegistered`] on a
    /// duplicate registration.
    pub fn register(&mut self, kind: EntityKind, def: KindDefinition) -> Result<(), WorldError> {
        if self.defs.contains_key(&kind) {
            return Err(WorldError::AlreadyRegistered {
                kind: kind.to_string(),
            });
        }
        tracing::debug!(%kind, "registered entity kind");
        self.defs.insert(kind, def);
        Ok(())
    }

    pub fn get(&self, kind: EntityKind) -> Option<&KindDefinition> {
        self.defs.get(&kind)
    }

    pub fn is_registered(&self, kind: EntityKind) -> bool {
        self.defs.contains_key(&kind)
    }

    /// The phase rank for `kind`; unknown kinds sort last (§4.1).
    pub fn phase_rank(&self, kind: EntityKind) -> u8 {
        self.defs
            .get(&kind)
            .map(|d| d.phase.rank())
            .unwrap_or(Phase::Unphased.rank())
    }
}
