//! Factory Sim -- the facade a collaborator (renderer, input, persistence,
//! plan interpreter, tutorial, HUD) actually calls: `CreateWorld`, entity
//! placement, the fixed-step driver, and the read-only telemetry surface
//! (§6).
//!
//! Nothing in here implements simulation behavior; it wires
//! `factory-world`'s store/scheduler/driver to `factory-transport`'s
//! built-in kinds and exposes exactly the surface §6 names.

#![deny(unsafe_code)]

use factory_core::prelude::*;
use factory_world::prelude::*;

pub use factory_core::error::WorldError;
pub use factory_world::registry::EntityInit;

/// Builder for [`World::create`], mirroring the teacher's `TickConfig`
/// pattern: plain public fields, a `validate`, and sensible defaults so a
/// test can construct one with almost nothing filled in (§6.1).
#[derive(Debug)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub map: Option<Box<dyn ResourceMap>>,
}

impl WorldConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            seed: factory_world::store::DEFAULT_SEED,
            map: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_map(mut self, map: Box<dyn ResourceMap>) -> Self {
        self.map = Some(map);
        self
    }

    /// Rejects a non-positive width or height before any entity storage is
    /// allocated.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.width == 0 || self.height == 0 {
            return Err(WorldError::InvariantViolation {
                detail: format!(
                    "world dimensions must be positive, got {}x{}",
                    self.width, self.height
                ),
            });
        }
        Ok(())
    }
}

/// A read-only projection of the world's current state, for a renderer or
/// HUD that doesn't want to clone every entity on every frame (§6).
#[derive(Debug, Clone)]
pub struct PlacementSnapshot {
    pub tick: u64,
    pub tick_count: u64,
    pub elapsed_ms: u64,
    pub entity_count: usize,
    pub paused: bool,
    pub entities: Vec<Entity>,
}

/// The facade: owns the store, the registry, and the fixed-step driver, and
/// exposes exactly the surface named in §6.
pub struct World {
    store: WorldStore,
    registry: EntityRegistry,
    driver: FixedStepDriver,
    supply_demand: SupplyDemand,
}

impl World {
    /// `CreateWorld` (§6): validates `config`, builds an empty map if none
    /// was supplied, and registers the seven built-in kinds.
    pub fn create(config: WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;
        let map = config.map.unwrap_or_else(|| {
            Box::new(EmptyResourceMap {
                width: config.width,
                height: config.height,
            })
        });
        let store = WorldStore::new(config.width, config.height, map).with_seed(config.seed);

        let mut registry = EntityRegistry::new();
        factory_transport::register_builtin_kinds(&mut registry)?;

        Ok(Self {
            store,
            registry,
            driver: FixedStepDriver::new(),
            supply_demand: SupplyDemand::default(),
        })
    }

    /// A world with a custom kind set rather than the seven built-ins, for
    /// an embedder that wants its own registry (§6.1).
    pub fn create_with_registry(
        config: WorldConfig,
        registry: EntityRegistry,
    ) -> Result<Self, WorldError> {
        config.validate()?;
        let map = config.map.unwrap_or_else(|| {
            Box::new(EmptyResourceMap {
                width: config.width,
                height: config.height,
            })
        });
        let store = WorldStore::new(config.width, config.height, map).with_seed(config.seed);
        Ok(Self {
            store,
            registry,
            driver: FixedStepDriver::new(),
            supply_demand: SupplyDemand::default(),
        })
    }

    pub fn add_entity(&mut self, kind: EntityKind, init: EntityInit) -> Result<EntityId, WorldError> {
        self.store.add_entity(kind, init, &self.registry)
    }

    /// `RemoveEntity(id)` (§6): `true` if removed, `false` if `id` was
    /// already absent.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        self.store.remove_entity(id)
    }

    pub fn get_entity(&self, id: EntityId) -> Option<&Entity> {
        self.store.get_entity(id)
    }

    pub fn get_entities_at(&self, pos: GridCoord) -> Vec<&Entity> {
        self.store.get_entities_at(pos)
    }

    pub fn get_all_entities(&self) -> impl Iterator<Item = &Entity> {
        self.store.get_all_entities()
    }

    pub fn get_map(&self) -> &dyn ResourceMap {
        self.store.map()
    }

    pub fn pause(&mut self) {
        self.store.pause();
    }

    pub fn resume(&mut self) {
        self.store.resume();
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.store.toggle_pause()
    }

    pub fn is_paused(&self) -> bool {
        self.store.is_paused()
    }

    /// `Step(dt_ms)` (§6): runs every whole tick that `dt_ms` accrues.
    pub fn step(&mut self, dt_ms: f64) -> Result<(), WorldError> {
        let results = self.driver.step(dt_ms, &mut self.store, &self.registry)?;
        if let Some(&last) = results.last() {
            self.supply_demand = last;
        }
        Ok(())
    }

    /// `Tick()` (§6): forces exactly one tick regardless of the driver's
    /// accumulator, for tools and tests that want deterministic manual
    /// stepping rather than wall-clock pacing.
    pub fn tick(&mut self) {
        self.supply_demand = factory_world::scheduler::run_tick(&mut self.store, &self.registry);
    }

    pub fn tick_count(&self) -> u64 {
        self.store.tick_count()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.store.elapsed_ms()
    }

    /// `GetSupplyDemand()` (§6): the power aggregate as of the most
    /// recently completed tick; zero by default before any tick has run.
    pub fn get_supply_demand(&self) -> SupplyDemand {
        self.supply_demand
    }

    /// `GetPlacementSnapshot()` (§6).
    pub fn get_placement_snapshot(&self) -> PlacementSnapshot {
        let entities: Vec<Entity> = self.store.get_all_entities().cloned().collect();
        PlacementSnapshot {
            tick: self.store.tick_count(),
            tick_count: self.store.tick_count(),
            elapsed_ms: self.store.elapsed_ms(),
            entity_count: entities.len(),
            paused: self.store.is_paused(),
            entities,
        }
    }

    pub fn save_snapshot(&self) -> Result<PersistedState, WorldError> {
        factory_world::persist::save_snapshot(&self.store)
    }

    /// Loads `state` onto a fresh store and rebuilds the built-in registry.
    /// `map` re-supplies the external resource-map collaborator, which the
    /// persisted record never owns (§6.3).
    pub fn load_snapshot(state: &PersistedState, map: Box<dyn ResourceMap>) -> Result<Self, WorldError> {
        let store = factory_world::persist::load_snapshot(state, map)?;
        let mut registry = EntityRegistry::new();
        factory_transport::register_builtin_kinds(&mut registry)?;
        Ok(Self {
            store,
            registry,
            driver: FixedStepDriver::new(),
            supply_demand: SupplyDemand::default(),
        })
    }
}
