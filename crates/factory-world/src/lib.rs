//! Factory World -- the entity registry, spatial index, snapshot isolation,
//! scheduler, fixed-step driver, power aggregation, and persistence codec
//! that sit on top of `factory-core`'s data types.
//!
//! This crate knows nothing about what an extractor, a belt, or a smelter
//! actually does tick to tick; that behavior is supplied by whoever calls
//! [`registry::EntityRegistry::register`] (in practice, `factory-transport`).
//! What lives here is the machinery every kind shares: how entities are
//! placed and removed, how a tick's snapshot is built and consumed, how
//! ticks are ordered and paced, and how a world is saved and restored.

#![deny(unsafe_code)]

pub mod context;
pub mod driver;
pub mod persist;
pub mod power;
pub mod registry;
pub mod scheduler;
pub mod snapshot;
pub mod spatial;
pub mod store;

pub mod prelude {
    pub use crate::context::{CreateContext, TickContext};
    pub use crate::driver::{FixedStepDriver, STEP_EPSILON};
    pub use crate::persist::{load_snapshot, save_snapshot, PersistedState};
    pub use crate::power::{compute as compute_supply_demand, SupplyDemand};
    pub use crate::registry::{
        CreateFn, EntityInit, EntityRegistry, KindDefinition, Phase, PreTickFn, UpdateFn,
    };
    pub use crate::scheduler::{run_tick, TICK_MS};
    pub use crate::snapshot::WorldSnapshot;
    pub use crate::spatial::SpatialIndex;
    pub use crate::store::WorldStore;
}
