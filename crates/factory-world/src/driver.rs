//! The fixed-step driver: turns wall-clock deltas into whole ticks (§4.6).

use factory_core::prelude::*;

use crate::power::SupplyDemand;
use crate::registry::EntityRegistry;
use crate::scheduler::{self, TICK_MS};
use crate::store::WorldStore;

/// Tolerance for the accumulator comparison, so an `f64` sum of many
/// `1000.0 / 60.0` deltas that lands a few ulps short of a tick boundary
/// still ticks instead of drifting a frame behind forever.
pub const STEP_EPSILON: f64 = 1e-7;

/// Accumulates `dt_ms` and runs as many whole ticks as have accrued.
///
/// Not reentrant: calling `step` from inside an `Update` (i.e. from inside
/// an already-running `step`) is an invariant violation, since it would
/// recursively hold two live borrows of the same world.
pub struct FixedStepDriver {
    accumulator_ms: f64,
    stepping: bool,
}

impl FixedStepDriver {
    pub fn new() -> Self {
        Self {
            accumulator_ms: 0.0,
            stepping: false,
        }
    }

    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator_ms
    }

    /// Advance the clock by `dt_ms` and run every whole tick that accrues.
    /// While `world` is paused, time does not accumulate at all, so
    /// resuming never triggers a burst of catch-up ticks.
    pub fn step(
        &mut self,
        dt_ms: f64,
        world: &mut WorldStore,
        registry: &EntityRegistry,
    ) -> Result<Vec<SupplyDemand>, WorldError> {
        if self.stepping {
            return Err(WorldError::InvariantViolation {
                detail: "Step called reentrantly".to_string(),
            });
        }
        self.stepping = true;
        let result = self.step_inner(dt_ms, world, registry);
        self.stepping = false;
        result
    }

    fn step_inner(
        &mut self,
        dt_ms: f64,
        world: &mut WorldStore,
        registry: &EntityRegistry,
    ) -> Result<Vec<SupplyDemand>, WorldError> {
        if world.is_paused() {
            return Ok(Vec::new());
        }
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return Ok(Vec::new());
        }

        self.accumulator_ms += dt_ms;
        let mut results = Vec::new();
        while self.accumulator_ms + STEP_EPSILON >= TICK_MS {
            results.push(scheduler::run_tick(world, registry));
            self.accumulator_ms -= TICK_MS;
        }
        // A tick consumes exactly TICK_MS from the accumulator, but if the
        // loop's last iteration left a residue of a few ulps below zero
        // (rather than exactly zero), clamp it so it doesn't linger as a
        // small negative carry into the next call (§4.6).
        if self.accumulator_ms < 0.0 && self.accumulator_ms > -STEP_EPSILON {
            self.accumulator_ms = 0.0;
        }
        Ok(results)
    }
}

impl Default for FixedStepDriver {
    fn default() -> Self {
        Self::new()
    }
}
