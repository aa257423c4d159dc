//! Power supply/demand aggregation (§4.7.3).
//!
//! Individual power sources and consumers never see each other; the
//! scheduler sums the world after every tick and publishes the aggregate,
//! the same way a real grid's load is a property of the network, not of any
//! one generator.

use factory_core::state::EntityState;

use crate::store::WorldStore;

/// Power drawn by one assembler/smelter while `crafting=true` (§4.7.3).
pub const CRAFTING_DEMAND: u32 = 5;

/// The world-wide power aggregate as of the most recently completed tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupplyDemand {
    pub supply: u32,
    pub demand: u32,
}

impl SupplyDemand {
    pub fn shortage(&self) -> bool {
        self.demand.saturating_sub(self.supply) > 0
    }
}

/// `demand` totals [`CRAFTING_DEMAND`] for every assembler (smelters are
/// assemblers with a baked-in recipe, per §4.7.2) currently `crafting`;
/// idle assemblers and every other kind draw no power, per §4.7.3's coarse
/// model.
pub fn compute(world: &WorldStore) -> SupplyDemand {
    let mut supply = 0u32;
    let mut demand = 0u32;
    for entity in world.entities.values() {
        match &entity.state {
            EntityState::PowerSource(source) => supply += source.supply,
            EntityState::Assembler(assembler) if assembler.crafting => demand += CRAFTING_DEMAND,
            _ => {}
        }
    }
    SupplyDemand { supply, demand }
}
