//! Power source: an unphased supply that the Scheduler aggregates across the
//! whole world, never peer to peer (§4.7.3).

use serde::Deserialize;

use factory_core::prelude::*;
use factory_world::prelude::CreateContext;
use factory_world::registry::EntityInit;

const DEFAULT_SUPPLY: u32 = 10;

#[derive(Debug, Default, Deserialize)]
struct PowerSourceParams {
    supply: Option<u32>,
}

pub fn create(init: &EntityInit, _ctx: &CreateContext<'_>) -> EntityState {
    let params: PowerSourceParams =
        serde_json::from_value(init.params.clone()).unwrap_or_default();
    EntityState::PowerSource(PowerSourceState {
        supply: params.supply.unwrap_or(DEFAULT_SUPPLY),
    })
}
