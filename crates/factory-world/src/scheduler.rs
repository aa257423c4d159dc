//! One tick of the simulation: snapshot, ordered dispatch, re-index (§4.5).

use crate::context::TickContext;
use crate::power::SupplyDemand;
use crate::registry::EntityRegistry;
use crate::snapshot::WorldSnapshot;
use crate::store::WorldStore;

/// The fixed timestep, in milliseconds: `1000.0 / 60.0` exactly (≈16.6667),
/// not the truncated integer-millisecond approximation -- using `16` here
/// would tick the driver at 62.5 Hz instead of 60 Hz and throw off every
/// cadence built on top of it (§4.6).
pub const TICK_MS: f64 = 1000.0 / 60.0;

/// The whole-millisecond duration handed to each kind's `Update` as `dt_ms`.
/// No built-in kind reads this value -- cadence is driven by each entity's
/// own `local_ticks` counter -- so rounding it here costs nothing; the
/// authoritative tick width for pacing and the elapsed clock is [`TICK_MS`].
const TICK_MS_WHOLE: u64 = 17;

/// Advance `world` by exactly one tick.
///
/// 1. Capture a snapshot of every entity as it stands right now.
/// 2. Sort entity ids by `(phase rank, insertion order)`.
/// 3. Invoke each entity's `Update`, holding it out of the live map so no
///    update can ever alias its own `&mut` through a context lookup.
/// 4. Re-index any entity whose `Update` moved it.
/// 5. Advance the tick counter and elapsed clock, and recompute the power
///    supply/demand aggregate.
pub fn run_tick(world: &mut WorldStore, registry: &EntityRegistry) -> SupplyDemand {
    let snapshot = WorldSnapshot::capture(world.entities.values());

    for entity in world.entities.values_mut() {
        if let Some(def) = registry.get(entity.kind) {
            if let Some(pre_tick) = def.pre_tick {
                pre_tick(entity);
            }
        }
    }

    let mut order: Vec<(u8, u64, factory_core::entity::EntityId)> = world
        .entities
        .keys()
        .map(|&id| {
            let kind = world.entities[&id].kind;
            (registry.phase_rank(kind), world.insertion_order_of(id), id)
        })
        .collect();
    order.sort_by_key(|&(rank, seq, _)| (rank, seq));

    for (_, _, id) in order {
        let Some(mut entity) = world.entities.remove(&id) else {
            // Removed by an earlier update this same tick.
            continue;
        };
        let old_pos = entity.pos;

        if let Some(def) = registry.get(entity.kind) {
            if let Some(update) = def.update {
                let mut ctx = TickContext::new(
                    world.tick,
                    world.width,
                    world.height,
                    world.map.as_ref(),
                    &snapshot,
                    &mut world.entities,
                    &world.spatial,
                );
                update(&mut entity, TICK_MS_WHOLE, &mut ctx);
            }
        }

        if entity.pos != old_pos {
            world.spatial.attach(id, entity.pos);
        }
        world.entities.insert(id, entity);
    }

    world.tick += 1;
    // Derived from the total tick count rather than accumulated per tick, so
    // rounding `TICK_MS` to a whole millisecond each call never compounds
    // into drift -- `elapsed_ms` always lands within one tick's width of the
    // true `tick_count * TICK_MS`.
    world.elapsed_ms = (world.tick as f64 * TICK_MS) as u64;

    let supply_demand = crate::power::compute(world);
    tracing::trace!(
        tick = world.tick,
        supply = supply_demand.supply,
        demand = supply_demand.demand,
        "tick complete"
    );
    supply_demand
}
