//! Wires every built-in kind's `Create`/`Update`/`Phase` into a fresh
//! [`EntityRegistry`] in one call, the way a real deployment wants to boot.

use factory_core::entity::EntityKind;
use factory_core::error::WorldError;
use factory_core::state::EntityState;
use factory_world::registry::{EntityRegistry, KindDefinition, Phase};

use crate::{belt, chest, extractor, inserter, power_source, smelter_assembler};

/// Register every built-in kind (§4.7). Fails only if called twice against
/// the same registry.
pub fn register_builtin_kinds(registry: &mut EntityRegistry) -> Result<(), WorldError> {
    registry.register(
        EntityKind::Extractor,
        KindDefinition::new(Phase::Extractor)
            .with_create(extractor::create)
            .with_update(extractor::update),
    )?;

    registry.register(
        EntityKind::Belt,
        KindDefinition::new(Phase::Belt)
            .with_create(belt::create)
            .with_update(belt::update)
            .with_pre_tick(belt::pre_tick),
    )?;

    registry.register(
        EntityKind::Smelter,
        KindDefinition::new(Phase::Smelter)
            .with_create(smelter_assembler::create_smelter)
            .with_update(smelter_assembler::update),
    )?;

    registry.register(
        EntityKind::Assembler,
        KindDefinition::new(Phase::Smelter)
            .with_create(smelter_assembler::create_assembler)
            .with_update(smelter_assembler::update),
    )?;

    registry.register(
        EntityKind::Inserter,
        KindDefinition::new(Phase::Inserter)
            .with_create(inserter::create)
            .with_update(inserter::update),
    )?;

    registry.register(
        EntityKind::Chest,
        KindDefinition::new(Phase::Unphased).with_create(chest::create),
    )?;

    registry.register(
        EntityKind::PowerSource,
        KindDefinition::new(Phase::Unphased).with_create(power_source::create),
    )?;

    registry.register(
        EntityKind::Resource,
        KindDefinition::new(Phase::Unphased).with_create(|_init, _ctx| EntityState::None),
    )?;

    Ok(())
}
