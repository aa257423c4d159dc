//! Smelter and assembler: a general recipe-driven crafting mechanism, with
//! the smelter as its one built-in specialization (§4.7.2).
//!
//! Both kinds share [`AssemblerState`] and [`update`]; only [`create_smelter`]
//! and [`create_assembler`] differ, in which recipe they bake in.

use factory_core::prelude::*;
use factory_world::prelude::{CreateContext, TickContext};
use factory_world::registry::EntityInit;

pub fn create_smelter(_init: &EntityInit, _ctx: &CreateContext<'_>) -> EntityState {
    EntityState::Assembler(AssemblerState::new(Recipe::smelter()))
}

/// The recipe comes from `init.params`, deserialized as a [`Recipe`]. A
/// missing or malformed recipe falls back to the smelter's own recipe --
/// crafting infallibly, not refusing construction (§4.7: `Create` never
/// errors).
pub fn create_assembler(init: &EntityInit, _ctx: &CreateContext<'_>) -> EntityState {
    let recipe = serde_json::from_value::<Recipe>(init.params.clone()).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "assembler recipe params invalid, using smelter recipe");
        Recipe::smelter()
    });
    EntityState::Assembler(AssemblerState::new(recipe))
}

/// Crafts one batch of the recipe every `recipe.cadence` ticks, refusing to
/// start a batch that would either starve an input or overflow the output
/// slot.
pub fn update(entity: &mut Entity, _dt: u64, _ctx: &mut TickContext<'_>) {
    let EntityState::Assembler(state) = &mut entity.state else {
        return;
    };
    state.local_ticks += 1;

    if state.crafting {
        state.progress += 1;
        if state.progress >= state.recipe.cadence {
            state.crafting = false;
            state.progress = 0;
            state.output_count += state.recipe.output.1;
            state.completed += 1;
        }
        return;
    }

    let has_inputs = state
        .recipe
        .inputs
        .iter()
        .all(|(kind, n)| state.input_counts.get(kind).copied().unwrap_or(0) >= *n);
    // While output is occupied, the smelter refuses new input entirely
    // (§4.7) -- a craft never restarts on top of an unconsumed batch.
    let has_room =
        state.output_count == 0 && state.output_count + state.recipe.output.1 <= state.output_cap;

    if has_inputs && has_room {
        for (kind, n) in state.recipe.inputs.clone() {
            if let Some(count) = state.input_counts.get_mut(&kind) {
                *count -= n;
                if *count == 0 {
                    state.input_counts.remove(&kind);
                }
            }
        }
        state.crafting = true;
        state.progress = 0;
    }
}
