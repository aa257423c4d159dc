//! End-to-end pipeline: an extractor feeds a chest through two inserters and
//! a short belt run, driven entirely through the `World` facade.

use std::fmt;

use factory_sim::{EntityInit, World, WorldConfig};
use factory_core::prelude::*;

#[derive(Clone, Copy)]
struct SingleOreTile {
    width: u32,
    height: u32,
    ore_at: GridCoord,
}

impl fmt::Debug for SingleOreTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SingleOreTile(ore at {})", self.ore_at)
    }
}

impl ResourceMap for SingleOreTile {
    fn is_within_bounds(&self, pos: GridCoord) -> bool {
        pos.in_bounds(self.width, self.height)
    }

    fn is_ore(&self, pos: GridCoord) -> bool {
        pos == self.ore_at
    }

    fn is_tree(&self, _pos: GridCoord) -> bool {
        false
    }

    fn is_coal(&self, _pos: GridCoord) -> bool {
        false
    }

    fn resource_amount_at(&self, pos: GridCoord) -> u32 {
        if self.is_ore(pos) {
            u32::MAX
        } else {
            0
        }
    }
}

#[test]
fn iron_ore_travels_from_extractor_to_chest() {
    let map = SingleOreTile {
        width: 8,
        height: 2,
        ore_at: GridCoord::new(0, 0),
    };
    let mut world = World::create(WorldConfig::new(8, 2).with_map(Box::new(map))).unwrap();

    world
        .add_entity(EntityKind::Extractor, EntityInit::new(GridCoord::new(0, 0)))
        .unwrap();
    world
        .add_entity(
            EntityKind::Inserter,
            EntityInit::new(GridCoord::new(1, 0)).with_rot(Direction::E),
        )
        .unwrap();
    world
        .add_entity(
            EntityKind::Belt,
            EntityInit::new(GridCoord::new(2, 0)).with_rot(Direction::E),
        )
        .unwrap();
    world
        .add_entity(
            EntityKind::Belt,
            EntityInit::new(GridCoord::new(3, 0)).with_rot(Direction::E),
        )
        .unwrap();
    world
        .add_entity(
            EntityKind::Inserter,
            EntityInit::new(GridCoord::new(4, 0)).with_rot(Direction::E),
        )
        .unwrap();
    world
        .add_entity(EntityKind::Chest, EntityInit::new(GridCoord::new(5, 0)))
        .unwrap();

    for _ in 0..2000 {
        world.tick();
    }

    let entities_at_chest = world.get_entities_at(GridCoord::new(5, 0));
    let chest = entities_at_chest[0];
    let EntityState::Chest(chest_state) = &chest.state else {
        panic!("expected a chest")
    };
    assert!(chest_state.total_items() >= 1, "expected at least one item to reach the chest");
    assert_eq!(
        chest_state.inventory.get(&ItemKind::IronOre),
        Some(&chest_state.total_items())
    );
}

#[test]
fn paused_world_ignores_step_but_tick_still_advances_manually() {
    let mut world = World::create(WorldConfig::new(4, 4)).unwrap();
    world.pause();
    world.step(1000.0).unwrap();
    assert_eq!(world.tick_count(), 0);

    world.resume();
    world.step(factory_world::scheduler::TICK_MS).unwrap();
    assert_eq!(world.tick_count(), 1);
}

#[test]
fn save_and_load_snapshot_preserves_entities() {
    let mut world = World::create(WorldConfig::new(4, 4)).unwrap();
    world
        .add_entity(EntityKind::Chest, EntityInit::new(GridCoord::new(2, 2)))
        .unwrap();
    world.tick();

    let saved = world.save_snapshot().unwrap();
    let reloaded = World::load_snapshot(
        &saved,
        Box::new(EmptyResourceMap {
            width: 4,
            height: 4,
        }),
    )
    .unwrap();

    assert_eq!(reloaded.tick_count(), 1);
    assert_eq!(reloaded.get_entities_at(GridCoord::new(2, 2)).len(), 1);
}
