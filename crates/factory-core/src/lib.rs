//! Factory Core -- grid primitives, entity identity, and opaque per-kind
//! state for the factory-automation simulation core.
//!
//! This crate provides the data types shared by every layer above it:
//! [`GridCoord`]/[`Direction`] for placement, [`EntityKind`]/[`EntityId`]/
//! [`Entity`] for identity, [`state::EntityState`] for the tagged union of
//! per-kind state, and the [`WorldError`] taxonomy. It has no notion of a
//! world, a tick, or a schedule -- those live in `factory-world`.
//!
//! # Quick Start
//!
//! ```
//! use factory_core::prelude::*;
//!
//! let mut alloc = EntityIdAllocator::new();
//! let id = alloc.alloc();
//! assert_eq!(id.to_string(), "1");
//!
//! assert_eq!(Direction::N.rotate(1), Direction::E);
//! ```

#![deny(unsafe_code)]

pub mod entity;
pub mod error;
pub mod grid;
pub mod item;
pub mod resource_map;
pub mod state;

pub mod prelude {
    pub use crate::entity::{Entity, EntityId, EntityIdAllocator, EntityKind};
    pub use crate::error::WorldError;
    pub use crate::grid::{Direction, GridCoord};
    pub use crate::item::ItemKind;
    pub use crate::resource_map::{EmptyResourceMap, ResourceMap};
    pub use crate::state::{
        AssemblerState, BeltState, ChestState, EntityState, ExtractorState, InserterState,
        PowerSourceState, Recipe,
    };
}
