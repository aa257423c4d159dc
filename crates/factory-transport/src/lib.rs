//! Factory Transport -- the per-kind `Create`/`Update` behavior for every
//! built-in entity kind (§4.7), plus the bootstrap that wires them all into
//! a fresh registry.
//!
//! This crate has no notion of a world or a schedule; it only implements
//! what one entity of a given kind does when asked to construct itself or
//! to take its turn. `factory-world` supplies the machinery that decides
//! when and in what order these functions run.

#![deny(unsafe_code)]

pub mod belt;
pub mod chest;
pub mod extractor;
pub mod inserter;
pub mod power_source;
pub mod registration;
pub mod smelter_assembler;

pub use registration::register_builtin_kinds;
