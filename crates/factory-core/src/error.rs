//! Error taxonomy for the core surface (§7).

use crate::grid::GridCoord;

/// Errors raised synchronously by `AddEntity`, `RemoveEntity`, `Register`,
/// and `Step`. Transport attempts never raise errors (§4.7) -- only world
/// and registry construction/mutation can fail.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// `AddEntity`/`Step` referenced a kind the registry has never seen.
    #[error("unknown entity kind '{kind}'")]
    UnknownKind { kind: String },

    /// A position fell outside `[0, width) x [0, height)`.
    #[error("position {pos} is out of bounds for a {width}x{height} world")]
    OutOfBounds {
        pos: GridCoord,
        width: u32,
        height: u32,
    },

    /// A position was not integer-valued (reserved for collaborators that
    /// hand the core a floating-point coordinate to validate).
    #[error("coordinate ({x}, {y}) is not a valid integer grid cell")]
    InvalidCoord { x: f64, y: f64 },

    /// `rot` was not one of the four canonical direction strings.
    #[error("'{value}' is not a valid direction (expected one of N, E, S, W)")]
    InvalidDirection { value: String },

    /// `Register` was called twice for the same kind.
    #[error("entity kind '{kind}' is already registered")]
    AlreadyRegistered { kind: String },

    /// An internal invariant was violated (e.g. re-entrant `Step`, or a
    /// poisoned world after an aborted tick).
    #[error("invariant violation: {detail}")]
    InvariantViolation { detail: String },
}
