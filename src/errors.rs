//! Shared error types used across submodules.
//!
//! The taxonomy is deliberately narrow: degenerate numeric cases (zero
//! denominators, flat sweeps) are handled by in-band sentinels and fallbacks,
//! so only physically meaningless inputs surface as errors.

use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum PickupPhysicsError {
    /// No physically meaningful resistance exists for a non-positive wire
    /// diameter.
    #[error("wire diameter must be positive, got {0} m")]
    InvalidWireDiameter(f64),
    /// A winding needs at least one turn.
    #[error("turn count must be at least 1")]
    InvalidTurnCount,
    /// Raised when a geometric extent violates its invariant.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}
