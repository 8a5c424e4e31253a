#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants and the versioned empirical calibration table.
pub mod constants;
/// Strongly typed unit helpers for reporting computed quantities.
pub mod units;
/// Shared numerical primitives (complex impedance algebra with guards).
pub mod math;
/// Material property tables and lookups.
pub mod materials;
/// Coil electrical model: geometry and winding to lumped R/L/C.
pub mod coil;
/// Magnetic field model: axial field, sensitivity, string-pull risk.
pub mod magnet;
/// Load network model: pots, cable, and amplifier input.
pub mod load;
/// Step-up transformer model with parasitics and saturation margin.
pub mod transformer;
/// System response and the loaded-resonance search.
pub mod response;
/// Transient (impulse/step) derivation from loaded resonance and Q.
pub mod transient;
/// Series/parallel combination of two coils with mutual coupling.
pub mod combine;
/// Axis builders and post-processing for sampled output series.
pub mod sweep;
/// Aggregate configuration record for persistence collaborators.
pub mod config;
/// Error types shared across the crate.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
