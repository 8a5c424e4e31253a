//! Magnetic field model: magnet geometry and material to axial field profile,
//! sensitivity index, and string-pull risk.
//!
//! All three geometries share the finite-cylinder on-axis flux formula; bar
//! and blade assemblies map onto it through equivalent pole radii and
//! empirical magnetic-circuit factors. Distances are measured from the pole
//! face along the axis, in meters.

use std::f64::consts::PI;

use crate::constants::{angular_frequency, calibration};
use crate::materials::{CoverMaterial, MagnetMaterial};
use crate::math::Scalar;
use crate::sweep::linspace;
use crate::units::FluxDensity;

/// Supported magnetization range (fraction of full remanence; >1 models an
/// overcharged magnet fresh off the magnetizer).
pub const MAGNETIZATION_RANGE: (Scalar, Scalar) = (0.0, 1.2);

/// Magnet assembly geometry. All dimensions in meters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MagnetGeometry {
    /// Individual cylindrical rod poles.
    Rod {
        /// Pole diameter.
        diameter: Scalar,
        /// Axial magnet length.
        length: Scalar,
    },
    /// Bar magnet under steel pole pieces.
    Bar {
        /// Bar width (across the strings).
        width: Scalar,
        /// Bar depth (along the strings).
        depth: Scalar,
        /// Axial magnet length.
        length: Scalar,
        /// Equivalent pole-piece radius; `None` uses the calibrated default.
        pole_radius: Option<Scalar>,
    },
    /// Blade/rail pole energized by one or two magnets.
    Blade {
        /// Blade width (along the strings).
        width: Scalar,
        /// Blade thickness.
        thickness: Scalar,
        /// Blade height (axial).
        height: Scalar,
        /// Magnet count feeding the blade (1 or 2).
        magnet_count: u8,
    },
}

/// Magnet parameter snapshot.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnetParams {
    /// Magnet material.
    pub material: MagnetMaterial,
    /// Assembly geometry.
    pub geometry: MagnetGeometry,
    /// Magnetization level as a fraction of full remanence, clamped to
    /// [`MAGNETIZATION_RANGE`].
    pub magnetization: Scalar,
    /// Cover/keeper material over the coil.
    pub cover: CoverMaterial,
}

/// Distances from the pole face, in meters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositioningParams {
    /// Pole face to string at rest.
    pub string_distance: Scalar,
    /// Pole face to the winding's sensing plane.
    pub coil_distance: Scalar,
}

impl PositioningParams {
    /// Positioning from millimeter distances.
    #[must_use]
    pub fn from_mm(string_distance: Scalar, coil_distance: Scalar) -> Self {
        Self {
            string_distance: string_distance * 1e-3,
            coil_distance: coil_distance * 1e-3,
        }
    }
}

/// Qualitative string-pull warning tier.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringPullTier {
    /// Negligible interference with string vibration.
    Safe,
    /// Audible sustain loss possible at close range.
    Caution,
    /// Likely intonation artifacts ("stratitis").
    Danger,
}

/// Derived magnetic quantities for one magnet/positioning snapshot.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnetComputedResults {
    /// Flux density at the string, T.
    pub field_at_string: Scalar,
    /// Flux density at the coil's sensing plane, T.
    pub field_at_coil: Scalar,
    /// Axial field gradient at the coil plane, T/m (negative: decaying).
    pub field_gradient: Scalar,
    /// Dimensionless output-sensitivity index.
    pub sensitivity_index: Scalar,
    /// String-pull risk index in [0, 1].
    pub string_pull_index: Scalar,
    /// Warning tier derived from the index.
    pub string_pull_tier: StringPullTier,
}

impl MagnetComputedResults {
    /// Field at the string as a displayable quantity.
    #[must_use]
    pub fn string_field(&self) -> FluxDensity<Scalar> {
        FluxDensity::new(self.field_at_string)
    }
}

/// Sampled on-axis field point.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldPoint {
    /// Distance from the pole face, m.
    pub distance: Scalar,
    /// Flux density, T.
    pub flux_density: Scalar,
}

/// On-axis flux density of a finite cylinder at distance `z` from its face.
fn cylinder_axial_field(br: Scalar, z: Scalar, radius: Scalar, length: Scalar) -> Scalar {
    let near = z + length;
    (br / 2.0)
        * (near / (near.powi(2) + radius.powi(2)).sqrt() - z / (z.powi(2) + radius.powi(2)).sqrt())
}

fn effective_remanence(params: &MagnetParams) -> Scalar {
    let m = params
        .magnetization
        .clamp(MAGNETIZATION_RANGE.0, MAGNETIZATION_RANGE.1);
    params.material.remanence() * m
}

/// Axial flux density at distance `z` (m) from the pole face.
///
/// Negative distances are treated as the pole face itself.
#[must_use]
pub fn axial_field(params: &MagnetParams, z: Scalar) -> Scalar {
    let z = z.max(0.0);
    let br = effective_remanence(params);
    match params.geometry {
        MagnetGeometry::Rod { diameter, length } => {
            cylinder_axial_field(br, z, diameter / 2.0, length)
        }
        MagnetGeometry::Bar {
            length, pole_radius, ..
        } => {
            // Pole pieces add magnetic-circuit reluctance; the calibrated
            // loss factor accounts for it.
            let radius = pole_radius.unwrap_or(calibration::BAR_POLE_RADIUS_DEFAULT);
            cylinder_axial_field(br, z, radius, length) * calibration::BAR_RELUCTANCE_LOSS
        }
        MagnetGeometry::Blade {
            width,
            thickness,
            height,
            magnet_count,
        } => {
            let radius = (width * thickness / PI).sqrt();
            let volume = width * thickness * height;
            let volume_factor = (volume / calibration::BLADE_REFERENCE_VOLUME).sqrt();
            let count_bonus = if magnet_count >= 2 {
                calibration::BLADE_TWIN_MAGNET_BONUS
            } else {
                1.0
            };
            cylinder_axial_field(br, z, radius, height)
                * volume_factor
                * calibration::BLADE_CIRCUIT_EFFICIENCY
                * count_bonus
        }
    }
}

/// Axial field gradient at `z` by central finite difference
/// (step [`calibration::GRADIENT_STEP`]), T/m.
#[must_use]
pub fn field_gradient(params: &MagnetParams, z: Scalar) -> Scalar {
    let h = calibration::GRADIENT_STEP;
    let lo = (z - h).max(0.0);
    let hi = z + h;
    (axial_field(params, hi) - axial_field(params, lo)) / (hi - lo)
}

/// Effective pole area presented to the winding, m².
#[must_use]
pub fn effective_pole_area(geometry: &MagnetGeometry) -> Scalar {
    match *geometry {
        MagnetGeometry::Rod { diameter, .. } => PI * (diameter / 2.0).powi(2),
        MagnetGeometry::Bar {
            pole_radius, ..
        } => {
            let r = pole_radius.unwrap_or(calibration::BAR_POLE_RADIUS_DEFAULT);
            PI * r.powi(2)
        }
        MagnetGeometry::Blade {
            width, thickness, ..
        } => width * thickness,
    }
}

/// Dimensionless output-sensitivity index.
///
/// Faraday term (turns × area × coupling × |gradient| × ω at the reference
/// string frequency) scaled by the empirical calibration constant and the
/// per-geometry correction; the raw formula over-reads rods and under-reads
/// blades relative to bench measurements.
#[must_use]
pub fn sensitivity_index(
    params: &MagnetParams,
    positioning: &PositioningParams,
    coil_turns: u32,
) -> Scalar {
    let gradient = field_gradient(params, positioning.coil_distance).abs();
    let area = effective_pole_area(&params.geometry);
    let omega = angular_frequency(calibration::REFERENCE_STRING_HZ);
    let geometry_correction = match params.geometry {
        MagnetGeometry::Rod { .. } => calibration::SENSITIVITY_ROD_CORRECTION,
        MagnetGeometry::Bar { .. } => calibration::SENSITIVITY_BAR_CORRECTION,
        MagnetGeometry::Blade { .. } => calibration::SENSITIVITY_BLADE_CORRECTION,
    };
    Scalar::from(coil_turns)
        * area
        * calibration::FLUX_COUPLING
        * gradient
        * omega
        * calibration::SENSITIVITY_SCALE
        * geometry_correction
        * params.cover.eddy_loss_factor()
}

/// String-pull risk index, `B²/dⁿ` normalized against the danger reference and
/// clamped to [0, 1].
#[must_use]
pub fn string_pull_index(params: &MagnetParams, positioning: &PositioningParams) -> Scalar {
    // Floor the distance at 0.1 mm; the heuristic diverges at contact.
    let d = positioning.string_distance.max(1.0e-4);
    let b = axial_field(params, positioning.string_distance);
    let raw = b.powi(2) / d.powf(calibration::STRING_PULL_EXPONENT);
    (raw / calibration::STRING_PULL_DANGER_REF).clamp(0.0, 1.0)
}

/// Warning tier for a string-pull index.
#[must_use]
pub fn string_pull_tier(index: Scalar) -> StringPullTier {
    if index < calibration::STRING_PULL_SAFE_BELOW {
        StringPullTier::Safe
    } else if index < calibration::STRING_PULL_CAUTION_BELOW {
        StringPullTier::Caution
    } else {
        StringPullTier::Danger
    }
}

/// Samples the on-axis field over `[start, stop]` meters with `n` points.
#[must_use]
pub fn field_profile(params: &MagnetParams, start: Scalar, stop: Scalar, n: usize) -> Vec<FieldPoint> {
    linspace(start, stop, n)
        .into_iter()
        .map(|distance| FieldPoint {
            distance,
            flux_density: axial_field(params, distance),
        })
        .collect()
}

/// Computes the full derived magnetic record. `coil_turns` comes from the
/// companion coil computation.
#[must_use]
pub fn compute_magnet(
    params: &MagnetParams,
    positioning: &PositioningParams,
    coil_turns: u32,
) -> MagnetComputedResults {
    let index = string_pull_index(params, positioning);
    MagnetComputedResults {
        field_at_string: axial_field(params, positioning.string_distance),
        field_at_coil: axial_field(params, positioning.coil_distance),
        field_gradient: field_gradient(params, positioning.coil_distance),
        sensitivity_index: sensitivity_index(params, positioning, coil_turns),
        string_pull_index: index,
        string_pull_tier: string_pull_tier(index),
    }
}
