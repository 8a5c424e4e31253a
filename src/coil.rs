//! Coil electrical model: geometry and winding parameters to lumped R/L/C.
//!
//! The pipeline is closed-form with empirical calibration: mean turn length by
//! bobbin form, grade- and temperature-corrected DC resistance, short-solenoid
//! inductance on an equivalent circular radius, and sub-linear parasitic
//! capacitance. All inputs are immutable snapshots; every call recomputes the
//! full record.

use std::f64::consts::PI;

use crate::constants::calibration;
use crate::errors::PickupPhysicsError;
use crate::materials::{
    awg_bare_diameter, packing_capacitance_multiplier, resistivity, ConductorGrade,
    InsulationType, WindingStyle,
};
use crate::math::Scalar;
use crate::units::{Frequency, Impedance};

/// Supported winding-window packing-factor range.
pub const PACKING_FACTOR_RANGE: (Scalar, Scalar) = (0.30, 0.95);

/// Bobbin cross-section form.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoilForm {
    /// Circular bobbin; turns are circles.
    #[default]
    Cylindrical,
    /// Rectangular bobbin; turns are rounded rectangles.
    Rectangular,
    /// Flat, elongated bobbin; turns are racetrack ovals.
    Flatwork,
}

/// Bobbin geometry snapshot. All extents in meters.
///
/// `inner_extent`/`outer_extent` are diameters for cylindrical forms and the
/// across-the-narrow-axis widths otherwise; invariant: outer > inner.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoilGeometry {
    /// Cross-section form.
    pub form: CoilForm,
    /// Inner winding extent (core/former), m.
    pub inner_extent: Scalar,
    /// Outer winding extent (full bobbin), m.
    pub outer_extent: Scalar,
    /// Winding window height, m.
    pub height: Scalar,
    /// Along-string bobbin length for rectangular/flatwork forms, m.
    pub length: Option<Scalar>,
    /// Bobbin wall thickness eating into the winding window, m.
    pub bobbin_wall: Scalar,
}

impl CoilGeometry {
    /// Cylindrical bobbin from millimeter dimensions.
    #[must_use]
    pub fn cylindrical_mm(inner_d: Scalar, outer_d: Scalar, height: Scalar, wall: Scalar) -> Self {
        Self {
            form: CoilForm::Cylindrical,
            inner_extent: inner_d * 1e-3,
            outer_extent: outer_d * 1e-3,
            height: height * 1e-3,
            length: None,
            bobbin_wall: wall * 1e-3,
        }
    }

    /// Rectangular bobbin from millimeter dimensions.
    #[must_use]
    pub fn rectangular_mm(
        inner_w: Scalar,
        outer_w: Scalar,
        length: Scalar,
        height: Scalar,
        wall: Scalar,
    ) -> Self {
        Self {
            form: CoilForm::Rectangular,
            inner_extent: inner_w * 1e-3,
            outer_extent: outer_w * 1e-3,
            height: height * 1e-3,
            length: Some(length * 1e-3),
            bobbin_wall: wall * 1e-3,
        }
    }

    /// Flatwork bobbin from millimeter dimensions.
    #[must_use]
    pub fn flatwork_mm(
        inner_w: Scalar,
        outer_w: Scalar,
        length: Scalar,
        height: Scalar,
        wall: Scalar,
    ) -> Self {
        Self {
            form: CoilForm::Flatwork,
            inner_extent: inner_w * 1e-3,
            outer_extent: outer_w * 1e-3,
            height: height * 1e-3,
            length: Some(length * 1e-3),
            bobbin_wall: wall * 1e-3,
        }
    }

    /// Radial depth available to the winding, m.
    #[must_use]
    pub fn winding_depth(&self) -> Scalar {
        ((self.outer_extent - self.inner_extent) / 2.0 - self.bobbin_wall).max(0.0)
    }

    fn validate(&self) -> Result<(), PickupPhysicsError> {
        if self.inner_extent <= 0.0 || self.height <= 0.0 {
            return Err(PickupPhysicsError::InvalidGeometry(
                "extents and height must be positive".into(),
            ));
        }
        if self.outer_extent <= self.inner_extent {
            return Err(PickupPhysicsError::InvalidGeometry(
                "outer extent must exceed inner extent".into(),
            ));
        }
        Ok(())
    }
}

/// Magnet wire parameters. Invariant: turns ≥ 1.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireParams {
    /// Copper purity grade.
    pub grade: ConductorGrade,
    /// Parallel strand count sharing the current.
    pub strands: u32,
    /// Bare conductor diameter, m.
    pub bare_diameter: Scalar,
    /// Insulation film type.
    pub insulation: InsulationType,
    /// Total turn count.
    pub turns: u32,
    /// Winding technique.
    pub winding_style: WindingStyle,
    /// Winding-window packing factor, clamped to [`PACKING_FACTOR_RANGE`].
    pub packing_factor: Scalar,
    /// Operating temperature, °C.
    pub temperature_c: Scalar,
}

impl WireParams {
    /// Single-strand wire of the given AWG gauge with common defaults
    /// (standard-grade copper, machine winding, 0.55 packing, 25 °C).
    #[must_use]
    pub fn awg(awg: u8, insulation: InsulationType, turns: u32) -> Self {
        Self {
            grade: ConductorGrade::Standard,
            strands: 1,
            bare_diameter: awg_bare_diameter(awg),
            insulation,
            turns,
            winding_style: WindingStyle::MachineUniform,
            packing_factor: 0.55,
            temperature_c: 25.0,
        }
    }

    /// Overall wire diameter including the insulation build, m.
    #[must_use]
    pub fn insulated_diameter(&self) -> Scalar {
        self.bare_diameter * self.insulation.build_factor()
    }

    /// Packing factor clamped to the supported range.
    #[must_use]
    pub fn clamped_packing(&self) -> Scalar {
        self.packing_factor
            .clamp(PACKING_FACTOR_RANGE.0, PACKING_FACTOR_RANGE.1)
    }

    fn validate(&self) -> Result<(), PickupPhysicsError> {
        if self.bare_diameter <= 0.0 {
            return Err(PickupPhysicsError::InvalidWireDiameter(self.bare_diameter));
        }
        if self.turns == 0 {
            return Err(PickupPhysicsError::InvalidTurnCount);
        }
        Ok(())
    }
}

/// Derived electrical scalars of a wound coil. Pure function of
/// ([`CoilGeometry`], [`WireParams`]); immutable once produced.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoilComputedResults {
    /// Mean length of one turn, m.
    pub mean_turn_length: Scalar,
    /// Total wound wire length including build-up correction, m.
    pub wire_length: Scalar,
    /// Conductor copper volume, m³.
    pub conductor_volume: Scalar,
    /// DC resistance, Ω.
    pub dc_resistance: Scalar,
    /// Inductance, H.
    pub inductance: Scalar,
    /// Parasitic capacitance, F.
    pub capacitance: Scalar,
    /// Unloaded resonant frequency, Hz.
    pub resonant_frequency: Scalar,
    /// Unloaded quality factor (infinite for a lossless coil).
    pub quality_factor: Scalar,
    /// Maximum turns that physically fit the winding window.
    pub max_turns_fit: u32,
    /// Realized outer build-up of the winding stack, m.
    pub outer_buildup: Scalar,
}

impl CoilComputedResults {
    /// DC resistance as a displayable quantity.
    #[must_use]
    pub fn resistance(&self) -> Impedance<Scalar> {
        Impedance::new(self.dc_resistance)
    }

    /// Unloaded resonance as a displayable quantity.
    #[must_use]
    pub fn resonance(&self) -> Frequency<Scalar> {
        Frequency::new(self.resonant_frequency)
    }
}

/// Mean length of a single turn for the bobbin form, m.
///
/// Cylindrical turns average to the mean circumference; rectangular turns to
/// the mean perimeter; flatwork turns to a racetrack perimeter with the
/// calibrated effective-length correction.
#[must_use]
pub fn mean_turn_length(geometry: &CoilGeometry) -> Scalar {
    let mean_width = (geometry.inner_extent + geometry.outer_extent) / 2.0;
    match geometry.form {
        CoilForm::Cylindrical => PI * mean_width,
        CoilForm::Rectangular => {
            let mean_length = geometry.length.unwrap_or(mean_width);
            2.0 * (mean_width + mean_length)
        }
        CoilForm::Flatwork => {
            let length = geometry.length.unwrap_or(mean_width);
            let perimeter = if length > mean_width {
                // Stadium: two straights plus two semicircular ends.
                2.0 * (length - mean_width) + PI * mean_width
            } else {
                PI * mean_width
            };
            perimeter * calibration::FLATWORK_PERIMETER_CORRECTION
        }
    }
}

/// Total wound wire length for `turns` turns, m.
#[must_use]
pub fn wire_length(geometry: &CoilGeometry, turns: u32) -> Scalar {
    Scalar::from(turns) * mean_turn_length(geometry) * calibration::WIRE_BUILDUP_FACTOR
}

/// DC resistance of `length` meters of the given wire, Ω.
///
/// # Errors
///
/// Returns [`PickupPhysicsError::InvalidWireDiameter`] for a non-positive bare
/// diameter; no physically meaningful resistance exists.
pub fn dc_resistance(wire: &WireParams, length: Scalar) -> Result<Scalar, PickupPhysicsError> {
    if wire.bare_diameter <= 0.0 {
        return Err(PickupPhysicsError::InvalidWireDiameter(wire.bare_diameter));
    }
    let strand_area = PI * wire.bare_diameter.powi(2) / 4.0;
    let area = strand_area * Scalar::from(wire.strands.max(1));
    Ok(resistivity(wire.temperature_c, wire.grade) * length / area)
}

/// Coil inductance via the short-solenoid (Wheeler) approximation, H.
///
/// Non-circular cross-sections are reduced to the equivalent circular radius
/// of their mean turn. Flatwork windings carry the calibrated multiplier.
#[must_use]
pub fn inductance(geometry: &CoilGeometry, wire: &WireParams) -> Scalar {
    let radius = mean_turn_length(geometry) / (2.0 * PI);
    let turns = Scalar::from(wire.turns);
    // Wheeler's formula with inch units folded into the constant.
    let base = 1e-6 * radius.powi(2) * turns.powi(2)
        / (0.0254 * (9.0 * radius + 10.0 * geometry.height));
    match geometry.form {
        CoilForm::Flatwork => base * calibration::FLATWORK_INDUCTANCE_CALIBRATION,
        CoilForm::Cylindrical | CoilForm::Rectangular => base,
    }
}

/// Parasitic winding capacitance, F.
///
/// Scales sub-linearly with turn count (adjacent-layer coupling dominates)
/// and with the winding-style, packing, and insulation multipliers.
#[must_use]
pub fn capacitance(wire: &WireParams) -> Scalar {
    let turn_scale = (Scalar::from(wire.turns) / calibration::CAPACITANCE_REFERENCE_TURNS)
        .powf(calibration::CAPACITANCE_TURNS_EXPONENT);
    calibration::CAPACITANCE_BASE_F
        * turn_scale
        * wire.winding_style.capacitance_multiplier()
        * packing_capacitance_multiplier(wire.clamped_packing())
        * wire.insulation.capacitance_multiplier()
}

/// Resonant frequency `1/(2π√(LC))`, Hz; 0 for degenerate L or C.
#[must_use]
pub fn resonant_frequency(inductance_h: Scalar, capacitance_f: Scalar) -> Scalar {
    if inductance_h <= 0.0 || capacitance_f <= 0.0 {
        return 0.0;
    }
    1.0 / (2.0 * PI * (inductance_h * capacitance_f).sqrt())
}

/// Quality factor `ω₀L/R`; infinite for a lossless coil.
#[must_use]
pub fn quality_factor(resistance_ohm: Scalar, inductance_h: Scalar, f0_hz: Scalar) -> Scalar {
    if resistance_ohm <= 0.0 {
        return Scalar::INFINITY;
    }
    2.0 * PI * f0_hz * inductance_h / resistance_ohm
}

/// Maximum turns of the given wire that fit the winding window.
#[must_use]
pub fn max_turns_fit(geometry: &CoilGeometry, wire: &WireParams) -> u32 {
    let d = wire.insulated_diameter();
    if d <= 0.0 {
        return 0;
    }
    let window = geometry.winding_depth() * geometry.height;
    let turns = window * wire.clamped_packing() / d.powi(2);
    turns.max(0.0) as u32
}

/// Realized outer build-up of the winding stack, m.
///
/// A single layer is just the wire diameter; a multi-layer stack packs
/// imperfectly and divides by √(packing factor).
#[must_use]
pub fn outer_buildup(geometry: &CoilGeometry, wire: &WireParams) -> Scalar {
    let d = wire.insulated_diameter();
    if d <= 0.0 {
        return 0.0;
    }
    let turns_per_layer = (geometry.height / d).floor().max(1.0);
    let layers = (Scalar::from(wire.turns) / turns_per_layer).ceil();
    if layers <= 1.0 {
        d
    } else {
        layers * d / wire.clamped_packing().sqrt()
    }
}

/// Computes the full derived record for a coil.
///
/// # Errors
///
/// Propagates geometry-invariant violations and the hard wire failures
/// (non-positive diameter, zero turns).
pub fn compute_coil(
    geometry: &CoilGeometry,
    wire: &WireParams,
) -> Result<CoilComputedResults, PickupPhysicsError> {
    geometry.validate()?;
    wire.validate()?;

    let mean_turn = mean_turn_length(geometry);
    let length = wire_length(geometry, wire.turns);
    let strand_area = PI * wire.bare_diameter.powi(2) / 4.0 * Scalar::from(wire.strands.max(1));
    let r = dc_resistance(wire, length)?;
    let l = inductance(geometry, wire);
    let c = capacitance(wire);
    let f0 = resonant_frequency(l, c);

    Ok(CoilComputedResults {
        mean_turn_length: mean_turn,
        wire_length: length,
        conductor_volume: length * strand_area,
        dc_resistance: r,
        inductance: l,
        capacitance: c,
        resonant_frequency: f0,
        quality_factor: quality_factor(r, l, f0),
        max_turns_fit: max_turns_fit(geometry, wire),
        outer_buildup: outer_buildup(geometry, wire),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn strat_style_geometry() -> CoilGeometry {
        CoilGeometry::flatwork_mm(8.0, 15.9, 64.0, 11.1, 1.6)
    }

    fn strat_style_wire() -> WireParams {
        WireParams::awg(42, InsulationType::PlainEnamel, 8_000)
    }

    #[test]
    fn cylindrical_mean_turn_is_mean_circumference() {
        let g = CoilGeometry::cylindrical_mm(10.0, 20.0, 12.0, 1.0);
        assert_relative_eq!(mean_turn_length(&g), PI * 15.0e-3, epsilon = 1e-12);
    }

    #[test]
    fn flatwork_mean_turn_carries_racetrack_correction() {
        let g = strat_style_geometry();
        let mean_width = (8.0e-3 + 15.9e-3) / 2.0;
        let raw = 2.0 * (64.0e-3 - mean_width) + PI * mean_width;
        assert_relative_eq!(mean_turn_length(&g), raw * 0.92, epsilon = 1e-12);
    }

    #[test]
    fn vintage_single_coil_resistance_lands_in_range() {
        let r = dc_resistance(&strat_style_wire(), wire_length(&strat_style_geometry(), 8_000))
            .unwrap();
        assert!((4_000.0..8_000.0).contains(&r), "R = {r} Ω");
    }

    #[test]
    fn zero_diameter_wire_is_a_hard_error() {
        let mut wire = strat_style_wire();
        wire.bare_diameter = 0.0;
        assert!(matches!(
            dc_resistance(&wire, 1_000.0),
            Err(PickupPhysicsError::InvalidWireDiameter(_))
        ));
    }

    #[test]
    fn resonance_matches_closed_form_for_direct_lc() {
        let f0 = resonant_frequency(2.2, 110.0e-12);
        assert_relative_eq!(f0, 10_230.8, max_relative = 1e-4);
        let q = quality_factor(6_000.0, 2.2, f0);
        assert_relative_eq!(q, 23.57, max_relative = 1e-3);
    }

    #[test]
    fn degenerate_lc_resonance_is_zero() {
        assert_eq!(resonant_frequency(0.0, 110.0e-12), 0.0);
        assert_eq!(resonant_frequency(2.2, 0.0), 0.0);
    }

    #[test]
    fn lossless_coil_q_is_infinite() {
        assert!(quality_factor(0.0, 2.2, 10_000.0).is_infinite());
    }

    #[test]
    fn capacitance_scales_sublinearly_with_turns() {
        let mut half = strat_style_wire();
        half.turns = 4_000;
        let ratio = capacitance(&strat_style_wire()) / capacitance(&half);
        assert_relative_eq!(ratio, 2.0_f64.powf(0.35), max_relative = 1e-9);
        assert!(ratio < 2.0);
    }

    #[test]
    fn scatter_winding_lowers_capacitance() {
        let mut scatter = strat_style_wire();
        scatter.winding_style = WindingStyle::HandScatter;
        assert!(capacitance(&scatter) < capacitance(&strat_style_wire()));
    }

    #[test]
    fn flatwork_inductance_carries_calibration() {
        let g = strat_style_geometry();
        let wire = strat_style_wire();
        let radius = mean_turn_length(&g) / (2.0 * PI);
        let wheeler =
            1e-6 * radius.powi(2) * 8_000.0_f64.powi(2) / (0.0254 * (9.0 * radius + 10.0 * g.height));
        assert_relative_eq!(inductance(&g, &wire), wheeler * 1.12, max_relative = 1e-12);
    }

    #[test]
    fn single_layer_buildup_is_wire_diameter() {
        let g = strat_style_geometry();
        let mut wire = strat_style_wire();
        wire.turns = 50; // comfortably one layer on an 11 mm window
        assert_relative_eq!(outer_buildup(&g, &wire), wire.insulated_diameter());
    }

    #[test]
    fn multilayer_buildup_divides_by_root_packing() {
        let g = strat_style_geometry();
        let wire = strat_style_wire();
        let d = wire.insulated_diameter();
        let per_layer = (g.height / d).floor();
        let layers = (8_000.0 / per_layer).ceil();
        assert_relative_eq!(
            outer_buildup(&g, &wire),
            layers * d / 0.55_f64.sqrt(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn full_compute_is_consistent() {
        let results = compute_coil(&strat_style_geometry(), &strat_style_wire()).unwrap();
        assert!(results.inductance > 0.0);
        assert!(results.capacitance > 0.0);
        assert_relative_eq!(
            results.resonant_frequency,
            resonant_frequency(results.inductance, results.capacitance),
            max_relative = 1e-12
        );
        assert!(results.max_turns_fit > 2_000, "window fit came out implausibly low");
        let mut dense = strat_style_wire();
        dense.packing_factor = 0.85;
        assert!(max_turns_fit(&strat_style_geometry(), &dense) > results.max_turns_fit);
        assert!(format!("{}", results.resistance()).ends_with('Ω'));
    }

    #[test]
    fn inverted_extents_are_rejected() {
        let mut g = strat_style_geometry();
        g.outer_extent = g.inner_extent / 2.0;
        assert!(matches!(
            compute_coil(&g, &strat_style_wire()),
            Err(PickupPhysicsError::InvalidGeometry(_))
        ));
    }
}
