//! Baseline physical constants and the versioned empirical calibration table.
//!
//! ## Accuracy
//!
//! SI constants follow CODATA recommended values (2019 SI revision); see the
//! NIST Reference on Constants, Units, and Uncertainty:
//! <https://physics.nist.gov/cuu/Constants/>. Copper properties follow the
//! IACS annealed-copper standard.
//!
//! ## Calibration
//!
//! Everything in [`calibration`] is empirical: fitted against bench
//! measurements of wound coils, magnets, and transformers rather than derived
//! from first principles. The constants are centralized here so each value's
//! provenance is testable and so [`calibration::MODEL_VERSION`] can act as a
//! stable reproducibility contract: results are only comparable between runs
//! computed under the same model version.

use std::f64::consts::PI;

/// Vacuum permeability μ₀ in henries per meter (H/m).
/// Approximate value: 1.25663706212 × 10⁻⁶ H/m (CODATA 2018).
pub const VACUUM_PERMEABILITY: f64 = 1.256_637_062_12e-6;

/// Resistivity of 100 % IACS annealed copper at 20 °C, in ohm-meters.
pub const COPPER_RESISTIVITY_20C: f64 = 1.724_1e-8;

/// Linear temperature coefficient of copper resistivity, per kelvin,
/// referenced to 20 °C.
pub const COPPER_TEMP_COEFFICIENT: f64 = 3.93e-3;

/// Reference temperature for resistivity figures, in °C.
pub const RESISTIVITY_REFERENCE_C: f64 = 20.0;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: f64) -> f64 {
    2.0 * PI * hz
}

/// Empirically calibrated model constants.
pub mod calibration {
    /// Calibration revision identifier. Bump whenever any constant in this
    /// module changes so downstream regression data can be re-pinned.
    pub const MODEL_VERSION: &str = "2026.2";

    // -- coil geometry ------------------------------------------------------

    /// Effective-length correction for the flatwork racetrack perimeter,
    /// fitted against measured DC resistances of vintage flatwork coils.
    pub const FLATWORK_PERIMETER_CORRECTION: f64 = 0.92;

    /// Wire-length correction for layer build-up over a nominal winding.
    pub const WIRE_BUILDUP_FACTOR: f64 = 1.03;

    /// Inductance multiplier for flatwork cross-sections; the short-solenoid
    /// approximation systematically under-reads wide, shallow windings.
    pub const FLATWORK_INDUCTANCE_CALIBRATION: f64 = 1.12;

    // -- coil capacitance ---------------------------------------------------

    /// Parasitic capacitance at [`CAPACITANCE_REFERENCE_TURNS`] turns, in
    /// farads, before style/packing/insulation multipliers.
    pub const CAPACITANCE_BASE_F: f64 = 110.0e-12;

    /// Turn count at which [`CAPACITANCE_BASE_F`] was measured.
    pub const CAPACITANCE_REFERENCE_TURNS: f64 = 8_000.0;

    /// Sub-linear turn-count exponent for parasitic capacitance. Inter-turn
    /// capacitance is dominated by adjacent-layer coupling, not total turn
    /// count, so C ∝ N^0.35 rather than N.
    pub const CAPACITANCE_TURNS_EXPONENT: f64 = 0.35;

    // -- magnets ------------------------------------------------------------

    /// Equivalent pole radius for bar magnets driving steel pole pieces, in
    /// meters, when no explicit radius is supplied.
    pub const BAR_POLE_RADIUS_DEFAULT: f64 = 2.5e-3;

    /// Flux retained after the pole-piece reluctance of a bar-magnet circuit.
    pub const BAR_RELUCTANCE_LOSS: f64 = 0.6;

    /// Magnetic-circuit efficiency of a blade/rail pole.
    pub const BLADE_CIRCUIT_EFFICIENCY: f64 = 0.18;

    /// Field bonus for twin-magnet blade assemblies.
    pub const BLADE_TWIN_MAGNET_BONUS: f64 = 1.35;

    /// Reference blade magnet volume for the square-root volume scaling, m³.
    pub const BLADE_REFERENCE_VOLUME: f64 = 1.0e-6;

    /// Central-difference step for the numerical field gradient, in meters
    /// (0.1 mm).
    pub const GRADIENT_STEP: f64 = 1.0e-4;

    // -- sensitivity --------------------------------------------------------

    /// Scale applied to the raw Faraday-law product to land on the
    /// dimensionless sensitivity index.
    pub const SENSITIVITY_SCALE: f64 = 1.0e-5;

    /// Flux coupling between magnet and winding; fraction of the pole flux
    /// change actually linked by the coil.
    pub const FLUX_COUPLING: f64 = 0.65;

    /// Reference string vibration frequency for the Faraday term, in hertz.
    pub const REFERENCE_STRING_HZ: f64 = 440.0;

    /// Geometry correction for rod poles; the raw formula over-reads rods.
    pub const SENSITIVITY_ROD_CORRECTION: f64 = 0.4;
    /// Geometry correction for bar magnets under pole pieces (reference).
    pub const SENSITIVITY_BAR_CORRECTION: f64 = 1.0;
    /// Geometry correction for blade poles; the raw formula under-reads rails.
    pub const SENSITIVITY_BLADE_CORRECTION: f64 = 1.8;

    // -- string pull --------------------------------------------------------

    /// Distance exponent of the string-pull heuristic, `B² / dⁿ`.
    pub const STRING_PULL_EXPONENT: f64 = 1.5;

    /// `B²/dⁿ` value (T²·m⁻ⁿ) treated as certain sustain-killing pull; the
    /// index is the ratio against this, clamped to [0, 1].
    pub const STRING_PULL_DANGER_REF: f64 = 800.0;

    /// Index below this tier cut is safe.
    pub const STRING_PULL_SAFE_BELOW: f64 = 0.35;
    /// Index below this tier cut is caution; at or above it, danger.
    pub const STRING_PULL_CAUTION_BELOW: f64 = 0.7;

    // -- load & tone --------------------------------------------------------

    /// Minimum wiper-to-ground resistance of a potentiometer, in ohms.
    pub const POT_MIN_WIPER_RESISTANCE: f64 = 100.0;

    /// Source-impedance reference the tone shunt divides against, in ohms.
    pub const TONE_SOURCE_IMPEDANCE: f64 = 25.0e3;

    /// Floor of the tone-control attenuation factor.
    pub const TONE_ATTENUATION_FLOOR: f64 = 0.1;

    // -- transformers -------------------------------------------------------

    /// Leakage fraction of primary inductance for interleaved windings.
    pub const LEAKAGE_FRACTION_INTERLEAVED: f64 = 0.015;
    /// Leakage fraction of primary inductance for plain layer windings.
    pub const LEAKAGE_FRACTION_PLAIN: f64 = 0.045;
    /// Clamp range for the leakage fraction.
    pub const LEAKAGE_FRACTION_RANGE: (f64, f64) = (0.005, 0.1);

    /// Base primary-to-secondary capacitance, in farads.
    pub const INTERWINDING_CAPACITANCE_BASE_F: f64 = 25.0e-12;
    /// Inter-winding capacitance multiplier with an electrostatic shield.
    pub const INTERWINDING_SHIELD_FACTOR: f64 = 0.35;
    /// Inter-winding capacitance multiplier for interleaved windings.
    pub const INTERWINDING_INTERLEAVE_FACTOR: f64 = 1.8;
    /// Inter-winding capacitance multiplier for plate (foil) conductors.
    pub const INTERWINDING_PLATE_FACTOR: f64 = 1.4;
    /// Clamp range for inter-winding capacitance, farads.
    pub const INTERWINDING_CAPACITANCE_RANGE_F: (f64, f64) = (2.0e-12, 200.0e-12);

    /// Winding self-capacitance at 1 000 turns, in farads.
    pub const SELF_CAPACITANCE_BASE_F: f64 = 12.0e-12;
    /// Clamp range for winding self-capacitance, farads.
    pub const SELF_CAPACITANCE_RANGE_F: (f64, f64) = (3.0e-12, 100.0e-12);

    /// Resistance per turn of a plate (foil) conductor, in ohms.
    pub const PLATE_RESISTANCE_PER_TURN: f64 = 1.2e-3;

    /// RMS source voltage used for the saturation-margin check, in volts.
    /// A hot pickup peaks near half a volt.
    pub const SATURATION_SOURCE_V: f64 = 0.5;

    /// Frequency of the saturation-margin check, in hertz (low E fundamental,
    /// the worst case for core flux).
    pub const SATURATION_TEST_HZ: f64 = 82.4;

    // -- loaded-resonance search -------------------------------------------

    /// Peak-to-trough magnitude ratio below which a swept response is
    /// classified flat (≈3.5 dB) and the theoretical fallback is used.
    pub const FLAT_RESPONSE_RATIO: f64 = 1.5;

    /// Fraction of the top of the sweep in which a peak is treated as
    /// out-of-band (resonance likely above the sampled range).
    pub const PEAK_EDGE_FRACTION: f64 = 0.03;

    /// Plausible loaded-Q range; the lumped model is an approximation, so
    /// values outside this range are clamped, not rejected.
    pub const LOADED_Q_MIN: f64 = 0.5;
    /// Upper bound of the loaded-Q clamp.
    pub const LOADED_Q_MAX: f64 = 10.0;

    /// Frequency the swept transfer magnitude is normalized against, hertz.
    pub const NORMALIZATION_REFERENCE_HZ: f64 = 1_000.0;
}
