//! Step-up transformer model: gapped core magnetics, winding parasitics,
//! reflected load, saturation margin, and a bandwidth estimate.
//!
//! Parasitic elements are estimated, not solved: each estimator applies a
//! documented empirical multiplier from the calibration table and clamps the
//! result to the range observed on bench units.

use std::f64::consts::PI;

use crate::constants::{calibration, VACUUM_PERMEABILITY};
use crate::materials::{awg_bare_diameter, resistivity, ConductorGrade, CoreLossTier, CoreMaterial};
use crate::math::Scalar;
use crate::units::Inductance;

/// Frequency at which the qualitative core-loss tier is evaluated: the top of
/// the instrument's useful band.
const LOSS_EVAL_HZ: Scalar = 10.0e3;

/// Core lamination/form shape.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoreShape {
    /// Stacked E-I laminations.
    #[default]
    DoubleE,
    /// Wound toroid.
    Toroid,
    /// Cut C-core halves.
    CCore,
}

/// Magnetic core parameters. Dimensions in meters/square meters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreParams {
    /// Lamination/form shape.
    pub shape: CoreShape,
    /// Core material and grade.
    pub material: CoreMaterial,
    /// Effective magnetic cross-section, m².
    pub effective_area: Scalar,
    /// Effective magnetic path length, m.
    pub path_length: Scalar,
    /// Total air gap in the path, m (0 for an ungapped core).
    pub air_gap: Scalar,
}

/// Winding conductor kind.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConductorKind {
    /// Round magnet wire of the given AWG gauge.
    Wire {
        /// AWG gauge number.
        awg: u8,
    },
    /// Foil/plate conductor.
    Plate,
}

/// Winding parameters for both sides of the transformer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindingParams {
    /// Primary (pickup-side) turns.
    pub primary_turns: u32,
    /// Secondary (load-side) turns.
    pub secondary_turns: u32,
    /// Conductor kind shared by both windings.
    pub conductor: ConductorKind,
    /// Copper purity grade.
    pub grade: ConductorGrade,
    /// Whether primary and secondary are interleaved.
    pub interleaved: bool,
    /// Whether an electrostatic shield sits between the windings.
    pub shielded: bool,
}

/// Transformer parameter snapshot.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformerParams {
    /// Whether the transformer is in the signal path at all.
    pub enabled: bool,
    /// Core parameters.
    pub core: CoreParams,
    /// Winding parameters.
    pub winding: WindingParams,
}

impl Default for TransformerParams {
    /// A small 1:10 step-up on an ungapped M6 E-I core.
    fn default() -> Self {
        Self {
            enabled: false,
            core: CoreParams {
                shape: CoreShape::DoubleE,
                material: CoreMaterial::default(),
                effective_area: 64.0e-6,
                path_length: 40.0e-3,
                air_gap: 0.0,
            },
            winding: WindingParams {
                primary_turns: 250,
                secondary_turns: 2_500,
                conductor: ConductorKind::Wire { awg: 38 },
                grade: ConductorGrade::Standard,
                interleaved: true,
                shielded: false,
            },
        }
    }
}

/// Estimated parasitic elements of the wound transformer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformerParasitics {
    /// Primary-referred leakage inductance, H.
    pub leakage_inductance: Scalar,
    /// Primary-to-secondary capacitance, F.
    pub interwinding_capacitance: Scalar,
    /// Primary self-capacitance, F.
    pub primary_self_capacitance: Scalar,
    /// Secondary self-capacitance, F.
    pub secondary_self_capacitance: Scalar,
    /// Primary winding resistance, Ω.
    pub primary_resistance: Scalar,
    /// Secondary winding resistance, Ω.
    pub secondary_resistance: Scalar,
}

/// Derived transformer record for one parameter snapshot and load.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformerComputedResults {
    /// Turns ratio n = Ns/Np.
    pub turns_ratio: Scalar,
    /// Open-circuit voltage ratio (equals the turns ratio for this model).
    pub voltage_ratio: Scalar,
    /// Effective relative permeability after the air-gap correction.
    pub effective_permeability: Scalar,
    /// Primary inductance, H.
    pub primary_inductance: Scalar,
    /// Parasitic element bundle.
    pub parasitics: TransformerParasitics,
    /// Secondary load reflected to the primary, Ω.
    pub reflected_load: Scalar,
    /// Low −3 dB corner of the estimate, Hz.
    pub bandwidth_low: Scalar,
    /// High −3 dB corner of the estimate, Hz.
    pub bandwidth_high: Scalar,
    /// Peak core flux at the saturation check point, T.
    pub peak_flux: Scalar,
    /// Saturation margin, B_sat / B_peak (>1 means headroom).
    pub saturation_margin: Scalar,
    /// Qualitative core-loss tier at the top of the audio band.
    pub core_loss_tier: CoreLossTier,
}

impl TransformerComputedResults {
    /// Primary inductance as a displayable quantity.
    #[must_use]
    pub fn primary_inductance_display(&self) -> Inductance<Scalar> {
        Inductance::new(self.primary_inductance)
    }
}

/// Effective relative permeability of a gapped core,
/// μ_eff = μ_core / (1 + μ_core · gap / pathLength).
#[must_use]
pub fn effective_permeability(core: &CoreParams) -> Scalar {
    let mu = core.material.relative_permeability();
    if core.path_length <= 0.0 {
        return mu;
    }
    mu / (1.0 + mu * core.air_gap.max(0.0) / core.path_length)
}

/// Primary inductance, `μ₀ · μ_eff · N² · A / pathLength`, H.
#[must_use]
pub fn primary_inductance(core: &CoreParams, primary_turns: u32) -> Scalar {
    if core.path_length <= 0.0 {
        return 0.0;
    }
    VACUUM_PERMEABILITY
        * effective_permeability(core)
        * Scalar::from(primary_turns).powi(2)
        * core.effective_area
        / core.path_length
}

/// Primary-referred leakage inductance from the winding style, H.
#[must_use]
pub fn leakage_inductance(primary_inductance_h: Scalar, winding: &WindingParams) -> Scalar {
    let fraction = if winding.interleaved {
        calibration::LEAKAGE_FRACTION_INTERLEAVED
    } else {
        calibration::LEAKAGE_FRACTION_PLAIN
    };
    let (lo, hi) = calibration::LEAKAGE_FRACTION_RANGE;
    primary_inductance_h * fraction.clamp(lo, hi)
}

/// Primary-to-secondary capacitance estimate, F.
#[must_use]
pub fn interwinding_capacitance(winding: &WindingParams) -> Scalar {
    let mut c = calibration::INTERWINDING_CAPACITANCE_BASE_F;
    if winding.shielded {
        c *= calibration::INTERWINDING_SHIELD_FACTOR;
    }
    if winding.interleaved {
        c *= calibration::INTERWINDING_INTERLEAVE_FACTOR;
    }
    if matches!(winding.conductor, ConductorKind::Plate) {
        c *= calibration::INTERWINDING_PLATE_FACTOR;
    }
    let (lo, hi) = calibration::INTERWINDING_CAPACITANCE_RANGE_F;
    c.clamp(lo, hi)
}

/// Self-capacitance of one winding of `turns` turns, F.
#[must_use]
pub fn self_capacitance(turns: u32) -> Scalar {
    let c = calibration::SELF_CAPACITANCE_BASE_F * (Scalar::from(turns) / 1_000.0).sqrt();
    let (lo, hi) = calibration::SELF_CAPACITANCE_RANGE_F;
    c.clamp(lo, hi)
}

/// DC resistance of one winding, Ω.
///
/// Wire windings use the copper geometry over an estimated mean turn around
/// the core leg; plate windings use the calibrated per-turn figure.
#[must_use]
pub fn winding_resistance(core: &CoreParams, winding: &WindingParams, turns: u32) -> Scalar {
    match winding.conductor {
        ConductorKind::Wire { awg } => {
            // Square leg of the effective area, with allowance for build-up.
            let mean_turn = 4.0 * core.effective_area.sqrt() * 1.2;
            let d = awg_bare_diameter(awg);
            let area = PI * d.powi(2) / 4.0;
            resistivity(25.0, winding.grade) * Scalar::from(turns) * mean_turn / area
        }
        ConductorKind::Plate => Scalar::from(turns) * calibration::PLATE_RESISTANCE_PER_TURN,
    }
}

/// Secondary-side impedance reflected to the primary, `z / n²`.
#[must_use]
pub fn reflected_load(secondary_load_ohm: Scalar, turns_ratio: Scalar) -> Scalar {
    if turns_ratio <= 0.0 {
        return Scalar::INFINITY;
    }
    secondary_load_ohm / turns_ratio.powi(2)
}

/// Peak core flux density for a sine drive, `B = V / (4.44 f N A)`, T.
#[must_use]
pub fn peak_flux(core: &CoreParams, primary_turns: u32, v_rms: Scalar, hz: Scalar) -> Scalar {
    let denom = 4.44 * hz * Scalar::from(primary_turns) * core.effective_area;
    if denom <= 0.0 {
        return Scalar::INFINITY;
    }
    v_rms / denom
}

/// Computes the full derived transformer record against a secondary-side load
/// resistance (Ω).
#[must_use]
pub fn compute_transformer(
    params: &TransformerParams,
    secondary_load_ohm: Scalar,
) -> TransformerComputedResults {
    let np = params.winding.primary_turns.max(1);
    let ns = params.winding.secondary_turns.max(1);
    let ratio = Scalar::from(ns) / Scalar::from(np);

    let mu_eff = effective_permeability(&params.core);
    let lp = primary_inductance(&params.core, np);
    let parasitics = TransformerParasitics {
        leakage_inductance: leakage_inductance(lp, &params.winding),
        interwinding_capacitance: interwinding_capacitance(&params.winding),
        primary_self_capacitance: self_capacitance(np),
        secondary_self_capacitance: self_capacitance(ns),
        primary_resistance: winding_resistance(&params.core, &params.winding, np),
        secondary_resistance: winding_resistance(&params.core, &params.winding, ns),
    };

    let reflected = reflected_load(secondary_load_ohm, ratio);

    // Low corner: reflected load against the magnetizing inductance.
    let bandwidth_low = if lp > 0.0 && reflected.is_finite() {
        reflected / (2.0 * PI * lp)
    } else {
        0.0
    };
    // High corner: leakage inductance against the primary-referred
    // capacitance (secondary self-capacitance reflects by n²).
    let c_total = parasitics.interwinding_capacitance
        + parasitics.primary_self_capacitance
        + parasitics.secondary_self_capacitance * ratio.powi(2);
    let bandwidth_high = if parasitics.leakage_inductance > 0.0 && c_total > 0.0 {
        1.0 / (2.0 * PI * (parasitics.leakage_inductance * c_total).sqrt())
    } else {
        Scalar::INFINITY
    };

    let b_peak = peak_flux(
        &params.core,
        np,
        calibration::SATURATION_SOURCE_V,
        calibration::SATURATION_TEST_HZ,
    );
    let saturation_margin = if b_peak > 0.0 && b_peak.is_finite() {
        params.core.material.saturation_flux() / b_peak
    } else {
        0.0
    };

    TransformerComputedResults {
        turns_ratio: ratio,
        voltage_ratio: ratio,
        effective_permeability: mu_eff,
        primary_inductance: lp,
        parasitics,
        reflected_load: reflected,
        bandwidth_low,
        bandwidth_high,
        peak_flux: b_peak,
        saturation_margin,
        core_loss_tier: params.core.material.loss_tier(LOSS_EVAL_HZ),
    }
}
