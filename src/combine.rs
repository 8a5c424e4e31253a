//! Multi-coil combination: two coils wired in series or parallel, with
//! mutual inductance and phase inversion.
//!
//! The mutual term is M = k·√(L₁L₂) for a named coupling coefficient k.
//! Out-of-phase series inductance is clamped non-negative; the parallel
//! combination guards its denominator the same way the impedance algebra
//! does.

use crate::coil::{quality_factor, resonant_frequency, CoilComputedResults};
use crate::math::Scalar;

/// How two coils are wired together.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoilWiring {
    /// End-to-end, impedances in series.
    Series,
    /// Side-by-side, impedances in parallel.
    Parallel,
}

/// Relative electrical phase of the two coils.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoilPhase {
    /// Signals add.
    InPhase,
    /// One coil inverted; common signal cancels.
    OutOfPhase,
}

/// Combined electrical model of a two-coil assembly.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedCoil {
    /// Combined DC resistance, Ω.
    pub resistance: Scalar,
    /// Combined inductance including the mutual term, H.
    pub inductance: Scalar,
    /// Combined parasitic capacitance, F.
    pub capacitance: Scalar,
    /// Resonant frequency of the combined R/L/C, Hz.
    pub resonant_frequency: Scalar,
    /// Quality factor of the combined R/L/C.
    pub quality_factor: Scalar,
}

/// Combines two coil models wired `wiring`/`phase` with mutual coupling
/// coefficient `k` (clamped to [0, 1]).
#[must_use]
pub fn combine(
    a: &CoilComputedResults,
    b: &CoilComputedResults,
    wiring: CoilWiring,
    phase: CoilPhase,
    k: Scalar,
) -> CombinedCoil {
    let k = k.clamp(0.0, 1.0);
    let mutual = k * (a.inductance * b.inductance).sqrt();

    let (resistance, inductance) = match wiring {
        CoilWiring::Series => {
            let r = a.dc_resistance + b.dc_resistance;
            let l = match phase {
                CoilPhase::InPhase => a.inductance + b.inductance + 2.0 * mutual,
                CoilPhase::OutOfPhase => {
                    (a.inductance + b.inductance - 2.0 * mutual).max(0.0)
                }
            };
            (r, l)
        }
        CoilWiring::Parallel => {
            let r_sum = a.dc_resistance + b.dc_resistance;
            let r = if r_sum > 0.0 {
                a.dc_resistance * b.dc_resistance / r_sum
            } else {
                0.0
            };
            let denominator = match phase {
                CoilPhase::InPhase => a.inductance + b.inductance - 2.0 * mutual,
                CoilPhase::OutOfPhase => a.inductance + b.inductance + 2.0 * mutual,
            };
            let numerator = a.inductance * b.inductance - mutual.powi(2);
            let l = if denominator > 0.0 {
                (numerator / denominator).max(0.0)
            } else {
                0.0
            };
            (r, l)
        }
    };

    // Winding capacitances sit side by side across the output in both
    // wirings.
    let capacitance = a.capacitance + b.capacitance;
    let f0 = resonant_frequency(inductance, capacitance);

    CombinedCoil {
        resistance,
        inductance,
        capacitance,
        resonant_frequency: f0,
        quality_factor: quality_factor(resistance, inductance, f0),
    }
}

/// Qualitative output gain of the wiring relative to a single coil.
///
/// Independent of the detailed electrical combination: in-phase series sums
/// the signals, out-of-phase series leaves only the thin "quack" residue.
#[must_use]
pub fn output_multiplier(wiring: CoilWiring, phase: CoilPhase) -> Scalar {
    match (wiring, phase) {
        (CoilWiring::Series, CoilPhase::InPhase) => 2.0,
        (CoilWiring::Series, CoilPhase::OutOfPhase) => 0.3,
        (CoilWiring::Parallel, CoilPhase::InPhase) => 1.0,
        (CoilWiring::Parallel, CoilPhase::OutOfPhase) => 0.5,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::coil::{compute_coil, CoilGeometry, WireParams};
    use crate::materials::InsulationType;

    use super::*;

    fn humbucker_half() -> CoilComputedResults {
        let geometry = CoilGeometry::rectangular_mm(12.0, 18.0, 38.0, 7.0, 0.8);
        let wire = WireParams::awg(43, InsulationType::PlainEnamel, 5_000);
        compute_coil(&geometry, &wire).unwrap()
    }

    #[test]
    fn in_phase_series_of_identical_coils() {
        let coil = humbucker_half();
        let k = 0.35;
        let combined = combine(&coil, &coil, CoilWiring::Series, CoilPhase::InPhase, k);
        assert_relative_eq!(combined.resistance, 2.0 * coil.dc_resistance, max_relative = 1e-12);
        assert_relative_eq!(
            combined.inductance,
            2.0 * coil.inductance * (1.0 + k),
            max_relative = 1e-12
        );
        assert_relative_eq!(combined.capacitance, 2.0 * coil.capacitance, max_relative = 1e-12);
    }

    #[test]
    fn out_of_phase_series_subtracts_the_mutual_term() {
        let coil = humbucker_half();
        let k = 0.35;
        let combined = combine(&coil, &coil, CoilWiring::Series, CoilPhase::OutOfPhase, k);
        assert_relative_eq!(
            combined.inductance,
            2.0 * coil.inductance * (1.0 - k),
            max_relative = 1e-12
        );
    }

    #[test]
    fn out_of_phase_series_never_goes_negative() {
        let coil = humbucker_half();
        let combined = combine(&coil, &coil, CoilWiring::Series, CoilPhase::OutOfPhase, 1.0);
        assert_eq!(combined.inductance, 0.0);
        assert_eq!(combined.resonant_frequency, 0.0);
    }

    #[test]
    fn uncoupled_parallel_of_identical_coils_halves_r_and_l() {
        let coil = humbucker_half();
        let combined = combine(&coil, &coil, CoilWiring::Parallel, CoilPhase::InPhase, 0.0);
        assert_relative_eq!(combined.resistance, coil.dc_resistance / 2.0, max_relative = 1e-12);
        assert_relative_eq!(combined.inductance, coil.inductance / 2.0, max_relative = 1e-12);
        assert_relative_eq!(combined.capacitance, 2.0 * coil.capacitance, max_relative = 1e-12);
    }

    #[test]
    fn combined_resonance_is_recomputed_from_combined_elements() {
        let coil = humbucker_half();
        let combined = combine(&coil, &coil, CoilWiring::Series, CoilPhase::InPhase, 0.35);
        assert_relative_eq!(
            combined.resonant_frequency,
            resonant_frequency(combined.inductance, combined.capacitance),
            max_relative = 1e-12
        );
        // More L against more C: the pair resonates below a single coil.
        assert!(combined.resonant_frequency < coil.resonant_frequency);
    }

    #[test]
    fn coupling_coefficient_is_clamped() {
        let coil = humbucker_half();
        let over = combine(&coil, &coil, CoilWiring::Series, CoilPhase::InPhase, 1.7);
        let unity = combine(&coil, &coil, CoilWiring::Series, CoilPhase::InPhase, 1.0);
        assert_relative_eq!(over.inductance, unity.inductance, max_relative = 1e-12);
    }

    #[test]
    fn output_multipliers_match_the_wiring_lore() {
        assert_relative_eq!(output_multiplier(CoilWiring::Series, CoilPhase::InPhase), 2.0);
        assert_relative_eq!(output_multiplier(CoilWiring::Series, CoilPhase::OutOfPhase), 0.3);
        assert_relative_eq!(output_multiplier(CoilWiring::Parallel, CoilPhase::InPhase), 1.0);
        assert_relative_eq!(output_multiplier(CoilWiring::Parallel, CoilPhase::OutOfPhase), 0.5);
    }
}
