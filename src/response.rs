//! System response: coil, load, and optional transformer composed into a
//! swept voltage transfer function, and the loaded-resonance search.
//!
//! The resonance search is an explicit three-branch state machine. A naive
//! peak/−3 dB scan fails silently at the sweep boundaries and on near-flat
//! responses, so classification comes first:
//!
//! 1. flat or edge peak: fall back to the theoretical series-RLC formulas on
//!    the loaded/reflected element values;
//! 2. both −3 dB crossings found: interpolate them for a sub-sample
//!    bandwidth;
//! 3. one crossing found: mirror the half-bandwidth from the peak.
//!
//! Every branch clamps Q to the configured plausible range.

use std::io;
use std::io::Write;

use num_complex::Complex;

use crate::coil::{resonant_frequency, CoilComputedResults};
use crate::constants::{angular_frequency, calibration};
use crate::load::{effective_resistance, load_impedance, tone_attenuation, LoadParams};
use crate::math::{infinite_impedance, parallel, safe_div, CScalar, Scalar};
use crate::sweep::{logspace, to_db};
use crate::transformer::TransformerComputedResults;

/// Frequency sweep bounds and sample count.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig {
    /// Sweep start, Hz.
    pub start_hz: Scalar,
    /// Sweep stop, Hz.
    pub stop_hz: Scalar,
    /// Log-spaced sample count.
    pub points: usize,
}

impl Default for SweepConfig {
    /// 20 Hz – 100 kHz over 400 log-spaced points.
    fn default() -> Self {
        Self {
            start_hz: 20.0,
            stop_hz: 100.0e3,
            points: 400,
        }
    }
}

/// Thresholds of the loaded-resonance search.
///
/// The defaults come from the calibration table; both the flatness ratio and
/// the Q clamp are empirical choices awaiting validation against measurement,
/// so they are parameters here rather than hard-coded.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResonanceSearchConfig {
    /// Peak-to-trough ratio below which the response counts as flat.
    pub flatness_ratio: Scalar,
    /// Fraction of the top of the sweep where a peak counts as out-of-band.
    pub edge_fraction: Scalar,
    /// Lower bound of the loaded-Q clamp.
    pub q_min: Scalar,
    /// Upper bound of the loaded-Q clamp.
    pub q_max: Scalar,
}

impl Default for ResonanceSearchConfig {
    fn default() -> Self {
        Self {
            flatness_ratio: calibration::FLAT_RESPONSE_RATIO,
            edge_fraction: calibration::PEAK_EDGE_FRACTION,
            q_min: calibration::LOADED_Q_MIN,
            q_max: calibration::LOADED_Q_MAX,
        }
    }
}

/// One sample of the swept, normalized transfer function.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputPoint {
    /// Sample frequency, Hz.
    pub frequency: Scalar,
    /// Transfer magnitude normalized to the 1 kHz reference, tone applied.
    pub magnitude: Scalar,
    /// Normalized magnitude in dB.
    pub magnitude_db: Scalar,
    /// Transfer phase, degrees.
    pub phase_deg: Scalar,
}

/// One sample of a raw impedance sweep.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpedancePoint {
    /// Sample frequency, Hz.
    pub frequency: Scalar,
    /// Complex impedance at the sample, Ω.
    pub impedance: CScalar,
}

/// Which branch of the search produced a [`LoadedResonance`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResonanceMethod {
    /// Both −3 dB crossings interpolated around the sampled peak.
    Interpolated,
    /// Only one crossing found; the half-bandwidth was mirrored.
    MirroredHalfWidth,
    /// Flat or out-of-band response; theoretical series-RLC formulas used.
    TheoreticalFallback,
}

/// Loaded resonance result with the branch that produced it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadedResonance {
    /// Loaded resonant frequency, Hz (0 when degenerate).
    pub frequency: Scalar,
    /// Loaded quality factor, clamped to the configured range.
    pub q: Scalar,
    /// Search branch taken.
    pub method: ResonanceMethod,
}

/// Effective series-RLC element values shared by the theoretical fallback and
/// the transient stage.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveRlc {
    /// Effective series resistance, Ω.
    pub resistance: Scalar,
    /// Effective inductance, H.
    pub inductance: Scalar,
    /// Effective capacitance, F.
    pub capacitance: Scalar,
}

fn capacitor_impedance(omega: Scalar, c: Scalar) -> CScalar {
    if omega.abs() < Scalar::EPSILON || c <= 0.0 {
        infinite_impedance()
    } else {
        Complex::new(0.0, -1.0 / (omega * c))
    }
}

/// Coil impedance at `omega`: series R + jωL in parallel with the winding
/// capacitance.
#[must_use]
pub fn coil_impedance(coil: &CoilComputedResults, omega: Scalar) -> CScalar {
    let series = Complex::new(coil.dc_resistance, omega * coil.inductance);
    parallel(series, capacitor_impedance(omega, coil.capacitance))
}

/// Unnormalized voltage transfer at `hz`, including the transformer path when
/// present.
fn transfer(
    coil: &CoilComputedResults,
    load: &LoadParams,
    transformer: Option<&TransformerComputedResults>,
    hz: Scalar,
) -> CScalar {
    let omega = angular_frequency(hz);
    let z_coil = coil_impedance(coil, omega);
    match transformer {
        None => {
            let z_load = load_impedance(load, omega);
            safe_div(z_load, z_coil + z_load)
        }
        Some(x) => {
            let n = x.turns_ratio;
            let p = &x.parasitics;
            // Secondary network reflected into the primary, in series with
            // the winding parasitics.
            let z_sec = load_impedance(load, omega) + Complex::new(p.secondary_resistance, 0.0);
            let series = Complex::new(p.primary_resistance, omega * p.leakage_inductance)
                + z_sec / Complex::new(n.powi(2), 0.0);
            let z_mag = Complex::new(0.0, omega * x.primary_inductance);
            let c_shunt = p.interwinding_capacitance
                + p.primary_self_capacitance
                + p.secondary_self_capacitance * n.powi(2);
            let z_in = parallel(
                parallel(z_mag, series),
                capacitor_impedance(omega, c_shunt),
            );
            safe_div(z_in, z_coil + z_in) * Complex::new(n, 0.0)
        }
    }
}

/// Sweeps the normalized voltage transfer function.
///
/// Magnitudes are normalized against the 1 kHz reference of the raw transfer
/// and then scaled by the tone-control shunt at each sample.
#[must_use]
pub fn frequency_response(
    coil: &CoilComputedResults,
    load: &LoadParams,
    transformer: Option<&TransformerComputedResults>,
    sweep: &SweepConfig,
) -> Vec<OutputPoint> {
    let reference = transfer(
        coil,
        load,
        transformer,
        calibration::NORMALIZATION_REFERENCE_HZ,
    )
    .norm();
    let reference = if reference.is_finite() && reference > 0.0 {
        reference
    } else {
        1.0
    };

    logspace(sweep.start_hz, sweep.stop_hz, sweep.points)
        .into_iter()
        .map(|hz| {
            let t = transfer(coil, load, transformer, hz);
            let tone = tone_attenuation(load, angular_frequency(hz));
            let magnitude = t.norm() / reference * tone;
            OutputPoint {
                frequency: hz,
                magnitude,
                magnitude_db: to_db(magnitude),
                phase_deg: t.arg().to_degrees(),
            }
        })
        .collect()
}

/// Sweeps the coil's own impedance (no load attached).
#[must_use]
pub fn impedance_sweep(coil: &CoilComputedResults, sweep: &SweepConfig) -> Vec<ImpedancePoint> {
    logspace(sweep.start_hz, sweep.stop_hz, sweep.points)
        .into_iter()
        .map(|hz| ImpedancePoint {
            frequency: hz,
            impedance: coil_impedance(coil, angular_frequency(hz)),
        })
        .collect()
}

/// Effective series-RLC values of the loaded system.
///
/// The load's parallel resistance converts to its series-equivalent damping
/// term `(L/C)/R`; a transformer adds its winding resistances and leakage,
/// and reflects the secondary-side capacitances by n².
#[must_use]
pub fn loaded_rlc(
    coil: &CoilComputedResults,
    load: &LoadParams,
    transformer: Option<&TransformerComputedResults>,
) -> EffectiveRlc {
    let cable_c = load.cable.total_capacitance();
    let r_load = effective_resistance(load);
    match transformer {
        None => {
            let inductance = coil.inductance;
            let capacitance = coil.capacitance + cable_c;
            let damping = if r_load > 0.0 && capacitance > 0.0 {
                (inductance / capacitance) / r_load
            } else {
                0.0
            };
            EffectiveRlc {
                resistance: coil.dc_resistance + damping,
                inductance,
                capacitance,
            }
        }
        Some(x) => {
            let n2 = x.turns_ratio.powi(2);
            let p = &x.parasitics;
            let inductance = coil.inductance + p.leakage_inductance;
            let capacitance = coil.capacitance
                + p.interwinding_capacitance
                + p.primary_self_capacitance
                + (cable_c + p.secondary_self_capacitance) * n2;
            let r_reflected = if n2 > 0.0 { r_load / n2 } else { r_load };
            let damping = if r_reflected > 0.0 && capacitance > 0.0 {
                (inductance / capacitance) / r_reflected
            } else {
                0.0
            };
            EffectiveRlc {
                resistance: coil.dc_resistance
                    + p.primary_resistance
                    + p.secondary_resistance / n2.max(Scalar::EPSILON)
                    + damping,
                inductance,
                capacitance,
            }
        }
    }
}

/// Theoretical loaded resonance from effective element values; the branch
/// taken when the sampled response cannot support a peak search.
fn theoretical_resonance(rlc: &EffectiveRlc, config: &ResonanceSearchConfig) -> LoadedResonance {
    let f0 = resonant_frequency(rlc.inductance, rlc.capacitance);
    let q = if rlc.resistance > 0.0 && rlc.capacitance > 0.0 {
        (rlc.inductance / rlc.capacitance).sqrt() / rlc.resistance
    } else {
        config.q_max
    };
    LoadedResonance {
        frequency: f0,
        q: q.clamp(config.q_min, config.q_max),
        method: ResonanceMethod::TheoreticalFallback,
    }
}

/// Linear interpolation of the crossing frequency between two samples.
fn interpolate_crossing(inner: &OutputPoint, outer: &OutputPoint, target: Scalar) -> Scalar {
    let dm = inner.magnitude - outer.magnitude;
    if dm.abs() <= Scalar::EPSILON {
        return outer.frequency;
    }
    outer.frequency
        + (target - outer.magnitude) * (inner.frequency - outer.frequency) / dm
}

/// Locates the loaded resonance peak and −3 dB bandwidth of a swept response.
///
/// `fallback` supplies the effective element values for the theoretical
/// branch. See the module docs for the branch structure.
#[must_use]
pub fn find_loaded_resonance(
    points: &[OutputPoint],
    fallback: &EffectiveRlc,
    config: &ResonanceSearchConfig,
) -> LoadedResonance {
    if points.len() < 3 {
        return theoretical_resonance(fallback, config);
    }

    let mut peak_idx = 0;
    let mut trough = Scalar::INFINITY;
    for (i, p) in points.iter().enumerate() {
        if p.magnitude > points[peak_idx].magnitude {
            peak_idx = i;
        }
        trough = trough.min(p.magnitude);
    }
    let peak = points[peak_idx];

    let flat = peak.magnitude / trough.max(Scalar::EPSILON) < config.flatness_ratio;
    let at_edge =
        peak_idx as Scalar >= (points.len() as Scalar - 1.0) * (1.0 - config.edge_fraction);
    if flat || at_edge {
        return theoretical_resonance(fallback, config);
    }

    let target = peak.magnitude / 2.0_f64.sqrt();

    let mut lower = None;
    for i in (0..peak_idx).rev() {
        if points[i].magnitude <= target {
            lower = Some(interpolate_crossing(&points[i + 1], &points[i], target));
            break;
        }
    }
    let mut upper = None;
    for i in (peak_idx + 1)..points.len() {
        if points[i].magnitude <= target {
            upper = Some(interpolate_crossing(&points[i - 1], &points[i], target));
            break;
        }
    }

    let (bandwidth, method) = match (lower, upper) {
        (Some(lo), Some(hi)) => (hi - lo, ResonanceMethod::Interpolated),
        (Some(lo), None) => (2.0 * (peak.frequency - lo), ResonanceMethod::MirroredHalfWidth),
        (None, Some(hi)) => (2.0 * (hi - peak.frequency), ResonanceMethod::MirroredHalfWidth),
        (None, None) => return theoretical_resonance(fallback, config),
    };
    if bandwidth <= 0.0 {
        return theoretical_resonance(fallback, config);
    }

    LoadedResonance {
        frequency: peak.frequency,
        q: (peak.frequency / bandwidth).clamp(config.q_min, config.q_max),
        method,
    }
}

/// Writes an [`OutputPoint`] series to a CSV writer.
///
/// # Errors
///
/// Propagates writer failures.
pub fn write_response_csv<W: Write>(mut w: W, points: &[OutputPoint]) -> io::Result<()> {
    writeln!(w, "frequency_hz,magnitude,magnitude_db,phase_deg")?;
    for p in points {
        writeln!(
            w,
            "{:.6e},{:.6e},{:.6e},{:.6e}",
            p.frequency, p.magnitude, p.magnitude_db, p.phase_deg
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::coil::{compute_coil, CoilGeometry, WireParams};
    use crate::materials::InsulationType;
    use crate::transformer::{compute_transformer, TransformerParams};

    use super::*;

    fn vintage_coil() -> CoilComputedResults {
        let geometry = CoilGeometry::flatwork_mm(8.0, 15.9, 64.0, 11.1, 1.6);
        let wire = WireParams::awg(42, InsulationType::PlainEnamel, 8_000);
        compute_coil(&geometry, &wire).unwrap()
    }

    fn synthetic(points: &[(Scalar, Scalar)]) -> Vec<OutputPoint> {
        points
            .iter()
            .map(|&(frequency, magnitude)| OutputPoint {
                frequency,
                magnitude,
                magnitude_db: to_db(magnitude),
                phase_deg: 0.0,
            })
            .collect()
    }

    fn bench_rlc() -> EffectiveRlc {
        EffectiveRlc {
            resistance: 6_000.0,
            inductance: 2.2,
            capacitance: 110.0e-12,
        }
    }

    #[test]
    fn response_is_normalized_at_the_reference() {
        let coil = vintage_coil();
        let load = LoadParams::default();
        let sweep = SweepConfig::default();
        let response = frequency_response(&coil, &load, None, &sweep);
        assert_eq!(response.len(), sweep.points);
        // The sample nearest 1 kHz should sit near unity, within the tone
        // shunt's reach.
        let near_ref = response
            .iter()
            .min_by(|a, b| {
                (a.frequency - 1_000.0)
                    .abs()
                    .total_cmp(&(b.frequency - 1_000.0).abs())
            })
            .unwrap();
        assert!((0.7..=1.1).contains(&near_ref.magnitude), "{}", near_ref.magnitude);
    }

    #[test]
    fn loaded_peak_of_a_vintage_rig_sits_in_the_presence_band() {
        let coil = vintage_coil();
        let load = LoadParams::default();
        let response = frequency_response(&coil, &load, None, &SweepConfig::default());
        let resonance =
            find_loaded_resonance(&response, &loaded_rlc(&coil, &load, None), &Default::default());
        assert_eq!(resonance.method, ResonanceMethod::Interpolated);
        assert!(
            (1_500.0..6_000.0).contains(&resonance.frequency),
            "peak at {} Hz",
            resonance.frequency
        );
        assert!((0.5..=10.0).contains(&resonance.q));
    }

    #[test]
    fn cable_capacitance_drags_the_peak_down() {
        let coil = vintage_coil();
        let short = LoadParams::default();
        let mut long = LoadParams::default();
        long.cable = crate::load::Cable::new(100.0e-12, 12.0);
        let sweep = SweepConfig::default();
        let cfg = ResonanceSearchConfig::default();
        let f_short = find_loaded_resonance(
            &frequency_response(&coil, &short, None, &sweep),
            &loaded_rlc(&coil, &short, None),
            &cfg,
        )
        .frequency;
        let f_long = find_loaded_resonance(
            &frequency_response(&coil, &long, None, &sweep),
            &loaded_rlc(&coil, &long, None),
            &cfg,
        )
        .frequency;
        assert!(f_long < f_short, "{f_long} !< {f_short}");
    }

    #[test]
    fn flat_response_takes_the_theoretical_branch() {
        // Peak-to-trough 1.4 < 1.5: must never reach the interpolation path.
        let points = synthetic(&[
            (100.0, 1.0),
            (300.0, 1.1),
            (1_000.0, 1.4),
            (3_000.0, 1.2),
            (10_000.0, 1.0),
        ]);
        let res = find_loaded_resonance(&points, &bench_rlc(), &Default::default());
        assert_eq!(res.method, ResonanceMethod::TheoreticalFallback);
        assert_relative_eq!(res.frequency, 10_230.8, max_relative = 1e-4);
    }

    #[test]
    fn edge_peak_takes_the_theoretical_branch() {
        let points = synthetic(&[
            (100.0, 1.0),
            (300.0, 1.2),
            (1_000.0, 1.6),
            (3_000.0, 2.4),
            (10_000.0, 4.0),
        ]);
        let res = find_loaded_resonance(&points, &bench_rlc(), &Default::default());
        assert_eq!(res.method, ResonanceMethod::TheoreticalFallback);
    }

    #[test]
    fn one_sided_crossing_mirrors_the_half_bandwidth() {
        // Peak near the low end: no lower crossing exists, upper does.
        let points = synthetic(&[
            (100.0, 3.0),
            (200.0, 3.2),
            (400.0, 2.4),
            (1_000.0, 1.2),
            (5_000.0, 0.6),
            (20_000.0, 0.3),
            (50_000.0, 0.2),
            (80_000.0, 0.15),
            (100_000.0, 0.1),
        ]);
        let res = find_loaded_resonance(&points, &bench_rlc(), &Default::default());
        assert_eq!(res.method, ResonanceMethod::MirroredHalfWidth);
        assert_relative_eq!(res.frequency, 200.0);
    }

    #[test]
    fn q_is_clamped_on_every_branch() {
        let cfg = ResonanceSearchConfig::default();
        // Fallback, nearly lossless: unclamped Q would be ~141 000.
        let lossless = EffectiveRlc {
            resistance: 1.0,
            ..bench_rlc()
        };
        let res = find_loaded_resonance(&[], &lossless, &cfg);
        assert_relative_eq!(res.q, cfg.q_max);
        // Fallback, heavily damped: unclamped Q would be ~1e-4.
        let damped = EffectiveRlc {
            resistance: 1.0e9,
            ..bench_rlc()
        };
        let res = find_loaded_resonance(&[], &damped, &cfg);
        assert_relative_eq!(res.q, cfg.q_min);
        // Interpolated, needle peak: bandwidth one part in ten thousand.
        let points = synthetic(&[
            (100.0, 1.0),
            (999.9, 1.0),
            (1_000.0, 100.0),
            (1_000.1, 1.0),
            (10_000.0, 0.5),
        ]);
        let res = find_loaded_resonance(&points, &bench_rlc(), &cfg);
        assert_eq!(res.method, ResonanceMethod::Interpolated);
        assert_relative_eq!(res.q, cfg.q_max);
    }

    #[test]
    fn transformer_path_reflects_capacitance_and_stays_finite() {
        let coil = vintage_coil();
        let load = LoadParams::default();
        let mut params = TransformerParams::default();
        params.enabled = true;
        let xfmr = compute_transformer(&params, effective_resistance(&load));

        let bare = loaded_rlc(&coil, &load, None);
        let through = loaded_rlc(&coil, &load, Some(&xfmr));
        assert!(through.capacitance > bare.capacitance);
        assert!(through.inductance > bare.inductance);

        let response = frequency_response(&coil, &load, Some(&xfmr), &SweepConfig::default());
        assert!(response.iter().all(|p| p.magnitude.is_finite()));
        let res = find_loaded_resonance(&response, &through, &Default::default());
        assert!((0.5..=10.0).contains(&res.q));
    }

    #[test]
    fn impedance_sweep_peaks_near_the_unloaded_resonance() {
        let coil = vintage_coil();
        let sweep = SweepConfig {
            start_hz: 100.0,
            stop_hz: 50.0e3,
            points: 600,
        };
        let zs = impedance_sweep(&coil, &sweep);
        let peak = zs
            .iter()
            .max_by(|a, b| a.impedance.norm().total_cmp(&b.impedance.norm()))
            .unwrap();
        assert_relative_eq!(
            peak.frequency,
            coil.resonant_frequency,
            max_relative = 0.05
        );
    }

    #[test]
    fn csv_writer_emits_header_and_rows() {
        let points = synthetic(&[(100.0, 1.0), (200.0, 2.0)]);
        let mut buf = Vec::new();
        write_response_csv(&mut buf, &points).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("frequency_hz,"));
        assert_eq!(text.lines().count(), 3);
    }
}
