//! Transient derivation: loaded resonance and Q to damped-sinusoid impulse
//! and step series, plus qualitative attack/decay descriptors.
//!
//! The loaded system is treated as a single damped oscillator with decay time
//! constant τ = Q/(πf₀). Sampled series are peak-normalized to [−1, 1]; a
//! degenerate signal (zero resonance or Q) stays identically zero.

use std::io;
use std::io::Write;

use crate::math::Scalar;
use crate::sweep::time_axis;

/// One sample of a time-domain response.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulsePoint {
    /// Sample time, s.
    pub time: Scalar,
    /// Peak-normalized amplitude in [−1, 1].
    pub amplitude: Scalar,
}

/// Qualitative attack-speed label, thresholded on loaded Q.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackSpeed {
    /// Heavily damped; the transient blooms rather than snaps.
    Soft,
    /// Moderate damping, rounded front edge.
    Rounded,
    /// Clear percussive front edge.
    Snappy,
    /// Underdamped spike with audible ring.
    Sharp,
}

/// Deterministic descriptors of the transient character.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransientDescriptors {
    /// Time for the envelope to decay to 10 %, s.
    pub decay_to_10_percent: Scalar,
    /// Ring period 1/f₀, s.
    pub ring_period: Scalar,
    /// Oscillation cycles completed before the 10 % point.
    pub cycle_count: Scalar,
    /// Attack-speed label.
    pub attack: AttackSpeed,
}

fn decay_tau(f0_hz: Scalar, q: Scalar) -> Scalar {
    q / (std::f64::consts::PI * f0_hz)
}

fn peak_normalize(mut samples: Vec<ImpulsePoint>) -> Vec<ImpulsePoint> {
    let peak = samples
        .iter()
        .map(|p| p.amplitude.abs())
        .fold(0.0_f64, Scalar::max);
    if peak > 0.0 {
        for p in &mut samples {
            p.amplitude /= peak;
        }
    }
    samples
}

/// Impulse response `e^(−t/τ)·sin(2πf₀t)` sampled over `duration` seconds
/// with `points` samples, peak-normalized.
#[must_use]
pub fn impulse_response(f0_hz: Scalar, q: Scalar, duration: Scalar, points: usize) -> Vec<ImpulsePoint> {
    if f0_hz <= 0.0 || q <= 0.0 {
        return time_axis(duration, points)
            .into_iter()
            .map(|time| ImpulsePoint { time, amplitude: 0.0 })
            .collect();
    }
    let tau = decay_tau(f0_hz, q);
    let omega = 2.0 * std::f64::consts::PI * f0_hz;
    let samples = time_axis(duration, points)
        .into_iter()
        .map(|time| ImpulsePoint {
            time,
            amplitude: (-time / tau).exp() * (omega * time).sin(),
        })
        .collect();
    peak_normalize(samples)
}

/// Step response `1 − e^(−t/τ)(cos ωt + sin ωt/(ωτ))` sampled over
/// `duration` seconds with `points` samples, peak-normalized.
#[must_use]
pub fn step_response(f0_hz: Scalar, q: Scalar, duration: Scalar, points: usize) -> Vec<ImpulsePoint> {
    if f0_hz <= 0.0 || q <= 0.0 {
        return time_axis(duration, points)
            .into_iter()
            .map(|time| ImpulsePoint { time, amplitude: 0.0 })
            .collect();
    }
    let tau = decay_tau(f0_hz, q);
    let omega = 2.0 * std::f64::consts::PI * f0_hz;
    let samples = time_axis(duration, points)
        .into_iter()
        .map(|time| {
            let envelope = (-time / tau).exp();
            let ringing = (omega * time).cos() + (omega * time).sin() / (omega * tau);
            ImpulsePoint {
                time,
                amplitude: 1.0 - envelope * ringing,
            }
        })
        .collect();
    peak_normalize(samples)
}

/// Attack-speed label for a loaded Q.
#[must_use]
pub fn attack_speed(q: Scalar) -> AttackSpeed {
    if q < 1.2 {
        AttackSpeed::Soft
    } else if q < 3.0 {
        AttackSpeed::Rounded
    } else if q < 6.0 {
        AttackSpeed::Snappy
    } else {
        AttackSpeed::Sharp
    }
}

/// Derives the qualitative transient descriptors from loaded resonance and Q.
#[must_use]
pub fn descriptors(f0_hz: Scalar, q: Scalar) -> TransientDescriptors {
    if f0_hz <= 0.0 || q <= 0.0 {
        return TransientDescriptors {
            decay_to_10_percent: 0.0,
            ring_period: 0.0,
            cycle_count: 0.0,
            attack: AttackSpeed::Soft,
        };
    }
    let tau = decay_tau(f0_hz, q);
    let decay = tau * 10.0_f64.ln();
    let ring_period = 1.0 / f0_hz;
    TransientDescriptors {
        decay_to_10_percent: decay,
        ring_period,
        cycle_count: decay / ring_period,
        attack: attack_speed(q),
    }
}

/// Writes an [`ImpulsePoint`] series to a CSV writer.
///
/// # Errors
///
/// Propagates writer failures.
pub fn write_impulse_csv<W: Write>(mut w: W, points: &[ImpulsePoint]) -> io::Result<()> {
    writeln!(w, "time_s,amplitude")?;
    for p in points {
        writeln!(w, "{:.6e},{:.6e}", p.time, p.amplitude)?;
    }
    Ok(())
}
