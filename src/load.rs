//! Load network model: volume/tone pots, instrument cable, and amplifier
//! input composed into a frequency-dependent load impedance.
//!
//! Elements follow the lumped-component convention used throughout the crate:
//! value snapshots with typed storage, impedances evaluated per angular
//! frequency, and zero-frequency reactances guarded to open circuits.

use num_complex::Complex;

use crate::constants::calibration;
use crate::math::{parallel, CScalar, Scalar};
use crate::units::{Capacitance, Impedance};

/// Potentiometer with a wiper position.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Potentiometer {
    resistance: Impedance<Scalar>,
    position: Scalar,
}

impl Potentiometer {
    /// Creates a pot of `resistance_ohms` at `position` (0 = rolled off,
    /// 1 = full open; clamped).
    #[must_use]
    pub fn new(resistance_ohms: Scalar, position: Scalar) -> Self {
        Self {
            resistance: Impedance::new(resistance_ohms),
            position: position.clamp(0.0, 1.0),
        }
    }

    /// Full track resistance in ohms.
    #[must_use]
    pub fn resistance(&self) -> Scalar {
        self.resistance.value()
    }

    /// Wiper position in [0, 1].
    #[must_use]
    pub fn position(&self) -> Scalar {
        self.position
    }

    /// Resistance presented at the wiper: the full value linearly blended
    /// down toward the minimum wiper resistance as the pot rolls off.
    #[must_use]
    pub fn effective_resistance(&self) -> Scalar {
        let min = calibration::POT_MIN_WIPER_RESISTANCE;
        min + (self.resistance().max(min) - min) * self.position
    }
}

/// Instrument cable modeled as a lumped shunt capacitance.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cable {
    capacitance_per_meter: Capacitance<Scalar>,
    length: Scalar,
}

impl Cable {
    /// Creates a cable from per-meter capacitance (F/m) and length (m).
    #[must_use]
    pub fn new(capacitance_per_meter: Scalar, length: Scalar) -> Self {
        Self {
            capacitance_per_meter: Capacitance::new(capacitance_per_meter),
            length,
        }
    }

    /// Total shunt capacitance in farads.
    #[must_use]
    pub fn total_capacitance(&self) -> Scalar {
        self.capacitance_per_meter.value() * self.length
    }

    /// Shunt reactance at `omega` rad/s; open circuit at DC or for a
    /// zero-capacitance cable.
    #[must_use]
    pub fn impedance(&self, omega: Scalar) -> CScalar {
        let c = self.total_capacitance();
        if omega.abs() < Scalar::EPSILON || c <= 0.0 {
            Complex::new(Scalar::INFINITY, 0.0)
        } else {
            Complex::new(0.0, -1.0 / (omega * c))
        }
    }
}

/// Load parameter snapshot: everything downstream of the coil.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadParams {
    /// Volume potentiometer.
    pub volume_pot: Potentiometer,
    /// Tone potentiometer in series with the tone capacitor.
    pub tone_pot: Potentiometer,
    /// Tone capacitor, F.
    pub tone_capacitor: Scalar,
    /// Instrument cable.
    pub cable: Cable,
    /// Amplifier input resistance, Ω.
    pub amp_input: Scalar,
}

impl Default for LoadParams {
    /// The common passive rig: 250 kΩ pots full open, 22 nF tone capacitor,
    /// 5 m of 100 pF/m cable into a 1 MΩ amplifier input.
    fn default() -> Self {
        Self {
            volume_pot: Potentiometer::new(250.0e3, 1.0),
            tone_pot: Potentiometer::new(250.0e3, 1.0),
            tone_capacitor: 22.0e-9,
            cable: Cable::new(100.0e-12, 5.0),
            amp_input: 1.0e6,
        }
    }
}

/// Resistive part of the load: volume pot blended by position, in parallel
/// with the amplifier input.
#[must_use]
pub fn effective_resistance(load: &LoadParams) -> Scalar {
    let pot = load.volume_pot.effective_resistance();
    let amp = load.amp_input;
    if pot + amp <= 0.0 {
        return 0.0;
    }
    pot * amp / (pot + amp)
}

/// Complete load impedance at `omega`: effective resistance in parallel with
/// the cable's shunt reactance.
#[must_use]
pub fn load_impedance(load: &LoadParams, omega: Scalar) -> CScalar {
    let resistive = Complex::new(effective_resistance(load), 0.0);
    parallel(resistive, load.cable.impedance(omega))
}

/// Tone-control attenuation factor at `omega`, in
/// [[`calibration::TONE_ATTENUATION_FLOOR`], 1.0].
///
/// The tone pot and capacitor form a frequency-dependent shunt; attenuation
/// is the simplified series/shunt divider against the source-impedance
/// reference.
#[must_use]
pub fn tone_attenuation(load: &LoadParams, omega: Scalar) -> Scalar {
    let r = load.tone_pot.effective_resistance();
    let shunt = if omega.abs() < Scalar::EPSILON || load.tone_capacitor <= 0.0 {
        Scalar::INFINITY
    } else {
        Complex::new(r, -1.0 / (omega * load.tone_capacitor)).norm()
    };
    if !shunt.is_finite() {
        return 1.0;
    }
    (shunt / (shunt + calibration::TONE_SOURCE_IMPEDANCE))
        .clamp(calibration::TONE_ATTENUATION_FLOOR, 1.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::constants::angular_frequency;

    use super::*;

    #[test]
    fn pot_blends_linearly_toward_wiper_minimum() {
        let full = Potentiometer::new(250.0e3, 1.0);
        let half = Potentiometer::new(250.0e3, 0.5);
        let off = Potentiometer::new(250.0e3, 0.0);
        assert_relative_eq!(full.effective_resistance(), 250.0e3, max_relative = 1e-12);
        assert_relative_eq!(
            half.effective_resistance(),
            100.0 + (250.0e3 - 100.0) * 0.5,
            max_relative = 1e-12
        );
        assert_relative_eq!(off.effective_resistance(), 100.0, max_relative = 1e-12);
    }

    #[test]
    fn effective_resistance_is_pot_parallel_amp() {
        let load = LoadParams::default();
        assert_relative_eq!(
            effective_resistance(&load),
            250.0e3 * 1.0e6 / 1.25e6,
            max_relative = 1e-9
        );
    }

    #[test]
    fn load_is_resistive_at_dc_and_capacitive_up_high() {
        let load = LoadParams::default();
        let dc = load_impedance(&load, 0.0);
        assert_relative_eq!(dc.re, effective_resistance(&load), max_relative = 1e-9);
        assert_relative_eq!(dc.im, 0.0);

        let hf = load_impedance(&load, angular_frequency(50.0e3));
        assert!(hf.norm() < dc.re / 10.0, "cable should dominate at 50 kHz");
        assert!(hf.im < 0.0);
    }

    #[test]
    fn zero_length_cable_leaves_the_load_resistive() {
        let mut load = LoadParams::default();
        load.cable = Cable::new(100.0e-12, 0.0);
        let z = load_impedance(&load, angular_frequency(10.0e3));
        assert_relative_eq!(z.re, effective_resistance(&load), max_relative = 1e-9);
    }

    #[test]
    fn tone_attenuation_stays_in_range_and_bites_when_rolled_off() {
        let open = LoadParams::default();
        let mut rolled = LoadParams::default();
        rolled.tone_pot = Potentiometer::new(250.0e3, 0.0);

        for f in [100.0, 1_000.0, 5_000.0, 20_000.0] {
            let w = angular_frequency(f);
            let a_open = tone_attenuation(&open, w);
            let a_rolled = tone_attenuation(&rolled, w);
            assert!((0.1..=1.0).contains(&a_open));
            assert!((0.1..=1.0).contains(&a_rolled));
            assert!(a_rolled <= a_open);
        }
        // Rolled-off tone at treble frequencies hits the floor.
        assert_relative_eq!(
            tone_attenuation(&rolled, angular_frequency(20.0e3)),
            0.1,
            max_relative = 1e-9
        );
    }

    #[test]
    fn tone_shunt_is_transparent_at_dc() {
        let load = LoadParams::default();
        assert_relative_eq!(tone_attenuation(&load, 0.0), 1.0);
    }
}
