//! Material property tables and lookups.
//!
//! All tables are read-only data keyed by material/style enums and dispatched
//! with exhaustive matches. Name-based lookups (`from_name`) fail over to a
//! documented default instead of erroring, since presets from older files may
//! carry keys this model revision no longer lists.

use crate::constants::{
    COPPER_RESISTIVITY_20C, COPPER_TEMP_COEFFICIENT, RESISTIVITY_REFERENCE_C,
};
use crate::math::Scalar;

// ---------------------------------------------------------------------------
// Conductors
// ---------------------------------------------------------------------------

/// Copper purity grade of magnet wire.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConductorGrade {
    /// Electrolytic tough-pitch copper, 100 % IACS reference.
    #[default]
    Standard,
    /// Oxygen-free copper, slightly above the IACS reference conductivity.
    OxygenFree,
    /// Ohno continuous-cast copper, the highest purity in common use.
    ContinuousCast,
}

impl ConductorGrade {
    /// Resistivity multiplier relative to the 100 % IACS reference.
    #[must_use]
    pub const fn resistivity_multiplier(self) -> Scalar {
        match self {
            Self::Standard => 1.0,
            Self::OxygenFree => 0.985,
            Self::ContinuousCast => 0.975,
        }
    }
}

/// Copper resistivity in Ω·m at `temperature_c`, corrected for purity grade.
///
/// Linear temperature coefficient from the 20 °C reference.
#[must_use]
pub fn resistivity(temperature_c: Scalar, grade: ConductorGrade) -> Scalar {
    COPPER_RESISTIVITY_20C
        * (1.0 + COPPER_TEMP_COEFFICIENT * (temperature_c - RESISTIVITY_REFERENCE_C))
        * grade.resistivity_multiplier()
}

/// Bare conductor diameter in meters for an AWG gauge number.
///
/// Uses the exact AWG geometric progression, d = 0.127 mm · 92^((36−n)/39).
#[must_use]
pub fn awg_bare_diameter(awg: u8) -> Scalar {
    0.127e-3 * 92.0_f64.powf((36.0 - Scalar::from(awg)) / 39.0)
}

// ---------------------------------------------------------------------------
// Wire insulation and winding style
// ---------------------------------------------------------------------------

/// Magnet wire insulation film.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsulationType {
    /// Thin vintage-style enamel film.
    #[default]
    PlainEnamel,
    /// Heavy polyvinyl-formal film.
    Formvar,
    /// Solderable polyurethane film.
    PolyUrethane,
    /// Polyurethane base with a nylon overcoat.
    PolyNylon,
}

impl InsulationType {
    /// Overall-diameter factor over the bare conductor.
    #[must_use]
    pub const fn build_factor(self) -> Scalar {
        match self {
            Self::PlainEnamel => 1.09,
            Self::Formvar => 1.14,
            Self::PolyUrethane => 1.10,
            Self::PolyNylon => 1.16,
        }
    }

    /// Parasitic-capacitance multiplier; thicker film spaces adjacent layers
    /// further apart.
    #[must_use]
    pub const fn capacitance_multiplier(self) -> Scalar {
        match self {
            Self::PlainEnamel => 1.0,
            Self::Formvar => 0.93,
            Self::PolyUrethane => 0.9,
            Self::PolyNylon => 0.87,
        }
    }
}

/// Winding technique.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindingStyle {
    /// Machine-guided uniform layering.
    #[default]
    MachineUniform,
    /// Hand-guided scatter winding; irregular layers lower the adjacent-turn
    /// capacitance.
    HandScatter,
}

impl WindingStyle {
    /// Parasitic-capacitance multiplier for the winding technique.
    #[must_use]
    pub const fn capacitance_multiplier(self) -> Scalar {
        match self {
            Self::MachineUniform => 1.0,
            Self::HandScatter => 0.72,
        }
    }
}

/// Parasitic-capacitance multiplier for a winding packing factor.
///
/// Denser packing brings layers closer together. The input is clamped to the
/// supported 0.30–0.95 range; the multiplier spans 0.80–1.25 linearly.
#[must_use]
pub fn packing_capacitance_multiplier(packing_factor: Scalar) -> Scalar {
    let p = packing_factor.clamp(0.30, 0.95);
    0.80 + 0.45 * (p - 0.30) / 0.65
}

// ---------------------------------------------------------------------------
// Magnets
// ---------------------------------------------------------------------------

/// Permanent magnet material.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MagnetMaterial {
    /// AlNiCo 2, the mellow vintage alloy.
    AlNiCo2,
    /// AlNiCo 3, unalloyed with cobalt, weakest of the family.
    AlNiCo3,
    /// AlNiCo 5, the common bright-sounding alloy.
    #[default]
    AlNiCo5,
    /// AlNiCo 8, highest coercivity of the alnicos.
    AlNiCo8,
    /// Sintered ceramic (hard ferrite).
    CeramicFerrite,
    /// Sintered NdFeB.
    Neodymium,
}

impl MagnetMaterial {
    /// Remanence Br in tesla.
    #[must_use]
    pub const fn remanence(self) -> Scalar {
        match self {
            Self::AlNiCo2 => 0.75,
            Self::AlNiCo3 => 0.70,
            Self::AlNiCo5 => 1.25,
            Self::AlNiCo8 => 0.82,
            Self::CeramicFerrite => 0.39,
            Self::Neodymium => 1.28,
        }
    }

    /// Case-insensitive name lookup. Unrecognized names fall back to
    /// [`MagnetMaterial::AlNiCo5`], the reference alloy.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "alnico2" | "alnico 2" => Self::AlNiCo2,
            "alnico3" | "alnico 3" => Self::AlNiCo3,
            "alnico5" | "alnico 5" => Self::AlNiCo5,
            "alnico8" | "alnico 8" => Self::AlNiCo8,
            "ceramic" | "ferrite" | "ceramic8" => Self::CeramicFerrite,
            "neodymium" | "ndfeb" => Self::Neodymium,
            _ => Self::default(),
        }
    }
}

/// Pole-piece cover / keeper material over the coil.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverMaterial {
    /// Open coil, no cover.
    #[default]
    None,
    /// Nickel-silver cover; nearly transparent to the field.
    NickelSilver,
    /// Brass cover; noticeable eddy-current losses.
    Brass,
    /// Steel cover; strong eddy and shunting losses.
    Steel,
}

impl CoverMaterial {
    /// Sensitivity retained after eddy-current losses in the cover.
    #[must_use]
    pub const fn eddy_loss_factor(self) -> Scalar {
        match self {
            Self::None => 1.0,
            Self::NickelSilver => 0.97,
            Self::Brass => 0.90,
            Self::Steel => 0.82,
        }
    }
}

// ---------------------------------------------------------------------------
// Transformer cores
// ---------------------------------------------------------------------------

/// Silicon-steel lamination grades.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SiliconSteelGrade {
    /// Grain-oriented M6 lamination.
    #[default]
    M6,
    /// Non-oriented M19 lamination.
    M19,
}

/// Nickel-iron alloy grades.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermalloyGrade {
    /// 80 % nickel permalloy.
    #[default]
    Ni80,
    /// Mu-metal shielding alloy.
    MuMetal,
}

/// Soft ferrite grades.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FerriteGrade {
    /// MnZn power ferrite, N87 class.
    #[default]
    N87,
    /// General-purpose MnZn signal ferrite.
    MnZn,
}

/// Transformer core material with grade variant.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreMaterial {
    /// Laminated silicon steel.
    SiliconSteel(SiliconSteelGrade),
    /// Nickel-iron alloy.
    Permalloy(PermalloyGrade),
    /// Soft ferrite.
    Ferrite(FerriteGrade),
}

impl Default for CoreMaterial {
    fn default() -> Self {
        Self::SiliconSteel(SiliconSteelGrade::M6)
    }
}

/// Qualitative core-loss tier at a given operating frequency.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreLossTier {
    /// Hysteresis/eddy losses negligible for signal work.
    Low,
    /// Losses audible as top-end softening.
    Moderate,
    /// Losses dominate; the core is the wrong material for this band.
    High,
}

impl CoreMaterial {
    /// Relative permeability μr of the ungapped core.
    #[must_use]
    pub const fn relative_permeability(self) -> Scalar {
        match self {
            Self::SiliconSteel(SiliconSteelGrade::M6) => 8_000.0,
            Self::SiliconSteel(SiliconSteelGrade::M19) => 4_000.0,
            Self::Permalloy(PermalloyGrade::Ni80) => 50_000.0,
            Self::Permalloy(PermalloyGrade::MuMetal) => 80_000.0,
            Self::Ferrite(FerriteGrade::N87) => 2_200.0,
            Self::Ferrite(FerriteGrade::MnZn) => 3_000.0,
        }
    }

    /// Saturation flux density in tesla.
    #[must_use]
    pub const fn saturation_flux(self) -> Scalar {
        match self {
            Self::SiliconSteel(SiliconSteelGrade::M6) => 1.8,
            Self::SiliconSteel(SiliconSteelGrade::M19) => 1.6,
            Self::Permalloy(PermalloyGrade::Ni80) => 0.75,
            Self::Permalloy(PermalloyGrade::MuMetal) => 0.77,
            Self::Ferrite(FerriteGrade::N87) => 0.39,
            Self::Ferrite(FerriteGrade::MnZn) => 0.45,
        }
    }

    /// Qualitative loss tier at `hz`.
    ///
    /// Laminated steel ails first as frequency rises, permalloy holds to the
    /// upper audio band, ferrite is low-loss across the whole sweep range.
    #[must_use]
    pub fn loss_tier(self, hz: Scalar) -> CoreLossTier {
        match self {
            Self::SiliconSteel(_) => {
                if hz < 1_000.0 {
                    CoreLossTier::Low
                } else if hz < 8_000.0 {
                    CoreLossTier::Moderate
                } else {
                    CoreLossTier::High
                }
            }
            Self::Permalloy(_) => {
                if hz < 4_000.0 {
                    CoreLossTier::Low
                } else if hz < 20_000.0 {
                    CoreLossTier::Moderate
                } else {
                    CoreLossTier::High
                }
            }
            Self::Ferrite(_) => {
                if hz < 50_000.0 {
                    CoreLossTier::Low
                } else {
                    CoreLossTier::Moderate
                }
            }
        }
    }

    /// Case-insensitive name lookup. Unrecognized names fall back to the M6
    /// silicon-steel default.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "m6" | "silicon steel m6" => Self::SiliconSteel(SiliconSteelGrade::M6),
            "m19" | "silicon steel m19" => Self::SiliconSteel(SiliconSteelGrade::M19),
            "permalloy" | "ni80" => Self::Permalloy(PermalloyGrade::Ni80),
            "mumetal" | "mu-metal" => Self::Permalloy(PermalloyGrade::MuMetal),
            "n87" => Self::Ferrite(FerriteGrade::N87),
            "mnzn" | "ferrite" => Self::Ferrite(FerriteGrade::MnZn),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn resistivity_at_reference_matches_iacs() {
        let rho = resistivity(20.0, ConductorGrade::Standard);
        assert_relative_eq!(rho, COPPER_RESISTIVITY_20C, epsilon = 1e-15);
    }

    #[test]
    fn resistivity_rises_with_temperature() {
        let cold = resistivity(0.0, ConductorGrade::Standard);
        let hot = resistivity(60.0, ConductorGrade::Standard);
        assert!(cold < COPPER_RESISTIVITY_20C);
        assert!(hot > COPPER_RESISTIVITY_20C);
    }

    #[test]
    fn awg42_diameter_matches_wire_chart() {
        // Chart value: 63.3 µm bare.
        let d = awg_bare_diameter(42);
        assert_relative_eq!(d, 63.3e-6, max_relative = 5e-3);
    }

    #[test]
    fn awg_diameter_shrinks_with_gauge() {
        assert!(awg_bare_diameter(42) > awg_bare_diameter(43));
        assert!(awg_bare_diameter(43) > awg_bare_diameter(44));
    }

    #[test]
    fn magnet_name_lookup_falls_back_to_reference_alloy() {
        assert_eq!(MagnetMaterial::from_name("alnico 2"), MagnetMaterial::AlNiCo2);
        assert_eq!(MagnetMaterial::from_name("unobtainium"), MagnetMaterial::AlNiCo5);
    }

    #[test]
    fn packing_multiplier_clamps_out_of_range_input() {
        assert_relative_eq!(packing_capacitance_multiplier(0.1), 0.80, epsilon = 1e-12);
        assert_relative_eq!(packing_capacitance_multiplier(0.99), 1.25, epsilon = 1e-12);
        assert!(packing_capacitance_multiplier(0.6) > packing_capacitance_multiplier(0.4));
    }

    #[test]
    fn steel_cores_get_lossy_in_the_treble() {
        let m6 = CoreMaterial::default();
        assert_eq!(m6.loss_tier(100.0), CoreLossTier::Low);
        assert_eq!(m6.loss_tier(20_000.0), CoreLossTier::High);
        let n87 = CoreMaterial::Ferrite(FerriteGrade::N87);
        assert_eq!(n87.loss_tier(20_000.0), CoreLossTier::Low);
    }
}
