//! Convenience re-exports for building pickup experiments.

pub use crate::coil::{
    capacitance, compute_coil, dc_resistance, inductance, max_turns_fit, mean_turn_length,
    outer_buildup, quality_factor, resonant_frequency, wire_length, CoilComputedResults, CoilForm,
    CoilGeometry, WireParams,
};
pub use crate::combine::{combine, output_multiplier, CoilPhase, CoilWiring, CombinedCoil};
pub use crate::config::PickupConfig;
pub use crate::constants::{angular_frequency, calibration};
pub use crate::errors::PickupPhysicsError;
pub use crate::load::{
    effective_resistance, load_impedance, tone_attenuation, Cable, LoadParams, Potentiometer,
};
pub use crate::magnet::{
    axial_field, compute_magnet, field_gradient, field_profile, sensitivity_index,
    string_pull_index, string_pull_tier, FieldPoint, MagnetComputedResults, MagnetGeometry,
    MagnetParams, PositioningParams, StringPullTier,
};
pub use crate::materials::{
    awg_bare_diameter, resistivity, ConductorGrade, CoreLossTier, CoreMaterial, CoverMaterial,
    FerriteGrade, InsulationType, MagnetMaterial, PermalloyGrade, SiliconSteelGrade, WindingStyle,
};
pub use crate::math::{magnitude, parallel, phase_deg, phasor, safe_div, safe_recip, CScalar, Scalar};
pub use crate::response::{
    coil_impedance, find_loaded_resonance, frequency_response, impedance_sweep, loaded_rlc,
    write_response_csv, EffectiveRlc, ImpedancePoint, LoadedResonance, OutputPoint,
    ResonanceMethod, ResonanceSearchConfig, SweepConfig,
};
pub use crate::sweep::{linspace, logspace, sample_map, time_axis, to_db};
pub use crate::transformer::{
    compute_transformer, effective_permeability, primary_inductance, reflected_load,
    ConductorKind, CoreParams, CoreShape, TransformerComputedResults, TransformerParams,
    TransformerParasitics, WindingParams,
};
pub use crate::transient::{
    attack_speed, descriptors, impulse_response, step_response, write_impulse_csv, AttackSpeed,
    ImpulsePoint, TransientDescriptors,
};
pub use crate::units::{
    Capacitance, Frequency, FluxDensity, Impedance, Inductance, Quantity, Unit, Voltage,
};
