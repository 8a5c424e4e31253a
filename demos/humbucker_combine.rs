use pickup_physics::prelude::*;

fn main() {
    // Two matched humbucker halves, 5 000 turns of 43 AWG each.
    let geometry = CoilGeometry::rectangular_mm(12.0, 18.0, 38.0, 7.0, 0.8);
    let wire = WireParams::awg(43, InsulationType::PlainEnamel, 5_000);
    let half = compute_coil(&geometry, &wire).expect("valid coil parameters");

    let wirings = [
        (CoilWiring::Series, CoilPhase::InPhase, "series, in phase"),
        (CoilWiring::Series, CoilPhase::OutOfPhase, "series, out of phase"),
        (CoilWiring::Parallel, CoilPhase::InPhase, "parallel, in phase"),
        (CoilWiring::Parallel, CoilPhase::OutOfPhase, "parallel, out of phase"),
    ];

    println!("wiring,R_ohm,L_h,C_pf,f0_hz,q,output_multiplier");
    for (wiring, phase, label) in wirings {
        let combined = combine(&half, &half, wiring, phase, 0.35);
        println!(
            "{label},{:.0},{:.3},{:.0},{:.0},{:.2},{:.1}",
            combined.resistance,
            combined.inductance,
            combined.capacitance * 1e12,
            combined.resonant_frequency,
            combined.quality_factor,
            output_multiplier(wiring, phase)
        );
    }

    // The in-phase series pair through the standard rig, with descriptors.
    let combined = combine(&half, &half, CoilWiring::Series, CoilPhase::InPhase, 0.35);
    let as_coil = CoilComputedResults {
        dc_resistance: combined.resistance,
        inductance: combined.inductance,
        capacitance: combined.capacitance,
        resonant_frequency: combined.resonant_frequency,
        quality_factor: combined.quality_factor,
        ..half
    };
    let load = LoadParams::default();
    let response = frequency_response(&as_coil, &load, None, &SweepConfig::default());
    let resonance = find_loaded_resonance(
        &response,
        &loaded_rlc(&as_coil, &load, None),
        &ResonanceSearchConfig::default(),
    );
    let character = descriptors(resonance.frequency, resonance.q);
    eprintln!(
        "series pair: loaded peak {:.0} Hz, Q {:.2}, {:?} attack, {:.1} ring cycles",
        resonance.frequency, resonance.q, character.attack, character.cycle_count
    );
}
