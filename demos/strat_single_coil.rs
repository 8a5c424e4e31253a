use pickup_physics::prelude::*;

fn main() {
    // Vintage-style flatwork single coil, 8 000 turns of 42 AWG plain enamel.
    let geometry = CoilGeometry::flatwork_mm(8.0, 15.9, 64.0, 11.1, 1.6);
    let wire = WireParams::awg(42, InsulationType::PlainEnamel, 8_000);
    let coil = compute_coil(&geometry, &wire).expect("valid coil parameters");

    eprintln!(
        "R = {:.0} Ω, L = {:.2} H, C = {:.0} pF, unloaded f0 = {:.0} Hz",
        coil.dc_resistance,
        coil.inductance,
        coil.capacitance * 1e12,
        coil.resonant_frequency
    );

    // AlNiCo 5 rod magnets at typical string/coil distances.
    let magnet = MagnetParams {
        material: MagnetMaterial::AlNiCo5,
        geometry: MagnetGeometry::Rod {
            diameter: 5.0e-3,
            length: 18.0e-3,
        },
        magnetization: 1.0,
        cover: CoverMaterial::None,
    };
    let positioning = PositioningParams::from_mm(3.0, 2.0);
    let magnetics = compute_magnet(&magnet, &positioning, wire.turns);
    eprintln!(
        "B(string) = {:.1} mT, pull index {:.2} ({:?})",
        magnetics.field_at_string * 1e3,
        magnetics.string_pull_index,
        magnetics.string_pull_tier
    );

    // Swept response into the common passive rig, printed as CSV.
    let load = LoadParams::default();
    let sweep = SweepConfig::default();
    let response = frequency_response(&coil, &load, None, &sweep);
    let resonance = find_loaded_resonance(
        &response,
        &loaded_rlc(&coil, &load, None),
        &ResonanceSearchConfig::default(),
    );
    eprintln!(
        "loaded peak {:.0} Hz, Q {:.2} ({:?})",
        resonance.frequency, resonance.q, resonance.method
    );

    write_response_csv(std::io::stdout().lock(), &response).expect("stdout");
}
