use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use pickup_physics::coil::{compute_coil, CoilGeometry, WireParams};
use pickup_physics::load::LoadParams;
use pickup_physics::materials::InsulationType;
use pickup_physics::response::{
    find_loaded_resonance, frequency_response, loaded_rlc, ResonanceSearchConfig, SweepConfig,
};

fn vintage_rig() -> (CoilGeometry, WireParams, LoadParams) {
    let geometry = CoilGeometry::flatwork_mm(8.0, 15.9, 64.0, 11.1, 1.6);
    let wire = WireParams::awg(42, InsulationType::PlainEnamel, 8_000);
    (geometry, wire, LoadParams::default())
}

fn bench_response_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("response_sweep");
    let (geometry, wire, load) = vintage_rig();
    let coil = compute_coil(&geometry, &wire).unwrap();

    for points in [200_usize, 1_000] {
        let sweep = SweepConfig {
            points,
            ..SweepConfig::default()
        };
        group.bench_function(BenchmarkId::new("sweep_and_search", points), |b| {
            b.iter_batched(
                || (coil, load, sweep),
                |(coil, load, sweep)| {
                    let response = frequency_response(&coil, &load, None, &sweep);
                    let _ = find_loaded_resonance(
                        &response,
                        &loaded_rlc(&coil, &load, None),
                        &ResonanceSearchConfig::default(),
                    );
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_coil_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("coil_compute");
    let (geometry, wire, _) = vintage_rig();
    group.bench_function("compute_coil", |b| {
        b.iter_batched(
            || (geometry, wire),
            |(geometry, wire)| compute_coil(&geometry, &wire).unwrap(),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_response_sweep, bench_coil_compute);
criterion_main!(benches);
