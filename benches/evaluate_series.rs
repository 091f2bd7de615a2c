use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use series_ephem::series::linear_term::LinearTerm;
use series_ephem::series::poly_term::PolyTerm;
use series_ephem::series::{BodySeries, Group};
use series_ephem::{
    LunarDataset, LunarEphemeris, PlanetaryDataset, PlanetaryEphemeris, SeriesEphemeris,
};

/// One planet with `n` terms per group, about the size of a raw VSOP87A body.
fn planetary(rng: &mut StdRng, n: usize) -> PlanetaryEphemeris {
    let groups = (0..3)
        .flat_map(|coord| (0..6).map(move |alpha| (coord, alpha)))
        .map(|(coord, alpha)| {
            let terms = (0..n)
                .map(|_| {
                    LinearTerm::new(
                        rng.random_range(-1e-3..1e-3),
                        rng.random_range(0.0..TAU),
                        rng.random_range(0.0..20000.0),
                    )
                })
                .collect();
            Group::new(coord, alpha, terms).unwrap()
        })
        .collect();

    let mut bodies = BTreeMap::new();
    bodies.insert("MARS".to_string(), BodySeries::new(groups).unwrap());
    PlanetaryEphemeris::new(PlanetaryDataset {
        comment: String::new(),
        matrix: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        bodies,
    })
    .unwrap()
}

fn lunar(rng: &mut StdRng, n: usize) -> LunarEphemeris {
    let groups = (0..3)
        .flat_map(|coord| (0..4).map(move |alpha| (coord, alpha)))
        .map(|(coord, alpha)| {
            let mut terms: Vec<PolyTerm> = (0..n)
                .map(|_| {
                    PolyTerm::new(
                        rng.random_range(-10.0..10.0),
                        [
                            rng.random_range(0.0..TAU),
                            rng.random_range(-8400.0..8400.0),
                            rng.random_range(-1e-2..1e-2),
                            rng.random_range(-1e-5..1e-5),
                            rng.random_range(-1e-7..1e-7),
                        ],
                    )
                })
                .collect();
            if (coord, alpha) == (2, 0) {
                terms.push(PolyTerm::new(385000.0, [FRAC_PI_2, 0.0, 0.0, 0.0, 0.0]));
            }
            Group::new(coord, alpha, terms).unwrap()
        })
        .collect();

    let w = [3.81034443, 8399.68473, -2.854e-5, 3.2e-8, -1.5e-10];
    LunarEphemeris::new(LunarDataset::new(w, BodySeries::new(groups).unwrap())).unwrap()
}

fn bench_planetary(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let eph = planetary(&mut rng, 400);

    c.bench_function("evaluate_series/planetary_7200_terms", |b| {
        b.iter_batched(
            || rng.random_range(-30.0..30.0),
            |t| black_box(eph.state(Some("MARS"), black_box(t)).unwrap()),
            BatchSize::SmallInput,
        )
    });
}

fn bench_lunar(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xFACADE);
    let eph = lunar(&mut rng, 300);

    c.bench_function("evaluate_series/lunar_3600_terms", |b| {
        b.iter_batched(
            || rng.random_range(-30.0..30.0),
            |t| black_box(eph.pos_vel(black_box(t)).unwrap()),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_planetary, bench_lunar
);
criterion_main!(benches);
