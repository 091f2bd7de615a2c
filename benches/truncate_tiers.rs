use std::collections::BTreeMap;
use std::f64::consts::TAU;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use series_ephem::series::linear_term::LinearTerm;
use series_ephem::series::{BodySeries, Group};
use series_ephem::{PlanetaryDataset, SizeTier, TruncationConfig, Truncator};

/// Full-precision dataset with amplitudes spread over nine decades.
fn raw_dataset(seed: u64, bodies: &[&str], n: usize) -> PlanetaryDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut series = BTreeMap::new();
    for name in bodies {
        let mut groups = Vec::new();
        for coord in 0..3 {
            for alpha in 0..4 {
                let terms = (0..n)
                    .map(|_| {
                        LinearTerm::new(
                            10f64.powf(rng.random_range(-11.0..-2.0)),
                            rng.random_range(0.0..TAU),
                            rng.random_range(0.0..20000.0),
                        )
                    })
                    .collect();
                groups.push(Group::new(coord, alpha, terms).unwrap());
            }
        }
        series.insert(name.to_string(), BodySeries::new(groups).unwrap());
    }
    PlanetaryDataset {
        comment: "bench".to_string(),
        matrix: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        bodies: series,
    }
}

fn bench_truncate(c: &mut Criterion) {
    let raw = raw_dataset(0x5EED, &["MARS", "JUPITER"], 250);
    let truncator = Truncator::new(TruncationConfig::default()).unwrap();

    let mut group = c.benchmark_group("truncate_tiers");
    group.sample_size(10);
    for tier in SizeTier::ALL {
        group.bench_function(tier.name(), |b| {
            b.iter(|| black_box(truncator.truncate(black_box(&raw), tier)))
        });
    }
    group.bench_function("all", |b| b.iter(|| black_box(truncator.truncate_all(&raw))));
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_truncate
);
criterion_main!(benches);
