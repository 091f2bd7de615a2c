#![allow(dead_code)]

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use series_ephem::series::linear_term::LinearTerm;
use series_ephem::series::poly_term::PolyTerm;
use series_ephem::series::{BodySeries, Group};
use series_ephem::{LunarDataset, PlanetaryDataset};

/// J2000 ecliptic → equator rotation, rounded.
pub const ECLIPTIC_TO_EQUATOR: [[f64; 3]; 3] = [
    [1.0, 0.0, 0.0],
    [0.0, 0.917482062069, -0.397777155932],
    [0.0, 0.397777155932, 0.917482062069],
];

/// Amplitude `10^e` with `e` uniform in `[lo, hi)`, random sign.
fn amplitude(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    let a = 10f64.powf(rng.random_range(lo..hi));
    if rng.random_bool(0.5) {
        a
    } else {
        -a
    }
}

fn planet(rng: &mut StdRng, mean_distance: f64, terms_per_group: usize) -> BodySeries<LinearTerm> {
    let mut groups = Vec::new();
    for coord in 0..3 {
        for alpha in 0..3 {
            let mut terms = Vec::with_capacity(terms_per_group + 1);
            if alpha == 0 && coord < 2 {
                terms.push(LinearTerm::new(mean_distance, rng.random_range(0.0..TAU), 0.0));
            }
            for _ in 0..terms_per_group {
                terms.push(LinearTerm::new(
                    amplitude(rng, -10.0 + alpha as f64, -2.0 - alpha as f64),
                    rng.random_range(0.0..TAU),
                    rng.random_range(0.0..10000.0),
                ));
            }
            groups.push(Group::new(coord, alpha, terms).unwrap());
        }
    }
    BodySeries::new(groups).unwrap()
}

/// Three planets with full-precision coefficients.
pub fn planetary_dataset(seed: u64) -> PlanetaryDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bodies = BTreeMap::new();
    bodies.insert("EARTH".to_string(), planet(&mut rng, 1.0, 20));
    bodies.insert("MARS".to_string(), planet(&mut rng, 1.523679, 25));
    bodies.insert("VENUS".to_string(), planet(&mut rng, 0.723332, 25));
    PlanetaryDataset {
        comment: "synthetic VSOP87A".to_string(),
        matrix: ECLIPTIC_TO_EQUATOR,
        bodies,
    }
}

fn argument(rng: &mut StdRng) -> [f64; 5] {
    [
        rng.random_range(0.0..TAU),
        rng.random_range(-8400.0..8400.0),
        rng.random_range(-1e-2..1e-2),
        rng.random_range(-1e-5..1e-5),
        rng.random_range(-1e-7..1e-7),
    ]
}

/// Moon with a distance kept between 370000 and 400000 km over ±30 centuries.
pub fn lunar_dataset(seed: u64) -> LunarDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut groups = Vec::new();

    for coord in 0..3 {
        for alpha in 0..2 {
            let mut terms = Vec::new();
            if coord == 2 && alpha == 0 {
                terms.push(PolyTerm::new(385000.52719, [FRAC_PI_2, 0.0, 0.0, 0.0, 0.0]));
            }
            // distance terms stay below 1000 km, 1 km per century for alpha = 1
            let (lo, hi) = match (coord, alpha) {
                (2, 0) => (-4.0, 3.0),
                (2, _) => (-6.0, 0.0),
                (_, 0) => (-5.0, 4.0),
                _ => (-7.0, 1.0),
            };
            for _ in 0..12 {
                terms.push(PolyTerm::new(amplitude(&mut rng, lo, hi), argument(&mut rng)));
            }
            groups.push(Group::new(coord, alpha, terms).unwrap());
        }
    }

    let w = [3.810344430588308, 8399.684731773914, -2.854e-5, 3.2e-8, -1.5e-10];
    let mut dataset = LunarDataset::new(w, BodySeries::new(groups).unwrap());
    dataset.comment = "synthetic ELP/MPP02".to_string();
    dataset
}
