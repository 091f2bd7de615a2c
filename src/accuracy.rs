//! # Sampled accuracy of a truncated ephemeris
//!
//! Measures how far an ephemeris (typically a truncated tier) drifts from a reference
//! (typically the raw series) over nested symmetric intervals around J2000.0.
//!
//! ## Overview
//!
//! - [`INTERVAL_RADII_YEARS`] – half-widths of the intervals, from ±15000 to ±30 years.
//! - [`compare`] – relative position and velocity errors sampled evenly on each interval,
//!   summarized by [`ErrorStats`].
//! - [`dms_string`] – angular rendering of a relative error (`1'30"`, `0.25"`).
//! - [`max_position_deviation`] – largest absolute position difference over `|t| ≤ t_max`.
//!
//! These are sampled measurements; the truncation engine never uses them and relies on
//! analytic bounds only.

use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};
use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

use crate::constants::{JulianCentury, Kilometer, Radian};
use crate::ephem_errors::EphemError;
use crate::ephemeris::SeriesEphemeris;
use crate::series::compact_float::round_sig;

/// Half-widths (years) of the intervals `[J2000 - r, J2000 + r]` used by [`compare`].
pub const INTERVAL_RADII_YEARS: [f64; 10] = [
    15000.0, 10000.0, 5000.0, 2000.0, 1000.0, 500.0, 200.0, 100.0, 50.0, 30.0,
];

/// `num` evenly spaced times (Julian centuries) covering `[-r, r]` years, bounds included.
pub fn sample_times(radius_years: f64, num: usize) -> Vec<JulianCentury> {
    match num {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..num)
            .map(|k| {
                let s = k as f64 / (num - 1) as f64;
                (-radius_years + 2.0 * s * radius_years) / 100.0
            })
            .collect(),
    }
}

/// Summary statistics of a sample; `std_dev` is the population standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorStats {
    pub n: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl ErrorStats {
    /// Return
    /// ----------
    /// * `None` for an empty sample.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let (min, max) = match samples.iter().copied().minmax_by(f64::total_cmp) {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(x) => (x, x),
            MinMaxResult::MinMax(lo, hi) => (lo, hi),
        };
        let n = samples.len();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        Some(ErrorStats {
            n,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }
}

/// Errors measured on one interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntervalAccuracy {
    pub radius_years: f64,
    /// Relative position error `|Δp| / |p_ref|`.
    pub position: ErrorStats,
    /// Largest relative velocity error `|Δv| / |v_ref|`.
    pub max_velocity: f64,
    /// Largest absolute position error, km.
    pub max_position_km: Kilometer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyReport {
    pub body: String,
    pub intervals: Vec<IntervalAccuracy>,
}

fn relative(difference: f64, reference: f64) -> f64 {
    if reference > 0.0 {
        difference / reference
    } else {
        difference
    }
}

/// Compare `candidate` against `reference` for one body.
///
/// Arguments
/// -----------------
/// * `candidate`: the ephemeris under test.
/// * `reference`: the ephemeris taken as truth.
/// * `body`: body name, `None` for single-body ephemerides.
/// * `num`: samples per interval (at least 1).
///
/// Return
/// ----------
/// * One [`IntervalAccuracy`] per entry of [`INTERVAL_RADII_YEARS`], or the first
///   evaluation error.
pub fn compare<E, R>(
    candidate: &E,
    reference: &R,
    body: Option<&str>,
    num: usize,
) -> Result<AccuracyReport, EphemError>
where
    E: SeriesEphemeris + ?Sized,
    R: SeriesEphemeris + ?Sized,
{
    let num = num.max(1);
    let mut intervals = Vec::with_capacity(INTERVAL_RADII_YEARS.len());

    for radius_years in INTERVAL_RADII_YEARS {
        let mut position_errors = Vec::with_capacity(num);
        let mut max_velocity: f64 = 0.0;
        let mut max_position_km: f64 = 0.0;

        for t in sample_times(radius_years, num) {
            let state = candidate.state(body, t)?;
            let truth = reference.state(body, t)?;
            let diff = state - truth;
            position_errors.push(relative(diff.pos.norm(), truth.pos.norm()));
            max_velocity = max_velocity.max(relative(diff.vel.norm(), truth.vel.norm()));
            max_position_km = max_position_km.max(diff.pos.norm());
        }

        if let Some(position) = ErrorStats::from_samples(&position_errors) {
            intervals.push(IntervalAccuracy {
                radius_years,
                position,
                max_velocity,
                max_position_km,
            });
        }
    }

    Ok(AccuracyReport {
        body: body.map_or_else(|| candidate.body_names().join(","), str::to_string),
        intervals,
    })
}

/// Largest `|pos_a(t) - pos_b(t)|` over `samples` evenly spaced times in `[-t_max, t_max]`.
pub fn max_position_deviation<A, B>(
    a: &A,
    b: &B,
    body: Option<&str>,
    t_max: JulianCentury,
    samples: usize,
) -> Result<Kilometer, EphemError>
where
    A: SeriesEphemeris + ?Sized,
    B: SeriesEphemeris + ?Sized,
{
    // sample_times works in years
    sample_times(t_max * 100.0, samples)
        .into_iter()
        .try_fold(0.0_f64, |acc, t| {
            let d = (a.state(body, t)?.pos - b.state(body, t)?.pos).norm();
            Ok(acc.max(d))
        })
}

/// Render an angle as degrees, arcminutes and arcseconds, e.g. `1°2'3.4"`.
///
/// Degrees and arcminutes are omitted while zero; arcseconds are rounded to `sig_figs`
/// significant digits.
pub fn dms_string(x: Radian, sig_figs: usize) -> String {
    if x < 0.0 {
        return format!("-{}", dms_string(-x, sig_figs));
    }
    let total_degrees = x.to_degrees();
    let degrees = total_degrees.trunc();
    let remainder = (total_degrees - degrees) * 60.0;
    let arcminutes = remainder.trunc();
    let arcseconds = (remainder - arcminutes) * 60.0;

    let mut text = String::new();
    if degrees != 0.0 {
        text.push_str(&format!("{degrees}°"));
    }
    if arcminutes != 0.0 || degrees != 0.0 {
        text.push_str(&format!("{arcminutes}'"));
    }
    text.push_str(&format!("{}\"", round_sig(arcseconds, sig_figs)));
    text
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Body"),
            Cell::new("Interval [yr]"),
            Cell::new("Mean pos err"),
            Cell::new("StdDev pos err"),
            Cell::new("Max pos err"),
            Cell::new("Max pos err [km]"),
            Cell::new("Max vel err"),
        ]);

        for i in &self.intervals {
            table.add_row(Row::from(vec![
                Cell::new(&self.body),
                Cell::new(format!("(-{r},{r})", r = i.radius_years))
                    .set_alignment(CellAlignment::Right),
                Cell::new(dms_string(i.position.mean, 2)).set_alignment(CellAlignment::Right),
                Cell::new(dms_string(i.position.std_dev, 2)).set_alignment(CellAlignment::Right),
                Cell::new(dms_string(i.position.max, 2)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3e}", i.max_position_km)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.0e}", i.max_velocity)).set_alignment(CellAlignment::Right),
            ]));
        }

        write!(f, "{table}")
    }
}

#[cfg(test)]
mod accuracy_test {
    use super::*;
    use crate::constants::RADSEC;
    use crate::ephemeris::PosVel;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    /// Uniform circular motion, radius scaled by `scale`.
    struct Circle {
        scale: f64,
    }

    impl SeriesEphemeris for Circle {
        fn body_names(&self) -> Vec<String> {
            vec!["CIRCLE".into()]
        }

        fn state(&self, _body: Option<&str>, t: JulianCentury) -> Result<PosVel, EphemError> {
            let (s, c) = t.sin_cos();
            Ok(PosVel {
                pos: Vector3::new(c, s, 0.0) * self.scale,
                vel: Vector3::new(-s, c, 0.0) * self.scale,
            })
        }
    }

    #[test]
    fn test_sample_times() {
        let times = sample_times(100.0, 5);
        assert_eq!(times, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(sample_times(30.0, 1), vec![0.0]);
        assert!(sample_times(30.0, 0).is_empty());
    }

    #[test]
    fn test_error_stats() {
        let stats = ErrorStats::from_samples(&[1.0, 3.0, 2.0, 2.0]).unwrap();
        assert_eq!(stats.n, 4);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert_relative_eq!(stats.std_dev, 0.5_f64.sqrt(), epsilon = 1e-15);
        assert!(ErrorStats::from_samples(&[]).is_none());
    }

    #[test]
    fn test_dms_string() {
        assert_eq!(dms_string(0.25 * RADSEC, 2), "0.25\"");
        assert_eq!(dms_string(-0.25 * RADSEC, 2), "-0.25\"");
        assert_eq!(dms_string(90.0 * RADSEC, 2), "1'30\"");
        assert_eq!(dms_string(0.0, 2), "0\"");
    }

    #[test]
    fn test_compare_scaled_circle() {
        let reference = Circle { scale: 1.0 };
        let candidate = Circle { scale: 1.001 };
        let report = compare(&candidate, &reference, None, 11).unwrap();
        assert_eq!(report.body, "CIRCLE");
        assert_eq!(report.intervals.len(), INTERVAL_RADII_YEARS.len());
        for interval in &report.intervals {
            assert_relative_eq!(interval.position.mean, 1e-3, epsilon = 1e-12);
            assert_relative_eq!(interval.max_velocity, 1e-3, epsilon = 1e-12);
            assert!(interval.position.std_dev < 1e-12);
        }
        assert!(report.to_string().contains("(-15000,15000)"));

        let deviation = max_position_deviation(&candidate, &reference, None, 1.0, 21).unwrap();
        assert_relative_eq!(deviation, 1e-3, epsilon = 1e-12);
    }
}
