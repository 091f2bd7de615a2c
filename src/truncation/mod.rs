//! # Truncation engine
//!
//! Reduces a full-precision series dataset to the `small`, `medium` and `large` size
//! tiers under an analytic error budget.
//!
//! ## Overview
//!
//! Each body is processed on its own copy of the dataset, in two phases:
//!
//! 1. **Digit rounding.** For every term, the candidate is the smallest loss of precision
//!    of one field (one significant digit dropped, then two, …) whose cost
//!    `bound / characters saved` is below the body threshold; the cheapest field wins,
//!    ties going to the lowest field index. Candidates of all terms sit in one binary
//!    heap ordered by `(cost, group, term)`. The cheapest is applied, the candidate of
//!    that term only is recomputed, until the heap is empty.
//! 2. **Term elimination.** Every remaining term whose `drop bound / characters taken`
//!    is below the threshold is removed, cheapest first. Empty groups disappear.
//!
//! The threshold of a body is `tier.threshold × weight(body) × reference length` in km
//! per character. Each accepted change adds at most `threshold × characters saved` to
//! the error, so the total bound of a body is at most `threshold × characters saved`.
//!
//! Candidates depend only on the current state of a term, which makes the procedure
//! deterministic and idempotent: truncating a tier output with the same tier settings
//! leaves it unchanged.
//!
//! See also
//! ------------
//! * [`error_bound::ErrorEstimator`] – bounds used for the costs.
//! * [`crate::config::TruncationConfig`] – thresholds, weights, excluded bodies.

pub mod error_bound;
pub mod report;
pub mod tier;

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

use ordered_float::OrderedFloat;
use tracing::{debug, info, trace};

use crate::config::TruncationConfig;
use crate::constants::Kilometer;
use crate::ephem_errors::EphemError;
use crate::series::compact_float::{compact_len, rounding_candidates};
use crate::series::{BodySeries, CoordinateModel, SeriesDataset, SeriesTerm, DISTANCE};
use error_bound::ErrorEstimator;
use report::{BodyReport, TruncationReport};
use tier::SizeTier;

/// Output of one tier.
#[derive(Debug, Clone)]
pub struct TierOutput<D> {
    pub tier: SizeTier,
    pub dataset: D,
    pub report: TruncationReport,
}

#[derive(Debug, Clone)]
pub struct Truncator {
    config: TruncationConfig,
}

impl Truncator {
    pub fn new(config: TruncationConfig) -> Result<Self, EphemError> {
        config.validate()?;
        Ok(Truncator { config })
    }

    pub fn config(&self) -> &TruncationConfig {
        &self.config
    }

    /// Error allowed per character saved for `body`, km.
    pub fn threshold_km<D: SeriesDataset>(&self, dataset: &D, body: &str, tier: SizeTier) -> Kilometer {
        self.config.tier(tier).threshold * self.config.body_weight(body) * dataset.reference_length()
    }

    /// Error estimator of `body` over the window of `tier`.
    ///
    /// For spherical series the radius weighting the angular errors is the larger of
    /// `lunar_max_distance_km` and the distance the series can reach in the window widened
    /// by the error budget of the body, `threshold × characters`. Accepted changes move the
    /// distance by less than that budget, so the radius holds for every intermediate series.
    pub fn estimator<D: SeriesDataset>(
        &self,
        dataset: &D,
        body: &str,
        tier: SizeTier,
    ) -> ErrorEstimator {
        let t_max = self.config.tier(tier).t_max;
        let time_scale = dataset.time_scale();
        let model = match dataset.coordinate_model() {
            spherical @ CoordinateModel::Spherical { distance_scale, .. } => {
                let horizon = (t_max * time_scale).abs();
                let threshold_km = self.threshold_km(dataset, body, tier);
                let reach = dataset.body(body).map_or(0.0, |series| {
                    distance_scale.abs() * series.coordinate_bound(DISTANCE, horizon)
                        + threshold_km * series.coefficient_chars() as f64
                });
                if reach > self.config.lunar_max_distance_km {
                    debug!(body, %tier, max_distance_km = reach, "distance bound from series");
                }
                spherical.with_max_distance(reach.max(self.config.lunar_max_distance_km))
            }
            cartesian => cartesian,
        };
        ErrorEstimator::new(model, time_scale, t_max)
    }

    /// Truncate `dataset` to `tier`.
    ///
    /// Arguments
    /// -----------------
    /// * `dataset`: the full-precision dataset, left untouched.
    /// * `tier`: the size tier to produce.
    ///
    /// Return
    /// ----------
    /// * The truncated copy, without the excluded bodies, and its report.
    pub fn truncate<D: SeriesDataset>(&self, dataset: &D, tier: SizeTier) -> (D, TruncationReport) {
        let settings = self.config.tier(tier);
        let mut output = dataset.clone();

        let mut excluded = Vec::new();
        for name in dataset.body_names() {
            if self.config.is_excluded(&name) && output.remove_body(&name) {
                debug!(body = %name, %tier, "excluded from output");
                excluded.push(name);
            }
        }

        let mut bodies = Vec::new();
        for name in output.body_names() {
            let threshold_km = self.threshold_km(dataset, &name, tier);
            let estimator = self.estimator(dataset, &name, tier);
            if let Some(series) = output.body_mut(&name) {
                let body_report = truncate_body(&name, series, &estimator, threshold_km);
                debug!(
                    body = %name,
                    %tier,
                    terms_before = body_report.terms_before,
                    terms_after = body_report.terms_after,
                    error_bound_km = body_report.error_bound_km,
                    "truncated body"
                );
                bodies.push(body_report);
            }
        }

        let note = format!(
            " :: truncated, {tier} tier (threshold={:e}, t_max={})",
            settings.threshold, settings.t_max
        );
        if !output.comment().ends_with(&note) {
            let comment = format!("{}{note}", output.comment());
            output.set_comment(comment);
        }

        let report = TruncationReport {
            tier,
            settings,
            bodies,
            excluded,
        };
        info!(
            %tier,
            terms_before = report.terms_before(),
            terms_after = report.terms_after(),
            chars_before = report.chars_before(),
            chars_after = report.chars_after(),
            "truncation done"
        );
        (output, report)
    }

    /// Truncate `dataset` to every tier, each from the full-precision input.
    pub fn truncate_all<D: SeriesDataset>(&self, dataset: &D) -> Vec<TierOutput<D>> {
        self.truncate_tiers(dataset, &SizeTier::ALL)
    }

    pub fn truncate_tiers<D: SeriesDataset>(
        &self,
        dataset: &D,
        tiers: &[SizeTier],
    ) -> Vec<TierOutput<D>> {
        tiers
            .iter()
            .map(|&tier| {
                let (dataset, report) = self.truncate(dataset, tier);
                TierOutput {
                    tier,
                    dataset,
                    report,
                }
            })
            .collect()
    }
}

/// Run both phases on one body series in place.
///
/// Arguments
/// -----------------
/// * `body`: name used in the report and the logs.
/// * `series`: the series to reduce.
/// * `estimator`: error bounds over the tier window.
/// * `threshold_km`: largest accepted error per character saved.
pub fn truncate_body<T: SeriesTerm>(
    body: &str,
    series: &mut BodySeries<T>,
    estimator: &ErrorEstimator,
    threshold_km: Kilometer,
) -> BodyReport {
    let terms_before = series.term_count();
    let chars_before = series.coefficient_chars();

    let (rounding_steps, rounding_bound) = round_digits(body, series, estimator, threshold_km);
    let (dropped_terms, drop_bound) = drop_terms(body, series, estimator, threshold_km);

    BodyReport {
        body: body.to_string(),
        terms_before,
        terms_after: series.term_count(),
        chars_before,
        chars_after: series.coefficient_chars(),
        rounding_steps,
        dropped_terms,
        threshold_km,
        error_bound_km: rounding_bound + drop_bound,
    }
}

/// Cheapest qualifying rounding of one term.
#[derive(Debug, Clone, Copy)]
struct Rounding {
    cost: f64,
    field: usize,
    value: f64,
    bound: Kilometer,
}

/// Heap entry; the derived order is `(cost, group, term)`, one entry per term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Step {
    cost: OrderedFloat<f64>,
    group: usize,
    term: usize,
    field: usize,
    value: OrderedFloat<f64>,
    bound: OrderedFloat<f64>,
}

impl Rounding {
    fn at(self, group: usize, term: usize) -> Step {
        Step {
            cost: OrderedFloat(self.cost),
            group,
            term,
            field: self.field,
            value: OrderedFloat(self.value),
            bound: OrderedFloat(self.bound),
        }
    }
}

fn best_rounding<T: SeriesTerm>(
    estimator: &ErrorEstimator,
    coord: usize,
    alpha: usize,
    term: &T,
    threshold_km: Kilometer,
) -> Option<Rounding> {
    let mut best: Option<Rounding> = None;
    for field in 0..T::WIDTH {
        let current = term.field(field);
        let current_len = compact_len(current);
        // the amplitude is never rounded to zero, dropping is phase 2
        let candidate = rounding_candidates(current, field != 0).find_map(|value| {
            let saved = current_len.saturating_sub(compact_len(value));
            if saved == 0 || value == current {
                return None;
            }
            let bound = estimator.field_change_bound(coord, alpha, term, field, value);
            let cost = bound / saved as f64;
            (cost < threshold_km).then_some(Rounding {
                cost,
                field,
                value,
                bound,
            })
        });
        if let Some(c) = candidate {
            if best.map_or(true, |b| c.cost < b.cost) {
                best = Some(c);
            }
        }
    }
    best
}

fn round_digits<T: SeriesTerm>(
    body: &str,
    series: &mut BodySeries<T>,
    estimator: &ErrorEstimator,
    threshold_km: Kilometer,
) -> (usize, Kilometer) {
    let mut heap = BinaryHeap::new();
    for (gi, group) in series.groups().iter().enumerate() {
        for (ti, term) in group.terms().iter().enumerate() {
            if let Some(r) = best_rounding(estimator, group.coord(), group.alpha(), term, threshold_km)
            {
                heap.push(Reverse(r.at(gi, ti)));
            }
        }
    }

    let mut steps = 0;
    let mut total_bound = 0.0;
    while let Some(Reverse(step)) = heap.pop() {
        let Some(group) = series.groups().get(step.group) else {
            continue;
        };
        let (coord, alpha) = (group.coord(), group.alpha());
        let Some(term) = series.term_mut(step.group, step.term) else {
            continue;
        };

        trace!(
            body,
            group = step.group,
            term = step.term,
            field = step.field,
            from = term.field(step.field),
            to = step.value.0,
            cost = step.cost.0,
            "round"
        );
        term.set_field(step.field, step.value.0);
        steps += 1;
        total_bound += step.bound.0;

        if let Some(next) = best_rounding(estimator, coord, alpha, term, threshold_km) {
            heap.push(Reverse(next.at(step.group, step.term)));
        }
    }
    (steps, total_bound)
}

fn drop_terms<T: SeriesTerm>(
    body: &str,
    series: &mut BodySeries<T>,
    estimator: &ErrorEstimator,
    threshold_km: Kilometer,
) -> (usize, Kilometer) {
    let mut heap = BinaryHeap::new();
    for (gi, group) in series.groups().iter().enumerate() {
        for (ti, term) in group.terms().iter().enumerate() {
            let bound = estimator.drop_bound(group.coord(), group.alpha(), term);
            let cost = bound / term.encoded_len() as f64;
            if cost < threshold_km {
                heap.push(Reverse((OrderedFloat(cost), gi, ti, OrderedFloat(bound))));
            }
        }
    }

    let mut dropped = BTreeSet::new();
    let mut total_bound = 0.0;
    while let Some(Reverse((cost, group, term, bound))) = heap.pop() {
        trace!(body, group, term, cost = cost.0, "drop");
        dropped.insert((group, term));
        total_bound += bound.0;
    }

    series.retain_terms(|g, t| !dropped.contains(&(g, t)));
    (dropped.len(), total_bound)
}
