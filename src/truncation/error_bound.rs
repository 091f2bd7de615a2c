//! # Analytic error bounds for coefficient changes
//!
//! Upper bound of the position error caused by changing one coefficient of a series,
//! valid over the whole window `|t| ≤ t_max`.
//!
//! ## Overview
//!
//! With `T` the largest series time in the window and `w_c` the weight of coordinate `c`
//! (see [`CoordinateModel::coordinate_weights`]), a term of group `(c, α)` changes the
//! position by at most:
//!
//! | change                                   | bound                          |
//! |------------------------------------------|--------------------------------|
//! | amplitude `a → a'`                       | `w_c·|a - a'|·T^α`             |
//! | argument coefficient of `τ^k`, `x → x'`  | `w_c·|a|·|x - x'|·T^(α+k)`     |
//! | drop the term                            | `w_c·|a|·T^α`                  |
//!
//! The trigonometric factor is at most 1 in magnitude and `|trig(u + δ) - trig(u)| ≤ |δ|`,
//! so the bound holds at every `t` in the window. Each term feeds a single coordinate, so
//! the per-coordinate bound maps to a position bound through one weight.

use crate::constants::{JulianCentury, Kilometer};
use crate::ephem_errors::EphemError;
use crate::series::{BodySeries, CoordinateModel, SeriesTerm, COORDINATES};

/// A single modification of a body series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProposedChange {
    /// Replace field `field` of a term with `value`.
    Round {
        group: usize,
        term: usize,
        field: usize,
        value: f64,
    },
    /// Remove a term.
    Drop { group: usize, term: usize },
}

/// Bounds position errors of series changes over a fixed symmetric time window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorEstimator {
    weights: [f64; COORDINATES],
    horizon: f64,
}

impl ErrorEstimator {
    /// Arguments
    /// -----------------
    /// * `model`: how the series coordinates map to a Cartesian position.
    /// * `time_scale`: Julian centuries → series time factor.
    /// * `t_max`: half-width of the window, Julian centuries.
    pub fn new(model: CoordinateModel, time_scale: f64, t_max: JulianCentury) -> Self {
        ErrorEstimator {
            weights: model.coordinate_weights(),
            horizon: (t_max * time_scale).abs(),
        }
    }

    /// Largest `|τ|` in the window, series time units.
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    fn power(&self, exponent: i32) -> f64 {
        self.horizon.powi(exponent)
    }

    /// Bound for replacing field `field` of `term` in group `(coord, alpha)` with `value`.
    pub fn field_change_bound<T: SeriesTerm>(
        &self,
        coord: usize,
        alpha: usize,
        term: &T,
        field: usize,
        value: f64,
    ) -> Kilometer {
        let delta = (term.field(field) - value).abs();
        let alpha = alpha as i32;
        let coordinate_bound = match T::argument_power(field) {
            None => delta * self.power(alpha),
            Some(k) => term.amplitude().abs() * delta * self.power(alpha + k),
        };
        coordinate_bound * self.weights[coord]
    }

    /// Bound for removing `term` from group `(coord, alpha)`.
    pub fn drop_bound<T: SeriesTerm>(&self, coord: usize, alpha: usize, term: &T) -> Kilometer {
        term.amplitude().abs() * self.power(alpha as i32) * self.weights[coord]
    }

    /// Upper bound of `max_{|t| ≤ t_max} |pos_after(t) - pos_before(t)|` in km.
    ///
    /// Arguments
    /// -----------------
    /// * `series`: the series before the change.
    /// * `change`: the proposed modification.
    ///
    /// Return
    /// ----------
    /// * The bound, or [`EphemError::InvalidChange`] if the change does not address an
    ///   existing coefficient or proposes a non-finite value.
    pub fn bounded_error<T: SeriesTerm>(
        &self,
        series: &BodySeries<T>,
        change: &ProposedChange,
    ) -> Result<Kilometer, EphemError> {
        let (group, term) = match *change {
            ProposedChange::Round { group, term, .. } | ProposedChange::Drop { group, term } => {
                (group, term)
            }
        };
        let g = series
            .groups()
            .get(group)
            .ok_or_else(|| EphemError::InvalidChange(format!("no group {group}")))?;
        let t = g
            .terms()
            .get(term)
            .ok_or_else(|| EphemError::InvalidChange(format!("no term {term} in group {group}")))?;

        match *change {
            ProposedChange::Round { field, value, .. } => {
                if field >= T::WIDTH {
                    return Err(EphemError::InvalidChange(format!(
                        "no field {field} in a term of width {}",
                        T::WIDTH
                    )));
                }
                if !value.is_finite() {
                    return Err(EphemError::InvalidChange(format!(
                        "non-finite value {value}"
                    )));
                }
                Ok(self.field_change_bound(g.coord(), g.alpha(), t, field, value))
            }
            ProposedChange::Drop { .. } => Ok(self.drop_bound(g.coord(), g.alpha(), t)),
        }
    }
}
