//! # Series data model
//!
//! In-memory representation of the trigonometric series shared by the evaluator
//! ([`crate::ephemeris`]) and the truncation engine ([`crate::truncation`]).
//!
//! ## Overview
//!
//! - A [`SeriesTerm`] is the atomic compressible unit. Two shapes exist:
//!   [`LinearTerm`](linear_term::LinearTerm) `a·cos(φ + ν·τ)` for VSOP87A and
//!   [`PolyTerm`](poly_term::PolyTerm) `a·sin(c₀ + c₁τ + … + c₄τ⁴)` for ELP/MPP02.
//! - A [`Group`] gathers the terms sharing a coordinate index and a power `α`;
//!   its contribution to the coordinate is `τ^α · Σ terms`.
//! - A [`BodySeries`] is the list of groups of one body, with at most one group per
//!   `(coord, α)` pair.
//! - A [`SeriesDataset`] is a full file: one or more body series plus frame constants
//!   that truncation carries through unchanged.
//!
//! ## JSON layout
//!
//! Groups are stored as `{"coord": c, "alpha": a, "coeffs": [...]}` with the term fields
//! flattened, `WIDTH` values per term. Decoding validates every group and rejects the
//! whole dataset on the first violation. Encoding writes each coefficient with its
//! shortest round-trip text (see [`compact_float`]).

pub mod compact_float;
pub mod linear_term;
pub mod lunar;
pub mod planetary;
pub mod poly_term;

use std::collections::BTreeSet;
use std::fmt::Debug;

use nalgebra::Matrix3;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{Kilometer, RADSEC};
use crate::ephem_errors::EphemError;
use compact_float::{compact_len, CompactFloat};

/// Number of coordinates of every body series.
pub const COORDINATES: usize = 3;

/// Coordinate index of the distance in spherical series.
pub const DISTANCE: usize = 2;

/// Largest time power a group may carry.
pub const MAX_ALPHA: usize = 5;

/// One trigonometric summand of a series.
///
/// Fields are addressed by index in the order they are flattened in the JSON
/// coefficient lists; field `0` is always the amplitude.
pub trait SeriesTerm: Clone + PartialEq + Debug {
    /// Number of `f64` fields of one term.
    const WIDTH: usize;

    /// Build a term from the first `WIDTH` fields.
    ///
    /// # Panics
    ///
    /// Panics if `fields.len() < WIDTH`. Decoding checks the length of every
    /// coefficient list before calling it.
    fn from_fields(fields: &[f64]) -> Self;

    /// Value of field `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= WIDTH`.
    fn field(&self, k: usize) -> f64;

    /// Overwrite field `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= WIDTH`.
    fn set_field(&mut self, k: usize, value: f64);

    /// Value of the term and its derivative with respect to the series time `tau`.
    fn value_and_rate(&self, tau: f64) -> (f64, f64);

    /// Power of `τ` multiplying a perturbation of field `k` inside the trigonometric
    /// argument, or `None` for the amplitude.
    fn argument_power(k: usize) -> Option<i32>;

    fn amplitude(&self) -> f64 {
        self.field(0)
    }

    fn fields(&self) -> impl Iterator<Item = f64> + '_ {
        (0..Self::WIDTH).map(|k| self.field(k))
    }

    /// Characters the term occupies in a JSON coefficient list, one separator per field.
    ///
    /// The last coefficient of a list has no comma after it, so this is one more than
    /// the text of a term that ends its group.
    fn encoded_len(&self) -> usize {
        self.fields().map(|v| compact_len(v) + 1).sum()
    }
}

/// How the three coordinates of a series map to a Cartesian position in km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateModel {
    /// Rectangular coordinates in `unit_km`, rotated by a constant `matrix`.
    Cartesian { matrix: Matrix3<f64>, unit_km: Kilometer },
    /// Longitude and latitude in arcseconds, distance in km times `distance_scale`.
    /// `max_distance_km` bounds the radius used to linearise the angular errors.
    Spherical {
        max_distance_km: Kilometer,
        distance_scale: f64,
    },
}

impl CoordinateModel {
    /// Kilometers of position error per unit of error on each series coordinate.
    ///
    /// Return
    /// ----------
    /// * `w` such that `|Δpos| ≤ Σ_i w_i·|Δcoord_i|`, exactly for Cartesian coordinates
    ///   and to first order for spherical ones.
    pub fn coordinate_weights(&self) -> [f64; COORDINATES] {
        match *self {
            CoordinateModel::Cartesian { matrix, unit_km } => {
                crate::ref_system::column_norms(&matrix).map(|n| n * unit_km)
            }
            CoordinateModel::Spherical {
                max_distance_km,
                distance_scale,
            } => [
                max_distance_km * RADSEC,
                max_distance_km * RADSEC,
                distance_scale.abs(),
            ],
        }
    }

    /// Replace the lunar distance bound; Cartesian models are returned unchanged.
    pub fn with_max_distance(self, max_distance: Kilometer) -> Self {
        match self {
            CoordinateModel::Spherical { distance_scale, .. } => CoordinateModel::Spherical {
                max_distance_km: max_distance,
                distance_scale,
            },
            cartesian => cartesian,
        }
    }
}

/// Group as it appears in the JSON files, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGroup {
    pub coord: usize,
    pub alpha: usize,
    pub coeffs: Vec<f64>,
}

#[derive(Serialize)]
struct CompactGroup {
    coord: usize,
    alpha: usize,
    coeffs: Vec<CompactFloat>,
}

/// Terms sharing a coordinate and a time power.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<T> {
    coord: usize,
    alpha: usize,
    terms: Vec<T>,
}

impl<T: SeriesTerm> Group<T> {
    /// Build a group, checking `coord < 3`, `alpha ≤ 5` and finite fields.
    pub fn new(coord: usize, alpha: usize, terms: Vec<T>) -> Result<Self, EphemError> {
        if coord >= COORDINATES {
            return Err(EphemError::InvalidCoordinate(coord));
        }
        if alpha > MAX_ALPHA {
            return Err(EphemError::InvalidPower(alpha));
        }
        for (index, value) in terms.iter().flat_map(|t| t.fields()).enumerate() {
            if !value.is_finite() {
                return Err(EphemError::NonFiniteCoefficient { index, value });
            }
        }
        Ok(Group {
            coord,
            alpha,
            terms,
        })
    }

    pub fn coord(&self) -> usize {
        self.coord
    }

    pub fn alpha(&self) -> usize {
        self.alpha
    }

    pub fn terms(&self) -> &[T] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sum of the terms and its derivative with respect to `tau`, before the `τ^α` factor.
    pub fn sum_and_rate(&self, tau: f64) -> (f64, f64) {
        self.terms.iter().fold((0.0, 0.0), |(s, sp), term| {
            let (v, vp) = term.value_and_rate(tau);
            (s + v, sp + vp)
        })
    }
}

impl<T: SeriesTerm> TryFrom<RawGroup> for Group<T> {
    type Error = EphemError;

    fn try_from(raw: RawGroup) -> Result<Self, Self::Error> {
        if raw.coeffs.len() % T::WIDTH != 0 {
            return Err(EphemError::InvalidCoefficientCount {
                len: raw.coeffs.len(),
                width: T::WIDTH,
            });
        }
        let terms = raw
            .coeffs
            .chunks_exact(T::WIDTH)
            .map(T::from_fields)
            .collect();
        Group::new(raw.coord, raw.alpha, terms)
    }
}

impl<T: SeriesTerm> Serialize for Group<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CompactGroup {
            coord: self.coord,
            alpha: self.alpha,
            coeffs: self
                .terms
                .iter()
                .flat_map(|t| t.fields())
                .map(CompactFloat)
                .collect(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: SeriesTerm> Deserialize<'de> for Group<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawGroup::deserialize(deserializer)?;
        Group::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// All groups of one body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySeries<T> {
    groups: Vec<Group<T>>,
}

impl<T> Default for BodySeries<T> {
    fn default() -> Self {
        BodySeries { groups: Vec::new() }
    }
}

impl<T: SeriesTerm> BodySeries<T> {
    /// Build a body series, rejecting two groups with the same `(coord, alpha)`.
    pub fn new(groups: Vec<Group<T>>) -> Result<Self, EphemError> {
        let mut seen = BTreeSet::new();
        for g in &groups {
            if !seen.insert((g.coord, g.alpha)) {
                return Err(EphemError::DuplicateGroup {
                    coord: g.coord,
                    alpha: g.alpha,
                });
            }
        }
        Ok(BodySeries { groups })
    }

    pub fn groups(&self) -> &[Group<T>] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Group::is_empty)
    }

    pub fn term(&self, group: usize, term: usize) -> Option<&T> {
        self.groups.get(group)?.terms.get(term)
    }

    pub fn term_mut(&mut self, group: usize, term: usize) -> Option<&mut T> {
        self.groups.get_mut(group)?.terms.get_mut(term)
    }

    /// Keep only the terms for which `keep(group, term)` is true, then remove empty groups.
    pub fn retain_terms<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize, usize) -> bool,
    {
        for (gi, group) in self.groups.iter_mut().enumerate() {
            let mut ti = 0;
            group.terms.retain(|_| {
                let kept = keep(gi, ti);
                ti += 1;
                kept
            });
        }
        self.groups.retain(|g| !g.is_empty());
    }

    pub fn term_count(&self) -> usize {
        self.groups.iter().map(|g| g.terms.len()).sum()
    }

    /// Upper bound of `|coordinate coord|` for `|τ| ≤ horizon`, `Σ |a|·horizon^α` over the
    /// groups of that coordinate.
    pub fn coordinate_bound(&self, coord: usize, horizon: f64) -> f64 {
        self.groups
            .iter()
            .filter(|g| g.coord == coord)
            .map(|g| {
                let amplitudes: f64 = g.terms.iter().map(|t| t.amplitude().abs()).sum();
                amplitudes * horizon.powi(g.alpha as i32)
            })
            .sum()
    }

    /// Characters taken by all coefficients in the JSON output, counted as
    /// [`SeriesTerm::encoded_len`] does: the total exceeds the text between the brackets
    /// of the coefficient lists by one per group.
    pub fn coefficient_chars(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.terms.iter())
            .map(SeriesTerm::encoded_len)
            .sum()
    }
}

impl<T: SeriesTerm> Serialize for BodySeries<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.groups.serialize(serializer)
    }
}

impl<'de, T: SeriesTerm> Deserialize<'de> for BodySeries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let groups = Vec::<Group<T>>::deserialize(deserializer)?;
        BodySeries::new(groups).map_err(serde::de::Error::custom)
    }
}

/// A complete series file: body series plus the frame constants needed to evaluate them.
pub trait SeriesDataset: Clone + Serialize + DeserializeOwned {
    type Term: SeriesTerm;

    /// Names of the bodies present, in file order.
    fn body_names(&self) -> Vec<String>;

    fn comment(&self) -> &str;

    fn set_comment(&mut self, comment: String);

    fn body(&self, name: &str) -> Option<&BodySeries<Self::Term>>;

    fn body_mut(&mut self, name: &str) -> Option<&mut BodySeries<Self::Term>>;

    /// Remove a body from the dataset. Single-body datasets keep their body and return `false`.
    fn remove_body(&mut self, name: &str) -> bool;

    /// Mapping from series coordinates to a Cartesian position.
    fn coordinate_model(&self) -> CoordinateModel;

    /// Factor converting Julian centuries to series time.
    fn time_scale(&self) -> f64;

    /// Length in km that relative thresholds are multiplied by.
    fn reference_length(&self) -> Kilometer;

    /// Check the frame constants; body series are validated while decoding.
    fn validate(&self) -> Result<(), EphemError>;

    /// Decode and validate a dataset.
    fn from_json_str(json: &str) -> Result<Self, EphemError> {
        let dataset: Self = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Encode with compact coefficients.
    fn to_json(&self) -> Result<String, EphemError> {
        Ok(serde_json::to_string(self)?)
    }

    fn term_count(&self) -> usize {
        self.body_names()
            .iter()
            .filter_map(|name| self.body(name))
            .map(BodySeries::term_count)
            .sum()
    }
}

/// Reject non-finite values in a frame constant.
pub(crate) fn check_finite<'a>(
    name: &str,
    values: impl IntoIterator<Item = &'a f64>,
) -> Result<(), EphemError> {
    if values.into_iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(EphemError::NonFiniteFrame(name.to_string()))
    }
}
