//! ELP/MPP02 dataset: geocentric spherical series of the Moon.
//!
//! Longitude and latitude series are in arcseconds, distance in km, time in Julian
//! centuries. The mean longitude `W` is added to the longitude series; `P` and `Q` are
//! Laskar's precession polynomials. Only `W` and `groups` are required in a file, the
//! other frame constants default to the values of the theory.

use serde::{Deserialize, Serialize};

use super::compact_float::{serialize_array, serialize_rows, serialize_scalar};
use super::poly_term::PolyTerm;
use super::{check_finite, BodySeries, CoordinateModel, SeriesDataset};
use crate::constants::{
    Kilometer, ELP_DISTANCE_SCALE, ELP_OBLIQUITY_J2000, ELP_PRECESSION_P, ELP_PRECESSION_Q,
    ELP_TIME_SCALE, MOON, MOON_MAX_DISTANCE, MOON_MEAN_DISTANCE,
};
use crate::ephem_errors::EphemError;
use crate::ref_system::{ecliptic_to_equator, rows_from_matrix};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LunarDataset {
    #[serde(rename = "_comment", default)]
    pub comment: String,
    /// Mean longitude polynomial (radians).
    #[serde(rename = "W", serialize_with = "serialize_array")]
    pub w: [f64; 5],
    #[serde(rename = "P", default = "default_p", serialize_with = "serialize_array")]
    pub p: [f64; 5],
    #[serde(rename = "Q", default = "default_q", serialize_with = "serialize_array")]
    pub q: [f64; 5],
    /// J2000 ecliptic → equator rotation, row-major.
    #[serde(default = "default_matrix", serialize_with = "serialize_rows")]
    pub matrix: [[f64; 3]; 3],
    #[serde(default = "default_distance_scale", serialize_with = "serialize_scalar")]
    pub distance_scale: f64,
    pub groups: BodySeries<PolyTerm>,
}

fn default_p() -> [f64; 5] {
    ELP_PRECESSION_P
}

fn default_q() -> [f64; 5] {
    ELP_PRECESSION_Q
}

fn default_matrix() -> [[f64; 3]; 3] {
    rows_from_matrix(&ecliptic_to_equator(ELP_OBLIQUITY_J2000))
}

fn default_distance_scale() -> f64 {
    ELP_DISTANCE_SCALE
}

impl LunarDataset {
    /// Dataset with the default frame constants of ELP/MPP02.
    pub fn new(w: [f64; 5], groups: BodySeries<PolyTerm>) -> Self {
        LunarDataset {
            comment: String::new(),
            w,
            p: default_p(),
            q: default_q(),
            matrix: default_matrix(),
            distance_scale: default_distance_scale(),
            groups,
        }
    }
}

impl SeriesDataset for LunarDataset {
    type Term = PolyTerm;

    fn body_names(&self) -> Vec<String> {
        vec![MOON.to_string()]
    }

    fn comment(&self) -> &str {
        &self.comment
    }

    fn set_comment(&mut self, comment: String) {
        self.comment = comment;
    }

    fn body(&self, name: &str) -> Option<&BodySeries<PolyTerm>> {
        (name == MOON).then_some(&self.groups)
    }

    fn body_mut(&mut self, name: &str) -> Option<&mut BodySeries<PolyTerm>> {
        (name == MOON).then_some(&mut self.groups)
    }

    fn remove_body(&mut self, _name: &str) -> bool {
        false
    }

    fn coordinate_model(&self) -> CoordinateModel {
        CoordinateModel::Spherical {
            max_distance_km: MOON_MAX_DISTANCE,
            distance_scale: self.distance_scale,
        }
    }

    fn time_scale(&self) -> f64 {
        ELP_TIME_SCALE
    }

    fn reference_length(&self) -> Kilometer {
        MOON_MEAN_DISTANCE
    }

    fn validate(&self) -> Result<(), EphemError> {
        check_finite("W", &self.w)?;
        check_finite("P", &self.p)?;
        check_finite("Q", &self.q)?;
        check_finite("matrix", self.matrix.iter().flatten())?;
        check_finite("distance_scale", [&self.distance_scale])
    }
}
