//! VSOP87A dataset: heliocentric rectangular series of the planets.
//!
//! The series give ecliptic coordinates of J2000 in AU as functions of Julian millennia.
//! The stored `matrix` rotates them onto the equatorial frame.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::compact_float::serialize_rows;
use super::linear_term::LinearTerm;
use super::{check_finite, BodySeries, CoordinateModel, SeriesDataset};
use crate::constants::{Kilometer, AU_VSOP87, VSOP87_TIME_SCALE};
use crate::ephem_errors::EphemError;
use crate::ref_system::matrix_from_rows;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetaryDataset {
    #[serde(rename = "_comment", default)]
    pub comment: String,
    /// Ecliptic → equatorial rotation, row-major.
    #[serde(serialize_with = "serialize_rows")]
    pub matrix: [[f64; 3]; 3],
    pub bodies: BTreeMap<String, BodySeries<LinearTerm>>,
}

impl SeriesDataset for PlanetaryDataset {
    type Term = LinearTerm;

    fn body_names(&self) -> Vec<String> {
        self.bodies.keys().cloned().collect()
    }

    fn comment(&self) -> &str {
        &self.comment
    }

    fn set_comment(&mut self, comment: String) {
        self.comment = comment;
    }

    fn body(&self, name: &str) -> Option<&BodySeries<LinearTerm>> {
        self.bodies.get(name)
    }

    fn body_mut(&mut self, name: &str) -> Option<&mut BodySeries<LinearTerm>> {
        self.bodies.get_mut(name)
    }

    fn remove_body(&mut self, name: &str) -> bool {
        self.bodies.remove(name).is_some()
    }

    fn coordinate_model(&self) -> CoordinateModel {
        CoordinateModel::Cartesian {
            matrix: matrix_from_rows(&self.matrix),
            unit_km: AU_VSOP87,
        }
    }

    fn time_scale(&self) -> f64 {
        VSOP87_TIME_SCALE
    }

    fn reference_length(&self) -> Kilometer {
        AU_VSOP87
    }

    fn validate(&self) -> Result<(), EphemError> {
        check_finite("matrix", self.matrix.iter().flatten())
    }
}

#[cfg(test)]
mod planetary_test {
    use super::*;
    use crate::series::SeriesTerm;

    const DATASET: &str = r#"{"_comment":"test","matrix":[[1,0,0],[0,0.9,-0.4],[0,0.4,0.9]],"bodies":{"MARS":[{"coord":0,"alpha":0,"coeffs":[1.5,0.25,3340.6]},{"coord":1,"alpha":1,"coeffs":[1e-3,4,0]}],"VENUS":[{"coord":2,"alpha":0,"coeffs":[5e-4,1,10213.3]}]}}"#;

    #[test]
    fn test_decode_encode() {
        let dataset = PlanetaryDataset::from_json_str(DATASET).unwrap();
        assert_eq!(dataset.body_names(), vec!["MARS", "VENUS"]);
        assert_eq!(dataset.term_count(), 3);
        assert_eq!(
            dataset.body("MARS").unwrap().term(0, 0).unwrap().frequency,
            3340.6
        );
        assert_eq!(dataset.to_json().unwrap(), DATASET);
    }

    #[test]
    fn test_remove_body() {
        let mut dataset = PlanetaryDataset::from_json_str(DATASET).unwrap();
        assert!(dataset.remove_body("VENUS"));
        assert!(!dataset.remove_body("VENUS"));
        assert!(dataset.body("VENUS").is_none());
    }

    #[test]
    fn test_malformed_dataset() {
        let bad_coord = DATASET.replace(r#""coord":2"#, r#""coord":3"#);
        assert!(matches!(
            PlanetaryDataset::from_json_str(&bad_coord),
            Err(EphemError::InvalidJson(_))
        ));
        let bad_width = DATASET.replace("[5e-4,1,10213.3]", "[0.0005,1]");
        assert!(PlanetaryDataset::from_json_str(&bad_width).is_err());
        assert!(PlanetaryDataset::from_json_str(r#"{"matrix":[[1,0,0]]}"#).is_err());
    }

    #[test]
    fn test_amplitude_access() {
        let dataset = PlanetaryDataset::from_json_str(DATASET).unwrap();
        let venus = dataset.body("VENUS").unwrap();
        assert_eq!(venus.term(0, 0).unwrap().amplitude(), 5e-4);
    }
}
