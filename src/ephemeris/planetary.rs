use std::collections::BTreeMap;

use hifitime::Epoch;
use nalgebra::Matrix3;

use super::evaluate::coordinates_and_rates;
use super::{
    check_time, julian_centuries_since_j2000, series_rate_per_day, PosVel, SeriesEphemeris,
};
use crate::constants::{JulianCentury, AU_VSOP87, VSOP87_TIME_SCALE};
use crate::ephem_errors::EphemError;
use crate::ref_system::matrix_from_rows;
use crate::series::linear_term::LinearTerm;
use crate::series::planetary::PlanetaryDataset;
use crate::series::{BodySeries, SeriesDataset};

/// Heliocentric VSOP87A positions and velocities in the equatorial frame.
#[derive(Debug, Clone)]
pub struct PlanetaryEphemeris {
    matrix: Matrix3<f64>,
    bodies: BTreeMap<String, BodySeries<LinearTerm>>,
}

impl PlanetaryEphemeris {
    /// Build the evaluator from a decoded dataset.
    ///
    /// Return
    /// ----------
    /// * [`EphemError::NonFiniteFrame`] if the rotation matrix is not finite.
    pub fn new(dataset: PlanetaryDataset) -> Result<Self, EphemError> {
        dataset.validate()?;
        Ok(PlanetaryEphemeris {
            matrix: matrix_from_rows(&dataset.matrix),
            bodies: dataset.bodies,
        })
    }

    /// Position (km) and velocity (km/day) of `body` at `t` Julian centuries since J2000.0.
    ///
    /// Arguments
    /// -----------------
    /// * `body`: VSOP87 body name, e.g. `"MARS"` or `"EARTH-MOON"`.
    /// * `t`: Julian centuries since J2000.0 (TDB).
    ///
    /// Return
    /// ----------
    /// * The state in the equatorial frame, [`EphemError::NonFiniteTime`] for a non-finite
    ///   `t`, [`EphemError::UnknownBody`] for a name absent from the dataset.
    pub fn pos_vel(&self, body: &str, t: JulianCentury) -> Result<PosVel, EphemError> {
        check_time(t)?;
        let series = self
            .bodies
            .get(body)
            .ok_or_else(|| EphemError::UnknownBody(body.to_string()))?;

        let (xyz, rate) = coordinates_and_rates(series, t * VSOP87_TIME_SCALE);
        Ok(PosVel {
            pos: self.matrix * xyz * AU_VSOP87,
            vel: self.matrix * rate * (AU_VSOP87 * series_rate_per_day(VSOP87_TIME_SCALE)),
        })
    }

    pub fn pos_vel_at(&self, body: &str, epoch: &Epoch) -> Result<PosVel, EphemError> {
        self.pos_vel(body, julian_centuries_since_j2000(epoch))
    }
}

impl SeriesEphemeris for PlanetaryEphemeris {
    fn body_names(&self) -> Vec<String> {
        self.bodies.keys().cloned().collect()
    }

    fn state(&self, body: Option<&str>, t: JulianCentury) -> Result<PosVel, EphemError> {
        self.pos_vel(body.unwrap_or_default(), t)
    }
}
