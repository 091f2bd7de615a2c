//! Geocentric lunar ephemeris from the ELP/MPP02 series.
//!
//! ## Overview
//!
//! The series give the longitude and latitude perturbations (arcseconds) and the distance
//! (km) of the Moon referred to the mean ecliptic and equinox of date. The state is built
//! in four steps:
//!
//! 1. Sum the groups (see [`coordinates_and_rates`]) to get `S` and `dS/dτ`.
//! 2. Spherical coordinates: `λ = S₀·ARCSEC + W(τ)`, `β = S₁·ARCSEC`, `r = S₂·scale`.
//! 3. Spherical → rectangular, chain rule for the rates.
//! 4. Laskar precession onto the J2000 ecliptic, then the constant rotation onto the
//!    J2000 equator.
//!
//! All frame constants come from the [`LunarDataset`]; nothing is read from global state.

use hifitime::Epoch;
use nalgebra::{Matrix3, Vector3};

use super::evaluate::coordinates_and_rates;
use super::{
    check_time, julian_centuries_since_j2000, series_rate_per_day, PosVel, SeriesEphemeris,
};
use crate::constants::{JulianCentury, ELP_TIME_SCALE, MOON, RADSEC};
use crate::ephem_errors::EphemError;
use crate::ref_system::{matrix_from_rows, EclipticPrecession};
use crate::series::lunar::LunarDataset;
use crate::series::poly_term::{polynomial_and_rate, PolyTerm};
use crate::series::{BodySeries, SeriesDataset};

#[derive(Debug, Clone)]
pub struct LunarEphemeris {
    w: [f64; 5],
    precession: EclipticPrecession,
    equator: Matrix3<f64>,
    distance_scale: f64,
    groups: BodySeries<PolyTerm>,
}

impl LunarEphemeris {
    pub fn new(dataset: LunarDataset) -> Result<Self, EphemError> {
        dataset.validate()?;
        Ok(LunarEphemeris {
            w: dataset.w,
            precession: EclipticPrecession::new(dataset.p, dataset.q),
            equator: matrix_from_rows(&dataset.matrix),
            distance_scale: dataset.distance_scale,
            groups: dataset.groups,
        })
    }

    /// Geocentric position (km) and velocity (km/day) of the Moon.
    ///
    /// Arguments
    /// -----------------
    /// * `t`: Julian centuries since J2000.0 (TDB).
    ///
    /// Return
    /// ----------
    /// * The state referred to the mean equator and equinox of J2000, or
    ///   [`EphemError::NonFiniteTime`].
    pub fn pos_vel(&self, t: JulianCentury) -> Result<PosVel, EphemError> {
        check_time(t)?;
        let tau = t * ELP_TIME_SCALE;

        let (s, s_rate) = coordinates_and_rates(&self.groups, tau);
        let (w, w_rate) = polynomial_and_rate(&self.w, tau);

        let lon = s.x * RADSEC + w;
        let lat = s.y * RADSEC;
        let r = s.z * self.distance_scale;
        let lon_rate = s_rate.x * RADSEC + w_rate;
        let lat_rate = s_rate.y * RADSEC;
        let r_rate = s_rate.z * self.distance_scale;

        let (sin_lon, cos_lon) = lon.sin_cos();
        let (sin_lat, cos_lat) = lat.sin_cos();

        let h = Vector3::new(r * cos_lat * cos_lon, r * cos_lat * sin_lon, r * sin_lat);
        // d(r·cos β)/dτ
        let rho_rate = r_rate * cos_lat - lat_rate * r * sin_lat;
        let h_rate = Vector3::new(
            rho_rate * cos_lon - lon_rate * h.y,
            rho_rate * sin_lon + lon_rate * h.x,
            r_rate * sin_lat + lat_rate * r * cos_lat,
        );

        let (rot, rot_rate) = self.precession.rotation_and_rate(tau);
        let pos = self.equator * rot * h;
        let vel =
            self.equator * (rot_rate * h + rot * h_rate) * series_rate_per_day(ELP_TIME_SCALE);

        Ok(PosVel { pos, vel })
    }

    pub fn pos_vel_at(&self, epoch: &Epoch) -> Result<PosVel, EphemError> {
        self.pos_vel(julian_centuries_since_j2000(epoch))
    }
}

impl SeriesEphemeris for LunarEphemeris {
    fn body_names(&self) -> Vec<String> {
        vec![MOON.to_string()]
    }

    fn state(&self, body: Option<&str>, t: JulianCentury) -> Result<PosVel, EphemError> {
        match body {
            None | Some(MOON) => self.pos_vel(t),
            Some(other) => Err(EphemError::UnknownBody(other.to_string())),
        }
    }
}
