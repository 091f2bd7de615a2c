//! # Series evaluator
//!
//! Runtime evaluation of the series datasets, shared by applications and by the accuracy
//! checks of the truncation engine.
//!
//! ## Overview
//!
//! - [`PlanetaryEphemeris`](planetary::PlanetaryEphemeris) – heliocentric position and
//!   velocity of the VSOP87A bodies, equatorial frame.
//! - [`LunarEphemeris`](lunar::LunarEphemeris) – geocentric position and velocity of the
//!   Moon from ELP/MPP02, equatorial frame of J2000.
//! - [`SeriesEphemeris`] – common query interface, with an optional body name.
//!
//! Both evaluators only read their series; a raw dataset and any of its truncated tiers
//! go through the same code path and differ only in numerical accuracy.
//!
//! Units
//! -----------------
//! * time: Julian centuries since J2000.0 (TDB), or a [`hifitime::Epoch`],
//! * position: km,
//! * velocity: km/day.

pub mod evaluate;
pub mod lunar;
pub mod planetary;

use std::ops::{Add, Div, Sub};

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::constants::{JulianCentury, AU_VSOP87, DAYS_PER_JULIAN_CENTURY, SECONDS_PER_DAY};
use crate::ephem_errors::EphemError;

/// Cartesian state of a body.
///
/// Fields
/// -----------------
/// * `pos`: position (km).
/// * `vel`: velocity (km/day).
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct PosVel {
    pub pos: Vector3<f64>,
    pub vel: Vector3<f64>,
}

impl PosVel {
    pub fn zero() -> Self {
        PosVel {
            pos: Vector3::zeros(),
            vel: Vector3::zeros(),
        }
    }

    /// Convert km and km/day to AU and AU/day.
    #[must_use = "`.to_au()` returns a new PosVel; assign or use it"]
    pub fn to_au(&self) -> Self {
        *self / AU_VSOP87
    }
}

impl Add for PosVel {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        PosVel {
            pos: self.pos + other.pos,
            vel: self.vel + other.vel,
        }
    }
}

impl Sub for PosVel {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        PosVel {
            pos: self.pos - other.pos,
            vel: self.vel - other.vel,
        }
    }
}

impl Div<f64> for PosVel {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        PosVel {
            pos: self.pos / rhs,
            vel: self.vel / rhs,
        }
    }
}

/// Julian centuries elapsed since J2000.0 in the TDB scale.
pub fn julian_centuries_since_j2000(epoch: &Epoch) -> JulianCentury {
    epoch.to_et_seconds() / (SECONDS_PER_DAY * DAYS_PER_JULIAN_CENTURY)
}

/// Rate of the series time per day, `dτ/dt` with `τ = time_scale · t` and `t` in
/// Julian centuries.
pub fn series_rate_per_day(time_scale: f64) -> f64 {
    time_scale / DAYS_PER_JULIAN_CENTURY
}

/// Query interface shared by the planetary and lunar evaluators.
pub trait SeriesEphemeris {
    /// Bodies that can be queried.
    fn body_names(&self) -> Vec<String>;

    /// State of `body` at `t` Julian centuries since J2000.0.
    ///
    /// Arguments
    /// -----------------
    /// * `body`: body name, may be omitted for single-body ephemerides.
    /// * `t`: Julian centuries since J2000.0 (TDB).
    ///
    /// Return
    /// ----------
    /// * The position (km) and velocity (km/day), or
    ///   [`EphemError::NonFiniteTime`] / [`EphemError::UnknownBody`].
    fn state(&self, body: Option<&str>, t: JulianCentury) -> Result<PosVel, EphemError>;

    /// Same as [`SeriesEphemeris::state`] at an [`Epoch`].
    fn state_at(&self, body: Option<&str>, epoch: &Epoch) -> Result<PosVel, EphemError> {
        self.state(body, julian_centuries_since_j2000(epoch))
    }
}

pub(crate) fn check_time(t: JulianCentury) -> Result<(), EphemError> {
    if t.is_finite() {
        Ok(())
    } else {
        Err(EphemError::NonFiniteTime(t))
    }
}
