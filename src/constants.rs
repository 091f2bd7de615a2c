//! # Constants and type definitions for series ephemerides
//!
//! This module centralizes the **physical constants**, **unit conversions**, and **type
//! aliases** shared by the series evaluator, the error estimator and the truncation engine.
//!
//! ## Overview
//!
//! - Length and time units used by VSOP87A and ELP/MPP02
//! - Angle conversions (arcseconds ↔ radians)
//! - Default frame constants of the lunar theory
//! - Reference lengths used to scale relative truncation thresholds
//!
//! Every constant here is immutable; frame data that depends on a dataset (rotation
//! matrices, precession polynomials) lives in the dataset structs and is handed to the
//! evaluator explicitly.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// Astronomical Unit in kilometers, as used by the VSOP87 theory
pub const AU_VSOP87: f64 = 149_597_870.691;

/// Number of days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Number of days in a Julian millennium
pub const DAYS_PER_JULIAN_MILLENNIUM: f64 = 365_250.0;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648_000.0;

/// VSOP87 series are expressed in Julian millennia: τ = t / 10 with t in centuries
pub const VSOP87_TIME_SCALE: f64 = 0.1;

/// ELP/MPP02 series are expressed directly in Julian centuries
pub const ELP_TIME_SCALE: f64 = 1.0;

// -------------------------------------------------------------------------------------------------
// Lunar theory defaults (ELP/MPP02)
// -------------------------------------------------------------------------------------------------

/// Laskar precession polynomial P (ecliptic of date → ecliptic J2000)
pub const ELP_PRECESSION_P: [f64; 5] = [
    0.10180391e-4,
    0.47020439e-6,
    -0.5417367e-9,
    -0.2507948e-11,
    0.463486e-14,
];

/// Laskar precession polynomial Q (ecliptic of date → ecliptic J2000)
pub const ELP_PRECESSION_Q: [f64; 5] = [
    -0.113469002e-3,
    0.12372674e-6,
    0.1265417e-8,
    -0.1371808e-11,
    -0.320334e-14,
];

/// Obliquity used to rotate the J2000 ecliptic onto the J2000 equator (~23.44°)
pub const ELP_OBLIQUITY_J2000: f64 = 0.409_092_804_222_328_97;

/// Ratio of the DE405 and ELP lunar distance constants
pub const ELP_DISTANCE_SCALE: f64 = 0.999_999_949_826_519_1;

/// Mean Earth–Moon distance in kilometers
pub const MOON_MEAN_DISTANCE: f64 = 384_399.0;

/// Upper bound of the geocentric lunar distance (apogee) in kilometers
pub const MOON_MAX_DISTANCE: f64 = 406_700.0;

/// Name under which the single lunar body is addressed
pub const MOON: &str = "MOON";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Time in Julian centuries since J2000.0 (TDB)
pub type JulianCentury = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
