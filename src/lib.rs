//! # series_ephem
//!
//! Analytical ephemerides from trigonometric series: VSOP87A for the planets and
//! ELP/MPP02 for the Moon, with a truncation engine producing smaller datasets under an
//! analytic error budget.
//!
//! ## Overview
//!
//! - [`series`] – dataset model, JSON decoding and compact encoding.
//! - [`ephemeris`] – position and velocity evaluation.
//! - [`truncation`] – digit rounding and term elimination into the `small`, `medium`
//!   and `large` tiers.
//! - [`config`] – tier thresholds and body weights, from TOML.
//! - [`io`] – dataset files.
//! - [`accuracy`] – sampled comparison of two ephemerides.
//!
//! ```no_run
//! use camino::Utf8Path;
//! use series_ephem::{io, LunarDataset, Truncator, TruncationConfig};
//!
//! # fn main() -> Result<(), series_ephem::EphemError> {
//! let raw: LunarDataset = io::read_dataset(Utf8Path::new("json/elp_raw.json"))?;
//! let truncator = Truncator::new(TruncationConfig::default())?;
//! let tiers = truncator.truncate_all(&raw);
//! io::write_tiers(&tiers, Utf8Path::new("json/elp_raw.json"), Utf8Path::new("out"))?;
//! # Ok(())
//! # }
//! ```

pub mod accuracy;
pub mod config;
pub mod constants;
pub mod ephem_errors;
pub mod ephemeris;
pub mod io;
pub mod ref_system;
pub mod series;
pub mod truncation;

pub use config::TruncationConfig;
pub use ephem_errors::EphemError;
pub use ephemeris::lunar::LunarEphemeris;
pub use ephemeris::planetary::PlanetaryEphemeris;
pub use ephemeris::{PosVel, SeriesEphemeris};
pub use series::lunar::LunarDataset;
pub use series::planetary::PlanetaryDataset;
pub use series::SeriesDataset;
pub use truncation::tier::SizeTier;
pub use truncation::{TierOutput, Truncator};
