//! # Truncation configuration
//!
//! Tier thresholds and per-body weights used by the [`Truncator`](crate::truncation::Truncator).
//!
//! ## Overview
//!
//! [`TruncationConfig::default`] reproduces the reference settings. A TOML file may
//! override any subset of the fields:
//!
//! ```toml
//! excluded_bodies = ["EARTH"]
//! lunar_max_distance_km = 406700.0
//!
//! [small]
//! threshold = 1e-7
//! t_max = 10.0
//!
//! [body_weights]
//! MARS = 0.52
//! ```
//!
//! A `body_weights` table replaces the default table as a whole. Bodies without a weight
//! use `default_weight`.

use std::collections::BTreeMap;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::constants::{Kilometer, MOON_MAX_DISTANCE};
use crate::ephem_errors::EphemError;
use crate::truncation::tier::{SizeTier, TierSettings};

/// Mean heliocentric distances (AU) of the VSOP87A bodies.
pub const MEAN_DISTANCE_FROM_SUN: [(&str, f64); 7] = [
    ("MERCURY", 0.39),
    ("VENUS", 0.72),
    ("MARS", 1.52),
    ("JUPITER", 5.2),
    ("SATURN", 9.54),
    ("URANUS", 19.2),
    ("NEPTUNE", 30.06),
];

/// Threshold weight of a planet at `mean_distance` AU from the Sun.
///
/// The smaller of the distances to the Sun and to the Earth orbit, so the relative
/// error stays controlled both heliocentrically and geocentrically.
pub fn mean_distance_weight(mean_distance: f64) -> f64 {
    mean_distance.min((1.0 - mean_distance).abs())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TruncationConfig {
    pub small: TierSettings,
    pub medium: TierSettings,
    pub large: TierSettings,
    pub body_weights: BTreeMap<String, f64>,
    pub default_weight: f64,
    /// Bodies left out of truncated planetary tiers.
    pub excluded_bodies: Vec<String>,
    /// Lower limit of the lunar distance bound used to linearise angular errors; the
    /// truncator raises it when the series reach further.
    pub lunar_max_distance_km: Kilometer,
}

impl Default for TruncationConfig {
    fn default() -> Self {
        let mut body_weights: BTreeMap<String, f64> = MEAN_DISTANCE_FROM_SUN
            .iter()
            .map(|(name, d)| (name.to_string(), mean_distance_weight(*d)))
            .collect();
        body_weights.insert("EARTH-MOON".to_string(), 1.0);

        TruncationConfig {
            small: TierSettings::new(1e-7, 10.0),
            medium: TierSettings::new(1e-8, 20.0),
            large: TierSettings::new(1e-9, 30.0),
            body_weights,
            default_weight: 1.0,
            excluded_bodies: vec!["EARTH".to_string()],
            lunar_max_distance_km: MOON_MAX_DISTANCE,
        }
    }
}

impl TruncationConfig {
    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(content: &str) -> Result<Self, EphemError> {
        let config: TruncationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Utf8Path) -> Result<Self, EphemError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn tier(&self, tier: SizeTier) -> TierSettings {
        match tier {
            SizeTier::Small => self.small,
            SizeTier::Medium => self.medium,
            SizeTier::Large => self.large,
        }
    }

    pub fn body_weight(&self, body: &str) -> f64 {
        self.body_weights
            .get(body)
            .copied()
            .unwrap_or(self.default_weight)
    }

    pub fn is_excluded(&self, body: &str) -> bool {
        self.excluded_bodies.iter().any(|b| b == body)
    }

    /// Check every threshold, weight and distance is positive and finite.
    pub fn validate(&self) -> Result<(), EphemError> {
        for tier in SizeTier::ALL {
            self.tier(tier).validate(tier)?;
        }
        let weights = self
            .body_weights
            .iter()
            .map(|(name, w)| (name.as_str(), *w))
            .chain(std::iter::once(("default_weight", self.default_weight)));
        for (name, weight) in weights {
            if !(weight.is_finite() && weight > 0.0) {
                return Err(EphemError::InvalidConfig(format!(
                    "weight of {name} must be positive and finite, got {weight}"
                )));
            }
        }
        if !(self.lunar_max_distance_km.is_finite() && self.lunar_max_distance_km > 0.0) {
            return Err(EphemError::InvalidConfig(format!(
                "lunar_max_distance_km must be positive and finite, got {}",
                self.lunar_max_distance_km
            )));
        }
        Ok(())
    }
}
