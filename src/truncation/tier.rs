use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::JulianCentury;
use crate::ephem_errors::EphemError;

/// Named truncation aggressiveness levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

impl SizeTier {
    pub const ALL: [SizeTier; 3] = [SizeTier::Small, SizeTier::Medium, SizeTier::Large];

    pub fn name(&self) -> &'static str {
        match self {
            SizeTier::Small => "small",
            SizeTier::Medium => "medium",
            SizeTier::Large => "large",
        }
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SizeTier {
    type Err = EphemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(SizeTier::Small),
            "medium" => Ok(SizeTier::Medium),
            "large" => Ok(SizeTier::Large),
            _ => Err(EphemError::InvalidTier(s.to_string())),
        }
    }
}

/// Thresholds of one tier.
///
/// * `threshold` – relative error allowed per character saved; multiplied by the
///   reference length of a body to get km per character.
/// * `t_max` – half-width of the validity interval `[-t_max, t_max]`, Julian centuries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierSettings {
    pub threshold: f64,
    pub t_max: JulianCentury,
}

impl TierSettings {
    pub fn new(threshold: f64, t_max: JulianCentury) -> Self {
        TierSettings { threshold, t_max }
    }

    pub fn validate(&self, tier: SizeTier) -> Result<(), EphemError> {
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(EphemError::InvalidConfig(format!(
                "{tier} threshold must be positive and finite, got {}",
                self.threshold
            )));
        }
        if !(self.t_max.is_finite() && self.t_max > 0.0) {
            return Err(EphemError::InvalidConfig(format!(
                "{tier} t_max must be positive and finite, got {}",
                self.t_max
            )));
        }
        Ok(())
    }
}
