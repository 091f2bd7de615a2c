use thiserror::Error;

#[derive(Error, Debug)]
pub enum EphemError {
    #[error("Invalid JSON dataset: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),

    #[error("Invalid TOML configuration: {0}")]
    InvalidConfigFile(#[from] toml::de::Error),

    #[error("Invalid coordinate index {0} (must be 0, 1 or 2)")]
    InvalidCoordinate(usize),

    #[error("Invalid time power {0} (must be in 0..=5)")]
    InvalidPower(usize),

    #[error("Coefficient list of length {len} is not a multiple of the term width {width}")]
    InvalidCoefficientCount { len: usize, width: usize },

    #[error("Non-finite coefficient {value} at position {index}")]
    NonFiniteCoefficient { index: usize, value: f64 },

    #[error("Duplicate group for coordinate {coord} and power {alpha}")]
    DuplicateGroup { coord: usize, alpha: usize },

    #[error("Non-finite frame constant in {0}")]
    NonFiniteFrame(String),

    #[error("Non-finite evaluation time: {0}")]
    NonFiniteTime(f64),

    #[error("Unknown body: {0:?}")]
    UnknownBody(String),

    #[error("Proposed change does not address an existing coefficient: {0}")]
    InvalidChange(String),

    #[error("Invalid size tier: {0}")]
    InvalidTier(String),

    #[error("Invalid truncation setting: {0}")]
    InvalidConfig(String),
}

impl PartialEq for EphemError {
    fn eq(&self, other: &Self) -> bool {
        use EphemError::*;
        match (self, other) {
            // Wrapped library errors are only compared by variant
            (InvalidJson(_), InvalidJson(_)) => true,
            (IoError(_), IoError(_)) => true,
            (InvalidConfigFile(_), InvalidConfigFile(_)) => true,

            (Utf8PathError(a), Utf8PathError(b)) => a == b,
            (InvalidCoordinate(a), InvalidCoordinate(b)) => a == b,
            (InvalidPower(a), InvalidPower(b)) => a == b,
            (
                InvalidCoefficientCount { len: a, width: w },
                InvalidCoefficientCount { len: b, width: v },
            ) => a == b && w == v,
            (
                NonFiniteCoefficient { index: a, .. },
                NonFiniteCoefficient { index: b, .. },
            ) => a == b,
            (
                DuplicateGroup { coord: a, alpha: p },
                DuplicateGroup { coord: b, alpha: q },
            ) => a == b && p == q,
            (NonFiniteFrame(a), NonFiniteFrame(b)) => a == b,
            (NonFiniteTime(a), NonFiniteTime(b)) => a.to_bits() == b.to_bits(),
            (UnknownBody(a), UnknownBody(b)) => a == b,
            (InvalidChange(a), InvalidChange(b)) => a == b,
            (InvalidTier(a), InvalidTier(b)) => a == b,
            (InvalidConfig(a), InvalidConfig(b)) => a == b,

            _ => false,
        }
    }
}
