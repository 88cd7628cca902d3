use thiserror::Error;

/// Rejected configuration, reported when an engine is constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("{field} overflows the millisecond range")]
    DurationOverflow { field: &'static str },

    #[error("cycle count must be at least 1")]
    ZeroCycles,

    #[error("polling interval must be greater than zero")]
    ZeroPollInterval,

    #[error("narrative thresholds must be strictly increasing (got {0:?})")]
    UnorderedThresholds(Vec<u64>),

    #[error("lead-in epsilon must be within [0, 1) (got {0})")]
    LeadInOutOfRange(f64),

    #[error("milestone position must be within [0, 1] (got {0})")]
    MilestoneOutOfRange(f64),

    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("opacity bounds invalid: min {min}, max {max}")]
    OpacityBounds { min: f64, max: f64 },

    #[error("zoom bounds invalid: min {min}, max {max}")]
    ZoomBounds { min: f64, max: f64 },

    #[error("easing control x values must be within [0, 1] (got {x1}, {x2})")]
    EasingControl { x1: f64, x2: f64 },
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
