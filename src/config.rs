use crate::layout::Pattern;
use std::ops::RangeInclusive;

pub(crate) const COUNT_RANGE: RangeInclusive<usize> = 2..=30;
pub(crate) const RADIUS_RANGE: RangeInclusive<f32> = 10.0..=100.0;
pub(crate) const FREQUENCY_RANGE: RangeInclusive<f32> = 0.1..=10.0;

#[derive(Debug, thiserror::Error, PartialEq)]
pub(crate) enum ConfigError {
    #[error("count must be within {min}..={max}, got {got}")]
    Count { got: usize, min: usize, max: usize },

    #[error("radius must be within {min}..={max}, got {got}")]
    Radius { got: f32, min: f32, max: f32 },

    #[error("frequency must be within {min}..={max}, got {got}")]
    Frequency { got: f32, min: f32, max: f32 },
}

/// Everything the cloud reads from the control panel, snapshotted once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CloudConfig {
    /// Labels per ring and number of rings; `count * count` labels in total.
    pub(crate) count: usize,
    pub(crate) radius: f32,
    pub(crate) look_at_camera: bool,
    pub(crate) pattern: Pattern,
    pub(crate) frequency: f32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            count: 12,
            radius: 20.0,
            look_at_camera: true,
            pattern: Pattern::default(),
            frequency: 1.2,
        }
    }
}

impl CloudConfig {
    pub(crate) fn validate(self) -> Result<Self, ConfigError> {
        if !COUNT_RANGE.contains(&self.count) {
            return Err(ConfigError::Count {
                got: self.count,
                min: *COUNT_RANGE.start(),
                max: *COUNT_RANGE.end(),
            });
        }
        if !RADIUS_RANGE.contains(&self.radius) {
            return Err(ConfigError::Radius {
                got: self.radius,
                min: *RADIUS_RANGE.start(),
                max: *RADIUS_RANGE.end(),
            });
        }
        if !FREQUENCY_RANGE.contains(&self.frequency) {
            return Err(ConfigError::Frequency {
                got: self.frequency,
                min: *FREQUENCY_RANGE.start(),
                max: *FREQUENCY_RANGE.end(),
            });
        }
        Ok(self)
    }
}
