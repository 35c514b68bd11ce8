use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const MIN_SIZE: usize = 1;
pub const MAX_SIZE: usize = 500;
pub const DEFAULT_SIZE: usize = 50;

/// User-facing speed setting in `1..=100`.
///
/// The setting is inverted into a step delay of `101 - setting` milliseconds,
/// so the default setting of 1 waits 100 ms between steps and 100 waits 1 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SpeedSetting(u8);

impl SpeedSetting {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, EngineError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(EngineError::invalid(
                "speed",
                format!(
                    "{value} is outside {}..={}",
                    Self::MIN,
                    Self::MAX
                ),
            ));
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn delay_millis(self) -> u64 {
        101 - u64::from(self.0)
    }

    #[inline]
    pub fn delay(self) -> Duration {
        Duration::from_millis(self.delay_millis())
    }
}

impl Default for SpeedSetting {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for SpeedSetting {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SpeedSetting> for u8 {
    fn from(setting: SpeedSetting) -> Self {
        setting.0
    }
}

/// Inclusive range of generated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl ValueRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.min > self.max {
            return Err(EngineError::invalid(
                "value_range",
                format!("min {} exceeds max {}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::new(1, 250)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default)]
    pub speed: SpeedSetting,
    #[serde(default)]
    pub value_range: ValueRange,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_size() -> usize {
    DEFAULT_SIZE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            speed: SpeedSetting::default(),
            value_range: ValueRange::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_speed(mut self, speed: SpeedSetting) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects out-of-range values instead of clamping them.
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_size(self.size)?;
        self.value_range.validate()
    }
}

pub fn validate_size(size: usize) -> Result<(), EngineError> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(EngineError::invalid(
            "size",
            format!("{size} is outside {MIN_SIZE}..={MAX_SIZE}"),
        ));
    }
    Ok(())
}
