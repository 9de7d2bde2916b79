//! Engine configuration.
//!
//! Defaults suit a single shop open 6 AM to 9 PM in UTC. A JSON file may
//! override any subset of fields, and the `ORDER_ENGINE_*` environment
//! variables override both.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::metrics::BusinessHours;

pub const ENV_STORE_BUFFER: &str = "ORDER_ENGINE_STORE_BUFFER";
pub const ENV_UTC_OFFSET_MINUTES: &str = "ORDER_ENGINE_UTC_OFFSET_MINUTES";
pub const ENV_BUSINESS_HOURS: &str = "ORDER_ENGINE_BUSINESS_HOURS";

const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value {value:?} for {var}")]
    Env { var: &'static str, value: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Capacity of the order store's request channel.
    pub store_buffer: usize,
    pub business_hours_start: u32,
    pub business_hours_end: u32,
    /// Offset of the shop's local time from UTC.
    pub utc_offset_minutes: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            store_buffer: 32,
            business_hours_start: 6,
            business_hours_end: 21,
            utc_offset_minutes: 0,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Defaults with any `ORDER_ENGINE_*` variables applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides looked up by variable name. Unset variables are
    /// skipped; blank ones too.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let get = |var: &'static str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (var, v))
        };

        if let Some((var, value)) = get(ENV_STORE_BUFFER) {
            self.store_buffer = value.parse().map_err(|_| ConfigError::Env { var, value })?;
        }
        if let Some((var, value)) = get(ENV_UTC_OFFSET_MINUTES) {
            self.utc_offset_minutes = value.parse().map_err(|_| ConfigError::Env { var, value })?;
        }
        if let Some((var, value)) = get(ENV_BUSINESS_HOURS) {
            let parsed = value
                .split_once('-')
                .and_then(|(start, end)| {
                    Some((start.trim().parse::<u32>().ok()?, end.trim().parse::<u32>().ok()?))
                });
            let Some((start, end)) = parsed else {
                return Err(ConfigError::Env { var, value });
            };
            self.business_hours_start = start;
            self.business_hours_end = end;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_buffer == 0 {
            return Err(ConfigError::Invalid("store_buffer must be greater than 0".into()));
        }
        if self.business_hours_end > 23 || self.business_hours_start > self.business_hours_end {
            return Err(ConfigError::Invalid(format!(
                "business hours {}-{} must satisfy start <= end <= 23",
                self.business_hours_start, self.business_hours_end
            )));
        }
        if self.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "utc_offset_minutes {} is outside +/-14h",
                self.utc_offset_minutes
            )));
        }
        Ok(())
    }

    pub fn business_hours(&self) -> BusinessHours {
        BusinessHours {
            start: self.business_hours_start,
            end: self.business_hours_end,
        }
    }

    /// The shop's local offset. Falls back to UTC if the config was never
    /// validated and holds an out-of-range value.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or(Utc.fix())
    }
}
