//! Grid geometry and panel limits.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```json
//! { "firstHour": 7, "lastHour": 17, "timezone": "America/Bogota" }
//! ```

use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::error::{CalendarError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// First hour row of the day/week grid.
    pub first_hour: u32,
    /// Last hour row, inclusive.
    pub last_hour: u32,
    pub px_per_hour: f64,
    /// Horizontal space subtracted from each week column.
    pub week_gutter_px: f64,
    /// Events shown directly in a month cell before collapsing into "+N more".
    pub month_cell_limit: usize,
    pub upcoming_limit: usize,
    /// IANA zone used to decide what "today" and "now" are.
    pub timezone: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            first_hour: 8,
            last_hour: 19,
            px_per_hour: 60.0,
            week_gutter_px: 4.0,
            month_cell_limit: 3,
            upcoming_limit: 3,
            timezone: "UTC".to_string(),
        }
    }
}

impl GridConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading grid config");
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.last_hour > 23 {
            return Err(CalendarError::InvalidConfig(format!(
                "lastHour must be at most 23, got {}",
                self.last_hour
            )));
        }
        if self.first_hour > self.last_hour {
            return Err(CalendarError::InvalidConfig(format!(
                "firstHour ({}) is after lastHour ({})",
                self.first_hour, self.last_hour
            )));
        }
        if self.px_per_hour.is_nan() || self.px_per_hour <= 0.0 {
            return Err(CalendarError::InvalidConfig(format!(
                "pxPerHour must be positive, got {}",
                self.px_per_hour
            )));
        }
        self.tz()?;
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz> {
        clock::parse_timezone(&self.timezone)
    }

    /// Total pixel height of the hour grid; zero for an inverted hour range.
    pub fn grid_height_px(&self) -> f64 {
        match self.last_hour.checked_sub(self.first_hour) {
            Some(span) => f64::from(span + 1) * self.px_per_hour,
            None => 0.0,
        }
    }
}
