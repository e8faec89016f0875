//! The maintenance event record positioned on the grid.
//!
//! Events arrive from the host application as JSON (camelCase keys, times as
//! `"HH:MM"`). Parsing happens once at the boundary; the layout code works on
//! typed dates and times and never re-validates them.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::error::Result;

/// A single-day timed activity: an inspection, a preventive maintenance visit,
/// a service request appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// Must be after `start_time` for a positive layout height. Not checked.
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub organizer: String,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Display color tag, resolved through [`crate::theme::Theme::swatch`].
    #[serde(default)]
    pub color: String,
    /// RRULE body (e.g. `FREQ=MONTHLY;BYMONTHDAY=15`) for periodic maintenance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
}

impl Event {
    /// An event with only the fields the layout needs; everything else empty.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date,
            start_time,
            end_time,
            location: String::new(),
            organizer: String::new(),
            attendees: Vec::new(),
            description: String::new(),
            color: String::new(),
            recurrence: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_recurrence(mut self, rrule: impl Into<String>) -> Self {
        self.recurrence = Some(rrule.into());
        self
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// `"09:00 - 10:30"`
    pub fn time_range_label(&self) -> String {
        format!(
            "{} - {}",
            clock::format_hhmm(self.start_time),
            clock::format_hhmm(self.end_time)
        )
    }
}

/// Parse a JSON array of events.
pub fn parse_events(json: &str) -> Result<Vec<Event>> {
    Ok(serde_json::from_str(json)?)
}

/// Serde adapter for `"HH:MM"` times.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&crate::clock::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        crate::clock::parse_hhmm(&raw).map_err(de::Error::custom)
    }
}
