//! Event layout: time ranges to rectangles on the hour grid, and events to
//! month cells.
//!
//! Nothing here clips. An event before the first displayed hour gets a
//! negative `top`; one running past the last hour overflows the grid height.
//! The renderer decides whether to clip or scroll.
//!
//! Events are matched to days by exact date equality. A day or week view shows
//! only events whose `date` is one of its days.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::clock::{fractional_hour, hour_offset_px};
use crate::config::GridConfig;
use crate::event::Event;
use crate::view::DayCell;

/// Vertical placement on the hour grid, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimedBox {
    pub top: f64,
    pub height: f64,
}

/// Horizontal placement of a week-view event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekColumn {
    /// Zero-based day within the displayed 7-day window.
    pub day_index: usize,
    pub left_percent: f64,
    /// Column share before the gutter is subtracted.
    pub width_percent: f64,
    pub gutter_px: f64,
}

impl WeekColumn {
    pub fn css_left(&self) -> String {
        format!("{:.4}%", self.left_percent)
    }

    pub fn css_width(&self) -> String {
        format!("calc({:.4}% - {}px)", self.width_percent, self.gutter_px)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEvent {
    pub event: Event,
    pub top: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<WeekColumn>,
}

/// A month-grid cell with the events that fit and a count of the rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub events: Vec<Event>,
    pub hidden_count: usize,
}

impl MonthCell {
    /// `"+2 more"` when events were cut off.
    pub fn overflow_label(&self) -> Option<String> {
        (self.hidden_count > 0).then(|| format!("+{} more", self.hidden_count))
    }
}

/// `top = (start - first_hour) * px`, `height = (end - start) * px`, with
/// times as fractional hours.
pub fn layout_timed(
    start: NaiveTime,
    end: NaiveTime,
    first_hour: u32,
    px_per_hour: f64,
) -> TimedBox {
    TimedBox {
        top: hour_offset_px(start, first_hour, px_per_hour),
        height: (fractional_hour(end) - fractional_hour(start)) * px_per_hour,
    }
}

pub fn week_column(day_index: usize, gutter_px: f64) -> WeekColumn {
    WeekColumn {
        day_index,
        left_percent: day_index as f64 / 7.0 * 100.0,
        width_percent: 100.0 / 7.0,
        gutter_px,
    }
}

fn position(event: &Event, config: &GridConfig, column: Option<WeekColumn>) -> PositionedEvent {
    let rect = layout_timed(
        event.start_time,
        event.end_time,
        config.first_hour,
        config.px_per_hour,
    );
    PositionedEvent {
        event: event.clone(),
        top: rect.top,
        height: rect.height,
        column,
    }
}

/// Events dated `date`, in input order.
pub fn layout_day(events: &[Event], date: NaiveDate, config: &GridConfig) -> Vec<PositionedEvent> {
    events
        .iter()
        .filter(|e| e.date == date)
        .map(|e| position(e, config, None))
        .collect()
}

/// Events dated on one of `days`, each tagged with its column.
pub fn layout_week(
    events: &[Event],
    days: &[NaiveDate],
    config: &GridConfig,
) -> Vec<PositionedEvent> {
    events
        .iter()
        .filter_map(|e| {
            let day_index = days.iter().position(|d| *d == e.date)?;
            Some(position(
                e,
                config,
                Some(week_column(day_index, config.week_gutter_px)),
            ))
        })
        .collect()
}

/// Fill each cell with up to `limit` of its events; the rest are counted.
pub fn layout_month(events: &[Event], cells: &[DayCell], limit: usize) -> Vec<MonthCell> {
    cells
        .iter()
        .map(|cell| {
            let mut matching: Vec<Event> = events
                .iter()
                .filter(|e| e.date == cell.date)
                .cloned()
                .collect();
            let hidden_count = matching.len().saturating_sub(limit);
            matching.truncate(limit);
            MonthCell {
                date: cell.date,
                in_current_month: cell.in_current_month,
                events: matching,
                hidden_count,
            }
        })
        .collect()
}
