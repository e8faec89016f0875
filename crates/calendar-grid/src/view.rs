//! View-state controller: the focused date, the active mode, and the grids
//! derived from them.
//!
//! Grids are never cached. [`derive_grid`] recomputes them from the focused
//! date on every call, so a jump to an arbitrary date can't leave stale cells
//! behind.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{
    add_days, add_months, clamp_to_month, first_of_month, start_of_week, weekday_index,
};
use crate::config::GridConfig;
use crate::error::CalendarError;
use crate::event::Event;

/// Cells in a month grid: six Sunday-first weeks.
pub const MONTH_GRID_CELLS: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    Week,
    #[default]
    Month,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Day, ViewMode::Week, ViewMode::Month];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            _ => Err(CalendarError::InvalidViewMode(s.to_string())),
        }
    }
}

/// A month-grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
}

/// One row on the vertical axis of the day and week grids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourSlot {
    pub hour: u32,
    pub label: String,
}

/// The grid shape for a mode, before any events are placed on it.
#[derive(Debug, Clone, PartialEq)]
pub enum Grid {
    Day {
        date: NaiveDate,
        hours: Vec<HourSlot>,
    },
    Week {
        days: Vec<NaiveDate>,
        hours: Vec<HourSlot>,
    },
    Month {
        cells: Vec<DayCell>,
    },
}

pub fn derive_grid(focused: NaiveDate, mode: ViewMode, config: &GridConfig) -> Grid {
    match mode {
        ViewMode::Day => Grid::Day {
            date: focused,
            hours: hour_slots(config),
        },
        ViewMode::Week => Grid::Week {
            days: week_days(focused),
            hours: hour_slots(config),
        },
        ViewMode::Month => Grid::Month {
            cells: month_grid(focused),
        },
    }
}

/// The contiguous business-hours rows, `first_hour..=last_hour`.
pub fn hour_slots(config: &GridConfig) -> Vec<HourSlot> {
    (config.first_hour..=config.last_hour)
        .map(|hour| HourSlot {
            hour,
            label: format!("{:02}:00", hour),
        })
        .collect()
}

/// The Sunday-first week containing `focused`.
pub fn week_days(focused: NaiveDate) -> Vec<NaiveDate> {
    let sunday = start_of_week(focused);
    (0..7).map(|i| add_days(sunday, i)).collect()
}

/// Forty-two cells starting on the Sunday on or before the 1st of `focused`'s
/// month. Leading cells from the previous month number `weekday_index(1st)`.
pub fn month_grid(focused: NaiveDate) -> Vec<DayCell> {
    let first = first_of_month(focused);
    let grid_start = add_days(first, -(weekday_index(first) as i64));
    (0..MONTH_GRID_CELLS as i64)
        .map(|i| {
            let date = add_days(grid_start, i);
            DayCell {
                date,
                in_current_month: date.year() == first.year() && date.month() == first.month(),
            }
        })
        .collect()
}

/// Human label for the focused period.
pub fn label(focused: NaiveDate, mode: ViewMode) -> String {
    match mode {
        ViewMode::Day => focused.format("%A, %B %-d, %Y").to_string(),
        ViewMode::Month => focused.format("%B %Y").to_string(),
        ViewMode::Week => {
            let days = week_days(focused);
            let (first, last) = (days[0], days[6]);
            if first.year() == last.year() {
                format!(
                    "{} - {}",
                    first.format("%b %-d"),
                    last.format("%b %-d, %Y")
                )
            } else {
                format!(
                    "{} - {}",
                    first.format("%b %-d, %Y"),
                    last.format("%b %-d, %Y")
                )
            }
        }
    }
}

/// First and last date (inclusive) shown by `mode`.
pub fn visible_range(focused: NaiveDate, mode: ViewMode) -> (NaiveDate, NaiveDate) {
    match mode {
        ViewMode::Day => (focused, focused),
        ViewMode::Week => {
            let sunday = start_of_week(focused);
            (sunday, add_days(sunday, 6))
        }
        ViewMode::Month => {
            let cells = month_grid(focused);
            (cells[0].date, cells[MONTH_GRID_CELLS - 1].date)
        }
    }
}

/// What the calendar currently displays.
///
/// Besides the focused date the state keeps an *anchor day*: the day of month
/// last chosen explicitly (or reached by day/week stepping). Month stepping
/// clamps to short months but lands back on the anchor, so Jan 31 → Feb 29 →
/// Jan 31.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarViewState {
    focused: NaiveDate,
    mode: ViewMode,
    anchor_day: u32,
    selected: Option<Event>,
}

impl CalendarViewState {
    /// Fresh state on `today` in month mode.
    pub fn new(today: NaiveDate) -> Self {
        Self::with_mode(today, ViewMode::default())
    }

    pub fn with_mode(focused: NaiveDate, mode: ViewMode) -> Self {
        Self {
            focused,
            mode,
            anchor_day: focused.day(),
            selected: None,
        }
    }

    /// Restore a state whose anchor day was kept by the caller, as a
    /// stateless host has to between calls.
    pub fn with_anchor(focused: NaiveDate, mode: ViewMode, anchor_day: u32) -> Self {
        Self {
            anchor_day: anchor_day.clamp(1, 31),
            ..Self::with_mode(focused, mode)
        }
    }

    pub fn focused_date(&self) -> NaiveDate {
        self.focused
    }

    /// Day of month that month stepping tries to land on.
    pub fn anchor_day(&self) -> u32 {
        self.anchor_day
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn selected(&self) -> Option<&Event> {
        self.selected.as_ref()
    }

    pub fn go_to_next(&mut self) {
        self.step(1);
    }

    pub fn go_to_previous(&mut self) {
        self.step(-1);
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.set_current_date(today);
    }

    pub fn set_current_view(&mut self, mode: ViewMode) {
        debug!(from = %self.mode, to = %mode, "switching view mode");
        self.mode = mode;
    }

    pub fn set_current_date(&mut self, date: NaiveDate) {
        self.focused = date;
        self.anchor_day = date.day();
    }

    /// Open the detail overlay, replacing any open one.
    pub fn select(&mut self, event: Event) {
        self.selected = Some(event);
    }

    pub fn close_selection(&mut self) {
        self.selected = None;
    }

    pub fn label(&self) -> String {
        label(self.focused, self.mode)
    }

    pub fn week_days(&self) -> Vec<NaiveDate> {
        week_days(self.focused)
    }

    pub fn month_grid(&self) -> Vec<DayCell> {
        month_grid(self.focused)
    }

    pub fn grid(&self, config: &GridConfig) -> Grid {
        derive_grid(self.focused, self.mode, config)
    }

    pub fn visible_range(&self) -> (NaiveDate, NaiveDate) {
        visible_range(self.focused, self.mode)
    }

    fn step(&mut self, direction: i32) {
        let from = self.focused;
        match self.mode {
            ViewMode::Day => {
                self.focused = add_days(from, i64::from(direction));
                self.anchor_day = self.focused.day();
            }
            ViewMode::Week => {
                self.focused = add_days(from, 7 * i64::from(direction));
                self.anchor_day = self.focused.day();
            }
            ViewMode::Month => {
                let month = add_months(first_of_month(from), direction);
                self.focused = clamp_to_month(month, self.anchor_day);
            }
        }
        debug!(mode = %self.mode, %from, to = %self.focused, "navigated");
    }
}
