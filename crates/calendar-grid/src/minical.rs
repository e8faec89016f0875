//! Mini-calendar panel: a compact month of day numbers for quick jumps.

use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::clock::{add_days, days_in_month, first_of_month, weekday_index};
use crate::event::Event;

pub const WEEKDAY_HEADERS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniDay {
    pub day: u32,
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
    pub has_events: bool,
}

/// Seven columns; `None` entries are the blank cells before day 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MiniCalendar {
    pub title: String,
    pub cells: Vec<Option<MiniDay>>,
}

impl MiniCalendar {
    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_none()).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<MiniDay>]> {
        self.cells.chunks(7)
    }

    /// Plain-text rendering; the focused day is bracketed.
    pub fn to_text(&self) -> String {
        let mut out = format!("{:^28}\n", self.title);
        out.push_str(&WEEKDAY_HEADERS.map(|h| format!(" {} ", h)).join(""));
        for row in self.rows() {
            out.push('\n');
            for cell in row {
                match cell {
                    None => out.push_str("    "),
                    Some(day) if day.is_selected => {
                        let _ = write!(out, "[{:>2}]", day.day);
                    }
                    Some(day) if day.has_events => {
                        let _ = write!(out, " {:>2}*", day.day);
                    }
                    Some(day) => {
                        let _ = write!(out, " {:>2} ", day.day);
                    }
                }
            }
        }
        out
    }
}

/// Build the panel for the month containing `focused`.
pub fn mini_calendar(focused: NaiveDate, today: NaiveDate, events: &[Event]) -> MiniCalendar {
    let first = first_of_month(focused);
    let blanks = weekday_index(first);
    let len = days_in_month(first.year(), first.month());

    let mut cells: Vec<Option<MiniDay>> = vec![None; blanks];
    cells.extend((0..len).map(|offset| {
        let date = add_days(first, i64::from(offset));
        Some(MiniDay {
            day: offset + 1,
            date,
            is_today: date == today,
            is_selected: date == focused,
            has_events: events.iter().any(|e| e.date == date),
        })
    }));

    MiniCalendar {
        title: first.format("%B %Y").to_string(),
        cells,
    }
}
