//! The composed calendar view.
//!
//! [`CalendarView`] owns the view state and the host's inputs (events, loading
//! flag, theme, click callback) and turns them into a serializable
//! [`Rendered`] model. Rendering is a pure function of the current state and
//! the event list; calling it twice gives the same result.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use crate::clock::{add_days, Clock};
use crate::config::GridConfig;
use crate::error::Result;
use crate::event::Event;
use crate::layout::{self, MonthCell, PositionedEvent};
use crate::minical::{self, MiniCalendar};
use crate::recurrence;
use crate::theme::{Swatch, Theme};
use crate::view::{self, CalendarViewState, Grid, HourSlot, ViewMode};

/// How far ahead recurring events are expanded for the upcoming panel.
/// One-off events are considered regardless of distance.
const UPCOMING_HORIZON_DAYS: i64 = 366;

pub type EventCallback = Box<dyn FnMut(&Event)>;

/// The first `limit` events starting after `now`, ascending by date.
///
/// An event counts as upcoming when its date is after today, or it is today
/// and its start time is later than now. Events sharing a date keep their
/// input order.
pub fn upcoming_events(events: &[Event], now: NaiveDateTime, limit: usize) -> Vec<Event> {
    let mut future: Vec<&Event> = events.iter().filter(|e| e.starts_at() > now).collect();
    future.sort_by_key(|e| e.date);
    future.into_iter().take(limit).cloned().collect()
}

/// An event placed on the hour grid, with its resolved colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledEvent {
    #[serde(flatten)]
    pub placed: PositionedEvent,
    pub swatch: Swatch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledMonthCell {
    #[serde(flatten)]
    pub cell: MonthCell,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow: Option<String>,
    pub swatches: Vec<Swatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GridModel {
    Day {
        date: NaiveDate,
        hours: Vec<HourSlot>,
        events: Vec<StyledEvent>,
    },
    Week {
        days: Vec<NaiveDate>,
        hours: Vec<HourSlot>,
        events: Vec<StyledEvent>,
    },
    Month {
        cells: Vec<StyledMonthCell>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarModel {
    pub mode: ViewMode,
    pub focused_date: NaiveDate,
    pub label: String,
    pub theme: Theme,
    pub grid_height_px: f64,
    pub grid: GridModel,
    pub mini_calendar: MiniCalendar,
    pub upcoming: Vec<Event>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<Event>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Rendered {
    /// The host is still fetching events.
    Loading,
    Ready(Box<CalendarModel>),
}

impl Rendered {
    pub fn model(&self) -> Option<&CalendarModel> {
        match self {
            Rendered::Loading => None,
            Rendered::Ready(model) => Some(model),
        }
    }
}

pub struct CalendarView {
    events: Vec<Event>,
    loading: bool,
    theme: Theme,
    config: GridConfig,
    clock: Box<dyn Clock>,
    on_event_click: Option<EventCallback>,
    state: CalendarViewState,
}

impl CalendarView {
    /// A view focused on the clock's today in month mode.
    ///
    /// Fails when `config` does not pass [`GridConfig::validate`].
    pub fn new(config: GridConfig, clock: Box<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let state = CalendarViewState::new(clock.today());
        Ok(Self {
            events: Vec::new(),
            loading: false,
            theme: Theme::default(),
            config,
            clock,
            on_event_click: None,
            state,
        })
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Also notify the host when an event in the grid is clicked.
    pub fn on_event_click(mut self, callback: impl FnMut(&Event) + 'static) -> Self {
        self.on_event_click = Some(Box::new(callback));
        self
    }

    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn state(&self) -> &CalendarViewState {
        &self.state
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn go_to_next(&mut self) {
        self.state.go_to_next();
    }

    pub fn go_to_previous(&mut self) {
        self.state.go_to_previous();
    }

    pub fn go_to_today(&mut self) {
        self.state.go_to_today(self.clock.today());
    }

    pub fn set_current_view(&mut self, mode: ViewMode) {
        self.state.set_current_view(mode);
    }

    pub fn set_current_date(&mut self, date: NaiveDate) {
        self.state.set_current_date(date);
    }

    /// A click on a mini-calendar day: focus it and open the day view.
    pub fn select_mini_day(&mut self, date: NaiveDate) {
        self.state.set_current_date(date);
        self.state.set_current_view(ViewMode::Day);
    }

    /// A click on an event in the grid: opens the overlay and notifies the
    /// host callback, if any.
    pub fn activate_event(&mut self, event: &Event) {
        self.select_event(event.clone());
        if let Some(callback) = self.on_event_click.as_mut() {
            callback(event);
        }
    }

    /// Open the detail overlay for `event` (used by the upcoming panel).
    pub fn select_event(&mut self, event: Event) {
        debug!(event = %event.id, "selected event");
        self.state.select(event);
    }

    pub fn close_selection(&mut self) {
        self.state.close_selection();
    }

    pub fn upcoming(&self) -> Result<Vec<Event>> {
        let now = self.clock.now();
        let horizon = add_days(now.date(), UPCOMING_HORIZON_DAYS);
        let mut candidates = Vec::with_capacity(self.events.len());
        for event in &self.events {
            if event.recurrence.is_some() {
                candidates.extend(recurrence::expand_occurrences(event, now.date(), horizon)?);
            } else {
                candidates.push(event.clone());
            }
        }
        Ok(upcoming_events(&candidates, now, self.config.upcoming_limit))
    }

    pub fn render(&self) -> Result<Rendered> {
        if self.loading {
            return Ok(Rendered::Loading);
        }

        let (from, to) = self.state.visible_range();
        let visible = recurrence::expand_all(&self.events, from, to)?;

        let grid = match self.state.grid(&self.config) {
            Grid::Day { date, hours } => GridModel::Day {
                date,
                hours,
                events: self.style(layout::layout_day(&visible, date, &self.config)),
            },
            Grid::Week { days, hours } => {
                let events = self.style(layout::layout_week(&visible, &days, &self.config));
                GridModel::Week {
                    days,
                    hours,
                    events,
                }
            }
            Grid::Month { cells } => GridModel::Month {
                cells: layout::layout_month(&visible, &cells, self.config.month_cell_limit)
                    .into_iter()
                    .map(|cell| StyledMonthCell {
                        overflow: cell.overflow_label(),
                        swatches: cell.events.iter().map(|e| self.theme.swatch(&e.color)).collect(),
                        cell,
                    })
                    .collect(),
            },
        };

        let focused = self.state.focused_date();
        let month_events;
        let mini_events: &[Event] = if self.state.mode() == ViewMode::Month {
            &visible
        } else {
            let (first, last) = view::visible_range(focused, ViewMode::Month);
            month_events = recurrence::expand_all(&self.events, first, last)?;
            &month_events
        };

        Ok(Rendered::Ready(Box::new(CalendarModel {
            mode: self.state.mode(),
            focused_date: focused,
            label: self.state.label(),
            theme: self.theme,
            grid_height_px: self.config.grid_height_px(),
            grid,
            mini_calendar: minical::mini_calendar(focused, self.clock.today(), mini_events),
            upcoming: self.upcoming()?,
            selected: self.state.selected().cloned(),
        })))
    }

    fn style(&self, placed: Vec<PositionedEvent>) -> Vec<StyledEvent> {
        placed
            .into_iter()
            .map(|placed| StyledEvent {
                swatch: self.theme.swatch(&placed.event.color),
                placed,
            })
            .collect()
    }
}
