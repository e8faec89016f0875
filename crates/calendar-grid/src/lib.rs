//! # calendar-grid
//!
//! Calendar grid derivation and event layout for maintenance scheduling.
//!
//! Takes the read-only list of maintenance events a host application fetched
//! and produces everything a renderer needs for a day, week or month view:
//! the focused period and its label, hour slots and day cells, pixel/percent
//! placement for each event, the mini-calendar and the "upcoming" panel.
//!
//! ## Modules
//!
//! - [`clock`]: date arithmetic, Sunday-first weeks, `HH:MM` parsing, injectable clock
//! - [`view`]: view-state controller and pure grid derivation
//! - [`layout`]: time ranges to rectangles; events to month cells
//! - [`minical`]: mini-calendar panel
//! - [`calendar`]: composed view, upcoming events, selection overlay
//! - [`recurrence`]: RRULE expansion for periodic maintenance
//! - [`theme`]: light/dark colors for event tags
//! - [`config`]: grid geometry and limits
//! - [`error`]: Error types

pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod layout;
pub mod minical;
pub mod recurrence;
pub mod theme;
pub mod view;

pub use calendar::{upcoming_events, CalendarView, Rendered};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::GridConfig;
pub use error::CalendarError;
pub use event::{parse_events, Event};
pub use layout::{layout_day, layout_month, layout_timed, layout_week};
pub use minical::mini_calendar;
pub use recurrence::expand_occurrences;
pub use theme::Theme;
pub use view::{derive_grid, CalendarViewState, DayCell, ViewMode};
