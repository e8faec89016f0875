//! WASM bindings for calendar-grid.
//!
//! Exposes calendar rendering, event layout and the upcoming-events panel to
//! the browser via `wasm-bindgen`. All complex types are passed as JSON
//! strings. The bindings are stateless: the page keeps the focused date and
//! mode and passes them in on every call, together with the current instant
//! (`new Date().toISOString()`).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p calendar-grid-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/pkg/ \
//!   target/wasm32-unknown-unknown/release/calendar_grid_wasm.wasm
//! ```

use calendar_grid::clock::{parse_date, parse_hhmm, parse_local_datetime};
use calendar_grid::recurrence::expand_all;
use calendar_grid::view::visible_range;
use calendar_grid::{
    layout_timed, parse_events, CalendarView, CalendarViewState, Event, FixedClock, GridConfig,
    Theme, ViewMode,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Input DTOs
// ---------------------------------------------------------------------------

/// Options accepted by [`render_calendar`]. Everything except `now` is optional.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RenderOptions {
    view: ViewMode,
    /// Focused date (`YYYY-MM-DD`); defaults to the date of `now`.
    date: Option<String>,
    /// Current instant, RFC 3339.
    now: Option<String>,
    theme: Theme,
    loading: bool,
    config: GridConfig,
    /// Id of the event whose detail overlay is open. Recurring occurrences
    /// use their `"<id>@<YYYY-MM-DD>"` id.
    selected_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Output DTOs
// ---------------------------------------------------------------------------

/// Result of [`step_date`]. The page passes `anchor_day` back on the next
/// call so month stepping stays reversible (Jan 31 → Feb 29 → Jan 31).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Step {
    date: NaiveDate,
    anchor_day: u32,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_events_json(json: &str) -> Result<Vec<Event>, JsValue> {
    parse_events(json).map_err(|e| JsValue::from_str(&format!("Invalid events JSON: {}", e)))
}

fn parse_now(now: &str, config: &GridConfig) -> Result<NaiveDateTime, JsValue> {
    let tz = config.tz().map_err(js_err)?;
    parse_local_datetime(now, tz).map_err(js_err)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Render the full calendar model for one view.
///
/// `events_json` is a JSON array of events; `options_json` is an object with
/// `view`, `date`, `now`, `theme`, `loading`, `config` and `selectedId`.
/// Returns the render model as a JSON string (`{"status":"loading"}` while
/// loading).
#[wasm_bindgen(js_name = "renderCalendar")]
pub fn render_calendar(events_json: &str, options_json: &str) -> Result<String, JsValue> {
    let options: RenderOptions = serde_json::from_str(options_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid options JSON: {}", e)))?;
    let events = parse_events_json(events_json)?;

    let now_raw = options
        .now
        .as_deref()
        .ok_or_else(|| JsValue::from_str("options.now is required"))?;
    let now = parse_now(now_raw, &options.config)?;
    let focused = match options.date.as_deref() {
        Some(raw) => parse_date(raw).map_err(js_err)?,
        None => now.date(),
    };
    let (from, to) = visible_range(focused, options.view);
    let visible = expand_all(&events, from, to).map_err(js_err)?;

    let mut calendar = CalendarView::new(options.config, Box::new(FixedClock(now)))
        .map_err(js_err)?
        .with_events(events.clone())
        .with_theme(options.theme)
        .with_loading(options.loading);
    calendar.set_current_date(focused);
    calendar.set_current_view(options.view);

    if let Some(id) = options.selected_id.as_deref() {
        // On-screen occurrences first, then the upcoming panel, then the raw input.
        let upcoming = calendar.upcoming().map_err(js_err)?;
        let selected = visible
            .iter()
            .chain(&upcoming)
            .chain(&events)
            .find(|e| e.id == id)
            .cloned();
        if let Some(event) = selected {
            calendar.select_event(event);
        }
    }

    to_json(&calendar.render().map_err(js_err)?)
}

/// The next `limit` events after `now` (RFC 3339), ascending by date.
#[wasm_bindgen(js_name = "upcomingEvents")]
pub fn upcoming_events(events_json: &str, now: &str, limit: usize) -> Result<String, JsValue> {
    let config = GridConfig {
        upcoming_limit: limit,
        ..GridConfig::default()
    };
    let now = parse_now(now, &config)?;
    let calendar = CalendarView::new(config, Box::new(FixedClock(now)))
        .map_err(js_err)?
        .with_events(parse_events_json(events_json)?);
    to_json(&calendar.upcoming().map_err(js_err)?)
}

/// Pixel `{top, height}` of an `HH:MM` range on an hour grid.
#[wasm_bindgen(js_name = "layoutTimedEvent")]
pub fn layout_timed_event(
    start: &str,
    end: &str,
    first_hour: u32,
    px_per_hour: f64,
) -> Result<String, JsValue> {
    let start = parse_hhmm(start).map_err(js_err)?;
    let end = parse_hhmm(end).map_err(js_err)?;
    to_json(&layout_timed(start, end, first_hour, px_per_hour))
}

/// The focused date after one next (`direction > 0`) or previous step in
/// `view` mode.
///
/// `anchor_day` is the value returned by the previous call (omit it after an
/// explicit date jump). Returns `{"date":"YYYY-MM-DD","anchorDay":N}`.
#[wasm_bindgen(js_name = "stepDate")]
pub fn step_date(
    date: &str,
    view: &str,
    direction: i32,
    anchor_day: Option<u32>,
) -> Result<String, JsValue> {
    let date = parse_date(date).map_err(js_err)?;
    let mode: ViewMode = view.parse().map_err(js_err)?;
    let mut state = match anchor_day {
        Some(anchor) => CalendarViewState::with_anchor(date, mode, anchor),
        None => CalendarViewState::with_mode(date, mode),
    };
    if direction > 0 {
        state.go_to_next();
    } else if direction < 0 {
        state.go_to_previous();
    }
    to_json(&Step {
        date: state.focused_date(),
        anchor_day: state.anchor_day(),
    })
}
