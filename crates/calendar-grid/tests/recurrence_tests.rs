//! Tests for expanding recurring maintenance into dated occurrences.

use calendar_grid::calendar::GridModel;
use calendar_grid::recurrence::{expand_all, expand_occurrences};
use calendar_grid::{CalendarError, CalendarView, Event, FixedClock, GridConfig};
use chrono::{NaiveDate, NaiveTime};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn t(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

fn calibration(rule: &str) -> Event {
    Event::new("cal-01", "Ventilator calibration", d(2024, 6, 15), t(10), t(11))
        .with_recurrence(rule)
}

// ─────────────────────────────────────────────────────────────────────────────
// Non-recurring events
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn plain_event_passes_through_when_in_range() {
    let ev = Event::new("x", "Inspection", d(2024, 6, 3), t(9), t(10));
    assert_eq!(
        expand_occurrences(&ev, d(2024, 6, 1), d(2024, 6, 30)).unwrap(),
        vec![ev.clone()]
    );
    assert!(expand_occurrences(&ev, d(2024, 7, 1), d(2024, 7, 31))
        .unwrap()
        .is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Recurring events
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn monthly_rule_yields_one_occurrence_per_month() {
    let occurrences =
        expand_occurrences(&calibration("FREQ=MONTHLY"), d(2024, 6, 1), d(2024, 9, 30)).unwrap();
    let dates: Vec<NaiveDate> = occurrences.iter().map(|e| e.date).collect();
    assert_eq!(
        dates,
        vec![d(2024, 6, 15), d(2024, 7, 15), d(2024, 8, 15), d(2024, 9, 15)]
    );
    assert!(occurrences.iter().all(|e| e.recurrence.is_none()));
    assert!(occurrences.iter().all(|e| e.start_time == t(10) && e.end_time == t(11)));
    assert_eq!(occurrences[1].id, "cal-01@2024-07-15");
}

#[test]
fn range_edges_are_inclusive() {
    let occurrences =
        expand_occurrences(&calibration("FREQ=MONTHLY"), d(2024, 7, 15), d(2024, 8, 15)).unwrap();
    assert_eq!(occurrences.len(), 2);
}

#[test]
fn occurrences_before_dtstart_are_not_invented() {
    let occurrences =
        expand_occurrences(&calibration("FREQ=MONTHLY"), d(2024, 1, 1), d(2024, 6, 30)).unwrap();
    assert_eq!(occurrences.len(), 1);
    assert_eq!(occurrences[0].date, d(2024, 6, 15));
}

#[test]
fn weekly_byday_rule() {
    let ev = Event::new("w", "Autoclave check", d(2024, 6, 3), t(8), t(9))
        .with_recurrence("FREQ=WEEKLY;BYDAY=MO,WE");
    let occurrences = expand_occurrences(&ev, d(2024, 6, 2), d(2024, 6, 8)).unwrap();
    let dates: Vec<NaiveDate> = occurrences.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![d(2024, 6, 3), d(2024, 6, 5)]);
}

#[test]
fn count_limits_occurrences() {
    let occurrences = expand_occurrences(
        &calibration("FREQ=MONTHLY;COUNT=2"),
        d(2024, 1, 1),
        d(2025, 12, 31),
    )
    .unwrap();
    assert_eq!(occurrences.len(), 2);
}

#[test]
fn rrule_prefix_is_accepted() {
    let occurrences = expand_occurrences(
        &calibration("RRULE:FREQ=MONTHLY"),
        d(2024, 6, 1),
        d(2024, 6, 30),
    )
    .unwrap();
    assert_eq!(occurrences.len(), 1);
}

#[test]
fn invalid_rule_is_an_error() {
    let err = expand_occurrences(&calibration("FREQ=SOMETIMES"), d(2024, 6, 1), d(2024, 6, 30))
        .unwrap_err();
    assert!(matches!(err, CalendarError::InvalidRule(_)));

    let err = expand_occurrences(&calibration("  "), d(2024, 6, 1), d(2024, 6, 30)).unwrap_err();
    assert!(matches!(err, CalendarError::InvalidRule(_)));
}

#[test]
fn expand_all_keeps_input_order() {
    let plain = Event::new("p", "Battery swap", d(2024, 6, 20), t(9), t(10));
    let expanded = expand_all(
        &[calibration("FREQ=MONTHLY"), plain],
        d(2024, 6, 1),
        d(2024, 7, 31),
    )
    .unwrap();
    let ids: Vec<&str> = expanded.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["cal-01@2024-06-15", "cal-01@2024-07-15", "p"]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Through the view
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn month_view_shows_each_visible_occurrence() {
    let now = d(2024, 6, 1).and_time(t(12));
    let view = CalendarView::new(GridConfig::default(), Box::new(FixedClock(now)))
        .unwrap()
        .with_events(vec![calibration("FREQ=WEEKLY")]);

    let rendered = view.render().unwrap();
    let model = rendered.model().unwrap();
    let GridModel::Month { cells } = &model.grid else {
        panic!("expected month grid");
    };
    // Saturdays from Jun 15 through the grid's last cell, Jul 6.
    let busy: Vec<NaiveDate> = cells
        .iter()
        .filter(|c| !c.cell.events.is_empty())
        .map(|c| c.cell.date)
        .collect();
    assert_eq!(
        busy,
        vec![d(2024, 6, 15), d(2024, 6, 22), d(2024, 6, 29), d(2024, 7, 6)]
    );
    assert_eq!(model.upcoming.len(), 3);
    assert_eq!(model.upcoming[0].date, d(2024, 6, 15));
}
