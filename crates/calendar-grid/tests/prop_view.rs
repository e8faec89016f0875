//! Property-based tests for navigation and layout using proptest.
//!
//! These hold for any date and any well-formed time range, not just the
//! specific cases in `view_tests.rs` and `layout_tests.rs`.

use calendar_grid::clock::{days_in_month, weekday_index};
use calendar_grid::config::GridConfig;
use calendar_grid::layout::layout_timed;
use calendar_grid::minical::mini_calendar;
use calendar_grid::view::{month_grid, CalendarViewState, ViewMode};
use chrono::{Datelike, NaiveDate, NaiveTime};
use proptest::prelude::*;

// ─────────────────────────────────────────────────────────────────────────────
// Strategies
// ─────────────────────────────────────────────────────────────────────────────

/// Any valid date in 1950-2150, including month-end days.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1950i32..=2150, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d.min(days_in_month(y, m))).unwrap()
    })
}

fn arb_mode() -> impl Strategy<Value = ViewMode> {
    prop_oneof![
        Just(ViewMode::Day),
        Just(ViewMode::Week),
        Just(ViewMode::Month),
    ]
}

/// A start/end pair with start strictly before end, both within 08:00-19:59.
fn arb_time_range() -> impl Strategy<Value = (NaiveTime, NaiveTime)> {
    (8u32 * 60..20 * 60 - 1)
        .prop_flat_map(|start| (Just(start), start + 1..20 * 60))
        .prop_map(|(start, end)| {
            (
                NaiveTime::from_hms_opt(start / 60, start % 60, 0).unwrap(),
                NaiveTime::from_hms_opt(end / 60, end % 60, 0).unwrap(),
            )
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn next_then_previous_returns_to_start(date in arb_date(), mode in arb_mode()) {
        let mut state = CalendarViewState::with_mode(date, mode);
        state.go_to_next();
        state.go_to_previous();
        prop_assert_eq!(state.focused_date(), date);
    }

    #[test]
    fn previous_then_next_returns_to_start(date in arb_date(), mode in arb_mode()) {
        let mut state = CalendarViewState::with_mode(date, mode);
        state.go_to_previous();
        state.go_to_next();
        prop_assert_eq!(state.focused_date(), date);
    }

    #[test]
    fn month_step_lands_in_adjacent_month(date in arb_date()) {
        let mut state = CalendarViewState::with_mode(date, ViewMode::Month);
        state.go_to_next();
        let next = state.focused_date();
        let months = |d: NaiveDate| d.year() * 12 + d.month0() as i32;
        prop_assert_eq!(months(next), months(date) + 1);
    }

    #[test]
    fn mode_switch_never_moves_focus(date in arb_date(), a in arb_mode(), b in arb_mode()) {
        let mut state = CalendarViewState::with_mode(date, a);
        state.set_current_view(b);
        prop_assert_eq!(state.focused_date(), date);
        state.set_current_view(a);
        prop_assert_eq!(state.focused_date(), date);
    }

    #[test]
    fn well_formed_ranges_have_positive_height((start, end) in arb_time_range()) {
        let config = GridConfig::default();
        let rect = layout_timed(start, end, config.first_hour, config.px_per_hour);
        prop_assert!(rect.height > 0.0);
        prop_assert!(rect.top < rect.top + rect.height);
        prop_assert!(rect.top >= 0.0);
    }

    #[test]
    fn leading_blanks_match_first_weekday(date in arb_date()) {
        let first = date.with_day(1).unwrap();
        let cells = month_grid(date);
        let leading = cells.iter().take_while(|c| !c.in_current_month).count();
        prop_assert_eq!(leading, weekday_index(first));

        let mini = mini_calendar(date, date, &[]);
        prop_assert_eq!(mini.leading_blanks(), weekday_index(first));
        prop_assert_eq!(
            mini.cells.len() - mini.leading_blanks(),
            days_in_month(date.year(), date.month()) as usize
        );
    }

    #[test]
    fn month_grid_covers_the_whole_month(date in arb_date()) {
        let cells = month_grid(date);
        prop_assert_eq!(cells.len(), 42);
        let in_month = cells.iter().filter(|c| c.in_current_month).count();
        prop_assert_eq!(in_month, days_in_month(date.year(), date.month()) as usize);
        prop_assert!(cells.windows(2).all(|w| w[1].date == w[0].date.succ_opt().unwrap()));
    }
}
