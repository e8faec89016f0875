//! Recurring maintenance expansion.
//!
//! Preventive maintenance plans repeat (monthly calibration, quarterly
//! inspection). An event carrying an RRULE is expanded with the `rrule` crate
//! into one concrete single-day event per occurrence inside the visible range,
//! so the grid code only ever deals with plain dated events.
//!
//! Occurrence times are floating: the event's date and start time are fed to
//! the rule as UTC and read back the same way, so no offset ever shifts them.

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rrule::RRuleSet;
use tracing::debug;

use crate::error::{CalendarError, Result};
use crate::event::Event;

/// Upper bound on occurrences produced for one event in one call.
pub const MAX_OCCURRENCES: u16 = 500;

/// Occurrences of `event` whose date lies in `[from, to]`.
///
/// A non-recurring event yields itself when its date is in range. Each
/// occurrence is a copy with its `date` replaced, `recurrence` cleared and
/// `id` set to `"<id>@<YYYY-MM-DD>"`.
///
/// # Errors
/// Returns `CalendarError::InvalidRule` if the RRULE is empty or unparseable.
pub fn expand_occurrences(event: &Event, from: NaiveDate, to: NaiveDate) -> Result<Vec<Event>> {
    let Some(rule) = event.recurrence.as_deref() else {
        let in_range = event.date >= from && event.date <= to;
        return Ok(if in_range { vec![event.clone()] } else { Vec::new() });
    };

    let rule = rule.trim();
    let rule = rule.strip_prefix("RRULE:").unwrap_or(rule);
    if rule.is_empty() {
        return Err(CalendarError::InvalidRule("empty RRULE string".to_string()));
    }
    if from > to {
        return Ok(Vec::new());
    }

    let text = format!(
        "DTSTART:{}Z\nRRULE:{}",
        event.starts_at().format("%Y%m%dT%H%M%S"),
        rule
    );
    let rrule_set: RRuleSet = text
        .parse()
        .map_err(|e| CalendarError::InvalidRule(format!("{}: {}", event.id, e)))?;

    // `after`/`before` are exclusive: start one second before `from` and stop
    // at midnight after `to`.
    let tz: rrule::Tz = Utc.into();
    let after = Utc.from_utc_datetime(&from.and_time(NaiveTime::MIN)) - Duration::seconds(1);
    let before = Utc.from_utc_datetime(&to.and_time(NaiveTime::MIN)) + Duration::days(1);

    let result = rrule_set
        .after(after.with_timezone(&tz))
        .before(before.with_timezone(&tz))
        .all(MAX_OCCURRENCES);

    let occurrences: Vec<Event> = result
        .dates
        .iter()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .filter(|date| *date >= from && *date <= to)
        .map(|date| Event {
            id: format!("{}@{}", event.id, date.format("%Y-%m-%d")),
            date,
            recurrence: None,
            ..event.clone()
        })
        .collect();

    debug!(
        event = %event.id,
        count = occurrences.len(),
        limited = result.limited,
        "expanded recurring event"
    );
    Ok(occurrences)
}

/// Expand every event over `[from, to]`, keeping input order.
pub fn expand_all(events: &[Event], from: NaiveDate, to: NaiveDate) -> Result<Vec<Event>> {
    let mut out = Vec::with_capacity(events.len());
    for event in events {
        out.extend(expand_occurrences(event, from, to)?);
    }
    Ok(out)
}
