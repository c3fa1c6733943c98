use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::core::primitives::{is_local_midnight, local_date_saturating, shift_days};
use crate::core::{CalendarId, DateWindow, Event};

/// Local dates `[first, end)` covered by an all-day event.
///
/// The end date is exclusive when the event ends on a local midnight and
/// inclusive otherwise.
#[must_use]
pub fn all_day_dates<Tz: TimeZone>(event: &Event, tz: &Tz) -> (NaiveDate, NaiveDate) {
    let first = local_date_saturating(event.start(), tz);
    let end_local = local_date_saturating(event.end(), tz);
    let end = if is_local_midnight(event.end(), tz) {
        end_local
    } else {
        shift_days(end_local, 1).unwrap_or(end_local)
    };
    (first, end.max(shift_days(first, 1).unwrap_or(first)))
}

/// Whether `event` belongs in `window`, ignoring calendar visibility.
///
/// Timed events use interval intersection; all-day events use calendar-day
/// membership.
#[must_use]
pub fn event_in_window<Tz: TimeZone>(event: &Event, window: &DateWindow, tz: &Tz) -> bool {
    if event.is_all_day {
        let (first, end) = all_day_dates(event, tz);
        first < window.end_date && end > window.first_date
    } else {
        event.span.intersects(window.start, window.end)
    }
}

/// Returns events that touch `window` and sit on a visible calendar.
///
/// Output keeps the input order.
#[must_use]
pub fn events_in_window<'a, Tz: TimeZone>(
    events: &'a [Event],
    window: &DateWindow,
    visible_calendars: &BTreeSet<CalendarId>,
    tz: &Tz,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| visible_calendars.contains(&event.calendar_id))
        .filter(|event| event_in_window(event, window, tz))
        .collect()
}

/// Whether an event touches the local day `[day_start, day_end)`.
#[must_use]
pub fn event_on_day<Tz: TimeZone>(
    event: &Event,
    date: NaiveDate,
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
    tz: &Tz,
) -> bool {
    if event.is_all_day {
        let (first, end) = all_day_dates(event, tz);
        date >= first && date < end
    } else {
        event.span.intersects(day_start, day_end)
    }
}
