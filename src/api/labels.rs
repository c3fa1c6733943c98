//! Text for grid rulers and headers.

use chrono::{DateTime, Datelike, TimeZone, Utc, Weekday};

use crate::core::primitives::local_date_saturating;
use crate::core::{DAYS_PER_WEEK, HOURS_PER_DAY};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// 12-hour ruler label: `0 -> "12 AM"`, `13 -> "1 PM"`.
///
/// Hours wrap modulo 24.
#[must_use]
pub fn hour_label(hour: u32) -> String {
    let hour = hour % 24;
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        other => other,
    };
    format!("{display} {meridiem}")
}

/// All 24 ruler labels of a day grid.
#[must_use]
pub fn hour_labels() -> Vec<String> {
    (0..HOURS_PER_DAY as u32).map(hour_label).collect()
}

/// Short weekday names in column order for a week starting on `week_start`.
#[must_use]
pub fn weekday_headers(week_start: Weekday) -> [&'static str; DAYS_PER_WEEK] {
    let mut headers = [""; DAYS_PER_WEEK];
    let mut day = week_start;
    for header in &mut headers {
        *header = weekday_short_name(day);
        day = day.succ();
    }
    headers
}

#[must_use]
pub fn weekday_short_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// English month name for `1..=12`.
#[must_use]
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTH_NAMES.get(index).copied()
}

/// Toolbar title such as `"October 2026"` for the anchor's local month.
#[must_use]
pub fn header_title<Tz: TimeZone>(anchor: DateTime<Utc>, tz: &Tz) -> String {
    let date = local_date_saturating(anchor, tz);
    let name = month_name(date.month()).unwrap_or_default();
    format!("{name} {}", date.year())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc, Weekday};

    use super::{header_title, hour_label, hour_labels, month_name, weekday_headers};

    #[test]
    fn hour_labels_use_twelve_hour_clock() {
        assert_eq!(hour_label(0), "12 AM");
        assert_eq!(hour_label(1), "1 AM");
        assert_eq!(hour_label(12), "12 PM");
        assert_eq!(hour_label(23), "11 PM");
        assert_eq!(hour_labels().len(), 24);
    }

    #[test]
    fn headers_rotate_with_week_start() {
        assert_eq!(
            weekday_headers(Weekday::Sun),
            ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );
        assert_eq!(weekday_headers(Weekday::Mon)[6], "Sun");
    }

    #[test]
    fn title_and_month_names() {
        let anchor = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        assert_eq!(header_title(anchor, &Utc), "October 2026");
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
        assert_eq!(month_name(2), Some("February"));
    }
}
