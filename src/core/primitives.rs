use chrono::offset::LocalResult;
use chrono::{
    DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc,
};

/// Wall-clock time of `instant` in the host zone.
///
/// `None` when the zone offset pushes the result past the representable
/// date range.
#[must_use]
pub fn local_naive<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> Option<NaiveDateTime> {
    let utc = instant.naive_utc();
    utc.checked_add_offset(tz.offset_from_utc_datetime(&utc).fix())
}

/// Calendar date of `instant` in the host zone, if representable.
#[must_use]
pub fn local_date<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> Option<NaiveDate> {
    local_naive(instant, tz).map(|local| local.date())
}

/// Calendar date of `instant` in the host zone, saturating at
/// `NaiveDate::MIN`/`NaiveDate::MAX` at the edges of the date range.
#[must_use]
pub fn local_date_saturating<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    match local_date(instant, tz) {
        Some(date) => date,
        None if instant.timestamp() < 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}

/// Resolves a local wall-clock time to an instant.
///
/// Ambiguous times (clock turned back) take the earlier instant. Times inside
/// a gap (clock turned forward) take the first instant after the gap.
#[must_use]
pub fn local_to_utc<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => {
            // Gaps are at most a few hours; step forward minute by minute.
            let mut candidate = naive;
            for _ in 0..(24 * 60) {
                let Some(next) = candidate.checked_add_signed(chrono::Duration::minutes(1)) else {
                    break;
                };
                candidate = next;
                if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
                    return dt.with_timezone(&Utc);
                }
            }
            naive.and_utc()
        }
    }
}

/// Instant of local midnight at the start of `date`.
#[must_use]
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    local_to_utc(date.and_time(chrono::NaiveTime::MIN), tz)
}

/// Whether `instant` is exactly a local midnight.
#[must_use]
pub fn is_local_midnight<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> bool {
    local_date(instant, tz).is_some_and(|date| start_of_day(date, tz) == instant)
}

/// Fractional wall-clock hour of `instant`, e.g. 09:30 -> 9.5.
#[must_use]
pub fn fractional_hour<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> f64 {
    local_naive(instant, tz).map_or(0.0, |local| {
        let seconds = f64::from(local.num_seconds_from_midnight());
        let nanos = f64::from(local.nanosecond() % 1_000_000_000);
        (seconds + nanos / 1e9) / 3600.0
    })
}

#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[must_use]
pub fn first_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

/// Shifts by whole calendar months; `None` past the representable range.
#[must_use]
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let magnitude = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

#[must_use]
pub fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}

/// Number of days in `date`'s month.
#[must_use]
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    shift_months(first, 1)
        .map(|next| next.signed_duration_since(first).num_days())
        .map_or(31, |days| u32::try_from(days).unwrap_or(31))
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

    use super::{days_in_month, fractional_hour, is_local_midnight, shift_months, start_of_day};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn start_of_day_honors_fixed_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).expect("offset");
        let start = start_of_day(date(2024, 3, 6), &tz);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 5, 22, 0, 0).unwrap());
        assert!(is_local_midnight(start, &tz));
    }

    #[test]
    fn month_lengths_respect_leap_years() {
        assert_eq!(days_in_month(date(2024, 2, 10)), 29);
        assert_eq!(days_in_month(date(2023, 2, 10)), 28);
        assert_eq!(days_in_month(date(2024, 12, 31)), 31);
        assert_eq!(shift_months(date(2024, 1, 1), -1), Some(date(2023, 12, 1)));
    }

    #[test]
    fn fractional_hour_uses_wall_clock() {
        let tz = FixedOffset::west_opt(5 * 3600).expect("offset");
        let instant = Utc.with_ymd_and_hms(2024, 3, 6, 14, 30, 0).unwrap();
        assert!((fractional_hour(instant, &tz) - 9.5).abs() < 1e-12);
    }
}
