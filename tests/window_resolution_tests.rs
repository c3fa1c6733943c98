use calendar_rs::core::{MONTH_GRID_CELLS, MonthGrid, ViewMode, resolve_window, week_start_offset};
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Utc, Weekday};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn week_window_for_wednesday_starts_on_preceding_monday() {
    let anchor = Utc.with_ymd_and_hms(2024, 3, 6, 15, 30, 0).unwrap();
    let resolved = resolve_window(anchor, ViewMode::Week, Weekday::Mon, &Utc);

    assert_eq!(
        resolved.window.start,
        Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap()
    );
    let length = resolved.window.end - resolved.window.start;
    assert_eq!(length, Duration::days(7));
    assert_eq!(resolved.window.day_count(), 7);
    assert!(resolved.grid.is_none());
}

#[test]
fn sunday_week_start_moves_window_back_to_sunday() {
    let anchor = Utc.with_ymd_and_hms(2024, 3, 6, 15, 30, 0).unwrap();
    let resolved = resolve_window(anchor, ViewMode::Week, Weekday::Sun, &Utc);
    assert_eq!(resolved.window.first_date, date(2024, 3, 3));
    assert_eq!(resolved.window.end_date, date(2024, 3, 10));
}

#[test]
fn day_window_uses_local_midnights_of_host_zone() {
    let tz = FixedOffset::east_opt(9 * 3600).expect("offset");
    // 2024-03-06 23:30 UTC is already March 7 in UTC+9.
    let anchor = Utc.with_ymd_and_hms(2024, 3, 6, 23, 30, 0).unwrap();
    let resolved = resolve_window(anchor, ViewMode::Day, Weekday::Mon, &tz);

    assert_eq!(resolved.window.first_date, date(2024, 3, 7));
    assert_eq!(
        resolved.window.start,
        Utc.with_ymd_and_hms(2024, 3, 6, 15, 0, 0).unwrap()
    );
    let length = resolved.window.end - resolved.window.start;
    assert_eq!(length, Duration::hours(24));
}

#[test]
fn month_window_selects_month_but_grid_pads_to_42_cells() {
    let anchor = Utc.with_ymd_and_hms(2024, 2, 14, 8, 0, 0).unwrap();
    let resolved = resolve_window(anchor, ViewMode::Month, Weekday::Mon, &Utc);

    assert_eq!(resolved.window.first_date, date(2024, 2, 1));
    assert_eq!(resolved.window.end_date, date(2024, 3, 1));

    let grid = resolved.grid.expect("month grid");
    assert_eq!(grid.cells.len(), MONTH_GRID_CELLS);
    assert_eq!(grid.cells[0].date, date(2024, 1, 29));
    assert!(!grid.cells[0].is_current_month);
    let current_month = grid.cells.iter().filter(|cell| cell.is_current_month);
    assert_eq!(current_month.count(), 29);

    let first = grid.cell_for(date(2024, 2, 1)).expect("first of month");
    assert_eq!(first.row, 0);
    assert_eq!(first.column, 3);
}

#[test]
fn year_window_decomposes_into_twelve_months() {
    let anchor = Utc.with_ymd_and_hms(2024, 7, 4, 12, 0, 0).unwrap();
    let resolved = resolve_window(anchor, ViewMode::Year, Weekday::Mon, &Utc);

    assert_eq!(resolved.window.first_date, date(2024, 1, 1));
    assert_eq!(resolved.window.end_date, date(2025, 1, 1));
    assert_eq!(resolved.window.day_count(), 366);
    assert_eq!(resolved.months.len(), 12);
    for (index, month) in resolved.months.iter().enumerate() {
        assert_eq!(month.month as usize, index + 1);
        assert_eq!(month.grid.cells.len(), MONTH_GRID_CELLS);
        assert_eq!(month.window.first_date.day(), 1);
    }
    assert_eq!(resolved.months[1].window.day_count(), 29);
}

#[test]
fn anchors_at_range_edges_resolve_without_panicking() {
    let east = FixedOffset::east_opt(3600).expect("offset");
    let west = FixedOffset::west_opt(3600).expect("offset");

    for mode in ViewMode::ALL {
        let upper = resolve_window(DateTime::<Utc>::MAX_UTC, mode, Weekday::Mon, &east);
        assert_eq!(upper.view_mode, mode);
        assert!(upper.window.end >= upper.window.start);

        let lower = resolve_window(DateTime::<Utc>::MIN_UTC, mode, Weekday::Mon, &west);
        assert_eq!(lower.view_mode, mode);
        assert!(lower.window.end >= lower.window.start);
    }

    let earliest = DateTime::<Utc>::MIN_UTC;
    let lower = resolve_window(earliest, ViewMode::Day, Weekday::Mon, &west);
    assert_eq!(lower.window.first_date, NaiveDate::MIN);
    assert_eq!(lower.window.end - lower.window.start, Duration::hours(24));
}

#[test]
fn midnight_inside_dst_gap_starts_day_after_the_gap() {
    // Sao Paulo skipped 00:00-01:00 local on 2018-11-04.
    let tz = chrono_tz::America::Sao_Paulo;
    let anchor = Utc.with_ymd_and_hms(2018, 11, 4, 15, 0, 0).unwrap();
    let resolved = resolve_window(anchor, ViewMode::Day, Weekday::Mon, &tz);

    assert_eq!(resolved.window.first_date, date(2018, 11, 4));
    assert_eq!(
        resolved.window.start,
        Utc.with_ymd_and_hms(2018, 11, 4, 3, 0, 0).unwrap()
    );
    let length = resolved.window.end - resolved.window.start;
    assert_eq!(length, Duration::hours(23));
}

#[test]
fn ambiguous_midnight_takes_the_earlier_instant() {
    // Havana repeated 00:00-01:00 local on 2023-11-05 (UTC-4, then UTC-5).
    let tz = chrono_tz::America::Havana;
    let anchor = Utc.with_ymd_and_hms(2023, 11, 5, 18, 0, 0).unwrap();
    let resolved = resolve_window(anchor, ViewMode::Day, Weekday::Mon, &tz);

    assert_eq!(resolved.window.first_date, date(2023, 11, 5));
    assert_eq!(
        resolved.window.start,
        Utc.with_ymd_and_hms(2023, 11, 5, 4, 0, 0).unwrap()
    );
    let length = resolved.window.end - resolved.window.start;
    assert_eq!(length, Duration::hours(25));
}

proptest! {
    #[test]
    fn month_grid_places_first_at_week_start_offset(
        year in 1900i32..2200,
        month in 1u32..=12,
        week_start_index in 0u8..7
    ) {
        let week_start = Weekday::try_from(week_start_index).expect("weekday");
        let grid = MonthGrid::build(date(year, month, 1), week_start);

        prop_assert_eq!(grid.cells.len(), MONTH_GRID_CELLS);
        prop_assert_eq!(grid.cells[0].date.weekday(), week_start);

        let first = grid.cell_for(date(year, month, 1)).expect("first cell");
        prop_assert_eq!(first.row, 0);
        prop_assert_eq!(
            u32::from(first.column),
            week_start_offset(date(year, month, 1).weekday(), week_start)
        );

        for pair in grid.cells.windows(2) {
            prop_assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
    }
}
