use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::ViewMode;
use crate::core::primitives::{
    first_of_month, first_of_year, local_date_saturating, shift_days, shift_months, start_of_day,
};

/// Rows x columns of every month grid.
pub const MONTH_GRID_CELLS: usize = 42;
pub const DAYS_PER_WEEK: usize = 7;

/// Half-open visible window, both as instants and as local dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub first_date: NaiveDate,
    /// Exclusive.
    pub end_date: NaiveDate,
}

impl DateWindow {
    /// Window covering the local dates `[first_date, end_date)`.
    #[must_use]
    pub fn from_dates<Tz: TimeZone>(first_date: NaiveDate, end_date: NaiveDate, tz: &Tz) -> Self {
        Self {
            start: start_of_day(first_date, tz),
            end: start_of_day(end_date, tz),
            first_date,
            end_date,
        }
    }

    #[must_use]
    pub fn day_count(&self) -> usize {
        let days = (self.end_date - self.first_date).num_days();
        usize::try_from(days).unwrap_or(0)
    }

    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.first_date && date < self.end_date
    }

    /// Local dates of the window in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first_date
            .iter_days()
            .take_while(move |date| *date < self.end_date)
    }

    /// Zero-based day index of `date` within the window.
    #[must_use]
    pub fn day_offset(&self, date: NaiveDate) -> Option<usize> {
        self.contains_date(date).then(|| {
            let days = (date - self.first_date).num_days();
            usize::try_from(days).unwrap_or(0)
        })
    }
}

/// One cell of a padded month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub row: u8,
    pub column: u8,
    pub is_current_month: bool,
}

/// Always 42 cells starting on the week-start day on/before the 1st.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    #[must_use]
    pub fn build(month_date: NaiveDate, week_start: Weekday) -> Self {
        let first = first_of_month(month_date);
        let grid_start = week_start_on_or_before(first, week_start);
        let cells = grid_start
            .iter_days()
            .take(MONTH_GRID_CELLS)
            .enumerate()
            .map(|(index, date)| DayCell {
                date,
                row: (index / DAYS_PER_WEEK) as u8,
                column: (index % DAYS_PER_WEEK) as u8,
                is_current_month: date.year() == first.year() && date.month() == first.month(),
            })
            .collect();

        Self {
            year: first.year(),
            month: first.month(),
            cells,
        }
    }

    /// Dates spanned by the grid, padding included.
    #[must_use]
    pub fn display_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.cells.first()?.date;
        let last = self.cells.last()?.date;
        Some((first, last.succ_opt().unwrap_or(last)))
    }

    #[must_use]
    pub fn cell_for(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }
}

/// Month sub-window of a year view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    pub month: u32,
    pub window: DateWindow,
    pub grid: MonthGrid,
}

/// Output of the window resolver for one navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedWindow {
    pub view_mode: ViewMode,
    pub window: DateWindow,
    /// Present for `Month`.
    pub grid: Option<MonthGrid>,
    /// Twelve entries for `Year`, empty otherwise.
    pub months: Vec<MonthWindow>,
}

/// Resolves the visible window for `anchor` in `view_mode`.
///
/// Calendar arithmetic happens on local dates of `tz`; instants are derived
/// from local midnights. Anchors whose local date falls outside the
/// representable range resolve against the nearest representable date.
#[must_use]
pub fn resolve_window<Tz: TimeZone>(
    anchor: DateTime<Utc>,
    view_mode: ViewMode,
    week_start: Weekday,
    tz: &Tz,
) -> ResolvedWindow {
    let anchor_date = local_date_saturating(anchor, tz);

    match view_mode {
        ViewMode::Day => {
            let end = shift_days(anchor_date, 1).unwrap_or(anchor_date);
            ResolvedWindow {
                view_mode,
                window: DateWindow::from_dates(anchor_date, end, tz),
                grid: None,
                months: Vec::new(),
            }
        }
        ViewMode::Week => {
            let first = week_start_on_or_before(anchor_date, week_start);
            let end = shift_days(first, DAYS_PER_WEEK as i64).unwrap_or(first);
            ResolvedWindow {
                view_mode,
                window: DateWindow::from_dates(first, end, tz),
                grid: None,
                months: Vec::new(),
            }
        }
        ViewMode::Month => {
            let window = month_window(anchor_date, tz);
            ResolvedWindow {
                view_mode,
                window,
                grid: Some(MonthGrid::build(anchor_date, week_start)),
                months: Vec::new(),
            }
        }
        ViewMode::Year => {
            let first = first_of_year(anchor_date);
            let end = shift_months(first, 12).unwrap_or(first);
            let months = (0..12)
                .filter_map(|offset| shift_months(first, offset))
                .map(|month_first| MonthWindow {
                    month: month_first.month(),
                    window: month_window(month_first, tz),
                    grid: MonthGrid::build(month_first, week_start),
                })
                .collect();
            ResolvedWindow {
                view_mode,
                window: DateWindow::from_dates(first, end, tz),
                grid: None,
                months,
            }
        }
    }
}

/// Week-start day on or before `date`.
#[must_use]
pub fn week_start_on_or_before(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = week_start_offset(date.weekday(), week_start);
    shift_days(date, -i64::from(offset)).unwrap_or(date)
}

/// Column of `weekday` in a week beginning on `week_start`.
#[must_use]
pub fn week_start_offset(weekday: Weekday, week_start: Weekday) -> u32 {
    (weekday.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
}

fn month_window<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateWindow {
    let first = first_of_month(date);
    let end = shift_months(first, 1).unwrap_or(first);
    DateWindow::from_dates(first, end, tz)
}
