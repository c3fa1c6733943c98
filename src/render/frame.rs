use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{
    AllDayPlacement, DateWindow, DayCell, EventId, HOURS_PER_DAY, MONTH_GRID_CELLS, MonthGrid,
    Placement, ViewMode,
};
use crate::error::{CalendarError, CalendarResult};

const PERCENT_EPSILON: f64 = 1e-9;

/// Per-day summary of a Day/Week time grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub day_offset: usize,
    /// Columns needed by the busiest overlap cluster of the day.
    pub total_columns: usize,
    pub cluster_count: usize,
    /// All-day lanes needed on this date.
    pub all_day_lanes: usize,
}

/// Month grid cell with the visible events touching its date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCellLayout {
    pub date: NaiveDate,
    pub row: u8,
    pub column: u8,
    pub is_current_month: bool,
    /// Ordered by `(start, id)`.
    pub event_ids: Vec<EventId>,
}

impl MonthCellLayout {
    #[must_use]
    pub fn new(cell: DayCell, event_ids: Vec<EventId>) -> Self {
        Self {
            date: cell.date,
            row: cell.row,
            column: cell.column,
            is_current_month: cell.is_current_month,
            event_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<MonthCellLayout>,
}

/// One month tile of a Year view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: u32,
    pub window: DateWindow,
    pub event_count: usize,
    pub grid: MonthGrid,
}

/// Backend-agnostic layout for one visible window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutFrame {
    pub view_mode: ViewMode,
    pub window: DateWindow,
    pub slot_height: f64,
    pub timed: Vec<Placement>,
    pub all_day: Vec<AllDayPlacement>,
    pub days: Vec<DayLayout>,
    pub grid: Option<MonthLayout>,
    pub months: Vec<MonthSummary>,
}

impl LayoutFrame {
    #[must_use]
    pub fn new(view_mode: ViewMode, window: DateWindow, slot_height: f64) -> Self {
        Self {
            view_mode,
            window,
            slot_height,
            timed: Vec::new(),
            all_day: Vec::new(),
            days: Vec::new(),
            grid: None,
            months: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timed.is_empty()
            && self.all_day.is_empty()
            && self
                .grid
                .as_ref()
                .is_none_or(|grid| grid.cells.iter().all(|cell| cell.event_ids.is_empty()))
            && self.months.iter().all(|month| month.event_count == 0)
    }

    /// Placements of one window day, in layout order.
    pub fn timed_on(&self, day_offset: usize) -> impl Iterator<Item = &Placement> + '_ {
        self.timed
            .iter()
            .filter(move |placement| placement.day_offset == day_offset)
    }

    pub fn validate(&self) -> CalendarResult<()> {
        if !self.slot_height.is_finite() || self.slot_height <= 0.0 {
            return Err(CalendarError::InvalidData(
                "layout slot height must be finite and > 0".to_owned(),
            ));
        }
        if self.window.end <= self.window.start {
            return Err(CalendarError::InvalidRange {
                start: self.window.start,
                end: self.window.end,
            });
        }

        let day_height = HOURS_PER_DAY * self.slot_height;
        for placement in &self.timed {
            validate_placement(placement, self.days.len(), day_height)?;
        }
        for placement in &self.all_day {
            validate_all_day(placement, &self.days)?;
        }

        if let Some(grid) = &self.grid {
            if grid.cells.len() != MONTH_GRID_CELLS {
                return Err(CalendarError::InvalidData(format!(
                    "month grid must have {MONTH_GRID_CELLS} cells, got {}",
                    grid.cells.len()
                )));
            }
        }
        for summary in &self.months {
            if summary.grid.cells.len() != MONTH_GRID_CELLS {
                return Err(CalendarError::InvalidData(format!(
                    "month {} grid must have {MONTH_GRID_CELLS} cells",
                    summary.month
                )));
            }
        }

        Ok(())
    }
}

fn validate_placement(
    placement: &Placement,
    day_count: usize,
    day_height: f64,
) -> CalendarResult<()> {
    let id = &placement.event_id;
    if placement.day_offset >= day_count {
        return Err(CalendarError::InvalidData(format!(
            "placement `{id}` day offset {} is outside the window",
            placement.day_offset
        )));
    }
    if placement.column_count == 0 || placement.column_index >= placement.column_count {
        return Err(CalendarError::InvalidData(format!(
            "placement `{id}` column {} of {} is out of range",
            placement.column_index, placement.column_count
        )));
    }

    let finite = [
        placement.vertical_offset,
        placement.vertical_extent,
        placement.left,
        placement.width,
    ]
    .iter()
    .all(|value| value.is_finite());
    if !finite {
        return Err(CalendarError::InvalidData(format!(
            "placement `{id}` has non-finite geometry"
        )));
    }
    if placement.vertical_offset < 0.0
        || placement.vertical_extent < 0.0
        || placement.vertical_offset + placement.vertical_extent > day_height + PERCENT_EPSILON
    {
        return Err(CalendarError::InvalidData(format!(
            "placement `{id}` extends outside the day"
        )));
    }
    if placement.width <= 0.0
        || placement.left < 0.0
        || placement.left + placement.width > 100.0 + PERCENT_EPSILON
    {
        return Err(CalendarError::InvalidData(format!(
            "placement `{id}` extends outside the day column"
        )));
    }

    placement.color.validate()
}

fn validate_all_day(placement: &AllDayPlacement, days: &[DayLayout]) -> CalendarResult<()> {
    let id = &placement.event_id;
    let end = placement.day_offset.saturating_add(placement.day_span);
    if placement.day_span == 0 || end > days.len() {
        return Err(CalendarError::InvalidData(format!(
            "all-day placement `{id}` spans days {}..{end} outside the window",
            placement.day_offset
        )));
    }
    let lanes = days[placement.day_offset..end]
        .iter()
        .map(|day| day.all_day_lanes)
        .max()
        .unwrap_or(0);
    if placement.lane >= lanes {
        return Err(CalendarError::InvalidData(format!(
            "all-day placement `{id}` lane {} exceeds {lanes} lanes",
            placement.lane
        )));
    }

    placement.color.validate()
}
