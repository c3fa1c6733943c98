use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::fractional_hour;
use crate::core::{Color, ColumnSlot, EventId};
use crate::error::{CalendarError, CalendarResult};

pub const HOURS_PER_DAY: f64 = 24.0;

/// Derived layout for one timed event on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub event_id: EventId,
    /// Day index within the window (0 for Day view, 0..7 for Week view).
    pub day_offset: usize,
    pub column_index: usize,
    pub column_count: usize,
    pub vertical_offset: f64,
    pub vertical_extent: f64,
    /// Percentage of the day column width.
    pub left: f64,
    /// Percentage of the day column width.
    pub width: f64,
    pub color: Color,
}

/// Derived lane for one all-day event; no vertical sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllDayPlacement {
    pub event_id: EventId,
    pub day_offset: usize,
    /// Number of window days covered starting at `day_offset`.
    pub day_span: usize,
    pub lane: usize,
    pub color: Color,
}

/// Day being positioned against: `[start, end)` in instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayFrame {
    pub day_offset: usize,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Maps one grouped event to grid coordinates.
///
/// `slot.span` is expected to be clipped to `day`; hours are local wall-clock
/// hours, and an interval running to the next midnight ends at hour 24.
pub fn position_event<Tz: TimeZone>(
    slot: &ColumnSlot,
    day: DayFrame,
    slot_height: f64,
    color: Color,
    tz: &Tz,
) -> CalendarResult<Placement> {
    let (span, column_index, column_count) = (slot.span, slot.column_index, slot.column_count);

    if !slot_height.is_finite() || slot_height <= 0.0 {
        return Err(CalendarError::InvalidConfig(
            "slot height must be finite and > 0".to_owned(),
        ));
    }
    if column_count == 0 || column_index >= column_count {
        return Err(CalendarError::InvalidData(format!(
            "column {column_index} is out of range for {column_count} columns"
        )));
    }

    let start_hour = if span.start() <= day.start {
        0.0
    } else {
        fractional_hour(span.start(), tz)
    };
    let end_hour = if span.end() >= day.end {
        HOURS_PER_DAY
    } else {
        fractional_hour(span.end(), tz)
    };
    // Falling back across a DST change can make wall-clock end < start.
    let end_hour = end_hour.max(start_hour);

    let width = 100.0 / column_count as f64;

    Ok(Placement {
        event_id: slot.id.clone(),
        day_offset: day.day_offset,
        column_index,
        column_count,
        vertical_offset: start_hour * slot_height,
        vertical_extent: (end_hour - start_hour) * slot_height,
        left: column_index as f64 * width,
        width,
        color,
    })
}
