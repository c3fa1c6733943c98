pub mod color;
pub mod drafts;
pub mod navigation;
pub mod overlap;
pub mod positioning;
pub mod primitives;
pub mod types;
pub mod window;
pub mod windowing;

pub use color::Color;
pub use drafts::{CalendarDraft, EventDraft, TagDraft};
pub use navigation::{NavigationDirection, NavigationState};
pub use overlap::{
    ColumnLayout, ColumnSlot, LaneSlot, OverlapItem, assign_all_day_lanes, group_overlapping,
};
pub use positioning::{AllDayPlacement, DayFrame, HOURS_PER_DAY, Placement, position_event};
pub use types::{Calendar, CalendarId, Event, EventId, Tag, TagId, TimeSpan, ViewMode};
pub use window::{
    DAYS_PER_WEEK, DateWindow, DayCell, MONTH_GRID_CELLS, MonthGrid, MonthWindow, ResolvedWindow,
    resolve_window, week_start_offset, week_start_on_or_before,
};
pub use windowing::{all_day_dates, event_in_window, event_on_day, events_in_window};
