mod frame;
mod null_renderer;

pub use frame::{DayLayout, LayoutFrame, MonthCellLayout, MonthLayout, MonthSummary};
pub use null_renderer::NullRenderer;

use crate::error::CalendarResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully computed, validated-on-demand `LayoutFrame` so
/// drawing code never touches event selection or overlap logic.
pub trait Renderer {
    fn render(&mut self, frame: &LayoutFrame) -> CalendarResult<()>;
}
