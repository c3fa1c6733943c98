use crate::error::CalendarResult;
use crate::render::{LayoutFrame, Renderer};

/// Headless renderer that validates frames and records what it saw.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: u64,
    pub last_timed_count: usize,
    pub last_all_day_count: usize,
    pub last_day_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &LayoutFrame) -> CalendarResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_timed_count = frame.timed.len();
        self.last_all_day_count = frame.all_day.len();
        self.last_day_count = frame.days.len();
        Ok(())
    }
}
