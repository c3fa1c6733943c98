//! calendar-rs: deterministic calendar event layout engine.
//!
//! Given an anchor instant and a view mode, the engine resolves the visible
//! window, selects the events of visible calendars, packs overlapping events
//! into side-by-side columns and maps them onto hour-grid coordinates.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{CalendarEngine, CalendarEngineConfig};
pub use error::{CalendarError, CalendarResult};
