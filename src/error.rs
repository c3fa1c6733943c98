use chrono::{DateTime, Utc};
use thiserror::Error;

pub type CalendarResult<T> = Result<T, CalendarError>;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("invalid time range: end {end} must be after start {start}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid draft: {0}")]
    InvalidDraft(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("store error: {0}")]
    Store(String),
}
