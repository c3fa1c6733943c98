use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::Color;
use crate::error::{CalendarError, CalendarResult};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

string_id!(
    /// Opaque event identifier. Ordering is used as the layout tie-breaker.
    EventId
);
string_id!(CalendarId);
string_id!(TagId);

/// Zoom level of the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    #[default]
    Week,
    Month,
    Year,
}

impl ViewMode {
    pub const ALL: [Self; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];

    /// Whether the view lays timed events out on an hour grid.
    #[must_use]
    pub const fn has_time_grid(self) -> bool {
        matches!(self, Self::Day | Self::Week)
    }
}

/// Half-open instant interval `[start, end)` with `start < end`.
///
/// Fields are private so an empty or inverted interval cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeSpan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawTimeSpan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSpan {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarResult<Self> {
        if end <= start {
            return Err(CalendarError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub fn duration(self) -> Duration {
        self.end - self.start
    }

    /// Interval intersection, end-exclusive on both sides.
    #[must_use]
    pub fn intersects(self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && self.end > start
    }

    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.intersects(other.start, other.end)
    }

    /// Clips to `[start, end)`; `None` when nothing of the span remains.
    #[must_use]
    pub fn clip(self, start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        let clipped_start = self.start.max(start);
        let clipped_end = self.end.min(end);
        (clipped_start < clipped_end).then_some(Self {
            start: clipped_start,
            end: clipped_end,
        })
    }
}

impl<'de> Deserialize<'de> for TimeSpan {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawTimeSpan::deserialize(deserializer)?;
        Self::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}

/// A time-bound event or task on one calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub span: TimeSpan,
    #[serde(default)]
    pub is_all_day: bool,
    pub calendar_id: CalendarId,
    #[serde(default)]
    pub tags: BTreeSet<TagId>,
    #[serde(default)]
    pub is_task: bool,
    #[serde(default)]
    pub is_completed: bool,
}

impl Event {
    /// Builds a timed event; fails with `InvalidRange` unless `start < end`.
    pub fn new(
        id: impl Into<EventId>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        calendar_id: impl Into<CalendarId>,
    ) -> CalendarResult<Self> {
        Ok(Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            span: TimeSpan::new(start, end)?,
            is_all_day: false,
            calendar_id: calendar_id.into(),
            tags: BTreeSet::new(),
            is_task: false,
            is_completed: false,
        })
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_all_day(mut self, is_all_day: bool) -> Self {
        self.is_all_day = is_all_day;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<TagId>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Marks the event as a task; completion only sticks for tasks.
    #[must_use]
    pub fn with_task(mut self, is_completed: bool) -> Self {
        self.is_task = true;
        self.is_completed = is_completed;
        self
    }

    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.span.start()
    }

    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.span.end()
    }

    #[must_use]
    pub fn is_completed_task(&self) -> bool {
        self.is_task && self.is_completed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: CalendarId,
    pub name: String,
    pub color: Color,
}

impl Calendar {
    #[must_use]
    pub fn new(id: impl Into<CalendarId>, name: impl Into<String>, color: Color) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
        }
    }
}

/// Descriptive label attached to events; never consulted by layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color: Color,
}

impl Tag {
    #[must_use]
    pub fn new(id: impl Into<TagId>, name: impl Into<String>, color: Color) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
        }
    }
}
