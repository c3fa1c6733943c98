//! Typed form payloads validated at the boundary before they reach the
//! engine's collections.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Calendar, CalendarId, Color, Event, EventId, Tag, TagId, TimeSpan};
use crate::error::{CalendarError, CalendarResult};

/// Unvalidated event fields as submitted by an editing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
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

impl EventDraft {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        calendar_id: impl Into<CalendarId>,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            start,
            end,
            is_all_day: false,
            calendar_id: calendar_id.into(),
            tags: BTreeSet::new(),
            is_task: false,
            is_completed: false,
        }
    }

    /// Validates the draft and turns it into an event with `id`.
    ///
    /// The title is trimmed and must not be blank; `end` must be after
    /// `start`. Completion is dropped for non-task events.
    pub fn into_event(self, id: impl Into<EventId>) -> CalendarResult<Event> {
        let title = required_text("event title", &self.title)?;
        let span = TimeSpan::new(self.start, self.end)?;

        Ok(Event {
            id: id.into(),
            title,
            description: self.description.trim().to_owned(),
            span,
            is_all_day: self.is_all_day,
            calendar_id: self.calendar_id,
            tags: self.tags,
            is_task: self.is_task,
            is_completed: self.is_task && self.is_completed,
        })
    }

    /// Prefills a draft from an existing event for editing.
    #[must_use]
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            start: event.start(),
            end: event.end(),
            is_all_day: event.is_all_day,
            calendar_id: event.calendar_id.clone(),
            tags: event.tags.clone(),
            is_task: event.is_task,
            is_completed: event.is_completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDraft {
    pub name: String,
    /// `#RRGGBB`.
    pub color: String,
}

impl CalendarDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }

    pub fn into_calendar(self, id: impl Into<CalendarId>) -> CalendarResult<Calendar> {
        let name = required_text("calendar name", &self.name)?;
        let color = draft_color("calendar", &self.color)?;
        Ok(Calendar::new(id, name, color))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDraft {
    pub name: String,
    pub color: String,
}

impl TagDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }

    pub fn into_tag(self, id: impl Into<TagId>) -> CalendarResult<Tag> {
        let name = required_text("tag name", &self.name)?;
        let color = draft_color("tag", &self.color)?;
        Ok(Tag::new(id, name, color))
    }
}

fn required_text(field: &str, raw: &str) -> CalendarResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalendarError::InvalidDraft(format!(
            "{field} must not be blank"
        )));
    }
    Ok(trimmed.to_owned())
}

fn draft_color(owner: &str, raw: &str) -> CalendarResult<Color> {
    Color::from_hex(raw.trim())
        .map_err(|_| CalendarError::InvalidDraft(format!("{owner} color `{raw}` is not #RRGGBB")))
}
