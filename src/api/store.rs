//! Boundary to the persistence collaborator.
//!
//! The engine never talks to storage on its own; a host calls
//! `CalendarEngine::refresh_from_store` with whatever implements
//! [`EventStore`]. [`InMemoryEventStore`] backs tests and embedded use.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Calendar, CalendarId, Color, Event, EventId, Tag, TagId};
use crate::error::{CalendarError, CalendarResult};

/// Half-open range query `[start_range, end_range)`.
///
/// Events on registered calendars match when their calendar is listed in
/// `calendar_ids`. Events whose calendar is missing from the store's
/// registry match when `include_orphaned` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventQuery {
    pub start_range: DateTime<Utc>,
    pub end_range: DateTime<Utc>,
    pub calendar_ids: BTreeSet<CalendarId>,
    #[serde(default)]
    pub include_orphaned: bool,
}

impl EventQuery {
    #[must_use]
    pub fn in_range(&self, event: &Event) -> bool {
        event.span.intersects(self.start_range, self.end_range)
    }

    /// `registered` tells whether the store knows the event's calendar.
    #[must_use]
    pub fn matches(&self, event: &Event, registered: bool) -> bool {
        let calendar_matches = if registered {
            self.calendar_ids.contains(&event.calendar_id)
        } else {
            self.include_orphaned
        };
        calendar_matches && self.in_range(event)
    }
}

/// Calendar fields a store joins onto each event row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarRef {
    pub id: CalendarId,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event: Event,
    /// `None` when the event's calendar no longer exists in the store.
    pub calendar: Option<CalendarRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreOperation {
    Created,
    Updated,
    Deleted,
}

/// Acknowledgement of a successful store mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreAck {
    pub operation: StoreOperation,
    pub id: String,
}

impl StoreAck {
    fn new(operation: StoreOperation, id: impl std::fmt::Display) -> Self {
        Self {
            operation,
            id: id.to_string(),
        }
    }
}

pub trait EventStore {
    fn query_events(&self, query: &EventQuery) -> CalendarResult<Vec<EventRecord>>;
    fn list_calendars(&self) -> CalendarResult<Vec<Calendar>>;
    fn list_tags(&self) -> CalendarResult<Vec<Tag>>;

    fn create_event(&mut self, event: Event) -> CalendarResult<StoreAck>;
    fn update_event(&mut self, event: Event) -> CalendarResult<StoreAck>;
    fn delete_event(&mut self, id: &EventId) -> CalendarResult<StoreAck>;

    fn create_calendar(&mut self, calendar: Calendar) -> CalendarResult<StoreAck>;
    fn create_tag(&mut self, tag: Tag) -> CalendarResult<StoreAck>;
}

/// Insertion-ordered store kept entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    events: IndexMap<EventId, Event>,
    calendars: IndexMap<CalendarId, Calendar>,
    tags: IndexMap<TagId, Tag>,
}

impl InMemoryEventStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.get(id)
    }
}

impl EventStore for InMemoryEventStore {
    fn query_events(&self, query: &EventQuery) -> CalendarResult<Vec<EventRecord>> {
        if query.end_range <= query.start_range {
            return Err(CalendarError::InvalidRange {
                start: query.start_range,
                end: query.end_range,
            });
        }

        let records: Vec<EventRecord> = self
            .events
            .values()
            .filter(|event| query.matches(event, self.calendars.contains_key(&event.calendar_id)))
            .map(|event| EventRecord {
                event: event.clone(),
                calendar: self
                    .calendars
                    .get(&event.calendar_id)
                    .map(|calendar| CalendarRef {
                        id: calendar.id.clone(),
                        color: calendar.color,
                    }),
            })
            .collect();
        trace!(matched = records.len(), "in-memory store query");
        Ok(records)
    }

    fn list_calendars(&self) -> CalendarResult<Vec<Calendar>> {
        Ok(self.calendars.values().cloned().collect())
    }

    fn list_tags(&self) -> CalendarResult<Vec<Tag>> {
        Ok(self.tags.values().cloned().collect())
    }

    fn create_event(&mut self, event: Event) -> CalendarResult<StoreAck> {
        if self.events.contains_key(&event.id) {
            return Err(CalendarError::Store(format!(
                "event `{}` already exists",
                event.id
            )));
        }
        let ack = StoreAck::new(StoreOperation::Created, &event.id);
        self.events.insert(event.id.clone(), event);
        Ok(ack)
    }

    fn update_event(&mut self, event: Event) -> CalendarResult<StoreAck> {
        let Some(slot) = self.events.get_mut(&event.id) else {
            return Err(CalendarError::Store(format!(
                "event `{}` does not exist",
                event.id
            )));
        };
        let ack = StoreAck::new(StoreOperation::Updated, &event.id);
        *slot = event;
        Ok(ack)
    }

    fn delete_event(&mut self, id: &EventId) -> CalendarResult<StoreAck> {
        self.events
            .shift_remove(id)
            .map(|_| StoreAck::new(StoreOperation::Deleted, id))
            .ok_or_else(|| CalendarError::Store(format!("event `{id}` does not exist")))
    }

    fn create_calendar(&mut self, calendar: Calendar) -> CalendarResult<StoreAck> {
        if self.calendars.contains_key(&calendar.id) {
            return Err(CalendarError::Store(format!(
                "calendar `{}` already exists",
                calendar.id
            )));
        }
        let ack = StoreAck::new(StoreOperation::Created, &calendar.id);
        self.calendars.insert(calendar.id.clone(), calendar);
        Ok(ack)
    }

    fn create_tag(&mut self, tag: Tag) -> CalendarResult<StoreAck> {
        if self.tags.contains_key(&tag.id) {
            return Err(CalendarError::Store(format!(
                "tag `{}` already exists",
                tag.id
            )));
        }
        let ack = StoreAck::new(StoreOperation::Created, &tag.id);
        self.tags.insert(tag.id.clone(), tag);
        Ok(ack)
    }
}
