use chrono::TimeZone;
use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, trace, warn};

use crate::core::{Calendar, CalendarId, Event, EventId};
use crate::error::CalendarResult;
use crate::render::Renderer;

use super::CalendarEngine;
use super::calendar_controller::index_unique;
use super::store::{EventQuery, EventStore};
use super::validation::validate_unique_event_ids;

impl<R: Renderer, Tz: TimeZone + Sync> CalendarEngine<R, Tz> {
    /// Replaces the event snapshot. Order is kept; ids must be unique.
    pub fn set_events(&mut self, events: Vec<Event>) -> CalendarResult<()> {
        validate_unique_event_ids(&events)?;
        debug!(count = events.len(), "set events");
        self.events = events;
        self.bump_event_version();
        Ok(())
    }

    /// Replaces the event with the same id in place, or appends it.
    ///
    /// Returns the replaced event.
    pub fn upsert_event(&mut self, event: Event) -> Option<Event> {
        trace!(event_id = %event.id, "upsert event");
        let previous = match self.events.iter_mut().find(|stored| stored.id == event.id) {
            Some(stored) => Some(std::mem::replace(stored, event)),
            None => {
                self.events.push(event);
                None
            }
        };
        self.bump_event_version();
        previous
    }

    pub fn remove_event(&mut self, id: &EventId) -> Option<Event> {
        let index = self.events.iter().position(|event| &event.id == id)?;
        let removed = self.events.remove(index);
        trace!(event_id = %id, "remove event");
        self.bump_event_version();
        Some(removed)
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| &event.id == id)
    }

    /// Monotonic counter bumped by every event mutation.
    #[must_use]
    pub fn event_version(&self) -> u64 {
        self.event_version
    }

    /// Store query for the current window.
    ///
    /// Lists the registered calendars that are not hidden and asks for
    /// orphaned events too, so the result depends only on the window, the
    /// registry and the hidden set.
    #[must_use]
    pub fn current_query(&self) -> EventQuery {
        self.query_for(&self.calendars)
    }

    /// Reloads calendars, tags and the current window's events from `store`.
    ///
    /// Calendars referenced by records but missing from the store's list are
    /// added to the registry with the record's color. Nothing is applied
    /// unless every read succeeds and each snapshot has unique ids. Returns
    /// the number of events loaded.
    pub fn refresh_from_store<S>(&mut self, store: &S) -> CalendarResult<usize>
    where
        S: EventStore + ?Sized,
    {
        let mut calendars = index_unique(store.list_calendars()?, |c| c.id.clone(), "calendar")?;
        let tags = index_unique(store.list_tags()?, |t| t.id.clone(), "tag")?;

        let query = self.query_for(&calendars);
        let mut events = Vec::new();
        for record in store.query_events(&query)? {
            match record.calendar {
                Some(calendar) => {
                    if let Entry::Vacant(entry) = calendars.entry(calendar.id) {
                        debug!(calendar_id = %entry.key(), "calendar taken from event record");
                        let name = entry.key().to_string();
                        let id = entry.key().clone();
                        entry.insert(Calendar::new(id, name, calendar.color));
                    }
                }
                None => warn!(
                    event_id = %record.event.id,
                    calendar_id = %record.event.calendar_id,
                    "store record has no resolvable calendar"
                ),
            }
            events.push(record.event);
        }
        validate_unique_event_ids(&events)?;

        let count = events.len();
        self.calendars = calendars;
        self.bump_registry_version();
        self.tags = tags;
        self.events = events;
        self.bump_event_version();
        debug!(
            count,
            start = %query.start_range,
            end = %query.end_range,
            "refreshed from store"
        );
        Ok(count)
    }

    fn query_for(&self, calendars: &IndexMap<CalendarId, Calendar>) -> EventQuery {
        let resolved = self.resolved_window();
        EventQuery {
            start_range: resolved.window.start,
            end_range: resolved.window.end,
            calendar_ids: calendars
                .keys()
                .filter(|id| self.is_calendar_visible(id))
                .cloned()
                .collect(),
            include_orphaned: true,
        }
    }

    fn bump_event_version(&mut self) {
        self.event_version = self.event_version.wrapping_add(1);
    }
}
