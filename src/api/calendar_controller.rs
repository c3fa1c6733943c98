use std::collections::BTreeSet;
use std::hash::Hash;

use chrono::TimeZone;
use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, trace};

use crate::core::{Calendar, CalendarId, Tag, TagId};
use crate::error::{CalendarError, CalendarResult};
use crate::render::Renderer;

use super::CalendarEngine;

impl<R: Renderer, Tz: TimeZone + Sync> CalendarEngine<R, Tz> {
    /// Replaces the calendar registry, keeping the given order.
    ///
    /// Hidden flags survive for ids that are still present.
    pub fn set_calendars(&mut self, calendars: Vec<Calendar>) -> CalendarResult<()> {
        let calendars = index_unique(calendars, |calendar| calendar.id.clone(), "calendar")?;
        debug!(count = calendars.len(), "set calendars");
        self.calendars = calendars;
        self.bump_registry_version();
        Ok(())
    }

    /// Inserts or replaces one calendar; returns the replaced entry.
    pub fn upsert_calendar(&mut self, calendar: Calendar) -> Option<Calendar> {
        trace!(calendar_id = %calendar.id, "upsert calendar");
        let previous = match self.calendars.entry(calendar.id.clone()) {
            Entry::Occupied(mut entry) => Some(entry.insert(calendar)),
            Entry::Vacant(entry) => {
                entry.insert(calendar);
                None
            }
        };
        self.bump_registry_version();
        previous
    }

    /// Removes a calendar from the registry. Its events stay in the
    /// collection and fall back to the default color.
    pub fn remove_calendar(&mut self, id: &CalendarId) -> Option<Calendar> {
        let removed = self.calendars.shift_remove(id)?;
        trace!(calendar_id = %id, "remove calendar");
        self.bump_registry_version();
        Some(removed)
    }

    #[must_use]
    pub fn calendars(&self) -> &IndexMap<CalendarId, Calendar> {
        &self.calendars
    }

    #[must_use]
    pub fn calendar(&self, id: &CalendarId) -> Option<&Calendar> {
        self.calendars.get(id)
    }

    pub fn set_tags(&mut self, tags: Vec<Tag>) -> CalendarResult<()> {
        let tags = index_unique(tags, |tag| tag.id.clone(), "tag")?;
        debug!(count = tags.len(), "set tags");
        self.tags = tags;
        Ok(())
    }

    #[must_use]
    pub fn tags(&self) -> &IndexMap<TagId, Tag> {
        &self.tags
    }

    /// Shows or hides one calendar. Returns whether anything changed.
    pub fn set_calendar_visible(&mut self, id: &CalendarId, visible: bool) -> bool {
        let changed = if visible {
            self.hidden_calendars.remove(id)
        } else {
            self.hidden_calendars.insert(id.clone())
        };
        if changed {
            trace!(calendar_id = %id, visible, "calendar visibility");
        }
        changed
    }

    /// Flips visibility and returns the new state.
    pub fn toggle_calendar(&mut self, id: &CalendarId) -> bool {
        let visible = !self.is_calendar_visible(id);
        self.set_calendar_visible(id, visible);
        visible
    }

    pub fn show_all_calendars(&mut self) {
        self.hidden_calendars.clear();
    }

    #[must_use]
    pub fn is_calendar_visible(&self, id: &CalendarId) -> bool {
        !self.hidden_calendars.contains(id)
    }

    /// Registered calendars plus calendars referenced only by events,
    /// minus the hidden ones.
    #[must_use]
    pub fn visible_calendars(&self) -> BTreeSet<CalendarId> {
        self.calendars
            .keys()
            .chain(self.events.iter().map(|event| &event.calendar_id))
            .filter(|id| self.is_calendar_visible(id))
            .cloned()
            .collect()
    }

    pub(super) fn bump_registry_version(&mut self) {
        self.registry_version = self.registry_version.wrapping_add(1);
    }
}

pub(super) fn index_unique<K, V>(
    values: Vec<V>,
    key_of: impl Fn(&V) -> K,
    kind: &str,
) -> CalendarResult<IndexMap<K, V>>
where
    K: Hash + Eq + std::fmt::Display,
{
    let mut indexed = IndexMap::with_capacity(values.len());
    for value in values {
        match indexed.entry(key_of(&value)) {
            Entry::Occupied(entry) => {
                return Err(CalendarError::InvalidData(format!(
                    "duplicate {kind} id `{}`",
                    entry.key()
                )));
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }
    Ok(indexed)
}
