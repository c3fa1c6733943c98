use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::core::{CalendarId, ViewMode};
use crate::render::LayoutFrame;

/// Runtime metrics exposed by the in-engine layout cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Everything a layout pass reads, reduced to comparable values.
///
/// Mutations bump `event_version`, `registry_version` or
/// `config_generation`, so an entry can never be served after its inputs
/// changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) struct LayoutCacheKey {
    pub(super) window_start: DateTime<Utc>,
    pub(super) window_end: DateTime<Utc>,
    pub(super) view_mode: ViewMode,
    /// Sorted.
    pub(super) visible_calendars: Vec<CalendarId>,
    pub(super) event_version: u64,
    pub(super) registry_version: u64,
    pub(super) config_generation: u64,
}

#[derive(Debug, Default)]
pub(super) struct LayoutCache {
    entries: HashMap<LayoutCacheKey, LayoutFrame>,
    hits: u64,
    misses: u64,
}

impl LayoutCache {
    const MAX_ENTRIES: usize = 64;

    pub(super) fn get(&mut self, key: &LayoutCacheKey) -> Option<LayoutFrame> {
        let value = self.entries.get(key).cloned();
        if value.is_some() {
            self.hits = self.hits.saturating_add(1);
        }
        value
    }

    pub(super) fn insert(&mut self, key: LayoutCacheKey, frame: LayoutFrame) {
        self.misses = self.misses.saturating_add(1);
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.clear();
        }
        self.entries.insert(key, frame);
    }

    pub(super) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(super) fn stats(&self) -> LayoutCacheStats {
        LayoutCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}
