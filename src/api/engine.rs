use std::collections::BTreeSet;

use chrono::{DateTime, Local, TimeZone, Utc};
use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::core::{
    Calendar, CalendarId, DAYS_PER_WEEK, Event, NavigationState, ResolvedWindow, Tag, TagId,
    resolve_window,
};
use crate::error::CalendarResult;
use crate::render::{LayoutFrame, Renderer};

use super::CalendarEngineConfig;
use super::labels;
use super::layout_cache::{LayoutCache, LayoutCacheKey, LayoutCacheStats};
use super::layout_pipeline::{LayoutInputs, build_layout};
use super::validation::validate_engine_config;

/// Main orchestration facade consumed by host applications.
///
/// `CalendarEngine` owns the navigation state and the event, calendar and
/// tag snapshots, and turns them into memoized `LayoutFrame`s for its
/// renderer. Calendar-day arithmetic happens in `Tz` (host local time by
/// default).
pub struct CalendarEngine<R: Renderer, Tz: TimeZone = Local> {
    pub(super) renderer: R,
    pub(super) tz: Tz,
    pub(super) config: CalendarEngineConfig,
    pub(super) config_generation: u64,
    pub(super) navigation: NavigationState,
    pub(super) events: Vec<Event>,
    pub(super) event_version: u64,
    pub(super) calendars: IndexMap<CalendarId, Calendar>,
    pub(super) registry_version: u64,
    pub(super) tags: IndexMap<TagId, Tag>,
    pub(super) hidden_calendars: BTreeSet<CalendarId>,
    pub(super) layout_cache: LayoutCache,
}

impl<R: Renderer> CalendarEngine<R, Local> {
    /// Creates an engine in host local time, anchored at the current instant.
    pub fn new(renderer: R, config: CalendarEngineConfig) -> CalendarResult<Self> {
        Self::with_time_zone(renderer, config, Local, Utc::now())
    }
}

impl<R: Renderer, Tz: TimeZone + Sync> CalendarEngine<R, Tz> {
    /// Creates an engine with an explicit zone and anchor.
    pub fn with_time_zone(
        renderer: R,
        config: CalendarEngineConfig,
        tz: Tz,
        anchor: DateTime<Utc>,
    ) -> CalendarResult<Self> {
        let config = validate_engine_config(config)?;
        debug!(
            week_start = ?config.week_start,
            slot_height = config.slot_height,
            view_mode = ?config.initial_view_mode,
            %anchor,
            "engine created"
        );

        Ok(Self {
            renderer,
            tz,
            config,
            config_generation: 0,
            navigation: NavigationState::new(anchor, config.initial_view_mode),
            events: Vec::new(),
            event_version: 0,
            calendars: IndexMap::new(),
            registry_version: 0,
            tags: IndexMap::new(),
            hidden_calendars: BTreeSet::new(),
            layout_cache: LayoutCache::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> CalendarEngineConfig {
        self.config
    }

    /// Replaces the configuration. `initial_view_mode` only matters at
    /// construction and is stored as given.
    pub fn set_config(&mut self, config: CalendarEngineConfig) -> CalendarResult<()> {
        let config = validate_engine_config(config)?;
        if config != self.config {
            self.config = config;
            self.config_generation = self.config_generation.wrapping_add(1);
            debug!(generation = self.config_generation, "config replaced");
        }
        Ok(())
    }

    #[must_use]
    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }

    /// Window and grid for the current navigation state.
    #[must_use]
    pub fn resolved_window(&self) -> ResolvedWindow {
        resolve_window(
            self.navigation.anchor,
            self.navigation.view_mode,
            self.config.week_start,
            &self.tz,
        )
    }

    /// Computes (or returns the memoized) layout for the current state.
    pub fn layout(&mut self) -> CalendarResult<LayoutFrame> {
        let resolved = self.resolved_window();
        let visible_calendars = self.visible_calendars();
        let key = LayoutCacheKey {
            window_start: resolved.window.start,
            window_end: resolved.window.end,
            view_mode: resolved.view_mode,
            visible_calendars: visible_calendars.iter().cloned().collect(),
            event_version: self.event_version,
            registry_version: self.registry_version,
            config_generation: self.config_generation,
        };

        if let Some(frame) = self.layout_cache.get(&key) {
            trace!(view_mode = ?resolved.view_mode, "layout cache hit");
            return Ok(frame);
        }

        let pass = build_layout(&LayoutInputs {
            resolved: &resolved,
            events: &self.events,
            visible_calendars: &visible_calendars,
            calendars: &self.calendars,
            config: &self.config,
            tz: &self.tz,
        })?;
        for calendar_id in &pass.unresolved_calendars {
            warn!(
                %calendar_id,
                "events reference an unknown calendar; using default color"
            );
        }

        self.layout_cache.insert(key, pass.frame.clone());
        Ok(pass.frame)
    }

    #[must_use]
    pub fn layout_cache_stats(&self) -> LayoutCacheStats {
        self.layout_cache.stats()
    }

    pub fn clear_layout_cache(&mut self) {
        self.layout_cache.clear();
    }

    /// Lays out the current window and hands the frame to the renderer.
    pub fn render(&mut self) -> CalendarResult<()> {
        let frame = self.layout()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn header_title(&self) -> String {
        labels::header_title(self.navigation.anchor, &self.tz)
    }

    #[must_use]
    pub fn weekday_headers(&self) -> [&'static str; DAYS_PER_WEEK] {
        labels::weekday_headers(self.config.week_start)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
