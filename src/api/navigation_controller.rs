use chrono::{DateTime, TimeZone, Utc};
use tracing::trace;

use crate::core::{NavigationState, ViewMode};
use crate::render::Renderer;

use super::CalendarEngine;

impl<R: Renderer, Tz: TimeZone + Sync> CalendarEngine<R, Tz> {
    #[must_use]
    pub fn navigation(&self) -> NavigationState {
        self.navigation
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.navigation.view_mode
    }

    #[must_use]
    pub fn anchor(&self) -> DateTime<Utc> {
        self.navigation.anchor
    }

    pub fn go_to_previous(&mut self) {
        let next = self.navigation.go_to_previous(&self.tz);
        self.apply_navigation(next, "previous");
    }

    pub fn go_to_next(&mut self) {
        let next = self.navigation.go_to_next(&self.tz);
        self.apply_navigation(next, "next");
    }

    /// Moves the anchor to the current instant; view mode is unchanged.
    pub fn go_to_today(&mut self) {
        self.go_to_today_at(Utc::now());
    }

    /// Deterministic variant of [`Self::go_to_today`].
    pub fn go_to_today_at(&mut self, now: DateTime<Utc>) {
        let next = self.navigation.go_to_today(now);
        self.apply_navigation(next, "today");
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        let next = self.navigation.with_view_mode(view_mode);
        self.apply_navigation(next, "view mode");
    }

    pub fn set_anchor(&mut self, anchor: DateTime<Utc>) {
        let next = NavigationState::new(anchor, self.navigation.view_mode);
        self.apply_navigation(next, "anchor");
    }

    fn apply_navigation(&mut self, next: NavigationState, transition: &'static str) {
        trace!(
            transition,
            from = %self.navigation.anchor,
            to = %next.anchor,
            view_mode = ?next.view_mode,
            "navigate"
        );
        self.navigation = next;
    }
}
