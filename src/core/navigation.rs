use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ViewMode;
use crate::core::primitives::{
    first_of_month, first_of_year, local_date, shift_months, start_of_day,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationDirection {
    Previous,
    Next,
}

impl NavigationDirection {
    const fn sign(self) -> i32 {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

/// The only mutable state of the layout engine: anchor instant plus zoom.
///
/// Every transition is total. Day and Week steps are exact durations, so
/// `next` followed by `previous` restores the anchor to the nanosecond.
/// Month and Year steps land on local midnight of the first day of the
/// resulting month (Month) or year (Year); day-of-month is not carried over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub anchor: DateTime<Utc>,
    pub view_mode: ViewMode,
}

impl NavigationState {
    #[must_use]
    pub const fn new(anchor: DateTime<Utc>, view_mode: ViewMode) -> Self {
        Self { anchor, view_mode }
    }

    #[must_use]
    pub fn go_to_previous<Tz: TimeZone>(self, tz: &Tz) -> Self {
        self.step(NavigationDirection::Previous, tz)
    }

    #[must_use]
    pub fn go_to_next<Tz: TimeZone>(self, tz: &Tz) -> Self {
        self.step(NavigationDirection::Next, tz)
    }

    #[must_use]
    pub fn go_to_today(self, now: DateTime<Utc>) -> Self {
        Self {
            anchor: now,
            view_mode: self.view_mode,
        }
    }

    #[must_use]
    pub fn with_view_mode(self, view_mode: ViewMode) -> Self {
        Self {
            anchor: self.anchor,
            view_mode,
        }
    }

    /// Shifts the anchor by one unit of the current view mode.
    ///
    /// A shift past the representable date range leaves the anchor unchanged.
    #[must_use]
    pub fn step<Tz: TimeZone>(self, direction: NavigationDirection, tz: &Tz) -> Self {
        let sign = direction.sign();
        let shifted = match self.view_mode {
            ViewMode::Day => self
                .anchor
                .checked_add_signed(Duration::days(i64::from(sign))),
            ViewMode::Week => self
                .anchor
                .checked_add_signed(Duration::weeks(i64::from(sign))),
            ViewMode::Month => local_date(self.anchor, tz)
                .and_then(|date| shift_months(first_of_month(date), sign))
                .map(|date| start_of_day(date, tz)),
            ViewMode::Year => local_date(self.anchor, tz)
                .and_then(|date| shift_months(first_of_year(date), 12 * sign))
                .map(|date| start_of_day(date, tz)),
        };

        let Some(anchor) = shifted else {
            debug!(
                view_mode = ?self.view_mode,
                ?direction,
                anchor = %self.anchor,
                "navigation step out of range; keeping anchor"
            );
            return self;
        };

        Self {
            anchor,
            view_mode: self.view_mode,
        }
    }
}
