use std::collections::HashSet;

use crate::core::Event;
use crate::error::{CalendarError, CalendarResult};

use super::CalendarEngineConfig;

pub(super) fn validate_engine_config(
    config: CalendarEngineConfig,
) -> CalendarResult<CalendarEngineConfig> {
    validate_slot_height(config.slot_height)?;
    config
        .default_color
        .validate()
        .map_err(|e| CalendarError::InvalidConfig(format!("default color: {e}")))?;
    Ok(config)
}

pub(super) fn validate_slot_height(slot_height: f64) -> CalendarResult<f64> {
    if !slot_height.is_finite() || slot_height <= 0.0 {
        return Err(CalendarError::InvalidConfig(
            "slot height must be finite and > 0".to_owned(),
        ));
    }
    Ok(slot_height)
}

/// Rejects snapshots that reuse an event id.
pub(super) fn validate_unique_event_ids(events: &[Event]) -> CalendarResult<()> {
    let mut seen = HashSet::with_capacity(events.len());
    for event in events {
        if !seen.insert(&event.id) {
            return Err(CalendarError::InvalidData(format!(
                "duplicate event id `{}` in snapshot",
                event.id
            )));
        }
    }
    Ok(())
}
