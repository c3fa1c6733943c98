use calendar_rs::api::{CalendarEngine, CalendarEngineConfig};
use calendar_rs::core::{Event, ViewMode};
use calendar_rs::render::NullRenderer;
use calendar_rs::telemetry::{init_default_tracing, init_tracing_with_filter};
use chrono::{TimeZone, Utc};

#[test]
fn subscriber_installs_at_most_once() {
    let installed = init_default_tracing();
    assert_eq!(installed, cfg!(feature = "telemetry"));
    assert!(!init_tracing_with_filter("calendar_rs=trace"));

    // Layout with an unknown calendar logs a warning through whatever
    // subscriber is active and still succeeds.
    let mut engine = CalendarEngine::with_time_zone(
        NullRenderer::default(),
        CalendarEngineConfig::default().with_initial_view_mode(ViewMode::Day),
        Utc,
        Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, 0).unwrap(),
    )
    .expect("engine init");
    engine
        .set_events(vec![
            Event::new(
                "lost",
                "Lost",
                Utc.with_ymd_and_hms(2024, 3, 6, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 3, 6, 10, 0, 0).unwrap(),
                "missing",
            )
            .expect("event"),
        ])
        .expect("events");
    engine.render().expect("render");
    assert_eq!(engine.renderer().frames_rendered, 1);
}
