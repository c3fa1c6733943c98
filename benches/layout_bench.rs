use calendar_rs::api::{CalendarEngine, CalendarEngineConfig};
use calendar_rs::core::{
    Calendar, Color, Event, EventId, OverlapItem, TimeSpan, ViewMode, group_overlapping,
};
use calendar_rs::render::NullRenderer;
use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn week_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap()
}

fn generated_events(count: usize) -> Vec<Event> {
    (0..count)
        .map(|i| {
            let start = week_start() + Duration::minutes((i as i64 * 37) % (7 * 24 * 60 - 120));
            let end = start + Duration::minutes(30 + (i as i64 % 5) * 15);
            let calendar = if i % 3 == 0 { "home" } else { "work" };
            Event::new(format!("event-{i}"), "generated", start, end, calendar)
                .expect("valid generated event")
        })
        .collect()
}

fn bench_group_overlapping_1k(c: &mut Criterion) {
    let spans: Vec<(EventId, TimeSpan)> = generated_events(1_000)
        .into_iter()
        .map(|event| (event.id, event.span))
        .collect();
    let items: Vec<OverlapItem<'_>> = spans
        .iter()
        .map(|(id, span)| OverlapItem::new(id, *span))
        .collect();

    c.bench_function("group_overlapping_1k", |b| {
        b.iter(|| {
            let _ = group_overlapping(black_box(&items));
        })
    });
}

fn bench_week_layout_2k(c: &mut Criterion) {
    let config = CalendarEngineConfig::default().with_initial_view_mode(ViewMode::Week);
    let mut engine =
        CalendarEngine::with_time_zone(NullRenderer::default(), config, Utc, week_start())
            .expect("engine init");
    engine
        .set_calendars(vec![Calendar::new("work", "Work", Color::DEFAULT_EVENT)])
        .expect("calendars");
    engine.set_events(generated_events(2_000)).expect("events");

    c.bench_function("week_layout_2k_uncached", |b| {
        b.iter(|| {
            engine.clear_layout_cache();
            let _ = engine.layout().expect("layout should succeed");
        })
    });
}

fn bench_month_layout_json_2k(c: &mut Criterion) {
    let config = CalendarEngineConfig::default().with_initial_view_mode(ViewMode::Month);
    let mut engine =
        CalendarEngine::with_time_zone(NullRenderer::default(), config, Utc, week_start())
            .expect("engine init");
    engine.set_events(generated_events(2_000)).expect("events");

    c.bench_function("month_layout_json_2k", |b| {
        b.iter(|| {
            let _ = engine
                .layout_json_contract_v1_pretty()
                .expect("layout json should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_group_overlapping_1k,
    bench_week_layout_2k,
    bench_month_layout_json_2k
);
criterion_main!(benches);
