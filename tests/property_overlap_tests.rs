use calendar_rs::core::{EventId, OverlapItem, TimeSpan, group_overlapping};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

fn day_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 6, 0, 0, 0).unwrap()
}

fn span_minutes(start: i64, length: i64) -> TimeSpan {
    let start = day_start() + Duration::minutes(start);
    TimeSpan::new(start, start + Duration::minutes(length)).expect("valid span")
}

fn brute_force_max_overlap(spans: &[TimeSpan]) -> usize {
    spans
        .iter()
        .map(|span| {
            spans
                .iter()
                .filter(|other| other.start() <= span.start() && other.end() > span.start())
                .count()
        })
        .max()
        .unwrap_or(0)
}

fn intervals() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..1380, 1i64..240), 0..40)
}

proptest! {
    #[test]
    fn events_sharing_a_column_never_overlap(raw in intervals()) {
        let ids: Vec<EventId> = (0..raw.len()).map(|i| EventId::new(format!("e-{i:03}"))).collect();
        let items: Vec<OverlapItem<'_>> = raw
            .iter()
            .zip(&ids)
            .map(|(&(start, length), id)| OverlapItem::new(id, span_minutes(start, length)))
            .collect();

        let layout = group_overlapping(&items);
        prop_assert_eq!(layout.slots.len(), items.len());

        for (i, a) in layout.slots.iter().enumerate() {
            prop_assert!(a.column_index < a.column_count);
            for b in &layout.slots[i + 1..] {
                if a.column_index == b.column_index {
                    prop_assert!(!a.span.overlaps(b.span), "{} and {} share a column", a.id, b.id);
                }
            }
        }
    }

    #[test]
    fn total_columns_equal_max_simultaneous_overlap(raw in intervals()) {
        let ids: Vec<EventId> = (0..raw.len()).map(|i| EventId::new(format!("e-{i:03}"))).collect();
        let spans: Vec<TimeSpan> = raw
            .iter()
            .map(|&(start, length)| span_minutes(start, length))
            .collect();
        let items: Vec<OverlapItem<'_>> = spans
            .iter()
            .zip(&ids)
            .map(|(span, id)| OverlapItem::new(id, *span))
            .collect();

        let layout = group_overlapping(&items);
        prop_assert_eq!(layout.total_columns, brute_force_max_overlap(&spans));

        let max_cluster = layout.slots.iter().map(|slot| slot.column_count).max().unwrap_or(0);
        prop_assert_eq!(max_cluster, layout.total_columns);
    }

    #[test]
    fn disjoint_events_each_get_a_single_column(
        count in 1usize..30,
        gap in 0i64..30,
        length in 1i64..45
    ) {
        let ids: Vec<EventId> = (0..count).map(|i| EventId::new(format!("d-{i}"))).collect();
        let items: Vec<OverlapItem<'_>> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| OverlapItem::new(id, span_minutes(i as i64 * (length + gap), length)))
            .rev()
            .collect();

        let layout = group_overlapping(&items);
        prop_assert_eq!(layout.total_columns, 1);
        prop_assert!(
            layout
                .slots
                .iter()
                .all(|slot| slot.column_count == 1 && slot.column_index == 0)
        );
    }

    #[test]
    fn clique_of_k_events_gets_k_columns(k in 1usize..12, stagger in 0i64..5) {
        let ids: Vec<EventId> = (0..k).map(|i| EventId::new(format!("c-{i:02}"))).collect();
        let items: Vec<OverlapItem<'_>> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| OverlapItem::new(id, span_minutes(600 + i as i64 * stagger, 120)))
            .collect();

        let layout = group_overlapping(&items);
        prop_assert_eq!(layout.total_columns, k);
        prop_assert_eq!(layout.cluster_count, 1);

        let mut columns: Vec<usize> = layout.slots.iter().map(|slot| slot.column_index).collect();
        columns.sort_unstable();
        prop_assert_eq!(columns, (0..k).collect::<Vec<_>>());
        prop_assert!(layout.slots.iter().all(|slot| slot.column_count == k));
    }

    #[test]
    fn grouping_ignores_input_order(raw in intervals(), rotate in 0usize..40) {
        let ids: Vec<EventId> = (0..raw.len()).map(|i| EventId::new(format!("e-{i:03}"))).collect();
        let mut items: Vec<OverlapItem<'_>> = raw
            .iter()
            .zip(&ids)
            .map(|(&(start, length), id)| OverlapItem::new(id, span_minutes(start, length)))
            .collect();

        let forward = group_overlapping(&items);
        if !items.is_empty() {
            let shift = rotate % items.len();
            items.rotate_left(shift);
        }
        items.reverse();
        prop_assert_eq!(group_overlapping(&items), forward);
    }
}

#[test]
fn zero_length_spans_cannot_reach_the_grouper() {
    let at = day_start() + Duration::hours(10);
    assert!(TimeSpan::new(at, at).is_err());
    assert!(
        serde_json::from_str::<TimeSpan>(
            r#"{"start":"2024-03-06T10:00:00Z","end":"2024-03-06T10:00:00Z"}"#
        )
        .is_err()
    );
}
