//! Column assignment for overlapping events.
//!
//! Events are sorted by `(start, id)` and placed first-fit into the lowest
//! column whose previous event has ended. For interval sets this greedy pass
//! uses exactly as many columns as the largest number of events overlapping
//! at one instant, so the result is both minimal and deterministic.
//!
//! Each event additionally belongs to an overlap cluster: a maximal run of
//! sorted events connected by overlaps. The column count reported for an
//! event is the count of its cluster, so an isolated event keeps the full
//! width even if another part of the day needs three columns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::{Array, SmallVec};

use crate::core::{EventId, TimeSpan};

/// One interval handed to the grouper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapItem<'a> {
    pub id: &'a EventId,
    pub span: TimeSpan,
}

impl<'a> OverlapItem<'a> {
    #[must_use]
    pub fn new(id: &'a EventId, span: TimeSpan) -> Self {
        Self { id, span }
    }
}

/// Column assigned to one interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSlot {
    pub id: EventId,
    pub span: TimeSpan,
    pub column_index: usize,
    pub column_count: usize,
    pub cluster_index: usize,
}

/// Result of grouping one day of timed events.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnLayout {
    /// Slots in `(start, id)` order.
    pub slots: Vec<ColumnSlot>,
    /// Columns used across the whole day (max over clusters).
    pub total_columns: usize,
    pub cluster_count: usize,
}

/// Partitions intervals into the fewest non-overlapping columns.
///
/// # Panics
///
/// Panics if an item has `start >= end`. `TimeSpan` cannot hold such a value,
/// so reaching this means the selection stage handed over corrupt data.
#[must_use]
pub fn group_overlapping(items: &[OverlapItem<'_>]) -> ColumnLayout {
    let mut sorted: Vec<&OverlapItem<'_>> = items.iter().collect();
    sorted.sort_by(|a, b| {
        a.span
            .start()
            .cmp(&b.span.start())
            .then_with(|| a.id.cmp(b.id))
    });

    let mut column_tails = SmallVec::<[DateTime<Utc>; 8]>::new();
    let mut slots: Vec<ColumnSlot> = Vec::with_capacity(sorted.len());
    let mut cluster = ClusterCursor::default();

    for item in sorted {
        assert!(
            item.span.start() < item.span.end(),
            "overlap grouping requires start < end for event `{}`",
            item.id
        );

        if !slots.is_empty() && item.span.start() >= cluster.max_end {
            cluster.close(&mut slots);
            cluster.open(slots.len());
        }

        let column_index = first_fit(&mut column_tails, item.span.start(), item.span.end());
        cluster.columns = cluster.columns.max(column_index + 1);
        cluster.max_end = cluster.max_end.max(item.span.end());

        slots.push(ColumnSlot {
            id: item.id.clone(),
            span: item.span,
            column_index,
            column_count: 0,
            cluster_index: cluster.index,
        });
    }

    let cluster_count = if slots.is_empty() {
        0
    } else {
        cluster.close(&mut slots);
        cluster.index + 1
    };

    ColumnLayout {
        slots,
        total_columns: column_tails.len(),
        cluster_count,
    }
}

#[derive(Debug)]
struct ClusterCursor {
    index: usize,
    first_slot: usize,
    columns: usize,
    max_end: DateTime<Utc>,
}

impl Default for ClusterCursor {
    fn default() -> Self {
        Self {
            index: 0,
            first_slot: 0,
            columns: 0,
            max_end: DateTime::<Utc>::MIN_UTC,
        }
    }
}

impl ClusterCursor {
    fn close(&self, slots: &mut [ColumnSlot]) {
        for slot in &mut slots[self.first_slot..] {
            slot.column_count = self.columns;
        }
    }

    fn open(&mut self, first_slot: usize) {
        self.index += 1;
        self.first_slot = first_slot;
        self.columns = 0;
        self.max_end = DateTime::<Utc>::MIN_UTC;
    }
}

/// Lane assigned to an all-day event across the window's day indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneSlot {
    pub id: EventId,
    /// First covered day index, inclusive.
    pub first_day: usize,
    /// Last covered day index, exclusive.
    pub end_day: usize,
    pub lane: usize,
}

/// Stacks all-day events into lanes over day indices with the same
/// first-fit rule as timed columns. Items are `(id, first_day, end_day)`
/// with `first_day < end_day`.
#[must_use]
pub fn assign_all_day_lanes(items: &[(&EventId, usize, usize)]) -> (Vec<LaneSlot>, usize) {
    let mut sorted: Vec<&(&EventId, usize, usize)> = items.iter().collect();
    sorted.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    let mut lane_tails = SmallVec::<[usize; 8]>::new();
    let slots: Vec<LaneSlot> = sorted
        .into_iter()
        .map(|(id, first_day, end_day)| LaneSlot {
            id: (*id).clone(),
            first_day: *first_day,
            end_day: *end_day,
            lane: first_fit(&mut lane_tails, *first_day, *end_day),
        })
        .collect();

    (slots, lane_tails.len())
}

fn first_fit<A>(tails: &mut SmallVec<A>, start: A::Item, end: A::Item) -> usize
where
    A: Array,
    A::Item: Ord + Copy,
{
    for (column, tail) in tails.iter_mut().enumerate() {
        if *tail <= start {
            *tail = end;
            return column;
        }
    }
    tails.push(end);
    tails.len() - 1
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{OverlapItem, assign_all_day_lanes, group_overlapping};
    use crate::core::{EventId, TimeSpan};

    fn span(start_hour: u32, end_hour: u32) -> TimeSpan {
        TimeSpan::new(
            Utc.with_ymd_and_hms(2024, 3, 6, start_hour, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 6, end_hour, 0, 0).unwrap(),
        )
        .expect("valid span")
    }

    #[test]
    fn equal_starts_are_ordered_by_id_not_arrival() {
        let a = EventId::from("a");
        let b = EventId::from("b");
        let forward = group_overlapping(&[
            OverlapItem::new(&a, span(9, 10)),
            OverlapItem::new(&b, span(9, 10)),
        ]);
        let reversed = group_overlapping(&[
            OverlapItem::new(&b, span(9, 10)),
            OverlapItem::new(&a, span(9, 10)),
        ]);
        assert_eq!(forward, reversed);
        assert_eq!(forward.slots[0].id, a);
        assert_eq!(forward.slots[0].column_index, 0);
        assert_eq!(forward.slots[1].column_index, 1);
    }

    #[test]
    fn isolated_event_keeps_full_width_next_to_busy_cluster() {
        let ids: Vec<EventId> = ["early", "x", "y", "z"]
            .into_iter()
            .map(EventId::from)
            .collect();
        let layout = group_overlapping(&[
            OverlapItem::new(&ids[0], span(8, 9)),
            OverlapItem::new(&ids[1], span(13, 16)),
            OverlapItem::new(&ids[2], span(14, 16)),
            OverlapItem::new(&ids[3], span(15, 16)),
        ]);
        assert_eq!(layout.total_columns, 3);
        assert_eq!(layout.cluster_count, 2);
        assert_eq!(layout.slots[0].column_count, 1);
        assert!(layout.slots[1..].iter().all(|slot| slot.column_count == 3));
    }

    #[test]
    fn back_to_back_events_reuse_column() {
        let a = EventId::from("a");
        let b = EventId::from("b");
        let layout = group_overlapping(&[
            OverlapItem::new(&a, span(9, 10)),
            OverlapItem::new(&b, span(10, 11)),
        ]);
        assert_eq!(layout.total_columns, 1);
        assert!(layout.slots.iter().all(|slot| slot.column_index == 0));
    }

    #[test]
    fn all_day_lanes_stack_overlapping_day_ranges() {
        let trip = EventId::from("trip");
        let conf = EventId::from("conf");
        let later = EventId::from("later");
        let (slots, lanes) = assign_all_day_lanes(&[(&conf, 2, 4), (&trip, 0, 3), (&later, 4, 5)]);
        assert_eq!(lanes, 2);
        assert_eq!(slots[0].id, trip);
        assert_eq!(slots[0].lane, 0);
        assert_eq!(slots[1].id, conf);
        assert_eq!(slots[1].lane, 1);
        assert_eq!(slots[2].lane, 0);
    }
}
