//! Window -> selection -> grouping -> positioning, as one pure pass.
//!
//! The pass reads an immutable snapshot of the engine state and produces a
//! `LayoutFrame`. With the `parallel-layout` feature, the days of a Day/Week
//! window (and the months of a Year window) are laid out concurrently; the
//! output order and content are identical to the sequential path.

use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, TimeZone};
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::primitives::shift_days;
use crate::core::{
    AllDayPlacement, Calendar, CalendarId, Color, DateWindow, DayFrame, Event, EventId,
    MonthGrid, OverlapItem, Placement, ResolvedWindow, ViewMode, all_day_dates,
    assign_all_day_lanes, event_in_window, event_on_day, events_in_window, group_overlapping,
    position_event,
};
use crate::error::CalendarResult;
use crate::render::{DayLayout, LayoutFrame, MonthCellLayout, MonthLayout, MonthSummary};

use super::CalendarEngineConfig;

/// Borrowed snapshot consumed by one layout pass.
#[derive(Debug)]
pub struct LayoutInputs<'a, Tz: TimeZone> {
    pub resolved: &'a ResolvedWindow,
    pub events: &'a [Event],
    pub visible_calendars: &'a BTreeSet<CalendarId>,
    pub calendars: &'a IndexMap<CalendarId, Calendar>,
    pub config: &'a CalendarEngineConfig,
    pub tz: &'a Tz,
}

/// Frame plus the data-quality findings of the pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPass {
    pub frame: LayoutFrame,
    /// Calendar ids referenced by selected events but missing from the
    /// registry; those events were drawn with the default color.
    pub unresolved_calendars: BTreeSet<CalendarId>,
}

pub fn build_layout<Tz: TimeZone + Sync>(
    inputs: &LayoutInputs<'_, Tz>,
) -> CalendarResult<LayoutPass> {
    let resolved = inputs.resolved;
    let mut frame = LayoutFrame::new(
        resolved.view_mode,
        resolved.window,
        inputs.config.slot_height,
    );

    let selected = events_in_window(
        inputs.events,
        &resolved.window,
        inputs.visible_calendars,
        inputs.tz,
    );
    let palette = EventPalette::resolve(&selected, inputs.calendars, inputs.config.default_color);

    match resolved.view_mode {
        ViewMode::Day | ViewMode::Week => {
            lay_out_time_grid(&mut frame, &selected, &palette, inputs)?;
        }
        ViewMode::Month => {
            if let Some(grid) = &resolved.grid {
                frame.grid = Some(lay_out_month_cells(grid, &selected, inputs.tz));
            }
        }
        ViewMode::Year => {
            frame.months = summarize_months(&selected, inputs);
        }
    }

    debug!(
        view_mode = ?resolved.view_mode,
        window_start = %resolved.window.start,
        window_end = %resolved.window.end,
        selected = selected.len(),
        timed = frame.timed.len(),
        all_day = frame.all_day.len(),
        "layout pass"
    );

    Ok(LayoutPass {
        frame,
        unresolved_calendars: palette.unresolved,
    })
}

struct EventPalette<'a> {
    colors: HashMap<&'a EventId, Color>,
    default_color: Color,
    unresolved: BTreeSet<CalendarId>,
}

impl<'a> EventPalette<'a> {
    fn resolve(
        selected: &[&'a Event],
        calendars: &IndexMap<CalendarId, Calendar>,
        default_color: Color,
    ) -> Self {
        let mut unresolved = BTreeSet::new();
        let colors = selected
            .iter()
            .map(|&event| {
                let color = match calendars.get(&event.calendar_id) {
                    Some(calendar) => calendar.color,
                    None => {
                        unresolved.insert(event.calendar_id.clone());
                        default_color
                    }
                };
                (&event.id, color)
            })
            .collect();

        Self {
            colors,
            default_color,
            unresolved,
        }
    }

    fn color_of(&self, id: &EventId) -> Color {
        self.colors.get(id).copied().unwrap_or(self.default_color)
    }
}

fn lay_out_time_grid<Tz: TimeZone + Sync>(
    frame: &mut LayoutFrame,
    selected: &[&Event],
    palette: &EventPalette<'_>,
    inputs: &LayoutInputs<'_, Tz>,
) -> CalendarResult<()> {
    let window = inputs.resolved.window;
    let (all_day, timed): (Vec<&Event>, Vec<&Event>) =
        selected.iter().copied().partition(|event| event.is_all_day);

    let days: Vec<(usize, NaiveDate)> = window.dates().enumerate().collect();
    let per_day = map_in_order(&days, |&(day_offset, date)| {
        lay_out_day(day_offset, date, &timed, palette, inputs)
    });

    let mut day_layouts = Vec::with_capacity(days.len());
    for result in per_day {
        let (layout, placements) = result?;
        day_layouts.push(layout);
        frame.timed.extend(placements);
    }

    let (all_day_placements, lanes_per_day) =
        lay_out_all_day(&all_day, &window, palette, inputs.tz);
    for (layout, lanes) in day_layouts.iter_mut().zip(lanes_per_day) {
        layout.all_day_lanes = lanes;
    }

    frame.all_day = all_day_placements;
    frame.days = day_layouts;
    Ok(())
}

fn lay_out_day<Tz: TimeZone>(
    day_offset: usize,
    date: NaiveDate,
    timed: &[&Event],
    palette: &EventPalette<'_>,
    inputs: &LayoutInputs<'_, Tz>,
) -> CalendarResult<(DayLayout, Vec<Placement>)> {
    let next = shift_days(date, 1).unwrap_or(date);
    let bounds = DateWindow::from_dates(date, next, inputs.tz);
    let day = DayFrame {
        day_offset,
        start: bounds.start,
        end: bounds.end,
    };

    let items: Vec<OverlapItem<'_>> = timed
        .iter()
        .filter_map(|event| {
            event
                .span
                .clip(day.start, day.end)
                .map(|span| OverlapItem::new(&event.id, span))
        })
        .collect();
    let columns = group_overlapping(&items);

    let placements = columns
        .slots
        .iter()
        .map(|slot| {
            position_event(
                slot,
                day,
                inputs.config.slot_height,
                palette.color_of(&slot.id),
                inputs.tz,
            )
        })
        .collect::<CalendarResult<Vec<_>>>()?;

    trace!(
        %date,
        events = placements.len(),
        total_columns = columns.total_columns,
        clusters = columns.cluster_count,
        "day laid out"
    );

    Ok((
        DayLayout {
            date,
            day_offset,
            total_columns: columns.total_columns,
            cluster_count: columns.cluster_count,
            all_day_lanes: 0,
        },
        placements,
    ))
}

/// Stacks all-day events over the window's days.
///
/// Returns the placements and the lane count needed on each day.
fn lay_out_all_day<Tz: TimeZone>(
    all_day: &[&Event],
    window: &DateWindow,
    palette: &EventPalette<'_>,
    tz: &Tz,
) -> (Vec<AllDayPlacement>, Vec<usize>) {
    let day_count = window.day_count();
    let ranges: Vec<(&EventId, usize, usize)> = all_day
        .iter()
        .filter_map(|event| {
            let (first, end) = all_day_dates(event, tz);
            let first = first.max(window.first_date);
            let end = end.min(window.end_date);
            let first_day = window.day_offset(first)?;
            let end_day = window.day_offset(end).unwrap_or(day_count);
            (first_day < end_day).then_some((&event.id, first_day, end_day))
        })
        .collect();

    let (slots, _) = assign_all_day_lanes(&ranges);

    let mut lanes_per_day = vec![0_usize; day_count];
    let placements: Vec<AllDayPlacement> = slots
        .into_iter()
        .map(|slot| {
            for lanes in &mut lanes_per_day[slot.first_day..slot.end_day] {
                *lanes = (*lanes).max(slot.lane + 1);
            }
            AllDayPlacement {
                color: palette.color_of(&slot.id),
                event_id: slot.id,
                day_offset: slot.first_day,
                day_span: slot.end_day - slot.first_day,
                lane: slot.lane,
            }
        })
        .collect();

    (placements, lanes_per_day)
}

fn lay_out_month_cells<Tz: TimeZone>(
    grid: &MonthGrid,
    selected: &[&Event],
    tz: &Tz,
) -> MonthLayout {
    let mut ordered = selected.to_vec();
    ordered.sort_by(|a, b| a.start().cmp(&b.start()).then_with(|| a.id.cmp(&b.id)));

    let cells = grid
        .cells
        .iter()
        .map(|cell| {
            let next = shift_days(cell.date, 1).unwrap_or(cell.date);
            let bounds = DateWindow::from_dates(cell.date, next, tz);
            let event_ids = ordered
                .iter()
                .filter(|event| event_on_day(event, cell.date, bounds.start, bounds.end, tz))
                .map(|event| event.id.clone())
                .collect();
            MonthCellLayout::new(*cell, event_ids)
        })
        .collect();

    MonthLayout {
        year: grid.year,
        month: grid.month,
        cells,
    }
}

fn summarize_months<Tz: TimeZone + Sync>(
    selected: &[&Event],
    inputs: &LayoutInputs<'_, Tz>,
) -> Vec<MonthSummary> {
    map_in_order(&inputs.resolved.months, |month| MonthSummary {
        month: month.month,
        window: month.window,
        event_count: selected
            .iter()
            .filter(|event| event_in_window(event, &month.window, inputs.tz))
            .count(),
        grid: month.grid.clone(),
    })
}

#[cfg(feature = "parallel-layout")]
fn map_in_order<T, U, F>(items: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    use rayon::prelude::*;
    items.par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel-layout"))]
fn map_in_order<T, U, F>(items: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    items.iter().map(f).collect()
}
