// Side-by-side placement of overlapping segments within one day column.

use serde::Serialize;

use super::segments::Segment;
use crate::models::view::ViewMode;

/// Most columns a day view splits into
pub const DAY_VIEW_MAX_COLUMNS: usize = 6;
/// Week columns are narrow, so only nested pairs are split
pub const WEEK_VIEW_MAX_COLUMNS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlapSlot {
    pub column: usize,
    pub total_columns: usize,
    /// Drawn on top of another block instead of beside it
    pub is_overlapping: bool,
}

impl Default for OverlapSlot {
    fn default() -> Self {
        Self {
            column: 0,
            total_columns: 1,
            is_overlapping: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Span {
    start: u32,
    end: u32,
}

impl Span {
    fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && self.end > other.start
    }

    fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && self.end >= other.end
    }
}

/// Slots for one day's segments, returned in the order given.
pub fn layout_day(segments: &[Segment<'_>], view_mode: ViewMode) -> Vec<OverlapSlot> {
    let spans: Vec<Span> = segments
        .iter()
        .map(|segment| Span {
            start: segment.visible_start.minutes(),
            end: segment.visible_end.minutes(),
        })
        .collect();

    let mut order: Vec<usize> = (0..spans.len()).collect();
    order.sort_by_key(|&i| (spans[i].start, spans[i].end));

    let mut slots = vec![OverlapSlot::default(); spans.len()];
    match view_mode {
        ViewMode::Day => pack_columns(&spans, &order, &mut slots),
        ViewMode::Week => pair_containments(&spans, &order, &mut slots),
    }
    slots
}

fn pack_columns(spans: &[Span], order: &[usize], slots: &mut [OverlapSlot]) {
    let mut columns: Vec<Vec<usize>> = vec![Vec::new(); DAY_VIEW_MAX_COLUMNS];

    for &i in order {
        let conflicts: Vec<usize> = columns
            .iter()
            .map(|column| column.iter().filter(|&&j| spans[i].overlaps(&spans[j])).count())
            .collect();

        match conflicts.iter().position(|&count| count == 0) {
            Some(free) => {
                columns[free].push(i);
                slots[i].column = free;
            }
            None => {
                // First column with the fewest conflicts
                let mut best = 0;
                for (column, &count) in conflicts.iter().enumerate() {
                    if count < conflicts[best] {
                        best = column;
                    }
                }
                columns[best].push(i);
                slots[i].column = best;
                slots[i].is_overlapping = true;
            }
        }
    }

    let used = columns.iter().filter(|column| !column.is_empty()).count().max(1);
    for slot in slots.iter_mut() {
        slot.total_columns = used;
    }
}

fn pair_containments(spans: &[Span], order: &[usize], slots: &mut [OverlapSlot]) {
    let mut grouped = vec![false; spans.len()];

    for (position, &i) in order.iter().enumerate() {
        if grouped[i] {
            continue;
        }
        grouped[i] = true;
        let mut group = vec![i];

        for &j in &order[position + 1..] {
            if grouped[j] || !spans[i].overlaps(&spans[j]) {
                continue;
            }
            if spans[i].contains(&spans[j]) || spans[j].contains(&spans[i]) {
                group.push(j);
                grouped[j] = true;
                if group.len() >= WEEK_VIEW_MAX_COLUMNS {
                    break;
                }
            }
        }

        if group.len() > 1 {
            // `order` is sorted, so the group already is
            for (column, &member) in group.iter().enumerate() {
                slots[member].column = column;
                slots[member].total_columns = group.len();
            }
        }
    }

    for &i in order {
        if slots[i].total_columns != 1 {
            continue;
        }
        for &j in order {
            if i == j || !spans[i].overlaps(&spans[j]) {
                continue;
            }
            if !spans[i].contains(&spans[j]) && !spans[j].contains(&spans[i]) {
                slots[i].is_overlapping = true;
                slots[j].is_overlapping = true;
            }
        }
    }
}
