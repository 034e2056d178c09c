// Multi-day segment rendering.
//
// An event is split into one segment per calendar day it touches. Only the
// days the grid currently shows produce segments.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::geometry::{time_to_box, PixelBox, TimeOfDay};
use super::layout::{layout_day, OverlapSlot};
use super::resize::HandleSet;
use crate::models::event::Event;
use crate::models::view::{ViewMode, ViewState};

/// The slice of one event drawn in one day column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment<'a> {
    #[serde(skip)]
    pub event: &'a Event,
    /// Column within the visible window (0 in day view)
    pub day_offset: usize,
    pub date: NaiveDate,
    pub is_first_day: bool,
    pub is_last_day: bool,
    pub visible_start: TimeOfDay,
    pub visible_end: TimeOfDay,
}

impl<'a> Segment<'a> {
    pub fn event_id(&self) -> &'a str {
        &self.event.id
    }

    /// Only the first day can move the start, only the last day the end.
    pub fn handles(&self) -> HandleSet {
        HandleSet {
            top: self.is_first_day,
            bottom: self.is_last_day,
        }
    }

    pub fn pixel_box(&self, view_mode: ViewMode) -> PixelBox {
        time_to_box(self.visible_start, self.visible_end, self.day_offset, view_mode)
    }

    /// The absolute instants this segment covers.
    pub fn visible_interval(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((
            self.visible_start.on_date(self.date)?,
            self.visible_end.on_date(self.date)?,
        ))
    }
}

/// A segment with its overlap placement and final box, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderedSegment<'a> {
    pub event_id: &'a str,
    #[serde(flatten)]
    pub segment: Segment<'a>,
    pub handles: HandleSet,
    pub slot: OverlapSlot,
    pub pixel_box: PixelBox,
}

/// Segments of `event` on the days `view` shows, left to right.
pub fn segments_for_event<'a>(event: &'a Event, view: &ViewState) -> Vec<Segment<'a>> {
    if event.start >= event.end {
        log::debug!("Event {} has an empty interval, nothing to render", event.id);
        return Vec::new();
    }

    let first_day = event.start.date();
    let last_day = event.last_day();

    view.visible_dates()
        .into_iter()
        .enumerate()
        .filter(|(_, date)| (first_day..=last_day).contains(date))
        .map(|(day_offset, date)| {
            let is_first_day = date == first_day;
            let is_last_day = date == last_day;

            let visible_start = if is_first_day {
                TimeOfDay::from_time(event.start.time())
            } else {
                TimeOfDay::MIDNIGHT
            };
            // An end at midnight belongs to the previous day and runs to 24:00
            let visible_end = if is_last_day && event.end.date() == date {
                TimeOfDay::from_time(event.end.time())
            } else {
                TimeOfDay::END_OF_DAY
            };

            Segment {
                event,
                day_offset,
                date,
                is_first_day,
                is_last_day,
                visible_start,
                visible_end,
            }
        })
        .collect()
}

/// Segments of all events, grouped by visible day column.
pub fn segments_by_day<'a>(events: &'a [Event], view: &ViewState) -> BTreeMap<usize, Vec<Segment<'a>>> {
    let mut days: BTreeMap<usize, Vec<Segment<'a>>> = BTreeMap::new();
    for event in events {
        for segment in segments_for_event(event, view) {
            days.entry(segment.day_offset).or_default().push(segment);
        }
    }
    days
}

/// Everything the grid draws for `events`: segments, handles and laid-out boxes.
pub fn render_events<'a>(events: &'a [Event], view: &ViewState) -> Vec<RenderedSegment<'a>> {
    let view_mode = view.view_mode;
    segments_by_day(events, view)
        .into_values()
        .flat_map(|day| {
            let slots = layout_day(&day, view_mode);
            day.into_iter().zip(slots).map(move |(segment, slot)| RenderedSegment {
                event_id: segment.event_id(),
                segment,
                handles: segment.handles(),
                slot,
                pixel_box: segment
                    .pixel_box(view_mode)
                    .subdivide(slot.column, slot.total_columns),
            })
        })
        .collect()
}
