// Drag-to-create on empty grid space.
//
// The session's "original event" is the draft: the press time snapped to the
// creation step, lasting the default event length. Dragging stretches it
// between the anchor and the pointer, within the anchor's day.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use super::callbacks::SchedulerCallbacks;
use super::error::{SchedulingError, SchedulingResult};
use super::geometry::{pixel_to_time, GridGeometry};
use super::gesture::{GestureController, Interval};
use super::session::DragSession;
use crate::models::event::Event;
use crate::models::settings::SchedulerSettings;
use crate::models::view::ViewState;
use crate::utils::date::{snap_to_minutes, start_of_day};

pub const DRAFT_ID: &str = "draft";
pub const DRAFT_TITLE: &str = "New Event";

#[derive(Debug, Clone, Copy)]
pub struct CreationController {
    snap_minutes: u32,
    default_minutes: u32,
}

impl CreationController {
    pub fn new(snap_minutes: u32, default_minutes: u32) -> Self {
        Self {
            snap_minutes: snap_minutes.max(1),
            default_minutes: default_minutes.max(1),
        }
    }

    pub fn from_settings(settings: &SchedulerSettings) -> Self {
        Self::new(settings.creation_snap_minutes, settings.default_event_minutes)
    }

    /// Draft event anchored at the slot time under `y` on `date`.
    ///
    /// The draft never leaves `date`: presses near midnight anchor at the last
    /// slot of the day and the draft is cut at 24:00.
    pub fn draft(&self, date: NaiveDate, y: f64, grid: &GridGeometry) -> SchedulingResult<Event> {
        let day_end = Self::day_end(date)?;
        let latest_anchor = day_end
            .checked_sub_signed(self.minutes(self.snap_minutes)?)
            .ok_or(SchedulingError::TimeOverflow)?;

        let pressed = pixel_to_time(y, grid.height)
            .on_date(date)
            .ok_or(SchedulingError::TimeOverflow)?;
        let anchor = snap_to_minutes(pressed, self.snap_minutes)
            .ok_or(SchedulingError::TimeOverflow)?
            .min(latest_anchor);
        let end = anchor
            .checked_add_signed(self.minutes(self.default_minutes)?)
            .ok_or(SchedulingError::TimeOverflow)?
            .min(day_end);

        Event::new(DRAFT_ID, DRAFT_TITLE, anchor, end)
            .map_err(|_| SchedulingError::DegenerateInterval { start: anchor, end })
    }

    /// Midnight closing `date`.
    fn day_end(date: NaiveDate) -> SchedulingResult<NaiveDateTime> {
        start_of_day(date)
            .checked_add_signed(TimeDelta::days(1))
            .ok_or(SchedulingError::TimeOverflow)
    }

    fn minutes(&self, minutes: u32) -> SchedulingResult<TimeDelta> {
        TimeDelta::try_minutes(i64::from(minutes)).ok_or(SchedulingError::TimeOverflow)
    }

    fn stretch(&self, anchor: NaiveDateTime, pointer: NaiveDateTime) -> SchedulingResult<Interval> {
        let minimum = self.minutes(self.snap_minutes)?;
        if pointer < anchor {
            return Ok((pointer, anchor));
        }
        let end = anchor
            .checked_add_signed(minimum)
            .ok_or(SchedulingError::TimeOverflow)?
            .max(pointer);
        Ok((anchor, end))
    }
}

impl Default for CreationController {
    fn default() -> Self {
        Self::from_settings(&SchedulerSettings::default())
    }
}

impl GestureController for CreationController {
    fn candidate(
        &self,
        session: &DragSession,
        _view: &ViewState,
        grid: &GridGeometry,
    ) -> SchedulingResult<Interval> {
        let anchor = session.original_event.start;
        let pointer = pixel_to_time(session.last_pointer.y, grid.height)
            .on_date(session.anchor_date)
            .and_then(|time| snap_to_minutes(time, self.snap_minutes))
            .ok_or(SchedulingError::TimeOverflow)?
            .min(Self::day_end(session.anchor_date)?);
        self.stretch(anchor, pointer)
    }

    fn emit(&self, callbacks: &mut dyn SchedulerCallbacks, interval: Interval, is_final: bool) {
        callbacks.on_create(interval.0, interval.1, is_final);
    }
}
