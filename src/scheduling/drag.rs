// Event Move Controller
//
// Turns the pointer position of a move session into a proposed interval.
// - Day view: vertical delta changes the time, the day stays fixed
// - Week view: the column under the pointer changes the day as well
// - Day header: dropping on a header cell keeps the time of day

use std::time::{Duration, Instant};

use chrono::{NaiveDate, TimeDelta};

use super::callbacks::SchedulerCallbacks;
use super::error::{SchedulingError, SchedulingResult};
use super::geometry::{date_at, minutes_between, GridGeometry, MINUTES_PER_DAY};
use super::gesture::{GestureController, Interval};
use super::session::DragSession;
use crate::models::event::Event;
use crate::models::view::{ViewMode, ViewState};
use crate::utils::date::{minutes_of_day, start_of_day};

/// Remembers the last press so a quick second press can be told apart.
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last: Option<(String, Instant)>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press on `key`; returns true when it completes a double press.
    ///
    /// A double press consumes the pending press, so a third press starts over.
    pub fn register(&mut self, key: &str, at: Instant, window: Duration) -> bool {
        let is_double = matches!(
            &self.last,
            Some((last_key, last_at)) if last_key == key
                && at.checked_duration_since(*last_at).is_some_and(|gap| gap <= window)
        );

        if is_double {
            self.last = None;
        } else {
            self.last = Some((key.to_string(), at));
        }
        is_double
    }

    /// Forget the pending press, e.g. once it turned into a drag.
    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// Interval of `event` moved onto `date`, keeping its time of day and duration.
pub fn drop_on_day(event: &Event, date: NaiveDate) -> SchedulingResult<Interval> {
    let start = date.and_time(event.start.time());
    let end = start
        .checked_add_signed(event.duration())
        .ok_or(SchedulingError::TimeOverflow)?;
    Ok((start, end))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DragController;

impl DragController {
    fn day_delta(session: &DragSession, view: &ViewState, grid: &GridGeometry) -> SchedulingResult<i64> {
        match grid.view_mode {
            ViewMode::Day => Ok(0),
            ViewMode::Week => {
                let date = date_at(session.last_pointer.x, view, grid)?;
                Ok((date - session.anchor_date).num_days())
            }
        }
    }
}

impl GestureController for DragController {
    fn candidate(
        &self,
        session: &DragSession,
        view: &ViewState,
        grid: &GridGeometry,
    ) -> SchedulingResult<Interval> {
        let original = &session.original_event;
        let duration = original.duration();

        if grid.view_mode == ViewMode::Week {
            if let Some(date) = session.last_header_date {
                return drop_on_day(original, date);
            }
        }

        let minute_delta = minutes_between(session.pointer_origin.y, session.last_pointer.y, grid.height);
        let day_delta = Self::day_delta(session, view, grid)?;

        let start = if original.spans_multiple_days() {
            original
                .start
                .checked_add_signed(TimeDelta::try_days(day_delta).ok_or(SchedulingError::TimeOverflow)?)
                .and_then(|start| start.checked_add_signed(TimeDelta::try_minutes(minute_delta)?))
                .ok_or(SchedulingError::TimeOverflow)?
        } else {
            // Single-day events stay inside their target day.
            let target_day = original
                .start
                .date()
                .checked_add_signed(TimeDelta::try_days(day_delta).ok_or(SchedulingError::TimeOverflow)?)
                .ok_or(SchedulingError::TimeOverflow)?;
            let latest_start = (i64::from(MINUTES_PER_DAY) - duration.num_minutes()).max(0);
            let minute = (minutes_of_day(original.start.time()) + minute_delta).clamp(0, latest_start);
            start_of_day(target_day)
                .checked_add_signed(TimeDelta::try_minutes(minute).ok_or(SchedulingError::TimeOverflow)?)
                .ok_or(SchedulingError::TimeOverflow)?
        };

        let end = start
            .checked_add_signed(duration)
            .ok_or(SchedulingError::TimeOverflow)?;
        Ok((start, end))
    }

    fn emit(&self, callbacks: &mut dyn SchedulerCallbacks, interval: Interval, is_final: bool) {
        callbacks.on_move(interval.0, interval.1, is_final);
    }
}
