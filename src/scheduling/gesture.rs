// Shared preview/commit plumbing for the move, resize and create controllers.

use chrono::NaiveDateTime;

use super::callbacks::SchedulerCallbacks;
use super::error::{SchedulingError, SchedulingResult};
use super::geometry::GridGeometry;
use super::session::DragSession;
use crate::models::view::ViewState;

/// A proposed `(start, end)` pair.
pub type Interval = (NaiveDateTime, NaiveDateTime);

/// One kind of pointer gesture: how to turn the session's pointer state into a
/// candidate interval, and which callback publishes it.
pub trait GestureController {
    fn candidate(
        &self,
        session: &DragSession,
        view: &ViewState,
        grid: &GridGeometry,
    ) -> SchedulingResult<Interval>;

    fn emit(&self, callbacks: &mut dyn SchedulerCallbacks, interval: Interval, is_final: bool);
}

fn checked(interval: SchedulingResult<Interval>) -> SchedulingResult<Interval> {
    let (start, end) = interval?;
    if start >= end {
        return Err(SchedulingError::DegenerateInterval { start, end });
    }
    Ok((start, end))
}

/// Recompute the candidate and publish it as a preview when it differs from
/// what the host currently shows.
///
/// Failed candidates leave the previous preview in place.
pub fn refresh_preview(
    controller: &dyn GestureController,
    session: &mut DragSession,
    view: &ViewState,
    grid: &GridGeometry,
    callbacks: &mut dyn SchedulerCallbacks,
) {
    match checked(controller.candidate(session, view, grid)) {
        Ok(interval) => {
            let original = &session.original_event;
            let shown = session.preview.unwrap_or((original.start, original.end));
            if shown != interval {
                session.preview = Some(interval);
                controller.emit(callbacks, interval, false);
            }
        }
        Err(err @ SchedulingError::DegenerateInterval { .. }) => {
            log::debug!("Dropping {:?} candidate: {}", session.kind, err);
        }
        Err(err) => {
            log::warn!("Skipping {:?} pointer tick: {}", session.kind, err);
        }
    }
}

/// Interval to commit on release: the candidate under the release point, or
/// the last valid preview when that candidate is unusable.
pub fn final_interval(
    controller: &dyn GestureController,
    session: &DragSession,
    view: &ViewState,
    grid: &GridGeometry,
) -> Option<Interval> {
    match checked(controller.candidate(session, view, grid)) {
        Ok(interval) => Some(interval),
        Err(err) => {
            log::debug!(
                "Release candidate for {:?} rejected ({}), keeping last preview",
                session.kind,
                err
            );
            session.preview
        }
    }
}
