// Event Resize Controller
//
// Resizing by dragging the top or bottom band of an event block.
// - Top band: adjusts the start
// - Bottom band: adjusts the end
// Multi-day events only expose the band that belongs to the visible segment.

use super::callbacks::SchedulerCallbacks;
use super::error::{SchedulingError, SchedulingResult};
use super::geometry::{date_at, pixel_to_time, GridGeometry, PixelBox};
use super::gesture::{GestureController, Interval};
use super::session::{DragSession, SessionKind};
use crate::models::view::{ViewMode, ViewState};

/// Height of a resize band for regular sized blocks
pub const HANDLE_BAND_PX: f64 = 20.0;
/// Blocks shorter than this are split into a top and a bottom half instead
pub const SMALL_BLOCK_PX: f64 = 50.0;

/// Which edge of the event is being resized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    /// Top edge - adjusts start time
    Start,
    /// Bottom edge - adjusts end time
    End,
}

impl ResizeEdge {
    pub fn session_kind(self) -> SessionKind {
        match self {
            ResizeEdge::Start => SessionKind::ResizeStart,
            ResizeEdge::End => SessionKind::ResizeEnd,
        }
    }
}

/// Handles a rendered segment exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct HandleSet {
    pub top: bool,
    pub bottom: bool,
}

impl HandleSet {
    pub const BOTH: HandleSet = HandleSet {
        top: true,
        bottom: true,
    };
    pub const NONE: HandleSet = HandleSet {
        top: false,
        bottom: false,
    };
}

/// Vertical pixel range `[top, bottom)` of one resize band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub top: f64,
    pub bottom: f64,
}

impl Band {
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom
    }
}

/// Hit zones of the resize bands of one block.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandleZones {
    pub top: Option<Band>,
    pub bottom: Option<Band>,
}

impl HandleZones {
    /// Bands for a block, limited to the handles its segment shows.
    pub fn for_box(block: &PixelBox, handles: HandleSet) -> Self {
        // Small blocks are split into top and bottom halves
        let band = if block.height < SMALL_BLOCK_PX {
            block.height / 2.0
        } else {
            HANDLE_BAND_PX
        };

        Self {
            top: handles.top.then(|| Band {
                top: block.top,
                bottom: block.top + band,
            }),
            bottom: handles.bottom.then(|| Band {
                top: block.bottom() - band,
                bottom: block.bottom(),
            }),
        }
    }

    /// Edge grabbed by a press at `y`, if any. The top band wins on overlap.
    pub fn hit_test(&self, y: f64) -> Option<ResizeEdge> {
        if self.top.is_some_and(|band| band.contains(y)) {
            Some(ResizeEdge::Start)
        } else if self.bottom.is_some_and(|band| band.contains(y) || y == band.bottom) {
            Some(ResizeEdge::End)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResizeController;

impl GestureController for ResizeController {
    fn candidate(
        &self,
        session: &DragSession,
        view: &ViewState,
        grid: &GridGeometry,
    ) -> SchedulingResult<Interval> {
        debug_assert!(session.kind.is_resize());
        let original = &session.original_event;
        let time = pixel_to_time(session.last_pointer.y, grid.height);
        let start_edge = session.kind == SessionKind::ResizeStart;

        let date = match grid.view_mode {
            ViewMode::Day if start_edge => original.start.date(),
            ViewMode::Day => original.last_day(),
            ViewMode::Week => date_at(session.last_pointer.x, view, grid)?,
        };
        let edge = time.on_date(date).ok_or(SchedulingError::TimeOverflow)?;

        let (start, end) = if start_edge {
            (edge, original.end)
        } else {
            (original.start, edge)
        };
        if start >= end {
            return Err(SchedulingError::DegenerateInterval { start, end });
        }
        Ok((start, end))
    }

    fn emit(&self, callbacks: &mut dyn SchedulerCallbacks, interval: Interval, is_final: bool) {
        callbacks.on_resize(interval.0, interval.1, is_final);
    }
}
