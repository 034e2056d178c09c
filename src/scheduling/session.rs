// Drag session state and pointer capture.
//
// A session exists from pointer-down to pointer-up/cancel. It owns the pointer
// capture guard and the auto-scroll timers, so ending the session in any way
// (release, cancel, teardown, dropping the engine) releases all of them.

use std::fmt;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};

use super::auto_scroll::AutoScrollDriver;
use super::geometry::Point;
use crate::models::event::Event;
use crate::models::settings::SchedulerSettings;

/// Attaches and detaches the host's global pointer-move/up listeners.
pub trait CaptureHost {
    fn attach_pointer_listeners(&self);
    fn detach_pointer_listeners(&self);
}

/// Host that has nothing to attach (headless replays, tests).
#[derive(Debug, Default)]
pub struct NoopCaptureHost;

impl CaptureHost for NoopCaptureHost {
    fn attach_pointer_listeners(&self) {}
    fn detach_pointer_listeners(&self) {}
}

/// Listeners stay attached exactly as long as this guard lives.
pub struct CaptureGuard {
    host: Rc<dyn CaptureHost>,
}

impl CaptureGuard {
    pub fn acquire(host: Rc<dyn CaptureHost>) -> Self {
        host.attach_pointer_listeners();
        Self { host }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.host.detach_pointer_listeners();
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CaptureGuard")
    }
}

/// Which gesture a session performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Move,
    ResizeStart,
    ResizeEnd,
    /// Dragging out a new event on empty grid space
    Create,
}

impl SessionKind {
    pub fn is_resize(self) -> bool {
        matches!(self, SessionKind::ResizeStart | SessionKind::ResizeEnd)
    }
}

/// Ephemeral state of one press-drag-release gesture.
#[derive(Debug)]
pub struct DragSession {
    pub kind: SessionKind,
    pub original_event: Event,
    pub pointer_origin: Point,
    /// Date of the column under the pointer at press time
    pub anchor_date: NaiveDate,
    pub has_moved: bool,
    pub last_pointer: Point,
    pub last_header_date: Option<NaiveDate>,
    /// Last candidate that passed validation and was emitted
    pub preview: Option<(NaiveDateTime, NaiveDateTime)>,
    /// Week paging at the left/right grid edges
    pub auto_scroll: AutoScrollDriver,
    /// Vertical scrolling at the top/bottom of the host's viewport
    pub grid_scroll: AutoScrollDriver,
    _capture: CaptureGuard,
}

impl DragSession {
    pub fn begin(
        kind: SessionKind,
        original_event: Event,
        pointer_origin: Point,
        anchor_date: NaiveDate,
        settings: &SchedulerSettings,
        capture_host: Rc<dyn CaptureHost>,
    ) -> Self {
        log::debug!(
            "Begin {:?} session for event {} at ({:.1}, {:.1})",
            kind,
            original_event.id,
            pointer_origin.x,
            pointer_origin.y
        );
        Self {
            kind,
            original_event,
            pointer_origin,
            anchor_date,
            has_moved: false,
            last_pointer: pointer_origin,
            last_header_date: None,
            preview: None,
            auto_scroll: AutoScrollDriver::from_settings(settings),
            grid_scroll: AutoScrollDriver::for_grid_scroll(settings),
            _capture: CaptureGuard::acquire(capture_host),
        }
    }

    /// Record a pointer sample; flips to dragging once past `threshold_px`.
    ///
    /// Returns true on the sample that starts the drag.
    pub fn track(&mut self, position: Point, header_date: Option<NaiveDate>, threshold_px: f64) -> bool {
        self.last_pointer = position;
        self.last_header_date = header_date;
        if !self.has_moved && position.distance_to(self.pointer_origin) > threshold_px {
            self.has_moved = true;
            return true;
        }
        false
    }

    /// Net displacement from the press position.
    pub fn net_movement(&self, position: Point) -> (f64, f64) {
        (
            (position.x - self.pointer_origin.x).abs(),
            (position.y - self.pointer_origin.y).abs(),
        )
    }
}
