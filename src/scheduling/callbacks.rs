// Callback contract between the engine and the host view.
//
// The engine never persists anything: previews (`is_final == false`) are live
// feedback only, finals are what the host may store once
// `on_change_complete` arrives.

use std::time::Instant;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::geometry::Point;
use crate::models::view::ScrollDirection;

/// Mouse button that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// One pointer sample as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Position relative to the grid's top-left corner
    pub position: Point,
    pub button: PointerButton,
    pub timestamp: Instant,
    /// Set when the pointer is over a day header cell of the week view
    pub header_date: Option<NaiveDate>,
}

impl PointerEvent {
    pub fn primary(position: Point, timestamp: Instant) -> Self {
        Self {
            position,
            button: PointerButton::Primary,
            timestamp,
            header_date: None,
        }
    }

    pub fn over_header(mut self, date: NaiveDate) -> Self {
        self.header_date = Some(date);
        self
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait SchedulerCallbacks {
    fn on_move(&mut self, new_start: NaiveDateTime, new_end: NaiveDateTime, is_final: bool);

    fn on_resize(&mut self, new_start: NaiveDateTime, new_end: NaiveDateTime, is_final: bool);

    fn on_click(&mut self, pointer: &PointerEvent);

    /// Fired once after the final move/resize/create of a gesture.
    fn on_change_complete(&mut self);

    /// Ask the host to shift its visible week window.
    fn on_week_scroll(&mut self, direction: ScrollDirection, is_auto_scroll: bool);

    /// Draft interval for a new event dragged out on empty grid space.
    fn on_create(&mut self, _new_start: NaiveDateTime, _new_end: NaiveDateTime, _is_final: bool) {}

    /// Secondary-button press on an event, for the host's context menu.
    fn on_right_click(&mut self, _pointer: &PointerEvent) {}

    /// Ask the host to scroll its grid container vertically by `delta_px`.
    fn on_grid_scroll(&mut self, _delta_px: f64) {}
}

/// A recorded callback invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum SchedulerCall {
    Move {
        start: NaiveDateTime,
        end: NaiveDateTime,
        is_final: bool,
    },
    Resize {
        start: NaiveDateTime,
        end: NaiveDateTime,
        is_final: bool,
    },
    Click {
        x: f64,
        y: f64,
    },
    ChangeComplete,
    WeekScroll {
        direction: ScrollDirection,
        is_auto_scroll: bool,
    },
    Create {
        start: NaiveDateTime,
        end: NaiveDateTime,
        is_final: bool,
    },
    RightClick {
        x: f64,
        y: f64,
    },
    GridScroll {
        delta_px: f64,
    },
}

/// Callbacks implementation that just remembers every call in order.
#[derive(Debug, Default)]
pub struct RecordingCallbacks {
    pub calls: Vec<SchedulerCall>,
}

impl RecordingCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the calls recorded so far.
    pub fn take(&mut self) -> Vec<SchedulerCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn count(&self, predicate: impl Fn(&SchedulerCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl SchedulerCallbacks for RecordingCallbacks {
    fn on_move(&mut self, new_start: NaiveDateTime, new_end: NaiveDateTime, is_final: bool) {
        self.calls.push(SchedulerCall::Move {
            start: new_start,
            end: new_end,
            is_final,
        });
    }

    fn on_resize(&mut self, new_start: NaiveDateTime, new_end: NaiveDateTime, is_final: bool) {
        self.calls.push(SchedulerCall::Resize {
            start: new_start,
            end: new_end,
            is_final,
        });
    }

    fn on_click(&mut self, pointer: &PointerEvent) {
        self.calls.push(SchedulerCall::Click {
            x: pointer.position.x,
            y: pointer.position.y,
        });
    }

    fn on_change_complete(&mut self) {
        self.calls.push(SchedulerCall::ChangeComplete);
    }

    fn on_week_scroll(&mut self, direction: ScrollDirection, is_auto_scroll: bool) {
        self.calls.push(SchedulerCall::WeekScroll {
            direction,
            is_auto_scroll,
        });
    }

    fn on_create(&mut self, new_start: NaiveDateTime, new_end: NaiveDateTime, is_final: bool) {
        self.calls.push(SchedulerCall::Create {
            start: new_start,
            end: new_end,
            is_final,
        });
    }

    fn on_right_click(&mut self, pointer: &PointerEvent) {
        self.calls.push(SchedulerCall::RightClick {
            x: pointer.position.x,
            y: pointer.position.y,
        });
    }

    fn on_grid_scroll(&mut self, delta_px: f64) {
        self.calls.push(SchedulerCall::GridScroll { delta_px });
    }
}
