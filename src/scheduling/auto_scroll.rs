// Edge-triggered auto-scroll.
//
// The driver is a repeating timer polled by the host with the current instant,
// the same "tick at now" shape as the sync scheduler: nothing runs in the
// background, so dropping the driver is all the teardown there is. It works on
// one axis: sessions run one for week paging (x against the grid width) and one
// for vertical grid scrolling (y against the host's viewport).

use std::time::{Duration, Instant};

use super::geometry::{edge_zone, EdgeZone};
use crate::models::settings::SchedulerSettings;
use crate::models::view::ScrollDirection;

/// What a pointer update did to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoScrollChange {
    Started(ScrollDirection),
    /// Direction switched: the old timer was torn down and a new one started.
    Restarted(ScrollDirection),
    Stopped,
    Unchanged,
}

#[derive(Debug, Clone, Copy)]
struct ActiveScroll {
    direction: ScrollDirection,
    next_due: Instant,
}

#[derive(Debug, Clone)]
pub struct AutoScrollDriver {
    interval: Duration,
    edge_px: f64,
    active: Option<ActiveScroll>,
}

impl AutoScrollDriver {
    pub fn new(interval: Duration, edge_px: f64) -> Self {
        Self {
            interval,
            edge_px,
            active: None,
        }
    }

    /// Week paging timer.
    pub fn from_settings(settings: &SchedulerSettings) -> Self {
        Self::new(
            Duration::from_millis(settings.auto_scroll_interval_ms),
            f64::from(settings.edge_zone_px),
        )
    }

    /// Vertical grid scrolling timer; shares the edge band width with paging.
    pub fn for_grid_scroll(settings: &SchedulerSettings) -> Self {
        Self::new(
            Duration::from_millis(settings.grid_scroll_interval_ms),
            f64::from(settings.edge_zone_px),
        )
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn direction(&self) -> Option<ScrollDirection> {
        self.active.map(|active| active.direction)
    }

    /// Re-evaluate a pointer coordinate against the bands at both ends of `extent`.
    ///
    /// The start band scrolls backward (left, up), the end band forward.
    pub fn update(&mut self, position: f64, extent: f64, now: Instant) -> AutoScrollChange {
        match edge_zone(position, extent, self.edge_px) {
            EdgeZone::Left => self.engage(ScrollDirection::Backward, now),
            EdgeZone::Right => self.engage(ScrollDirection::Forward, now),
            EdgeZone::Safe => {
                if self.stop() {
                    AutoScrollChange::Stopped
                } else {
                    AutoScrollChange::Unchanged
                }
            }
        }
    }

    /// Run in `direction`, keeping an already running timer for the same direction.
    pub fn engage(&mut self, direction: ScrollDirection, now: Instant) -> AutoScrollChange {
        let previous = self.active.map(|active| active.direction);
        if previous == Some(direction) {
            return AutoScrollChange::Unchanged;
        }

        self.active = Some(ActiveScroll {
            direction,
            next_due: now + self.interval,
        });

        match previous {
            None => AutoScrollChange::Started(direction),
            Some(_) => AutoScrollChange::Restarted(direction),
        }
    }

    /// Clear the timer. Returns whether one was running.
    pub fn stop(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Number of intervals that elapsed up to `now`; consumes them.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(active) = self.active.as_mut() else {
            return 0;
        };
        if now < active.next_due {
            return 0;
        }

        let overdue = now.duration_since(active.next_due);
        let ticks = (overdue.as_nanos() / self.interval.as_nanos().max(1)) as u32 + 1;
        active.next_due += self.interval * ticks;
        ticks
    }

    /// Time until the next tick, for hosts that sleep between frames.
    pub fn next_due_in(&self, now: Instant) -> Option<Duration> {
        self.active
            .map(|active| active.next_due.saturating_duration_since(now))
    }
}
