// Test fixtures - reusable test data
// Provides consistent events, views and pointer samples across test files
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday 3 March 2025, the first column of an unscrolled week
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    /// `days` after Monday at `hour:minute`
    pub fn week_at(days: u64, hour: u32, minute: u32) -> NaiveDateTime {
        (monday() + chrono::Days::new(days))
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    /// Monday at `hour:minute`
    pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
        week_at(0, hour, minute)
    }
}

/// Sample events for testing
pub mod events {
    use super::dates::{at, week_at};
    use staffing_calendar::models::event::Event;

    /// Monday 09:00-10:00
    pub fn ward_round() -> Event {
        Event::new("ward-round", "Ward Round", at(9, 0), at(10, 0)).unwrap()
    }

    /// Monday 14:00-15:00
    pub fn interview() -> Event {
        Event::builder()
            .id("interview")
            .title("Candidate Interview")
            .start(at(14, 0))
            .end(at(15, 0))
            .color("#3B82F6")
            .location("Room 2")
            .build()
            .unwrap()
    }

    /// Monday 20:00 to Wednesday 06:00
    pub fn night_cover() -> Event {
        Event::new("night-cover", "Night Cover", at(20, 0), week_at(2, 6, 0)).unwrap()
    }
}

/// Views and grids for testing
pub mod views {
    use super::dates::monday;
    use staffing_calendar::models::view::{ViewMode, ViewState};
    use staffing_calendar::scheduling::GridGeometry;

    pub const GRID_WIDTH: f64 = 700.0;
    pub const GRID_HEIGHT: f64 = 1200.0;

    pub fn week() -> ViewState {
        ViewState::new(ViewMode::Week, monday())
    }

    pub fn day() -> ViewState {
        ViewState::new(ViewMode::Day, monday())
    }

    pub fn grid(view: &ViewState) -> Option<GridGeometry> {
        GridGeometry::new(GRID_WIDTH, GRID_HEIGHT, view.view_mode).ok()
    }
}

/// Pointer samples relative to a fixed start instant
pub mod pointers {
    use std::time::{Duration, Instant};

    use staffing_calendar::scheduling::{Point, PointerEvent};

    pub fn at(t0: Instant, ms: u64, x: f64, y: f64) -> PointerEvent {
        PointerEvent::primary(Point::new(x, y), t0 + Duration::from_millis(ms))
    }
}
