// Coordinate mapping between the time grid's pixels and calendar time.
//
// Vertical axis: 50px per hour starting at midnight. Horizontal axis: seven
// equal columns in week view, a single column in day view. Horizontal boxes
// are expressed in percent of the grid width so they survive resizes.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use super::error::{SchedulingError, SchedulingResult};
use crate::models::view::{ViewMode, ViewState};
use crate::utils::date::{start_of_day, DAYS_PER_WEEK};

pub const PIXELS_PER_HOUR: f64 = 50.0;
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A pointer position relative to the grid's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Size of the mounted scheduling grid, measured by the host at call time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub width: f64,
    pub height: f64,
    pub view_mode: ViewMode,
}

impl GridGeometry {
    pub fn new(width: f64, height: f64, view_mode: ViewMode) -> SchedulingResult<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(SchedulingError::InvalidGeometry { width, height });
        }
        Ok(Self {
            width,
            height,
            view_mode,
        })
    }

    pub fn column_count(&self) -> usize {
        match self.view_mode {
            ViewMode::Day => 1,
            ViewMode::Week => DAYS_PER_WEEK,
        }
    }

    pub fn column_width(&self) -> f64 {
        self.width / self.column_count() as f64
    }
}

/// The vertical slice of the grid the host's scroll container shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridViewport {
    /// Grid y at the top of the visible area
    pub scroll_top: f64,
    pub height: f64,
}

impl GridViewport {
    pub fn new(scroll_top: f64, height: f64) -> Self {
        Self { scroll_top, height }
    }

    /// Pointer y measured from the top of the visible area.
    pub fn relative_y(&self, y: f64) -> f64 {
        y - self.scroll_top
    }

    /// Scroll by `delta` px without leaving a grid `grid_height` tall.
    ///
    /// Returns the distance actually scrolled, 0 at either end.
    pub fn scroll_by(&mut self, delta: f64, grid_height: f64) -> f64 {
        let max_top = (grid_height - self.height).max(0.0);
        let target = (self.scroll_top + delta).clamp(0.0, max_top);
        let moved = target - self.scroll_top;
        self.scroll_top = target;
        moved
    }
}

/// Wall-clock time within a day, at minute resolution, up to and including 24:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        Self::from_minutes(hour.checked_mul(60)?.checked_add(minute)?)
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        u16::try_from(minutes)
            .ok()
            .filter(|m| *m <= MINUTES_PER_DAY)
            .map(TimeOfDay)
    }

    pub fn from_time(time: NaiveTime) -> Self {
        TimeOfDay((time.hour() * 60 + time.minute()) as u16)
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0) / 60
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0) % 60
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn as_hours(self) -> f64 {
        f64::from(self.0) / 60.0
    }

    /// The instant this time falls on for `date`; 24:00 rolls to the next midnight.
    pub fn on_date(self, date: NaiveDate) -> Option<NaiveDateTime> {
        start_of_day(date).checked_add_signed(TimeDelta::try_minutes(i64::from(self.0))?)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Placement of an event block: vertical values in pixels, horizontal in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelBox {
    pub top: f64,
    pub height: f64,
    pub left_percent: f64,
    pub width_percent: f64,
}

impl PixelBox {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Narrow the box to one of `total` side-by-side columns.
    pub fn subdivide(&self, column: usize, total: usize) -> PixelBox {
        let total = total.max(1);
        let sub_width = self.width_percent / total as f64;
        PixelBox {
            left_percent: self.left_percent + sub_width * column.min(total - 1) as f64,
            width_percent: sub_width,
            ..*self
        }
    }
}

/// Which auto-scroll band a pointer x falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeZone {
    Left,
    Right,
    Safe,
}

/// Time of day under a vertical pixel offset, floored to the minute.
pub fn pixel_to_time(y: f64, grid_height: f64) -> TimeOfDay {
    let y = y.clamp(0.0, grid_height.max(0.0));
    let minutes = (y * 60.0 / PIXELS_PER_HOUR).floor();
    let minutes = minutes.clamp(0.0, f64::from(MINUTES_PER_DAY - 1));
    TimeOfDay(minutes as u16)
}

/// Grid column under a horizontal pixel offset.
///
/// Positions left or right of the grid clamp to the first or last column.
pub fn pixel_to_day_index(x: f64, grid: &GridGeometry) -> usize {
    let columns = grid.column_count();
    if columns == 1 {
        return 0;
    }
    let index = (x / grid.column_width()).floor();
    index.clamp(0.0, (columns - 1) as f64) as usize
}

/// Calendar date of the column under a horizontal pixel offset.
///
/// Fails when the view's window is shorter than the grid's columns, which
/// happens only at the limits of the calendar.
pub fn date_at(x: f64, view: &ViewState, grid: &GridGeometry) -> SchedulingResult<NaiveDate> {
    let dates = view.visible_dates();
    let index = pixel_to_day_index(x, grid);
    if dates.len() < grid.column_count() {
        return Err(SchedulingError::DayOutOfRange {
            index,
            available: dates.len(),
        });
    }
    dates.get(index).copied().ok_or(SchedulingError::DayOutOfRange {
        index,
        available: dates.len(),
    })
}

/// Signed minutes between the times under two vertical offsets.
pub fn minutes_between(from_y: f64, to_y: f64, grid_height: f64) -> i64 {
    i64::from(pixel_to_time(to_y, grid_height).minutes())
        - i64::from(pixel_to_time(from_y, grid_height).minutes())
}

/// Box of an interval `[start, end]` drawn in the given column.
pub fn time_to_box(start: TimeOfDay, end: TimeOfDay, day_index: usize, view_mode: ViewMode) -> PixelBox {
    let top = start.as_hours() * PIXELS_PER_HOUR;
    let height = (end.as_hours() - start.as_hours()).max(0.0) * PIXELS_PER_HOUR;

    let (left_percent, width_percent) = match view_mode {
        ViewMode::Day => (0.0, 100.0),
        ViewMode::Week => {
            let column = 100.0 / DAYS_PER_WEEK as f64;
            (day_index as f64 * column, column)
        }
    };

    PixelBox {
        top,
        height,
        left_percent,
        width_percent,
    }
}

/// Classify a pointer x against the auto-scroll bands of a grid `width` wide.
///
/// Anything left of `edge_px` (including outside the grid) is `Left`, anything
/// right of `width - edge_px` is `Right`; the closed range in between is safe.
pub fn edge_zone(x: f64, width: f64, edge_px: f64) -> EdgeZone {
    if x < edge_px {
        EdgeZone::Left
    } else if x > width - edge_px {
        EdgeZone::Right
    } else {
        EdgeZone::Safe
    }
}
