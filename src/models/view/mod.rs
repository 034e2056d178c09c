// View state module
// Which days the time grid shows and how the week window is scrolled

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::date::{scrollable_week_dates, shift_days};

/// Rendering mode of the time grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One full-width column for `current_date`.
    Day,
    /// Seven columns for the scrolled week window.
    #[default]
    Week,
}

/// Direction of a week-window scroll; serialized as `-1` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum ScrollDirection {
    Backward,
    Forward,
}

impl ScrollDirection {
    pub fn delta(self) -> i32 {
        match self {
            ScrollDirection::Backward => -1,
            ScrollDirection::Forward => 1,
        }
    }
}

impl From<ScrollDirection> for i8 {
    fn from(direction: ScrollDirection) -> Self {
        direction.delta() as i8
    }
}

impl TryFrom<i8> for ScrollDirection {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(ScrollDirection::Backward),
            1 => Ok(ScrollDirection::Forward),
            other => Err(format!("scroll direction must be -1 or 1, got {}", other)),
        }
    }
}

/// Host-owned view state handed to the engine on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub view_mode: ViewMode,
    /// Day shift applied to the Monday-first week window
    #[serde(default)]
    pub week_scroll_offset: i32,
    pub current_date: NaiveDate,
}

impl ViewState {
    pub fn new(view_mode: ViewMode, current_date: NaiveDate) -> Self {
        Self {
            view_mode,
            week_scroll_offset: 0,
            current_date,
        }
    }

    /// Dates backing the grid columns, left to right.
    ///
    /// Day view always yields exactly `current_date`; week view yields the
    /// scrolled window, which is shorter than seven only at calendar limits.
    pub fn visible_dates(&self) -> Vec<NaiveDate> {
        match self.view_mode {
            ViewMode::Day => vec![self.current_date],
            ViewMode::Week => scrollable_week_dates(self.current_date, self.week_scroll_offset),
        }
    }

    /// Apply an `on_week_scroll` request the way the calendar page does.
    ///
    /// Auto-scroll nudges the window by a day within `±max_offset`; a manual
    /// scroll jumps a whole week and recentres the window.
    pub fn apply_week_scroll(&mut self, direction: ScrollDirection, is_auto_scroll: bool, max_offset: i32) {
        if is_auto_scroll {
            self.week_scroll_offset =
                (self.week_scroll_offset + direction.delta()).clamp(-max_offset, max_offset);
            return;
        }

        match shift_days(self.current_date, i64::from(direction.delta()) * 7) {
            Some(date) => {
                self.current_date = date;
                self.week_scroll_offset = 0;
            }
            None => log::warn!("Week scroll from {} leaves the calendar range", self.current_date),
        }
    }
}
