// Date utility functions
// Monday-based week windows and day boundaries for the time grid

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Number of columns in the week grid.
pub const DAYS_PER_WEEK: usize = 7;

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Position of `date` in a Monday-first week (0 = Monday .. 6 = Sunday).
pub fn monday_based_day_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(monday_based_day_index(date) as u64))
}

/// First date of the visible window: Monday of `current_date`'s week shifted
/// by `scroll_offset` days.
pub fn scrollable_window_start(current_date: NaiveDate, scroll_offset: i32) -> Option<NaiveDate> {
    let monday = week_start(current_date)?;
    shift_days(monday, i64::from(scroll_offset))
}

/// Dates shown by the scrollable week view.
///
/// Normally seven dates; fewer come back when the window runs into the edge of
/// the representable calendar, and callers must treat that as an incomplete
/// window.
pub fn scrollable_week_dates(current_date: NaiveDate, scroll_offset: i32) -> Vec<NaiveDate> {
    let Some(first) = scrollable_window_start(current_date, scroll_offset) else {
        return Vec::new();
    };

    (0..DAYS_PER_WEEK as u64)
        .map_while(|offset| first.checked_add_days(Days::new(offset)))
        .collect()
}

/// Add a signed number of days, `None` on calendar overflow.
pub fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// Minutes elapsed since midnight.
pub fn minutes_of_day(time: NaiveTime) -> i64 {
    (time - NaiveTime::MIN).num_minutes()
}

/// Round a datetime to the nearest multiple of `step_minutes`, dropping seconds.
pub fn snap_to_minutes(value: NaiveDateTime, step_minutes: u32) -> Option<NaiveDateTime> {
    let step = i64::from(step_minutes.max(1));
    let minutes = minutes_of_day(value.time());
    let snapped = ((minutes as f64 / step as f64).round() as i64) * step;
    start_of_day(value.date()).checked_add_signed(TimeDelta::try_minutes(snapped)?)
}
