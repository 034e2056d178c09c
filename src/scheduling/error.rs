use chrono::NaiveDateTime;
use thiserror::Error;

/// Reasons a pointer tick or render pass is abandoned.
///
/// None of these ever escape a pointer handler; the engine logs them and keeps
/// its last valid state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulingError {
    #[error("scheduling grid is not mounted")]
    MissingGrid,

    #[error("grid geometry must be positive, got {width}x{height}")]
    InvalidGeometry { width: f64, height: f64 },

    #[error("day index {index} is outside the visible window of {available} dates")]
    DayOutOfRange { index: usize, available: usize },

    #[error("interval {start} .. {end} is empty or inverted")]
    DegenerateInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("date arithmetic left the supported calendar range")]
    TimeOverflow,
}

pub type SchedulingResult<T> = Result<T, SchedulingError>;
