// Event module
// Calendar event model as supplied by the persistence collaborator

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventValidationError {
    #[error("Event title cannot be empty")]
    EmptyTitle,
    #[error("Event title is required")]
    MissingTitle,
    #[error("Event start time is required")]
    MissingStart,
    #[error("Event end time is required")]
    MissingEnd,
    #[error("Event end time must be after start time")]
    EndNotAfterStart,
    #[error("Color must be in hex format (#RRGGBB or #RGB)")]
    InvalidColor,
}

/// A scheduled calendar entry (a shift, interview, onboarding slot, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub color: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub attendee_summary: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
}

impl Event {
    /// Create a new event with required fields
    ///
    /// # Examples
    /// ```
    /// use staffing_calendar::models::event::Event;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = Event::new("shift-1", "Night Shift", start, end).unwrap();
    /// assert_eq!(event.duration(), chrono::Duration::hours(1));
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EventValidationError> {
        let event = Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            color: None,
            notes: None,
            location: None,
            attendee_summary: None,
            is_recurring: false,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }

        validate_interval(self.start, self.end)?;

        if let Some(ref color) = self.color {
            if !is_valid_hex_color(color) {
                return Err(EventValidationError::InvalidColor);
            }
        }

        Ok(())
    }

    /// Get the duration of the event
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Calendar day the event is last visible on.
    ///
    /// An event ending exactly at midnight does not occupy the following day.
    pub fn last_day(&self) -> NaiveDate {
        let last = if self.end > self.start {
            self.end - TimeDelta::nanoseconds(1)
        } else {
            self.end
        };
        last.date()
    }

    /// Number of calendar days the event touches (at least 1).
    pub fn days_spanned(&self) -> i64 {
        (self.last_day() - self.start.date()).num_days() + 1
    }

    pub fn spans_multiple_days(&self) -> bool {
        self.days_spanned() > 1
    }

    /// Copy of this event with a new interval, rejecting degenerate ones.
    pub fn with_interval(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EventValidationError> {
        validate_interval(start, end)?;
        Ok(Self {
            start,
            end,
            ..self.clone()
        })
    }
}

/// Reject any interval where `start >= end`.
pub fn validate_interval(start: NaiveDateTime, end: NaiveDateTime) -> Result<(), EventValidationError> {
    if end <= start {
        return Err(EventValidationError::EndNotAfterStart);
    }
    Ok(())
}

fn is_valid_hex_color(color: &str) -> bool {
    let Some(hex) = color.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    id: Option<String>,
    title: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    color: Option<String>,
    notes: Option<String>,
    location: Option<String>,
    attendee_summary: Option<String>,
    is_recurring: bool,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the event color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Short "who is attending" line shown under the title
    pub fn attendee_summary(mut self, summary: impl Into<String>) -> Self {
        self.attendee_summary = Some(summary.into());
        self
    }

    pub fn recurring(mut self, is_recurring: bool) -> Self {
        self.is_recurring = is_recurring;
        self
    }

    /// Build the event
    pub fn build(self) -> Result<Event, EventValidationError> {
        let title = self.title.ok_or(EventValidationError::MissingTitle)?;
        let start = self.start.ok_or(EventValidationError::MissingStart)?;
        let end = self.end.ok_or(EventValidationError::MissingEnd)?;

        let event = Event {
            id: self.id.unwrap_or_default(),
            title,
            start,
            end,
            color: self.color,
            notes: self.notes,
            location: self.location,
            attendee_summary: self.attendee_summary,
            is_recurring: self.is_recurring,
        };

        event.validate()?;
        Ok(event)
    }
}
