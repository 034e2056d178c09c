// Settings module
// Tunable thresholds and timings of the scheduling engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsValidationError {
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("click threshold ({click}px) must not be below the drag threshold ({drag}px)")]
    ClickBelowDrag { drag: f32, click: f32 },
    #[error("creation snap of {0} minutes must divide an hour")]
    SnapNotDivisor(u32),
}

/// Engine configuration, persisted as TOML by `SettingsService`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// Movement (px) after which a press becomes a drag
    pub drag_threshold_px: f32,
    /// Net movement (px, per axis) below which a release counts as a click
    pub click_threshold_px: f32,
    pub double_click_window_ms: u64,
    /// Width of the auto-scroll band at each side of the week grid
    pub edge_zone_px: f32,
    pub auto_scroll_interval_ms: u64,
    pub max_week_scroll_offset: i32,
    /// Vertical auto-scroll near the top/bottom of the viewport
    pub grid_scroll_interval_ms: u64,
    pub grid_scroll_step_px: f32,
    pub creation_snap_minutes: u32,
    pub default_event_minutes: u32,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            drag_threshold_px: 3.0,
            click_threshold_px: 5.0,
            double_click_window_ms: 300,
            edge_zone_px: 50.0,
            auto_scroll_interval_ms: 500,
            max_week_scroll_offset: 7,
            grid_scroll_interval_ms: 50,
            grid_scroll_step_px: 10.0,
            creation_snap_minutes: 15,
            default_event_minutes: 60,
        }
    }
}

impl SchedulerSettings {
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        let positive: [(&'static str, bool); 8] = [
            ("drag_threshold_px", self.drag_threshold_px > 0.0),
            ("edge_zone_px", self.edge_zone_px > 0.0),
            ("auto_scroll_interval_ms", self.auto_scroll_interval_ms > 0),
            ("max_week_scroll_offset", self.max_week_scroll_offset > 0),
            ("grid_scroll_interval_ms", self.grid_scroll_interval_ms > 0),
            ("grid_scroll_step_px", self.grid_scroll_step_px > 0.0),
            ("creation_snap_minutes", self.creation_snap_minutes > 0),
            ("default_event_minutes", self.default_event_minutes > 0),
        ];
        if let Some(&(field, _)) = positive.iter().find(|(_, ok)| !ok) {
            return Err(SettingsValidationError::NotPositive { field });
        }

        if self.click_threshold_px < self.drag_threshold_px {
            return Err(SettingsValidationError::ClickBelowDrag {
                drag: self.drag_threshold_px,
                click: self.click_threshold_px,
            });
        }

        if 60 % self.creation_snap_minutes != 0 {
            return Err(SettingsValidationError::SnapNotDivisor(self.creation_snap_minutes));
        }

        Ok(())
    }
}
