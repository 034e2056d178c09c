use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::event::Event;
use crate::models::view::{ScrollDirection, ViewState};
use crate::scheduling::PointerButton;

/// A recorded interaction: starting view, events and the pointer steps to play.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub view: ViewState,
    /// Omit to replay against an unmounted grid
    #[serde(default)]
    pub grid: Option<ReplayGrid>,
    #[serde(default)]
    pub events: Vec<Event>,
    pub steps: Vec<ReplayStep>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReplayGrid {
    pub width: f64,
    pub height: f64,
    /// Height of the scroll container when it shows only part of the grid
    #[serde(default)]
    pub viewport_height: Option<f64>,
}

/// Part of an event a `down` step presses on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepTarget {
    #[default]
    Body,
    Start,
    End,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum ReplayStep {
    /// Press on an event, or on empty grid space when `event` is absent
    Down {
        at_ms: u64,
        x: f64,
        y: f64,
        #[serde(default)]
        event: Option<String>,
        #[serde(default)]
        target: StepTarget,
        #[serde(default)]
        button: PointerButton,
    },
    Move {
        at_ms: u64,
        x: f64,
        y: f64,
        #[serde(default)]
        header_date: Option<NaiveDate>,
    },
    Up {
        at_ms: u64,
        x: f64,
        y: f64,
        #[serde(default)]
        header_date: Option<NaiveDate>,
    },
    Cancel,
    Tick {
        at_ms: u64,
    },
    Scroll {
        direction: ScrollDirection,
    },
    Unmount,
    Mount {
        width: f64,
        height: f64,
    },
    Render,
}
