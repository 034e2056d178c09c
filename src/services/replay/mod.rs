// Replay service
// Drives a SchedulerEngine from a recorded pointer script, acting as the host:
// applies week and grid scrolls to the view and committed changes to the event list.

mod script;

pub use script::{ReplayGrid, ReplayScript, ReplayStep, StepTarget};

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::json;

use crate::models::event::Event;
use crate::models::settings::SchedulerSettings;
use crate::models::view::ViewState;
use crate::scheduling::{
    render_events, EventTarget, GridGeometry, GridViewport, HostFrame, Point, PointerButton, PointerEvent,
    RecordingCallbacks, ResizeEdge, SchedulerCall, SchedulerEngine,
};

/// Host state while a script runs.
pub struct ReplayHost {
    engine: SchedulerEngine,
    view: ViewState,
    grid: Option<GridGeometry>,
    viewport: Option<GridViewport>,
    events: Vec<Event>,
    callbacks: RecordingCallbacks,
    started: Instant,
    active_event: Option<String>,
    created: usize,
}

impl ReplayHost {
    pub fn new(script: &ReplayScript, settings: SchedulerSettings) -> Result<Self> {
        let grid = script
            .grid
            .map(|grid| GridGeometry::new(grid.width, grid.height, script.view.view_mode))
            .transpose()
            .context("Invalid grid in replay script")?;

        for event in &script.events {
            event
                .validate()
                .with_context(|| format!("Invalid event {:?} in replay script", event.id))?;
        }

        Ok(Self {
            engine: SchedulerEngine::headless(settings),
            view: script.view.clone(),
            grid,
            viewport: script
                .grid
                .and_then(|grid| grid.viewport_height)
                .map(|height| GridViewport::new(0.0, height)),
            events: script.events.clone(),
            callbacks: RecordingCallbacks::new(),
            started: Instant::now(),
            active_event: None,
            created: 0,
        })
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Current scroll position of the grid container, if it scrolls.
    pub fn viewport(&self) -> Option<GridViewport> {
        self.viewport
    }

    fn at(&self, at_ms: u64) -> Instant {
        self.started + Duration::from_millis(at_ms)
    }

    fn pointer(&self, step_at: u64, x: f64, y: f64, header_date: Option<NaiveDate>) -> PointerEvent {
        let mut pointer = PointerEvent::primary(Point::new(x, y), self.at(step_at));
        pointer.header_date = header_date;
        pointer
    }

    /// Run one step and return the callback calls it produced.
    pub fn apply(&mut self, step: &ReplayStep) -> Result<Vec<SchedulerCall>> {
        let frame = HostFrame {
            view: &self.view,
            grid: self.grid,
            viewport: self.viewport,
        };
        match step {
            ReplayStep::Down {
                at_ms,
                x,
                y,
                event,
                target,
                button,
            } => {
                let mut pointer = self.pointer(*at_ms, *x, *y, None);
                pointer.button = *button;
                match event {
                    Some(id) => {
                        let event = self
                            .events
                            .iter()
                            .find(|candidate| &candidate.id == id)
                            .with_context(|| format!("Unknown event {:?} in down step", id))?;
                        let target = match target {
                            StepTarget::Body => EventTarget::Body,
                            StepTarget::Start => EventTarget::Handle(ResizeEdge::Start),
                            StepTarget::End => EventTarget::Handle(ResizeEdge::End),
                        };
                        self.engine
                            .pointer_down_on_event(event, target, &pointer, frame, &mut self.callbacks);
                        if pointer.button == PointerButton::Primary {
                            self.active_event = Some(id.clone());
                        }
                    }
                    None => {
                        self.engine
                            .pointer_down_on_slot(&pointer, frame, &mut self.callbacks);
                        self.active_event = None;
                    }
                }
            }
            ReplayStep::Move {
                at_ms,
                x,
                y,
                header_date,
            } => {
                let pointer = self.pointer(*at_ms, *x, *y, *header_date);
                self.engine.pointer_move(&pointer, frame, &mut self.callbacks);
            }
            ReplayStep::Up {
                at_ms,
                x,
                y,
                header_date,
            } => {
                let pointer = self.pointer(*at_ms, *x, *y, *header_date);
                self.engine.pointer_up(&pointer, frame, &mut self.callbacks);
            }
            ReplayStep::Cancel => self.engine.pointer_cancel(&mut self.callbacks),
            ReplayStep::Tick { at_ms } => {
                let now = self.at(*at_ms);
                self.engine.tick(now, frame, &mut self.callbacks);
            }
            ReplayStep::Scroll { direction } => {
                self.engine.request_week_scroll(*direction, &mut self.callbacks);
            }
            ReplayStep::Unmount => self.grid = None,
            ReplayStep::Mount { width, height } => {
                self.grid = Some(GridGeometry::new(*width, *height, self.view.view_mode)?);
            }
            ReplayStep::Render => {}
        }

        let calls = self.callbacks.take();
        for call in &calls {
            self.settle(call);
        }
        Ok(calls)
    }

    fn settle(&mut self, call: &SchedulerCall) {
        match *call {
            SchedulerCall::WeekScroll {
                direction,
                is_auto_scroll,
            } => {
                let max_offset = self.engine.settings().max_week_scroll_offset;
                self.view.apply_week_scroll(direction, is_auto_scroll, max_offset);
            }
            SchedulerCall::GridScroll { delta_px } => {
                if let (Some(viewport), Some(grid)) = (self.viewport.as_mut(), self.grid) {
                    viewport.scroll_by(delta_px, grid.height);
                }
            }
            SchedulerCall::Move {
                start,
                end,
                is_final: true,
            }
            | SchedulerCall::Resize {
                start,
                end,
                is_final: true,
            } => {
                let Some(id) = self.active_event.as_deref() else {
                    return;
                };
                if let Some(event) = self.events.iter_mut().find(|event| event.id == id) {
                    match event.with_interval(start, end) {
                        Ok(updated) => *event = updated,
                        Err(err) => log::warn!("Rejected change to event {}: {}", id, err),
                    }
                }
            }
            SchedulerCall::Create {
                start,
                end,
                is_final: true,
            } => {
                self.created += 1;
                match Event::new(format!("created-{}", self.created), "New Event", start, end) {
                    Ok(event) => self.events.push(event),
                    Err(err) => log::warn!("Rejected created event: {}", err),
                }
            }
            _ => {}
        }
    }
}

/// Run `script` and write one JSON line per callback call and render step.
pub fn run_script(script: &ReplayScript, settings: SchedulerSettings, out: &mut impl Write) -> Result<()> {
    let mut host = ReplayHost::new(script, settings)?;

    for (index, step) in script.steps.iter().enumerate() {
        let calls = host
            .apply(step)
            .with_context(|| format!("Replay step {} failed", index))?;
        for call in &calls {
            writeln!(out, "{}", json!({ "step": index, "call": call }))?;
        }

        if matches!(step, ReplayStep::Render) {
            let segments = render_events(host.events(), host.view());
            let line = json!({
                "step": index,
                "view": host.view(),
                "segments": segments,
            });
            writeln!(out, "{}", line)?;
        }
    }

    log::info!("Replayed {} steps", script.steps.len());
    Ok(())
}
