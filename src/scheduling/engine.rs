// Scheduler engine
//
// Owns at most one gesture session and routes host pointer input to the move,
// resize and create controllers. Handlers never fail: anything that cannot be
// computed is logged and skipped for that call.

use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use super::auto_scroll::AutoScrollChange;
use super::callbacks::{PointerButton, PointerEvent, SchedulerCallbacks};
use super::creation::CreationController;
use super::drag::{ClickTracker, DragController};
use super::error::SchedulingError;
use super::geometry::{date_at, GridGeometry, GridViewport};
use super::gesture::{final_interval, refresh_preview, GestureController, Interval};
use super::resize::{ResizeController, ResizeEdge};
use super::session::{CaptureHost, DragSession, NoopCaptureHost, SessionKind};
use crate::models::event::Event;
use crate::models::settings::SchedulerSettings;
use crate::models::view::{ScrollDirection, ViewMode, ViewState};

/// Part of an event block that received the press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    Body,
    Handle(ResizeEdge),
}

/// What the host knows about its view at the time of a call.
#[derive(Debug, Clone, Copy)]
pub struct HostFrame<'a> {
    pub view: &'a ViewState,
    /// `None` while the grid is not mounted
    pub grid: Option<GridGeometry>,
    /// Visible part of a grid taller than its scroll container
    pub viewport: Option<GridViewport>,
}

impl<'a> HostFrame<'a> {
    pub fn new(view: &'a ViewState, grid: Option<GridGeometry>) -> Self {
        Self {
            view,
            grid,
            viewport: None,
        }
    }

    pub fn with_viewport(mut self, viewport: GridViewport) -> Self {
        self.viewport = Some(viewport);
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct Controllers {
    drag: DragController,
    resize: ResizeController,
    creation: CreationController,
}

impl Controllers {
    fn for_kind(&self, kind: SessionKind) -> &dyn GestureController {
        match kind {
            SessionKind::Move => &self.drag,
            SessionKind::ResizeStart | SessionKind::ResizeEnd => &self.resize,
            SessionKind::Create => &self.creation,
        }
    }
}

pub struct SchedulerEngine {
    settings: SchedulerSettings,
    capture_host: Rc<dyn CaptureHost>,
    controllers: Controllers,
    clicks: ClickTracker,
    session: Option<DragSession>,
}

impl SchedulerEngine {
    pub fn new(settings: SchedulerSettings, capture_host: Rc<dyn CaptureHost>) -> Self {
        Self {
            controllers: Controllers {
                drag: DragController,
                resize: ResizeController,
                creation: CreationController::from_settings(&settings),
            },
            settings,
            capture_host,
            clicks: ClickTracker::new(),
            session: None,
        }
    }

    /// Engine for hosts without global pointer listeners.
    pub fn headless(settings: SchedulerSettings) -> Self {
        Self::new(settings, Rc::new(NoopCaptureHost))
    }

    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_kind(&self) -> Option<SessionKind> {
        self.session.as_ref().map(|session| session.kind)
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.auto_scroll.is_active())
    }

    pub fn is_grid_scrolling(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.grid_scroll.is_active())
    }

    /// Last preview emitted by the running gesture.
    pub fn preview(&self) -> Option<Interval> {
        self.session.as_ref().and_then(|session| session.preview)
    }

    /// Time until the host should call [`SchedulerEngine::tick`] again.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        let session = self.session.as_ref()?;
        match (
            session.auto_scroll.next_due_in(now),
            session.grid_scroll.next_due_in(now),
        ) {
            (Some(week), Some(grid)) => Some(week.min(grid)),
            (week, grid) => week.or(grid),
        }
    }

    fn accepts_press(&self, pointer: &PointerEvent) -> bool {
        if pointer.button != PointerButton::Primary {
            return false;
        }
        if let Some(session) = &self.session {
            log::debug!(
                "Ignoring press while {:?} session for event {} is active",
                session.kind,
                session.original_event.id
            );
            return false;
        }
        true
    }

    fn press_date(&self, pointer: &PointerEvent, frame: &HostFrame<'_>) -> Option<(GridGeometry, NaiveDate)> {
        let Some(grid) = frame.grid else {
            log::warn!("Pointer down ignored: {}", SchedulingError::MissingGrid);
            return None;
        };
        match date_at(pointer.position.x, frame.view, &grid) {
            Ok(date) => Some((grid, date)),
            Err(err) => {
                log::warn!("Pointer down ignored: {}", err);
                None
            }
        }
    }

    fn begin(&mut self, kind: SessionKind, event: Event, pointer: &PointerEvent, anchor_date: NaiveDate) {
        self.session = Some(DragSession::begin(
            kind,
            event,
            pointer.position,
            anchor_date,
            &self.settings,
            Rc::clone(&self.capture_host),
        ));
    }

    /// Press on an existing event's body (move) or one of its resize handles.
    ///
    /// A secondary-button press anywhere on the event is a right click.
    pub fn pointer_down_on_event(
        &mut self,
        event: &Event,
        target: EventTarget,
        pointer: &PointerEvent,
        frame: HostFrame<'_>,
        callbacks: &mut dyn SchedulerCallbacks,
    ) {
        if pointer.button == PointerButton::Secondary && self.session.is_none() {
            log::debug!("Right click on event {}", event.id);
            callbacks.on_right_click(pointer);
            return;
        }
        if !self.accepts_press(pointer) {
            return;
        }

        if target == EventTarget::Body {
            let window = Duration::from_millis(self.settings.double_click_window_ms);
            if self.clicks.register(&event.id, pointer.timestamp, window) {
                log::debug!("Double press on event {}, treating as click", event.id);
                callbacks.on_click(pointer);
                return;
            }
        }

        let Some((_, anchor_date)) = self.press_date(pointer, &frame) else {
            return;
        };
        let kind = match target {
            EventTarget::Body => SessionKind::Move,
            EventTarget::Handle(edge) => edge.session_kind(),
        };
        self.begin(kind, event.clone(), pointer, anchor_date);
    }

    /// Press on empty grid space: starts drag-to-create.
    pub fn pointer_down_on_slot(
        &mut self,
        pointer: &PointerEvent,
        frame: HostFrame<'_>,
        callbacks: &mut dyn SchedulerCallbacks,
    ) {
        if !self.accepts_press(pointer) {
            return;
        }
        let Some((grid, date)) = self.press_date(pointer, &frame) else {
            return;
        };

        let draft = match self.controllers.creation.draft(date, pointer.position.y, &grid) {
            Ok(draft) => draft,
            Err(err) => {
                log::warn!("Cannot create event at {}: {}", date, err);
                return;
            }
        };

        let window = Duration::from_millis(self.settings.double_click_window_ms);
        if self.clicks.register(&format!("slot@{}", date), pointer.timestamp, window) {
            log::debug!("Double press on empty slot {}, creating draft", draft.start);
            callbacks.on_create(draft.start, draft.end, true);
            callbacks.on_change_complete();
            return;
        }

        self.begin(SessionKind::Create, draft, pointer, date);
    }

    pub fn pointer_move(
        &mut self,
        pointer: &PointerEvent,
        frame: HostFrame<'_>,
        callbacks: &mut dyn SchedulerCallbacks,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(grid) = frame.grid else {
            log::debug!("Pointer move skipped: {}", SchedulingError::MissingGrid);
            return;
        };

        let threshold = match session.kind {
            SessionKind::Create => self.settings.click_threshold_px,
            _ => self.settings.drag_threshold_px,
        };
        if session.track(pointer.position, pointer.header_date, f64::from(threshold)) {
            log::debug!("{:?} session for event {} is dragging", session.kind, session.original_event.id);
            self.clicks.clear();
        }
        if !session.has_moved {
            return;
        }

        if grid.view_mode == ViewMode::Week && session.kind != SessionKind::Create {
            match session.auto_scroll.update(pointer.position.x, grid.width, pointer.timestamp) {
                AutoScrollChange::Started(direction) | AutoScrollChange::Restarted(direction) => {
                    log::debug!("Auto-scroll engaged {:?}", direction);
                }
                AutoScrollChange::Stopped => log::debug!("Auto-scroll stopped"),
                AutoScrollChange::Unchanged => {}
            }
        }

        match frame.viewport {
            Some(viewport) => {
                let change = session.grid_scroll.update(
                    viewport.relative_y(pointer.position.y),
                    viewport.height,
                    pointer.timestamp,
                );
                if change != AutoScrollChange::Unchanged {
                    log::debug!("Grid scroll {:?}", change);
                }
            }
            None => {
                session.grid_scroll.stop();
            }
        }

        let controller = self.controllers.for_kind(session.kind);
        refresh_preview(controller, session, frame.view, &grid, callbacks);
    }

    pub fn pointer_up(
        &mut self,
        pointer: &PointerEvent,
        frame: HostFrame<'_>,
        callbacks: &mut dyn SchedulerCallbacks,
    ) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        session.last_pointer = pointer.position;
        session.last_header_date = pointer.header_date;

        let Some(grid) = frame.grid else {
            log::warn!("Releasing {:?} session without commit: {}", session.kind, SchedulingError::MissingGrid);
            let had_preview = session.preview.is_some();
            drop(session);
            if had_preview {
                callbacks.on_change_complete();
            }
            return;
        };

        let click = f64::from(self.settings.click_threshold_px);
        let (dx, dy) = session.net_movement(pointer.position);
        let is_click = dx < click && dy < click;
        let kind = session.kind;
        let had_preview = session.preview.is_some();

        let committed = match kind {
            SessionKind::Move if is_click => None,
            SessionKind::ResizeStart | SessionKind::ResizeEnd if !session.has_moved => None,
            SessionKind::Create if is_click => {
                Some((session.original_event.start, session.original_event.end))
            }
            _ => final_interval(self.controllers.for_kind(kind), &session, frame.view, &grid),
        };
        drop(session);

        if kind == SessionKind::Move && is_click {
            log::debug!("Release classified as click");
            callbacks.on_click(pointer);
            if had_preview {
                // Let the host drop the preview it is still showing
                callbacks.on_change_complete();
            }
            return;
        }

        match committed {
            Some(interval) => {
                log::debug!("Committing {:?}: {} .. {}", kind, interval.0, interval.1);
                self.controllers.for_kind(kind).emit(callbacks, interval, true);
                callbacks.on_change_complete();
            }
            None => log::debug!("{:?} released without a change", kind),
        }
    }

    /// Abort the gesture (pointer capture lost, Escape, ...).
    pub fn pointer_cancel(&mut self, callbacks: &mut dyn SchedulerCallbacks) {
        let Some(session) = self.session.take() else {
            return;
        };
        log::debug!("Cancelled {:?} session for event {}", session.kind, session.original_event.id);
        let had_preview = session.preview.is_some();
        drop(session);
        if had_preview {
            callbacks.on_change_complete();
        }
    }

    /// Run every auto-scroll tick that fell due up to `now`.
    ///
    /// Each week tick asks the host to page and re-previews the gesture
    /// against the window the host will show after applying it. Each grid
    /// tick asks the host to scroll its container and re-previews with the
    /// pointer carried along by the scrolled content.
    pub fn tick(&mut self, now: Instant, frame: HostFrame<'_>, callbacks: &mut dyn SchedulerCallbacks) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let week_ticks = session.auto_scroll.due_ticks(now);
        let grid_ticks = session.grid_scroll.due_ticks(now);
        if week_ticks == 0 && grid_ticks == 0 {
            return;
        }
        let Some(grid) = frame.grid else {
            log::warn!(
                "Dropping {} auto-scroll tick(s): {}",
                week_ticks + grid_ticks,
                SchedulingError::MissingGrid
            );
            return;
        };

        let controller = self.controllers.for_kind(session.kind);
        let mut projected = frame.view.clone();

        if let Some(direction) = session.auto_scroll.direction() {
            for _ in 0..week_ticks {
                callbacks.on_week_scroll(direction, true);
                projected.apply_week_scroll(direction, true, self.settings.max_week_scroll_offset);
                refresh_preview(controller, session, &projected, &grid, callbacks);
            }
        }

        if let (Some(direction), Some(mut viewport)) = (session.grid_scroll.direction(), frame.viewport) {
            let step = f64::from(self.settings.grid_scroll_step_px) * f64::from(direction.delta());
            for _ in 0..grid_ticks {
                let moved = viewport.scroll_by(step, grid.height);
                if moved == 0.0 {
                    log::debug!("Grid scroll reached the end of the grid");
                    break;
                }
                callbacks.on_grid_scroll(moved);
                session.last_pointer.y += moved;
                refresh_preview(controller, session, &projected, &grid, callbacks);
            }
        }
    }

    /// Explicit week navigation (header arrows, keyboard).
    pub fn request_week_scroll(&self, direction: ScrollDirection, callbacks: &mut dyn SchedulerCallbacks) {
        callbacks.on_week_scroll(direction, false);
    }

    /// Drop any running session, releasing capture and the timers.
    ///
    /// Returns whether a session was running.
    pub fn teardown(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                log::debug!("Tearing down {:?} session for event {}", session.kind, session.original_event.id);
                true
            }
            None => false,
        }
    }
}
