// Integration tests for the scheduling engine
// End-to-end pointer sequences as a host would deliver them

mod fixtures;

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use test_case::test_case;

use fixtures::dates::{at, week_at};
use fixtures::{events, pointers, views};
use staffing_calendar::models::settings::SchedulerSettings;
use staffing_calendar::models::view::{ScrollDirection, ViewState};
use staffing_calendar::scheduling::{
    CaptureHost, EventTarget, HostFrame, RecordingCallbacks, ResizeEdge, SchedulerCall, SchedulerEngine,
};

/// Applies week scrolls the way the calendar page does.
fn settle_scrolls(view: &mut ViewState, calls: &[SchedulerCall]) {
    for call in calls {
        if let SchedulerCall::WeekScroll {
            direction,
            is_auto_scroll,
        } = *call
        {
            view.apply_week_scroll(direction, is_auto_scroll, 7);
        }
    }
}

#[derive(Default)]
struct ListenerCount {
    attached: Cell<i32>,
}

impl CaptureHost for ListenerCount {
    fn attach_pointer_listeners(&self) {
        self.attached.set(self.attached.get() + 1);
    }

    fn detach_pointer_listeners(&self) {
        self.attached.set(self.attached.get() - 1);
    }
}

#[test]
fn test_scenario_a_day_view_drag_down_two_hours() {
    let view = views::day();
    let frame = HostFrame::new(&view, views::grid(&view));
    let t0 = Instant::now();
    let mut engine = SchedulerEngine::headless(SchedulerSettings::default());
    let mut callbacks = RecordingCallbacks::new();

    engine.pointer_down_on_event(
        &events::ward_round(),
        EventTarget::Body,
        &pointers::at(t0, 0, 300.0, 460.0),
        frame,
        &mut callbacks,
    );
    for (i, y) in [480.0, 520.0, 560.0].into_iter().enumerate() {
        engine.pointer_move(&pointers::at(t0, 16 * (i as u64 + 1), 300.0, y), frame, &mut callbacks);
    }
    engine.pointer_up(&pointers::at(t0, 80, 300.0, 560.0), frame, &mut callbacks);

    let calls = callbacks.take();
    assert_eq!(
        &calls[calls.len() - 2..],
        &[
            SchedulerCall::Move {
                start: at(11, 0),
                end: at(12, 0),
                is_final: true
            },
            SchedulerCall::ChangeComplete,
        ]
    );
    assert!(calls
        .iter()
        .all(|call| !matches!(call, SchedulerCall::Click { .. })));
}

#[test]
fn test_scenario_b_week_view_bottom_resize() {
    let view = views::week();
    let frame = HostFrame::new(&view, views::grid(&view));
    let t0 = Instant::now();
    let mut engine = SchedulerEngine::headless(SchedulerSettings::default());
    let mut callbacks = RecordingCallbacks::new();

    // Bottom edge of the 14:00-15:00 block sits at y = 750
    engine.pointer_down_on_event(
        &events::interview(),
        EventTarget::Handle(ResizeEdge::End),
        &pointers::at(t0, 0, 50.0, 748.0),
        frame,
        &mut callbacks,
    );
    engine.pointer_move(&pointers::at(t0, 16, 50.0, 825.0), frame, &mut callbacks);
    engine.pointer_up(&pointers::at(t0, 32, 50.0, 825.0), frame, &mut callbacks);

    assert_eq!(
        callbacks.take(),
        vec![
            SchedulerCall::Resize {
                start: at(14, 0),
                end: at(16, 30),
                is_final: false
            },
            SchedulerCall::Resize {
                start: at(14, 0),
                end: at(16, 30),
                is_final: true
            },
            SchedulerCall::ChangeComplete,
        ]
    );
}

#[test]
fn test_scenario_d_edge_auto_scroll_ticks_twice_then_stops() {
    let mut view = views::week();
    let grid = views::grid(&view);
    let t0 = Instant::now();
    let mut engine = SchedulerEngine::headless(SchedulerSettings::default());
    let mut callbacks = RecordingCallbacks::new();
    let mut scrolls = Vec::new();

    engine.pointer_down_on_event(
        &events::ward_round(),
        EventTarget::Body,
        &pointers::at(t0, 0, 50.0, 475.0),
        HostFrame::new(&view, grid),
        &mut callbacks,
    );
    // 40px from the right edge
    engine.pointer_move(&pointers::at(t0, 10, 660.0, 475.0), HostFrame::new(&view, grid), &mut callbacks);
    assert!(engine.is_auto_scrolling());

    let start = t0 + Duration::from_millis(10);
    for ms in [250, 500, 750, 1000] {
        engine.tick(start + Duration::from_millis(ms), HostFrame::new(&view, grid), &mut callbacks);
        let calls = callbacks.take();
        settle_scrolls(&mut view, &calls);
        scrolls.extend(
            calls
                .into_iter()
                .filter(|call| matches!(call, SchedulerCall::WeekScroll { .. })),
        );
    }

    assert_eq!(
        scrolls,
        vec![
            SchedulerCall::WeekScroll {
                direction: ScrollDirection::Forward,
                is_auto_scroll: true
            };
            2
        ]
    );
    assert_eq!(view.week_scroll_offset, 2);
    // Column 6 of the twice-scrolled window is the following Tuesday
    assert_eq!(engine.preview(), Some((week_at(8, 9, 0), week_at(8, 10, 0))));

    engine.pointer_move(&pointers::at(t0, 1100, 350.0, 475.0), HostFrame::new(&view, grid), &mut callbacks);
    assert!(!engine.is_auto_scrolling());
    engine.tick(t0 + Duration::from_secs(5), HostFrame::new(&view, grid), &mut callbacks);
    assert_eq!(
        callbacks.count(|call| matches!(call, SchedulerCall::WeekScroll { .. })),
        0
    );
}

#[test]
fn test_resize_end_follows_auto_scrolled_window() {
    let mut view = views::week();
    let grid = views::grid(&view);
    let t0 = Instant::now();
    let mut engine = SchedulerEngine::headless(SchedulerSettings::default());
    let mut callbacks = RecordingCallbacks::new();
    let mut scrolls = Vec::new();
    let mut resize_ends = Vec::new();

    engine.pointer_down_on_event(
        &events::interview(),
        EventTarget::Handle(ResizeEdge::End),
        &pointers::at(t0, 0, 50.0, 748.0),
        HostFrame::new(&view, grid),
        &mut callbacks,
    );
    // 40px from the right edge, at 16:00
    engine.pointer_move(&pointers::at(t0, 10, 660.0, 800.0), HostFrame::new(&view, grid), &mut callbacks);
    assert!(engine.is_auto_scrolling());

    let engaged = t0 + Duration::from_millis(10);
    for ms in [0, 500, 1000] {
        if ms > 0 {
            engine.tick(engaged + Duration::from_millis(ms), HostFrame::new(&view, grid), &mut callbacks);
        }
        let calls = callbacks.take();
        settle_scrolls(&mut view, &calls);
        for call in calls {
            match call {
                SchedulerCall::WeekScroll { .. } => scrolls.push(call),
                SchedulerCall::Resize { start, end, is_final: false } => {
                    assert_eq!(start, at(14, 0));
                    resize_ends.push(end);
                }
                other => panic!("unexpected call {:?}", other),
            }
        }
    }

    assert_eq!(
        scrolls,
        vec![
            SchedulerCall::WeekScroll {
                direction: ScrollDirection::Forward,
                is_auto_scroll: true
            };
            2
        ]
    );
    // Column 6 is Sunday, then Monday and Tuesday of the following week
    assert_eq!(
        resize_ends,
        vec![week_at(6, 16, 0), week_at(7, 16, 0), week_at(8, 16, 0)]
    );

    engine.pointer_up(&pointers::at(t0, 1100, 660.0, 800.0), HostFrame::new(&view, grid), &mut callbacks);
    assert_eq!(
        callbacks.take(),
        vec![
            SchedulerCall::Resize {
                start: at(14, 0),
                end: week_at(8, 16, 0),
                is_final: true
            },
            SchedulerCall::ChangeComplete,
        ]
    );
}

#[test]
fn test_left_edge_and_outside_grid_scroll_backward() {
    let view = views::week();
    let frame = HostFrame::new(&view, views::grid(&view));
    let t0 = Instant::now();
    let mut engine = SchedulerEngine::headless(SchedulerSettings::default());
    let mut callbacks = RecordingCallbacks::new();

    engine.pointer_down_on_event(
        &events::ward_round(),
        EventTarget::Body,
        &pointers::at(t0, 0, 300.0, 475.0),
        frame,
        &mut callbacks,
    );
    engine.pointer_move(&pointers::at(t0, 10, -120.0, 475.0), frame, &mut callbacks);
    engine.tick(t0 + Duration::from_millis(510), frame, &mut callbacks);

    assert_eq!(
        callbacks.count(|call| *call
            == SchedulerCall::WeekScroll {
                direction: ScrollDirection::Backward,
                is_auto_scroll: true
            }),
        1
    );
}

#[test]
fn test_exactly_fifty_px_from_edge_is_safe() {
    let view = views::week();
    let frame = HostFrame::new(&view, views::grid(&view));
    let t0 = Instant::now();
    let mut engine = SchedulerEngine::headless(SchedulerSettings::default());
    let mut callbacks = RecordingCallbacks::new();

    engine.pointer_down_on_event(
        &events::ward_round(),
        EventTarget::Body,
        &pointers::at(t0, 0, 300.0, 475.0),
        frame,
        &mut callbacks,
    );
    engine.pointer_move(&pointers::at(t0, 10, 650.0, 475.0), frame, &mut callbacks);
    assert!(!engine.is_auto_scrolling());
    engine.pointer_move(&pointers::at(t0, 20, 50.0, 475.0), frame, &mut callbacks);
    assert!(!engine.is_auto_scrolling());
}

#[test_case(0.0, 0.0, true; "no movement")]
#[test_case(2.0, 1.0, true; "below drag threshold")]
#[test_case(4.0, 0.0, true; "dragging but below click threshold")]
#[test_case(0.0, 5.0, false; "click threshold reached vertically")]
#[test_case(30.0, 60.0, false; "real drag")]
fn test_release_classification(dx: f64, dy: f64, is_click: bool) {
    let view = views::day();
    let frame = HostFrame::new(&view, views::grid(&view));
    let t0 = Instant::now();
    let mut engine = SchedulerEngine::headless(SchedulerSettings::default());
    let mut callbacks = RecordingCallbacks::new();

    engine.pointer_down_on_event(
        &events::ward_round(),
        EventTarget::Body,
        &pointers::at(t0, 0, 300.0, 475.0),
        frame,
        &mut callbacks,
    );
    let release = pointers::at(t0, 50, 300.0 + dx, 475.0 + dy);
    engine.pointer_move(&release, frame, &mut callbacks);
    engine.pointer_up(&release, frame, &mut callbacks);

    let clicks = callbacks.count(|call| matches!(call, SchedulerCall::Click { .. }));
    let moves = callbacks.count(|call| matches!(call, SchedulerCall::Move { .. }));
    let finals = callbacks.count(|call| matches!(call, SchedulerCall::Move { is_final: true, .. }));
    if is_click {
        assert_eq!((clicks, moves), (1, 0));
    } else {
        assert_eq!((clicks, finals), (0, 1));
    }
}

#[test]
fn test_presses_outside_double_click_window_are_separate_clicks() {
    let view = views::day();
    let frame = HostFrame::new(&view, views::grid(&view));
    let t0 = Instant::now();
    let mut engine = SchedulerEngine::headless(SchedulerSettings::default());
    let mut callbacks = RecordingCallbacks::new();
    let event = events::ward_round();

    for start in [0, 400] {
        engine.pointer_down_on_event(&event, EventTarget::Body, &pointers::at(t0, start, 300.0, 475.0), frame, &mut callbacks);
        assert!(engine.is_active());
        engine.pointer_up(&pointers::at(t0, start + 50, 300.0, 475.0), frame, &mut callbacks);
    }

    assert_eq!(callbacks.count(|call| matches!(call, SchedulerCall::Click { .. })), 2);
}

#[test]
fn test_listeners_released_on_every_exit_path() {
    let view = views::week();
    let frame = HostFrame::new(&view, views::grid(&view));
    let t0 = Instant::now();
    let host = Rc::new(ListenerCount::default());
    let mut callbacks = RecordingCallbacks::new();
    let event = events::ward_round();

    // Release
    let mut engine = SchedulerEngine::new(SchedulerSettings::default(), host.clone());
    engine.pointer_down_on_event(&event, EventTarget::Body, &pointers::at(t0, 0, 300.0, 475.0), frame, &mut callbacks);
    engine.pointer_up(&pointers::at(t0, 600, 300.0, 600.0), frame, &mut callbacks);
    assert_eq!(host.attached.get(), 0);

    // Cancel mid auto-scroll
    engine.pointer_down_on_event(&event, EventTarget::Body, &pointers::at(t0, 1000, 300.0, 475.0), frame, &mut callbacks);
    engine.pointer_move(&pointers::at(t0, 1010, 690.0, 475.0), frame, &mut callbacks);
    engine.pointer_cancel(&mut callbacks);
    assert_eq!(host.attached.get(), 0);

    // Teardown
    engine.pointer_down_on_event(
        &event,
        EventTarget::Handle(ResizeEdge::Start),
        &pointers::at(t0, 2000, 300.0, 452.0),
        frame,
        &mut callbacks,
    );
    assert_eq!(host.attached.get(), 1);
    assert!(engine.teardown());
    assert_eq!(host.attached.get(), 0);

    // Engine dropped mid-gesture
    engine.pointer_down_on_event(&event, EventTarget::Body, &pointers::at(t0, 3000, 300.0, 475.0), frame, &mut callbacks);
    drop(engine);
    assert_eq!(host.attached.get(), 0);
}

#[test]
fn test_multi_day_move_shifts_by_whole_days() {
    let view = views::week();
    let frame = HostFrame::new(&view, views::grid(&view));
    let t0 = Instant::now();
    let mut engine = SchedulerEngine::headless(SchedulerSettings::default());
    let mut callbacks = RecordingCallbacks::new();

    // Grab the Tuesday segment and drop it one column right, one hour later
    engine.pointer_down_on_event(
        &events::night_cover(),
        EventTarget::Body,
        &pointers::at(t0, 0, 150.0, 300.0),
        frame,
        &mut callbacks,
    );
    engine.pointer_move(&pointers::at(t0, 16, 250.0, 350.0), frame, &mut callbacks);
    engine.pointer_up(&pointers::at(t0, 32, 250.0, 350.0), frame, &mut callbacks);

    assert!(callbacks.calls.contains(&SchedulerCall::Move {
        start: week_at(1, 21, 0),
        end: week_at(3, 7, 0),
        is_final: true
    }));
}

#[test]
fn test_drop_on_day_header_keeps_time() {
    let view = views::week();
    let frame = HostFrame::new(&view, views::grid(&view));
    let t0 = Instant::now();
    let mut engine = SchedulerEngine::headless(SchedulerSettings::default());
    let mut callbacks = RecordingCallbacks::new();
    let thursday = fixtures::dates::monday() + chrono::Days::new(3);

    engine.pointer_down_on_event(
        &events::ward_round(),
        EventTarget::Body,
        &pointers::at(t0, 0, 50.0, 475.0),
        frame,
        &mut callbacks,
    );
    let over_header = pointers::at(t0, 16, 350.0, -30.0).over_header(thursday);
    engine.pointer_move(&over_header, frame, &mut callbacks);
    engine.pointer_up(&over_header, frame, &mut callbacks);

    assert_eq!(
        callbacks.calls.last().cloned(),
        Some(SchedulerCall::ChangeComplete)
    );
    assert!(callbacks.calls.contains(&SchedulerCall::Move {
        start: week_at(3, 9, 0),
        end: week_at(3, 10, 0),
        is_final: true
    }));
}
