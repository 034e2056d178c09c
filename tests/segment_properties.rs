// Property-based tests for segment rendering and pointer gestures
// Checks coverage, handle placement and interval validity with random inputs

mod fixtures;

use std::time::{Duration, Instant};

use chrono::{NaiveDateTime, TimeDelta};
use proptest::prelude::*;

use fixtures::dates::{at, monday};
use fixtures::{events, pointers, views};
use staffing_calendar::models::event::Event;
use staffing_calendar::models::settings::SchedulerSettings;
use staffing_calendar::models::view::{ViewMode, ViewState};
use staffing_calendar::scheduling::geometry::time_to_box;
use staffing_calendar::scheduling::{
    segments_for_event, EventTarget, HostFrame, RecordingCallbacks, ResizeEdge, SchedulerCall,
    SchedulerEngine, TimeOfDay,
};

fn event_strategy() -> impl Strategy<Value = Event> {
    // Start within the first week, last up to four days
    (0i64..7 * 24 * 60, 1i64..4 * 24 * 60).prop_map(|(offset, length)| {
        let start: NaiveDateTime = at(0, 0) + TimeDelta::minutes(offset);
        Event::new("prop", "Shift", start, start + TimeDelta::minutes(length)).unwrap()
    })
}

proptest! {
    #[test]
    fn segments_cover_event_exactly(event in event_strategy()) {
        // A day view per date shows every day, regardless of window limits
        let mut covered = Vec::new();
        let mut date = event.start.date();
        while date <= event.last_day() {
            let view = ViewState::new(ViewMode::Day, date);
            let segments = segments_for_event(&event, &view);
            prop_assert_eq!(segments.len(), 1);
            covered.push(segments[0].visible_interval().unwrap());
            date = date.succ_opt().unwrap();
        }

        prop_assert_eq!(covered.first().unwrap().0, event.start);
        prop_assert_eq!(covered.last().unwrap().1, event.end);
        for pair in covered.windows(2) {
            prop_assert_eq!(pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn handles_only_on_first_and_last_day(event in event_strategy()) {
        let view = views::week();
        let segments = segments_for_event(&event, &view);
        let days = event.days_spanned();

        for segment in &segments {
            let handles = segment.handles();
            prop_assert_eq!(handles.top, segment.date == event.start.date());
            prop_assert_eq!(handles.bottom, segment.date == event.last_day());
            if days == 1 {
                prop_assert!(handles.top && handles.bottom);
            }
            prop_assert!(segment.visible_start < segment.visible_end);
            prop_assert!(segment.day_offset < 7);
        }
    }

    #[test]
    fn time_to_box_is_pure(start in 0u32..1440, length in 1u32..600, day in 0usize..7) {
        let start_time = TimeOfDay::from_minutes(start).unwrap();
        let end_time = TimeOfDay::from_minutes((start + length).min(1440)).unwrap();
        let first = time_to_box(start_time, end_time, day, ViewMode::Week);
        let second = time_to_box(start_time, end_time, day, ViewMode::Week);
        prop_assert_eq!(first, second);
        prop_assert!((first.top - f64::from(start) * 50.0 / 60.0).abs() < 1e-9);
        prop_assert!(first.left_percent + first.width_percent <= 100.0 + 1e-9);
    }

    #[test]
    fn committed_intervals_are_never_degenerate(
        path in prop::collection::vec((-100.0f64..800.0, -100.0f64..1300.0), 1..12),
        edge in prop_oneof![
            Just(EventTarget::Body),
            Just(EventTarget::Handle(ResizeEdge::Start)),
            Just(EventTarget::Handle(ResizeEdge::End)),
        ],
    ) {
        let view = views::week();
        let frame = HostFrame::new(&view, views::grid(&view));
        let t0 = Instant::now();
        let mut engine = SchedulerEngine::headless(SchedulerSettings::default());
        let mut callbacks = RecordingCallbacks::new();

        engine.pointer_down_on_event(&events::interview(), edge, &pointers::at(t0, 0, 50.0, 740.0), frame, &mut callbacks);
        for (i, &(x, y)) in path.iter().enumerate() {
            let ms = 20 * (i as u64 + 1);
            engine.pointer_move(&pointers::at(t0, ms, x, y), frame, &mut callbacks);
            engine.tick(t0 + Duration::from_millis(ms), frame, &mut callbacks);
        }
        let &(x, y) = path.last().unwrap();
        engine.pointer_up(&pointers::at(t0, 1000, x, y), frame, &mut callbacks);

        prop_assert!(!engine.is_active());
        for call in &callbacks.calls {
            if let SchedulerCall::Move { start, end, .. } | SchedulerCall::Resize { start, end, .. } = call {
                prop_assert!(start < end, "{:?}", call);
            }
        }
        let completes = callbacks.count(|call| *call == SchedulerCall::ChangeComplete);
        prop_assert!(completes <= 1);
    }
}

#[test]
fn scenario_c_three_day_event_renders_three_segments() {
    let event = events::night_cover();
    let view = ViewState::new(ViewMode::Week, monday());
    let segments = segments_for_event(&event, &view);

    let rendered: Vec<_> = segments
        .iter()
        .map(|segment| {
            (
                segment.visible_start.to_string(),
                segment.visible_end.to_string(),
                segment.handles().top,
                segment.handles().bottom,
            )
        })
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("20:00".to_string(), "24:00".to_string(), true, false),
            ("00:00".to_string(), "24:00".to_string(), false, false),
            ("00:00".to_string(), "06:00".to_string(), false, true),
        ]
    );
}
