// Scheduling engine
// Pointer-driven move/resize/create of calendar events, edge auto-scroll and
// per-day segment rendering. Hosts feed pointer input and view geometry in and
// receive proposed changes through `SchedulerCallbacks`.

pub mod auto_scroll;
pub mod callbacks;
pub mod creation;
pub mod drag;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod resize;
pub mod segments;
pub mod session;

pub use callbacks::{PointerButton, PointerEvent, RecordingCallbacks, SchedulerCall, SchedulerCallbacks};
pub use engine::{EventTarget, HostFrame, SchedulerEngine};
pub use error::{SchedulingError, SchedulingResult};
pub use geometry::{GridGeometry, GridViewport, PixelBox, Point, TimeOfDay};
pub use resize::{HandleSet, ResizeEdge};
pub use segments::{render_events, segments_for_event, RenderedSegment, Segment};
pub use session::{CaptureHost, NoopCaptureHost};
