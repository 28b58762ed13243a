//! Interactive timeline editing: bar layout, drag gestures and date commits.

pub mod commit;
pub mod drag;
pub mod lane;

pub use commit::{dispatch, DateCommit, TimelineHost};
pub use drag::{BarPosition, DragController, DragMode, DragStart, GestureOutcome, ItemKey, PointerSource};
pub use lane::{build_lanes, layout_lane, Grouping, Lane, LaneLayout};
