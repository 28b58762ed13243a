//! Pointer gesture handling for timeline bars.
//!
//! A gesture starts on a bar body (move) or one of its edge handles
//! (resize), updates a preview position on every pointer move, and ends in
//! one of three ways: a date commit when the pointer travelled more than
//! [`CLICK_THRESHOLD_PX`], an activation (plain click) when it did not, or a
//! silent cancel.

use uuid::Uuid;

/// Horizontal travel, in pixels, that turns a click into a drag.
pub const CLICK_THRESHOLD_PX: f32 = 3.0;

/// Narrowest width a resize can produce, in percent.
pub const MIN_RESIZE_WIDTH_PCT: f64 = 1.0;

/// Positional key of a bar: lane index and slot within that lane's
/// drawable items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub lane: usize,
    pub slot: usize,
}

impl ItemKey {
    pub fn new(lane: usize, slot: usize) -> Self {
        Self { lane, slot }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Move,
    ResizeStart,
    ResizeEnd,
}

/// Left edge and width of a bar, both in percent of the planning window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarPosition {
    pub left: f64,
    pub width: f64,
}

impl BarPosition {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Where a pointer event came from. Touch events carry the number of
/// active touch points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch { touches: usize },
}

impl PointerSource {
    fn is_single_pointer(&self) -> bool {
        match self {
            PointerSource::Mouse => true,
            PointerSource::Touch { touches } => *touches == 1,
        }
    }
}

/// Everything captured when a gesture begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStart {
    pub key: ItemKey,
    pub item_id: Uuid,
    pub mode: DragMode,
    pub pointer_x: f32,
    /// Width of the lane's drawable area in pixels. Measured once.
    pub container_width: f32,
    pub original: BarPosition,
}

/// State of the one in-flight gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub key: ItemKey,
    pub item_id: Uuid,
    pub mode: DragMode,
    pub anchor_x: f32,
    pub container_width: f32,
    pub original: BarPosition,
    pub preview: BarPosition,
    pub has_moved: bool,
}

impl DragSession {
    fn from_start(start: DragStart) -> Self {
        Self {
            key: start.key,
            item_id: start.item_id,
            mode: start.mode,
            anchor_x: start.pointer_x,
            container_width: start.container_width,
            original: start.original,
            preview: start.original,
            has_moved: false,
        }
    }

    /// Recompute the preview for the current pointer position.
    pub fn update(&mut self, pointer_x: f32) -> BarPosition {
        let delta_px = pointer_x - self.anchor_x;
        if delta_px.abs() > CLICK_THRESHOLD_PX {
            self.has_moved = true;
        }
        let delta_pct = f64::from(delta_px) / f64::from(self.container_width) * 100.0;
        self.preview = apply_delta(self.mode, self.original, delta_pct);
        self.preview
    }
}

/// Apply a horizontal delta (in percent) to a bar's original position.
///
/// Move keeps the width and stays inside `[0, 100]`. Resizing keeps the
/// opposite edge fixed and never narrows the bar below
/// [`MIN_RESIZE_WIDTH_PCT`].
pub fn apply_delta(mode: DragMode, original: BarPosition, delta_pct: f64) -> BarPosition {
    let BarPosition { left, width } = original;
    match mode {
        DragMode::Move => {
            let max_left = (100.0 - width).max(0.0);
            BarPosition::new((left + delta_pct).clamp(0.0, max_left), width)
        }
        DragMode::ResizeStart => {
            let max_delta = (width - MIN_RESIZE_WIDTH_PCT).max(-left);
            let clamped = delta_pct.clamp(-left, max_delta);
            BarPosition::new(left + clamped, width - clamped)
        }
        DragMode::ResizeEnd => {
            let max_width = (100.0 - left).max(MIN_RESIZE_WIDTH_PCT);
            BarPosition::new(left, (width + delta_pct).clamp(MIN_RESIZE_WIDTH_PCT, max_width))
        }
    }
}

/// How a finished gesture should be handled by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// The bar was dragged; persist the preview position.
    Commit {
        item_id: Uuid,
        key: ItemKey,
        position: BarPosition,
    },
    /// The bar was clicked without moving; open it for editing.
    Activate { item_id: Uuid, key: ItemKey },
    /// The gesture was interrupted; nothing to do.
    Cancelled,
}

/// Owns the single active drag session, if any.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
    suppress_click: bool,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture. Ignored while another gesture is active, for
    /// multi-touch, or when the container has no width.
    pub fn begin(&mut self, start: DragStart, source: PointerSource) -> bool {
        if self.session.is_some() {
            log::debug!("ignoring drag start on {:?}: a drag is already active", start.key);
            return false;
        }
        if !source.is_single_pointer() {
            log::debug!("ignoring multi-touch drag start on {:?}", start.key);
            return false;
        }
        if !(start.container_width > 0.0) {
            log::debug!("ignoring drag start on {:?}: container has no width", start.key);
            return false;
        }
        self.session = Some(DragSession::from_start(start));
        true
    }

    /// Feed a pointer move. Returns the new preview, or `None` when no
    /// session is active or the event is a multi-touch move.
    pub fn pointer_move(&mut self, pointer_x: f32, source: PointerSource) -> Option<BarPosition> {
        if !source.is_single_pointer() {
            return None;
        }
        self.session.as_mut().map(|session| session.update(pointer_x))
    }

    /// Finish the gesture. A moved drag commits; an unmoved one is a click.
    pub fn pointer_up(&mut self) -> Option<GestureOutcome> {
        let session = self.session.take()?;
        if session.has_moved {
            self.suppress_click = true;
            Some(GestureOutcome::Commit {
                item_id: session.item_id,
                key: session.key,
                position: session.preview,
            })
        } else {
            Some(GestureOutcome::Activate {
                item_id: session.item_id,
                key: session.key,
            })
        }
    }

    /// Abort the gesture without committing or activating.
    pub fn cancel(&mut self) -> Option<GestureOutcome> {
        self.session.take().map(|session| {
            log::debug!("drag on {:?} cancelled", session.key);
            GestureOutcome::Cancelled
        })
    }

    /// Called once per frame. Clears the click suppression left behind by a
    /// finished drag so it cannot leak into a later, unrelated click.
    pub fn next_frame(&mut self) {
        self.suppress_click = false;
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// True between a completed drag and the next frame.
    pub fn click_suppressed(&self) -> bool {
        self.suppress_click
    }

    /// Live preview for the bar at `key` while it is being dragged.
    pub fn preview_for(&self, key: ItemKey) -> Option<BarPosition> {
        self.session
            .as_ref()
            .filter(|s| s.key == key)
            .map(|s| s.preview)
    }
}
