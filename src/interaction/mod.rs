use serde::{Deserialize, Serialize};

use crate::core::{AxisTransform, PixelPoint};

/// Chart area an input event landed in, resolved by the host's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChartRegion {
    #[default]
    Plot,
    PriceAxis,
    TimeAxis,
}

/// Normalized, canvas-relative input event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Wheel { x: f64, y: f64, delta_y: f64 },
    DragStart { x: f64, y: f64 },
    DragMove { x: f64, y: f64 },
    DragEnd,
    PointerMove { x: f64, y: f64 },
    PointerLeave,
}

/// What a drag on an axis strip does to that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisDragGesture {
    /// Translate the axis range.
    Pan,
    /// Stretch or compress the axis range.
    Rescale,
}

/// Which axes a drag session drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragTarget {
    /// Plot-area drag: pans time by dx and price by dy.
    Plot,
    PriceAxis(AxisDragGesture),
    TimeAxis(AxisDragGesture),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Dragging,
}

/// Axis state captured when a drag begins.
///
/// Drag steps are applied against this snapshot using the total pointer
/// displacement, so repeated moves never accumulate rounding drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub target: DragTarget,
    pub start: PixelPoint,
    pub time_axis_at_start: AxisTransform,
    pub price_axis_at_start: AxisTransform,
}

impl DragState {
    #[must_use]
    pub fn delta(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.start.x, y - self.start.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    drag: Option<DragState>,
    cursor: Option<PixelPoint>,
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        if self.drag.is_some() {
            InteractionMode::Dragging
        } else {
            InteractionMode::Idle
        }
    }

    #[must_use]
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    #[must_use]
    pub fn cursor(&self) -> Option<PixelPoint> {
        self.cursor
    }

    pub fn on_drag_start(&mut self, state: DragState) {
        self.drag = Some(state);
    }

    /// Returns `true` when a drag was active.
    pub fn on_drag_end(&mut self) -> bool {
        self.drag.take().is_some()
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.cursor = Some(PixelPoint::new(x, y));
    }

    /// Returns `true` when a cursor was shown.
    pub fn on_pointer_leave(&mut self) -> bool {
        self.cursor.take().is_some()
    }
}
