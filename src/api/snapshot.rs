use serde::{Deserialize, Serialize};

use crate::core::{AxisTransform, Bar, CanvasSize, PixelPoint, VisibleRange};
use crate::error::{ChartError, ChartResult};

use super::Viewport;

/// Deterministic viewport state for regression fixtures and host persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    pub canvas: CanvasSize,
    pub time_axis: AxisTransform,
    pub price_axis: AxisTransform,
    pub bar_count: usize,
    pub bar_interval_secs: i64,
    pub first_timestamp: Option<i64>,
    pub last_timestamp: Option<i64>,
    pub visible: Option<VisibleRange>,
    pub cursor: Option<PixelPoint>,
    pub hovered: Option<Bar>,
    pub dragging: bool,
    pub dirty: bool,
}

impl ViewportSnapshot {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse snapshot: {e}")))
    }
}

impl Viewport {
    #[must_use]
    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            canvas: self.canvas,
            time_axis: self.time_axis,
            price_axis: self.price_axis,
            bar_count: self.bars.len(),
            bar_interval_secs: self.bar_interval_secs,
            first_timestamp: self.bars.first().map(|bar| bar.timestamp),
            last_timestamp: self.bars.last().map(|bar| bar.timestamp),
            visible: self.visible_index_range(),
            cursor: self.interaction.cursor(),
            hovered: self.hovered_bar(),
            dragging: self.is_dragging(),
            dirty: self.dirty,
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
