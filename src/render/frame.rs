use crate::core::{
    AxisTransform, Bar, CandleGeometry, CanvasSize, PixelPoint, VisibleRange, project_candles,
};
use crate::error::{ChartError, ChartResult};

/// Read-only view of the chart state handed to a backend for one repaint.
///
/// The frame borrows the bar series; backends must not retain it past the
/// `render` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderFrame<'a> {
    pub canvas: CanvasSize,
    pub bars: &'a [Bar],
    pub visible: Option<VisibleRange>,
    pub time_axis: AxisTransform,
    pub price_axis: AxisTransform,
    pub bar_interval_secs: i64,
    /// Candle body width as a fraction of the bar slot.
    pub body_width_ratio: f64,
    pub cursor: Option<PixelPoint>,
    pub hovered: Option<Bar>,
}

impl<'a> RenderFrame<'a> {
    /// Bars inside the visible index window, overhang included.
    #[must_use]
    pub fn visible_bars(&self) -> &'a [Bar] {
        match self.visible {
            Some(range) => self.bars.get(range.as_range()).unwrap_or(&[]),
            None => &[],
        }
    }

    /// Candle geometry for the visible bars.
    pub fn candles(&self) -> ChartResult<Vec<CandleGeometry>> {
        project_candles(
            self.visible_bars(),
            self.time_axis,
            self.price_axis,
            self.bar_interval_secs,
            self.body_width_ratio,
        )
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.canvas.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        if let Some(range) = self.visible {
            if range.last >= self.bars.len() {
                return Err(ChartError::InvalidData(format!(
                    "visible range ends at {} but only {} bars are loaded",
                    range.last,
                    self.bars.len()
                )));
            }
        }
        Ok(())
    }
}
