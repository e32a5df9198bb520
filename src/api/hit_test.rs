use serde::{Deserialize, Serialize};

use crate::core::{Bar, VisibleRange};

use super::Viewport;

/// Data-space readout under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairReadout {
    pub x: f64,
    pub y: f64,
    pub time: f64,
    pub price: f64,
    pub bar: Option<Bar>,
}

impl Viewport {
    /// Index window of bars whose start falls on screen, widened by one bar
    /// on each side so partially visible candles are drawn.
    ///
    /// Returns `None` for an empty series or when no bar touches the canvas.
    #[must_use]
    pub fn visible_index_range(&self) -> Option<VisibleRange> {
        let last_index = self.bars.len().checked_sub(1)?;
        let axis = self.time_axis;
        let length = f64::from(axis.pixel_length());

        let lo = self
            .bars
            .partition_point(|bar| axis.to_pixel(bar.timestamp as f64) < 0.0);
        let hi = self
            .bars
            .partition_point(|bar| axis.to_pixel(bar.timestamp as f64) <= length);

        if lo < hi {
            return Some(VisibleRange::new(lo.saturating_sub(1), hi.min(last_index)));
        }
        // No bar starts on screen; one bar may still straddle the left edge.
        let straddling = lo.checked_sub(1)?;
        let end = (self.bars[straddling].timestamp + self.bar_interval_secs) as f64;
        (axis.to_pixel(end) > 0.0).then(|| VisibleRange::new(straddling, lo.min(last_index)))
    }

    /// Index of the bar whose span `[start, start + interval)` contains `x`.
    ///
    /// A pixel on the boundary between two bars belongs to the later one.
    #[must_use]
    pub fn bar_index_at(&self, x: f64) -> Option<usize> {
        if !x.is_finite() {
            return None;
        }
        let range = self.visible_index_range()?;
        let axis = self.time_axis;
        let window = &self.bars[range.as_range()];

        let after = window.partition_point(|bar| axis.to_pixel(bar.timestamp as f64) <= x);
        let local = after.checked_sub(1)?;
        let bar = window[local];
        let end_px = axis.to_pixel((bar.timestamp + self.bar_interval_secs) as f64);
        (x < end_px).then_some(range.first + local)
    }

    /// Bar under pixel `x`, or `None` over empty space.
    #[must_use]
    pub fn nearest_bar_at(&self, x: f64) -> Option<Bar> {
        self.bar_index_at(x).map(|index| self.bars[index])
    }

    /// Bar under the current cursor.
    #[must_use]
    pub fn hovered_bar(&self) -> Option<Bar> {
        let cursor = self.interaction.cursor()?;
        self.nearest_bar_at(cursor.x)
    }

    #[must_use]
    pub fn crosshair(&self) -> Option<CrosshairReadout> {
        let cursor = self.interaction.cursor()?;
        Some(CrosshairReadout {
            x: cursor.x,
            y: cursor.y,
            time: self.time_axis.to_value(cursor.x),
            price: self.price_axis.to_value(cursor.y),
            bar: self.nearest_bar_at(cursor.x),
        })
    }
}
