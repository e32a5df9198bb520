use tracing::debug;

use crate::core::{Bar, Timeframe, aggregate_timeframe};
use crate::error::ChartResult;

use super::{Viewport, ViewportConfig};

/// Owns the native-resolution series and feeds the viewport the bars of the
/// selected timeframe.
#[derive(Debug, Clone)]
pub struct ChartSession {
    native: Vec<Bar>,
    timeframe: Timeframe,
    viewport: Viewport,
}

impl ChartSession {
    pub fn new(config: ViewportConfig) -> ChartResult<Self> {
        let timeframe = Timeframe::native(config.native_granularity_secs)?;
        Ok(Self {
            native: Vec::new(),
            timeframe,
            viewport: Viewport::new(config)?,
        })
    }

    #[must_use]
    pub fn native_bars(&self) -> &[Bar] {
        &self.native
    }

    #[must_use]
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    #[must_use]
    pub fn into_viewport(self) -> Viewport {
        self.viewport
    }

    /// Replaces the native series, shows it at the current timeframe and
    /// scrolls to the latest bar.
    pub fn load_native_bars(&mut self, bars: Vec<Bar>) -> ChartResult<()> {
        let aggregated = aggregate_timeframe(&bars, self.timeframe);
        self.viewport
            .load_bars_with_interval(aggregated, self.timeframe.bucket_seconds())?;
        self.native = bars;
        self.viewport.fit_time_to_bars()?;
        debug!(
            native = self.native.len(),
            shown = self.viewport.bars().len(),
            timeframe = %self.timeframe.label(),
            "session loaded"
        );
        Ok(())
    }

    /// Switches to `multiplier` native bars per bucket.
    ///
    /// Bar spacing in pixels is preserved and the right edge stays pinned,
    /// so switching timeframe neither jumps nor rescales the view.
    pub fn set_timeframe(&mut self, multiplier: u32) -> ChartResult<()> {
        let timeframe = Timeframe::new(multiplier, self.timeframe.native_granularity_secs())?;
        if timeframe == self.timeframe {
            return Ok(());
        }

        let old_time_axis = self.viewport.time_axis();
        let right_edge_px = f64::from(old_time_axis.pixel_length());
        let right_edge_time = old_time_axis.to_value(right_edge_px);
        let bar_spacing_px = self.viewport.bar_interval_secs() as f64 * old_time_axis.scale();

        let aggregated = aggregate_timeframe(&self.native, timeframe);
        self.viewport
            .load_bars_with_interval(aggregated, timeframe.bucket_seconds())?;
        self.timeframe = timeframe;

        self.viewport.set_time_scale_pinned(
            bar_spacing_px / timeframe.bucket_seconds() as f64,
            right_edge_px,
            right_edge_time,
        )?;

        debug!(
            timeframe = %timeframe.label(),
            bars = self.viewport.bars().len(),
            "timeframe changed"
        );
        Ok(())
    }
}
