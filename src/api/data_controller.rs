use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::core::{Bar, infer_bar_interval, price_envelope};
use crate::error::{ChartError, ChartResult};

use super::Viewport;

impl Viewport {
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    #[must_use]
    pub fn last_bar(&self) -> Option<Bar> {
        self.bars.last().copied()
    }

    /// Seconds each bar spans on the time axis.
    #[must_use]
    pub fn bar_interval_secs(&self) -> i64 {
        self.bar_interval_secs
    }

    /// Replaces the series and fits the price axis to every bar.
    ///
    /// The bar interval is inferred from the smallest timestamp gap, keeping
    /// the current interval for single-bar or empty input. The time axis is
    /// left untouched; call [`Self::fit_time_to_bars`] or
    /// [`Self::scroll_to_latest`] to reposition it.
    pub fn load_bars(&mut self, bars: Vec<Bar>) -> ChartResult<()> {
        let interval = infer_bar_interval(&bars).unwrap_or(self.bar_interval_secs);
        self.load_bars_with_interval(bars, interval)
    }

    /// Same as [`Self::load_bars`] with an explicit bar interval.
    pub fn load_bars_with_interval(
        &mut self,
        bars: Vec<Bar>,
        bar_interval_secs: i64,
    ) -> ChartResult<()> {
        validate_series(&bars)?;
        self.set_bar_interval_secs(bar_interval_secs)?;
        self.bars = bars;

        if let Some((low, high)) = price_envelope(&self.bars) {
            self.price_axis
                .fit_range(low, high, self.config.price_padding_ratio)?;
        }

        debug!(
            count = self.bars.len(),
            bar_interval_secs,
            price_scale = self.price_axis.scale(),
            "loaded bars"
        );
        self.mark_dirty();
        Ok(())
    }

    /// Changes the bar interval and re-derives the time scale limits from it.
    pub fn set_bar_interval_secs(&mut self, bar_interval_secs: i64) -> ChartResult<()> {
        if bar_interval_secs <= 0 {
            return Err(ChartError::InvalidData(
                "bar interval must be > 0 seconds".to_owned(),
            ));
        }
        if bar_interval_secs != self.bar_interval_secs {
            self.bar_interval_secs = bar_interval_secs;
            self.sync_time_scale_bounds()?;
            self.mark_dirty();
        }
        Ok(())
    }

    /// Streams one bar into the series:
    /// - appends when `bar.timestamp` is newer than the latest bar
    /// - replaces the latest bar when the timestamps are equal
    /// - rejects out-of-order bars
    ///
    /// Axes are not refitted.
    pub fn push_bar(&mut self, bar: Bar) -> ChartResult<()> {
        validate_bar(&bar)?;
        match self
            .bars
            .last()
            .map_or(Ordering::Greater, |last| bar.timestamp.cmp(&last.timestamp))
        {
            Ordering::Less => {
                return Err(ChartError::InvalidData(
                    "bar update time must be >= latest bar time".to_owned(),
                ));
            }
            Ordering::Equal => {
                if let Some(last) = self.bars.last_mut() {
                    *last = bar;
                }
            }
            Ordering::Greater => self.bars.push(bar),
        }
        trace!(count = self.bars.len(), timestamp = bar.timestamp, "push bar");
        self.mark_dirty();
        Ok(())
    }

    /// Fits the whole series into the time axis minus the configured padding.
    ///
    /// When the series is too long to fit at the minimum bar spacing, the
    /// latest bars are shown instead.
    pub fn fit_time_to_bars(&mut self) -> ChartResult<()> {
        let (Some(first), Some(last)) = (self.bars.first(), self.bars.last()) else {
            return Ok(());
        };
        let start = first.timestamp as f64;
        let end = (last.timestamp + self.bar_interval_secs) as f64;

        self.time_axis
            .fit_range(start, end, self.config.time_padding_ratio)?;
        if (end - start) * self.time_axis.scale() > f64::from(self.time_axis.pixel_length()) {
            return self.scroll_to_latest();
        }
        self.clamp_time_anchor();
        self.mark_dirty();
        Ok(())
    }

    /// Scrolls so the latest bar sits one bar slot in from the right edge.
    pub fn scroll_to_latest(&mut self) -> ChartResult<()> {
        let Some(last) = self.bars.last() else {
            return Ok(());
        };
        let scale = self.time_axis.scale();
        let length = f64::from(self.time_axis.pixel_length());
        let spacing = self.bar_interval_secs as f64 * scale;
        let last_end = (last.timestamp + self.bar_interval_secs) as f64;

        self.time_axis
            .set_anchor_value(last_end - (length - spacing).max(0.0) / scale)?;
        self.clamp_time_anchor();
        self.mark_dirty();
        Ok(())
    }

    /// Fits the price axis to the bars currently on screen.
    pub fn fit_price_to_visible(&mut self) -> ChartResult<()> {
        let Some(range) = self.visible_index_range() else {
            return Ok(());
        };
        let Some((low, high)) = self
            .bars
            .get(range.as_range())
            .and_then(price_envelope)
        else {
            return Ok(());
        };
        self.price_axis
            .fit_range(low, high, self.config.price_padding_ratio)?;
        self.mark_dirty();
        Ok(())
    }
}

fn validate_bar(bar: &Bar) -> ChartResult<()> {
    Bar::new(bar.timestamp, bar.open, bar.high, bar.low, bar.close).map(|_| ())
}

fn validate_series(bars: &[Bar]) -> ChartResult<()> {
    for bar in bars {
        validate_bar(bar)?;
    }
    if bars.windows(2).any(|pair| pair[1].timestamp <= pair[0].timestamp) {
        return Err(ChartError::InvalidData(
            "bars must be sorted by strictly increasing timestamp".to_owned(),
        ));
    }
    Ok(())
}
