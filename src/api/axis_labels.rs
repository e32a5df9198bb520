use serde::{Deserialize, Serialize};

use crate::core::{TimeLabelPattern, format_price_label, format_time_label};

use super::Viewport;

/// One labelled tick on an axis strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub pixel: f64,
    pub label: String,
}

impl Viewport {
    /// Price ticks at "nice" multiples roughly `price_tick_spacing_px` apart.
    #[must_use]
    pub fn price_ticks(&self) -> Vec<AxisTick> {
        let spacing = self.config.price_tick_spacing_px;
        let step = self.price_axis.nice_tick_step(spacing);
        self.price_axis
            .tick_values(spacing)
            .into_iter()
            .map(|value| AxisTick {
                value,
                pixel: self.price_axis.to_pixel(value),
                label: format_price_label(value, step),
            })
            .collect()
    }

    /// Bar indices that carry a time label.
    ///
    /// Labels are spaced by a whole number of bars chosen so roughly one
    /// label lands every `time_label_spacing_px`. Indices are multiples of
    /// that step so labels stay put while panning.
    #[must_use]
    pub fn time_label_indices(&self) -> Vec<usize> {
        let Some(range) = self.visible_index_range() else {
            return Vec::new();
        };
        let width = f64::from(self.canvas.width);
        let approx_labels = (width / self.config.time_label_spacing_px).floor().max(1.0) as usize;
        let step = ((range.last - range.first) / approx_labels).max(1);
        let start = range.first.div_ceil(step) * step;
        (start..=range.last).step_by(step).collect()
    }

    /// Time ticks placed at the centre of each labelled bar.
    #[must_use]
    pub fn time_ticks(&self) -> Vec<AxisTick> {
        let pattern = TimeLabelPattern::for_visible_span(self.time_axis.value_span());
        let half_bar = self.bar_interval_secs as f64 / 2.0;
        self.time_label_indices()
            .into_iter()
            .map(|index| {
                let timestamp = self.bars[index].timestamp;
                let value = timestamp as f64 + half_bar;
                AxisTick {
                    value,
                    pixel: self.time_axis.to_pixel(value),
                    label: format_time_label(timestamp, pattern),
                }
            })
            .collect()
    }
}
