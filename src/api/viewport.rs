use tracing::{debug, warn};

use crate::core::{AxisTransform, Bar, CanvasSize, PixelPoint, ScaleBounds};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{InteractionMode, InteractionState};
use crate::render::RenderFrame;

use super::ViewportConfig;

/// Chart view state: both axis transforms, the bar series, drag state and
/// the dirty flag consumed by the render scheduler.
///
/// The `impl` is split by concern across `data_controller`, `hit_test`,
/// `interaction_controller`, `axis_labels` and `snapshot`.
#[derive(Debug, Clone)]
pub struct Viewport {
    pub(super) config: ViewportConfig,
    pub(super) canvas: CanvasSize,
    pub(super) time_axis: AxisTransform,
    pub(super) price_axis: AxisTransform,
    pub(super) bars: Vec<Bar>,
    pub(super) bar_interval_secs: i64,
    pub(super) interaction: InteractionState,
    pub(super) dirty: bool,
}

impl Viewport {
    pub fn new(config: ViewportConfig) -> ChartResult<Self> {
        config.validate()?;
        let canvas = config.canvas;
        let bar_interval_secs = i64::from(config.native_granularity_secs);

        let time_bounds = time_scale_bounds(&config, canvas.width, bar_interval_secs)?;
        let time_axis = AxisTransform::time(
            canvas.width,
            config.initial_bar_spacing_px / bar_interval_secs as f64,
            0.0,
            time_bounds,
        )?;

        let price_bounds = ScaleBounds::new(config.price_scale_min, config.price_scale_max)?;
        let mut price_axis = AxisTransform::price(canvas.height, 1.0, 0.0, price_bounds)?;
        price_axis.fit_range(0.0, 1.0, config.price_padding_ratio)?;

        debug!(
            width = canvas.width,
            height = canvas.height,
            bar_interval_secs,
            "viewport created"
        );

        Ok(Self {
            config,
            canvas,
            time_axis,
            price_axis,
            bars: Vec::new(),
            bar_interval_secs,
            interaction: InteractionState::default(),
            dirty: true,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    #[must_use]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    #[must_use]
    pub fn time_axis(&self) -> AxisTransform {
        self.time_axis
    }

    #[must_use]
    pub fn price_axis(&self) -> AxisTransform {
        self.price_axis
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn cursor(&self) -> Option<PixelPoint> {
        self.interaction.cursor()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns the dirty flag and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Applies a new canvas size.
    ///
    /// Time keeps its bar spacing and left edge, revealing or hiding bars on
    /// the right. Price keeps its visible range by stretching the scale.
    pub fn resize(&mut self, width: u32, height: u32) -> ChartResult<()> {
        let canvas = CanvasSize::new(width, height);
        if !canvas.is_valid() {
            return Err(ChartError::InvalidViewport { width, height });
        }
        if canvas == self.canvas {
            return Ok(());
        }

        let price_ratio = f64::from(height) / f64::from(self.canvas.height);
        let price_scale = self.price_axis.scale() * price_ratio;

        self.time_axis.set_pixel_length(width)?;
        self.price_axis.set_pixel_length(height)?;
        self.price_axis.set_scale(price_scale)?;
        self.canvas = canvas;
        self.sync_time_scale_bounds()?;
        self.clamp_time_anchor();

        debug!(width, height, "viewport resized");
        self.mark_dirty();
        Ok(())
    }

    /// Read-only frame for the current state.
    #[must_use]
    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame {
            canvas: self.canvas,
            bars: &self.bars,
            visible: self.visible_index_range(),
            time_axis: self.time_axis,
            price_axis: self.price_axis,
            bar_interval_secs: self.bar_interval_secs,
            body_width_ratio: self.config.body_width_ratio,
            cursor: self.interaction.cursor(),
            hovered: self.hovered_bar(),
        }
    }

    pub(super) fn sync_time_scale_bounds(&mut self) -> ChartResult<()> {
        let bounds = time_scale_bounds(&self.config, self.canvas.width, self.bar_interval_secs)?;
        self.time_axis.set_scale_bounds(bounds);
        Ok(())
    }

    /// Keeps at least one bar slot of data on screen when pan clamping is on.
    pub(super) fn clamp_time_anchor(&mut self) {
        if !self.config.clamp_time_pan {
            return;
        }
        let (Some(first), Some(last)) = (self.bars.first(), self.bars.last()) else {
            return;
        };

        let scale = self.time_axis.scale();
        let length = f64::from(self.time_axis.pixel_length());
        let spacing = (self.bar_interval_secs as f64 * scale).min(length / 2.0);
        let last_end = (last.timestamp + self.bar_interval_secs) as f64;
        let upper = last_end - spacing / scale;
        let lower = (first.timestamp as f64 - (length - spacing) / scale).min(upper);

        let anchor = self.time_axis.anchor_value();
        let clamped = anchor.clamp(lower, upper);
        if clamped != anchor {
            if let Err(err) = self.time_axis.set_anchor_value(clamped) {
                warn!(error = %err, "skipping time pan clamp");
            }
        }
    }
}

/// Time scale bounds derived from bar-slot pixel limits and the bar interval.
fn time_scale_bounds(
    config: &ViewportConfig,
    width: u32,
    bar_interval_secs: i64,
) -> ChartResult<ScaleBounds> {
    let interval = bar_interval_secs as f64;
    let min_px = config.min_bar_spacing_px;
    let max_px = (f64::from(width) * config.max_bar_spacing_ratio).max(min_px);
    ScaleBounds::new(min_px / interval, max_px / interval)
}
