use tracing::trace;

use crate::core::PixelPoint;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{AxisDragGesture, DragState, DragTarget};

use super::Viewport;

impl Viewport {
    /// Zooms time keeping the timestamp under `x` fixed.
    pub fn zoom_time_at(&mut self, x: f64, factor: f64) -> ChartResult<()> {
        self.time_axis.zoom_at(x, factor)?;
        self.clamp_time_anchor();
        trace!(x, factor, scale = self.time_axis.scale(), "zoom time");
        self.mark_dirty();
        Ok(())
    }

    /// Sets the time scale (clamped into bounds) and places `time` at pixel `x`.
    pub fn set_time_scale_pinned(&mut self, scale: f64, x: f64, time: f64) -> ChartResult<()> {
        ensure_finite_point(x, time)?;
        self.time_axis.set_scale(scale)?;
        self.time_axis
            .set_anchor_value(time - x / self.time_axis.scale())?;
        self.clamp_time_anchor();
        self.mark_dirty();
        Ok(())
    }

    /// Zooms price keeping the price under `y` fixed.
    pub fn zoom_price_at(&mut self, y: f64, factor: f64) -> ChartResult<()> {
        self.price_axis.zoom_at(y, factor)?;
        trace!(y, factor, scale = self.price_axis.scale(), "zoom price");
        self.mark_dirty();
        Ok(())
    }

    pub fn pan_time_by(&mut self, dx: f64) -> ChartResult<()> {
        self.time_axis.pan_by(dx)?;
        self.clamp_time_anchor();
        self.mark_dirty();
        Ok(())
    }

    pub fn pan_price_by(&mut self, dy: f64) -> ChartResult<()> {
        self.price_axis.pan_by(dy)?;
        self.mark_dirty();
        Ok(())
    }

    /// Starts a plot-area drag at `(x, y)`.
    pub fn begin_drag(&mut self, x: f64, y: f64) -> ChartResult<()> {
        self.begin_drag_on(DragTarget::Plot, x, y)
    }

    /// Starts a drag routed to `target`, capturing both axes as the baseline.
    pub fn begin_drag_on(&mut self, target: DragTarget, x: f64, y: f64) -> ChartResult<()> {
        ensure_finite_point(x, y)?;
        self.interaction.on_drag_start(DragState {
            target,
            start: PixelPoint::new(x, y),
            time_axis_at_start: self.time_axis,
            price_axis_at_start: self.price_axis,
        });
        trace!(?target, x, y, "drag start");
        self.mark_dirty();
        Ok(())
    }

    /// Applies the total displacement since the drag began.
    ///
    /// No-op when no drag is active.
    pub fn continue_drag(&mut self, x: f64, y: f64) -> ChartResult<()> {
        let Some(drag) = self.interaction.drag().copied() else {
            return Ok(());
        };
        ensure_finite_point(x, y)?;
        let (dx, dy) = drag.delta(x, y);
        let sensitivity = self.config.interaction.drag_rescale_sensitivity;

        let mut time = self.time_axis;
        let mut price = self.price_axis;
        time.set_scale(drag.time_axis_at_start.scale())?;
        time.set_anchor_value(drag.time_axis_at_start.anchor_value())?;
        price.set_scale(drag.price_axis_at_start.scale())?;
        price.set_anchor_value(drag.price_axis_at_start.anchor_value())?;

        match drag.target {
            DragTarget::Plot => {
                time.pan_by(dx)?;
                price.pan_by(dy)?;
            }
            DragTarget::TimeAxis(AxisDragGesture::Pan) => time.pan_by(dx)?,
            DragTarget::TimeAxis(AxisDragGesture::Rescale) => {
                time.rescale_by_drag(f64::from(time.pixel_length()), dx, sensitivity)?;
            }
            DragTarget::PriceAxis(AxisDragGesture::Pan) => price.pan_by(dy)?,
            DragTarget::PriceAxis(AxisDragGesture::Rescale) => {
                price.rescale_by_drag(f64::from(price.pixel_length()) / 2.0, dy, sensitivity)?;
            }
        }

        self.time_axis = time;
        self.price_axis = price;
        self.clamp_time_anchor();
        trace!(dx, dy, "drag move");
        self.mark_dirty();
        Ok(())
    }

    /// Ends the active drag; the axes keep their last position.
    pub fn end_drag(&mut self) {
        if self.interaction.on_drag_end() {
            trace!("drag end");
            self.mark_dirty();
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.interaction.drag().is_some()
    }

    pub fn set_cursor(&mut self, x: f64, y: f64) -> ChartResult<()> {
        ensure_finite_point(x, y)?;
        self.interaction.on_pointer_move(x, y);
        self.mark_dirty();
        Ok(())
    }

    pub fn clear_cursor(&mut self) {
        if self.interaction.on_pointer_leave() {
            self.mark_dirty();
        }
    }
}

fn ensure_finite_point(x: f64, y: f64) -> ChartResult<()> {
    if !x.is_finite() || !y.is_finite() {
        return Err(ChartError::InvalidData(
            "pointer position must be finite".to_owned(),
        ));
    }
    Ok(())
}
