use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::interaction::AxisDragGesture;

/// Host-configurable input tuning for wheel zoom and axis drags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionBehavior {
    /// Per-notch time zoom factor; wheel-up multiplies the scale by it.
    #[serde(default = "default_time_wheel_zoom_step")]
    pub time_wheel_zoom_step: f64,
    /// Per-notch price zoom factor applied over the price axis.
    #[serde(default = "default_price_wheel_zoom_step")]
    pub price_wheel_zoom_step: f64,
    #[serde(default = "default_axis_drag_gesture")]
    pub price_axis_drag: AxisDragGesture,
    #[serde(default = "default_axis_drag_gesture")]
    pub time_axis_drag: AxisDragGesture,
    /// Natural-log zoom per dragged pixel for rescale gestures.
    #[serde(default = "default_drag_rescale_sensitivity")]
    pub drag_rescale_sensitivity: f64,
}

impl Default for InteractionBehavior {
    fn default() -> Self {
        Self {
            time_wheel_zoom_step: default_time_wheel_zoom_step(),
            price_wheel_zoom_step: default_price_wheel_zoom_step(),
            price_axis_drag: default_axis_drag_gesture(),
            time_axis_drag: default_axis_drag_gesture(),
            drag_rescale_sensitivity: default_drag_rescale_sensitivity(),
        }
    }
}

impl InteractionBehavior {
    pub fn validate(&self) -> ChartResult<()> {
        for (step, what) in [
            (self.time_wheel_zoom_step, "time wheel zoom step"),
            (self.price_wheel_zoom_step, "price wheel zoom step"),
        ] {
            if !step.is_finite() || step <= 1.0 {
                return Err(ChartError::InvalidData(format!(
                    "{what} must be finite and > 1"
                )));
            }
        }
        if !self.drag_rescale_sensitivity.is_finite() || self.drag_rescale_sensitivity <= 0.0 {
            return Err(ChartError::InvalidData(
                "drag rescale sensitivity must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Zoom factor for one wheel event; positive `delta_y` zooms out.
    #[must_use]
    pub fn wheel_zoom_factor(step: f64, delta_y: f64) -> f64 {
        if delta_y > 0.0 { 1.0 / step } else { step }
    }
}

fn default_time_wheel_zoom_step() -> f64 {
    1.1
}

fn default_price_wheel_zoom_step() -> f64 {
    1.2
}

fn default_axis_drag_gesture() -> AxisDragGesture {
    AxisDragGesture::Rescale
}

fn default_drag_rescale_sensitivity() -> f64 {
    0.005
}
