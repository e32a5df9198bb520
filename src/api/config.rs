use serde::{Deserialize, Serialize};

use crate::core::CanvasSize;
use crate::error::{ChartError, ChartResult};

use super::InteractionBehavior;

/// Public viewport bootstrap configuration.
///
/// Serializable so host applications can persist and reload chart setup.
/// Every field except `canvas` has a default and may be omitted from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub canvas: CanvasSize,
    /// Spacing of the raw bar feed, used until a series reveals its own.
    #[serde(default = "default_native_granularity_secs")]
    pub native_granularity_secs: u32,
    #[serde(default = "default_initial_bar_spacing_px")]
    pub initial_bar_spacing_px: f64,
    /// Narrowest allowed bar slot.
    #[serde(default = "default_min_bar_spacing_px")]
    pub min_bar_spacing_px: f64,
    /// Widest allowed bar slot as a fraction of the canvas width.
    #[serde(default = "default_max_bar_spacing_ratio")]
    pub max_bar_spacing_ratio: f64,
    #[serde(default = "default_price_padding_ratio")]
    pub price_padding_ratio: f64,
    #[serde(default = "default_time_padding_ratio")]
    pub time_padding_ratio: f64,
    #[serde(default = "default_price_scale_min")]
    pub price_scale_min: f64,
    #[serde(default = "default_price_scale_max")]
    pub price_scale_max: f64,
    #[serde(default = "default_price_tick_spacing_px")]
    pub price_tick_spacing_px: f64,
    #[serde(default = "default_time_label_spacing_px")]
    pub time_label_spacing_px: f64,
    #[serde(default = "default_body_width_ratio")]
    pub body_width_ratio: f64,
    /// Keeps at least one bar on screen while panning or zooming time.
    #[serde(default = "default_true")]
    pub clamp_time_pan: bool,
    #[serde(default)]
    pub interaction: InteractionBehavior,
}

impl ViewportConfig {
    #[must_use]
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            native_granularity_secs: default_native_granularity_secs(),
            initial_bar_spacing_px: default_initial_bar_spacing_px(),
            min_bar_spacing_px: default_min_bar_spacing_px(),
            max_bar_spacing_ratio: default_max_bar_spacing_ratio(),
            price_padding_ratio: default_price_padding_ratio(),
            time_padding_ratio: default_time_padding_ratio(),
            price_scale_min: default_price_scale_min(),
            price_scale_max: default_price_scale_max(),
            price_tick_spacing_px: default_price_tick_spacing_px(),
            time_label_spacing_px: default_time_label_spacing_px(),
            body_width_ratio: default_body_width_ratio(),
            clamp_time_pan: true,
            interaction: InteractionBehavior::default(),
        }
    }

    #[must_use]
    pub fn with_native_granularity_secs(mut self, secs: u32) -> Self {
        self.native_granularity_secs = secs;
        self
    }

    #[must_use]
    pub fn with_bar_spacing_px(mut self, initial: f64, min: f64, max_ratio: f64) -> Self {
        self.initial_bar_spacing_px = initial;
        self.min_bar_spacing_px = min;
        self.max_bar_spacing_ratio = max_ratio;
        self
    }

    #[must_use]
    pub fn with_price_scale_bounds(mut self, min: f64, max: f64) -> Self {
        self.price_scale_min = min;
        self.price_scale_max = max;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, time_ratio: f64, price_ratio: f64) -> Self {
        self.time_padding_ratio = time_ratio;
        self.price_padding_ratio = price_ratio;
        self
    }

    #[must_use]
    pub fn with_time_pan_clamp(mut self, enabled: bool) -> Self {
        self.clamp_time_pan = enabled;
        self
    }

    #[must_use]
    pub fn with_interaction(mut self, interaction: InteractionBehavior) -> Self {
        self.interaction = interaction;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.canvas.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        if self.native_granularity_secs == 0 {
            return Err(ChartError::InvalidData(
                "native granularity must be > 0 seconds".to_owned(),
            ));
        }
        ensure_positive(self.initial_bar_spacing_px, "initial bar spacing")?;
        // Scale limits are raised to the scale floor rather than rejected.
        ensure_finite(self.min_bar_spacing_px, "min bar spacing")?;
        ensure_finite(self.max_bar_spacing_ratio, "max bar spacing ratio")?;
        ensure_finite(self.price_scale_min, "price scale min")?;
        ensure_finite(self.price_scale_max, "price scale max")?;
        ensure_positive(self.price_tick_spacing_px, "price tick spacing")?;
        ensure_positive(self.time_label_spacing_px, "time label spacing")?;
        ensure_padding(self.price_padding_ratio, "price padding")?;
        ensure_padding(self.time_padding_ratio, "time padding")?;
        if !self.body_width_ratio.is_finite()
            || self.body_width_ratio <= 0.0
            || self.body_width_ratio > 1.0
        {
            return Err(ChartError::InvalidData(
                "body width ratio must be finite and within (0, 1]".to_owned(),
            ));
        }
        self.interaction.validate()
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn ensure_positive(value: f64, what: &str) -> ChartResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{what} must be finite and > 0"
        )));
    }
    Ok(())
}

fn ensure_finite(value: f64, what: &str) -> ChartResult<()> {
    if !value.is_finite() {
        return Err(ChartError::InvalidData(format!("{what} must be finite")));
    }
    Ok(())
}

fn ensure_padding(value: f64, what: &str) -> ChartResult<()> {
    if !value.is_finite() || !(0.0..0.5).contains(&value) {
        return Err(ChartError::InvalidData(format!(
            "{what} must be finite and within [0, 0.5)"
        )));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

fn default_native_granularity_secs() -> u32 {
    60
}

fn default_initial_bar_spacing_px() -> f64 {
    6.0
}

fn default_min_bar_spacing_px() -> f64 {
    1.0
}

fn default_max_bar_spacing_ratio() -> f64 {
    0.1
}

fn default_price_padding_ratio() -> f64 {
    0.05
}

fn default_time_padding_ratio() -> f64 {
    0.02
}

fn default_price_scale_min() -> f64 {
    1e-9
}

fn default_price_scale_max() -> f64 {
    1e9
}

fn default_price_tick_spacing_px() -> f64 {
    50.0
}

fn default_time_label_spacing_px() -> f64 {
    100.0
}

fn default_body_width_ratio() -> f64 {
    0.8
}
