use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Smallest admissible pixels-per-unit; lower configured bounds are raised to it.
pub const MIN_SCALE_FLOOR: f64 = 1e-12;

/// Value span substituted for a zero-width range in [`AxisTransform::fit_range`].
pub const MIN_RANGE_EPSILON: f64 = 1e-9;

const MAX_TICKS: usize = 4_096;

/// Orientation of an axis in pixel space.
///
/// `Time` grows left-to-right. `Price` grows bottom-to-top, so its pixel
/// coordinate decreases as the value increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisDirection {
    Time,
    Price,
}

impl AxisDirection {
    /// `+1` when pixels grow with the value, `-1` when they shrink.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Time => 1.0,
            Self::Price => -1.0,
        }
    }
}

/// Inclusive `[min, max]` range for an axis scale in pixels per unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    min: f64,
    max: f64,
}

impl ScaleBounds {
    /// Builds bounds, raising `min` to [`MIN_SCALE_FLOOR`] and `max` to at least `min`.
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "scale bounds must be finite".to_owned(),
            ));
        }
        let min = min.max(MIN_SCALE_FLOOR);
        Ok(Self {
            min,
            max: max.max(min),
        })
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn clamp(self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

/// Linear value/pixel mapping for one chart axis.
///
/// `scale` is pixels per data unit and `anchor_value` is the data value at
/// pixel zero. Both axes share this type; [`AxisDirection`] selects the sign:
///
/// - time: `pixel = (value - anchor) * scale`
/// - price: `pixel = (anchor - value) * scale`
///
/// Every mutation keeps `scale` within the configured [`ScaleBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTransform {
    direction: AxisDirection,
    scale: f64,
    anchor_value: f64,
    pixel_length: u32,
    bounds: ScaleBounds,
}

impl AxisTransform {
    pub fn new(
        direction: AxisDirection,
        pixel_length: u32,
        scale: f64,
        anchor_value: f64,
        bounds: ScaleBounds,
    ) -> ChartResult<Self> {
        validate_pixel_length(pixel_length)?;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis scale must be finite and > 0".to_owned(),
            ));
        }
        ensure_finite(anchor_value, "axis anchor")?;

        Ok(Self {
            direction,
            scale: bounds.clamp(scale),
            anchor_value,
            pixel_length,
            bounds,
        })
    }

    pub fn time(
        pixel_length: u32,
        scale: f64,
        anchor_value: f64,
        bounds: ScaleBounds,
    ) -> ChartResult<Self> {
        Self::new(AxisDirection::Time, pixel_length, scale, anchor_value, bounds)
    }

    pub fn price(
        pixel_length: u32,
        scale: f64,
        anchor_value: f64,
        bounds: ScaleBounds,
    ) -> ChartResult<Self> {
        Self::new(AxisDirection::Price, pixel_length, scale, anchor_value, bounds)
    }

    #[must_use]
    pub fn direction(self) -> AxisDirection {
        self.direction
    }

    #[must_use]
    pub fn scale(self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn anchor_value(self) -> f64 {
        self.anchor_value
    }

    #[must_use]
    pub fn pixel_length(self) -> u32 {
        self.pixel_length
    }

    #[must_use]
    pub fn scale_bounds(self) -> ScaleBounds {
        self.bounds
    }

    #[must_use]
    pub fn to_pixel(self, value: f64) -> f64 {
        self.direction.sign() * (value - self.anchor_value) * self.scale
    }

    #[must_use]
    pub fn to_value(self, pixel: f64) -> f64 {
        self.anchor_value + self.direction.sign() * pixel / self.scale
    }

    /// Data span covered by the full pixel extent.
    #[must_use]
    pub fn value_span(self) -> f64 {
        f64::from(self.pixel_length) / self.scale
    }

    /// Returns `(min, max)` of the values currently mapped onto `[0, pixel_length]`.
    #[must_use]
    pub fn visible_range(self) -> (f64, f64) {
        let a = self.to_value(0.0);
        let b = self.to_value(f64::from(self.pixel_length));
        (a.min(b), a.max(b))
    }

    pub fn set_anchor_value(&mut self, anchor_value: f64) -> ChartResult<()> {
        ensure_finite(anchor_value, "axis anchor")?;
        self.anchor_value = anchor_value;
        Ok(())
    }

    /// Sets the scale, clamped into bounds. The anchor is left untouched.
    pub fn set_scale(&mut self, scale: f64) -> ChartResult<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis scale must be finite and > 0".to_owned(),
            ));
        }
        self.scale = self.bounds.clamp(scale);
        Ok(())
    }

    /// Replaces scale bounds and re-clamps the current scale.
    pub fn set_scale_bounds(&mut self, bounds: ScaleBounds) {
        self.bounds = bounds;
        self.scale = bounds.clamp(self.scale);
    }

    pub fn set_pixel_length(&mut self, pixel_length: u32) -> ChartResult<()> {
        validate_pixel_length(pixel_length)?;
        self.pixel_length = pixel_length;
        Ok(())
    }

    /// Rescales by `factor` keeping the value under `pixel` fixed.
    ///
    /// `factor > 1` zooms in, `0 < factor < 1` zooms out.
    pub fn zoom_at(&mut self, pixel: f64, factor: f64) -> ChartResult<()> {
        ensure_finite(pixel, "zoom pixel")?;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }

        let pinned = self.to_value(pixel);
        self.scale = self.bounds.clamp(self.scale * factor);
        self.anchor_value = pinned - self.direction.sign() * pixel / self.scale;
        Ok(())
    }

    /// Translates content by `pixel_delta` screen pixels; `scale` is untouched.
    ///
    /// Positive deltas move content right (time) or down (price).
    pub fn pan_by(&mut self, pixel_delta: f64) -> ChartResult<()> {
        ensure_finite(pixel_delta, "pan delta")?;
        self.anchor_value -= self.direction.sign() * pixel_delta / self.scale;
        Ok(())
    }

    /// Drag-to-rescale around `anchor_pixel`.
    ///
    /// The zoom factor is `exp(sign * pixel_delta * sensitivity)`: dragging
    /// right on a time axis or up on a price axis zooms in.
    pub fn rescale_by_drag(
        &mut self,
        anchor_pixel: f64,
        pixel_delta: f64,
        sensitivity: f64,
    ) -> ChartResult<()> {
        ensure_finite(pixel_delta, "drag delta")?;
        if !sensitivity.is_finite() || sensitivity <= 0.0 {
            return Err(ChartError::InvalidData(
                "drag rescale sensitivity must be finite and > 0".to_owned(),
            ));
        }
        let factor = (self.direction.sign() * pixel_delta * sensitivity).exp();
        self.zoom_at(anchor_pixel, factor)
    }

    /// Fits `[min_value, max_value]` into the pixel extent minus `padding_fraction`
    /// on each side.
    ///
    /// A zero-width range is widened to [`MIN_RANGE_EPSILON`] around its centre.
    /// When the fitted scale is clamped by bounds the range stays centred.
    pub fn fit_range(
        &mut self,
        min_value: f64,
        max_value: f64,
        padding_fraction: f64,
    ) -> ChartResult<()> {
        ensure_finite(min_value, "fit min")?;
        ensure_finite(max_value, "fit max")?;
        if !padding_fraction.is_finite() || !(0.0..0.5).contains(&padding_fraction) {
            return Err(ChartError::InvalidData(
                "fit padding must be finite and within [0, 0.5)".to_owned(),
            ));
        }

        let (lo, hi) = (min_value.min(max_value), min_value.max(max_value));
        let span = (hi - lo).max(MIN_RANGE_EPSILON);
        let length = f64::from(self.pixel_length);
        self.scale = self
            .bounds
            .clamp(length * (1.0 - 2.0 * padding_fraction) / span);

        let center = lo + (hi - lo) / 2.0;
        self.anchor_value = center - self.direction.sign() * (length / 2.0) / self.scale;
        Ok(())
    }

    /// "Nice" tick step from {1, 2, 5, 10} x 10^k for roughly one tick per
    /// `approx_pixels_per_tick` pixels.
    #[must_use]
    pub fn nice_tick_step(self, approx_pixels_per_tick: f64) -> f64 {
        let length = f64::from(self.pixel_length);
        let spacing = if approx_pixels_per_tick.is_finite() && approx_pixels_per_tick > 0.0 {
            approx_pixels_per_tick.min(length)
        } else {
            length
        };
        let approx_ticks = length / spacing;
        nice_step(self.value_span() / approx_ticks)
    }

    /// Tick values at whole multiples of [`Self::nice_tick_step`] inside the visible range.
    #[must_use]
    pub fn tick_values(self, approx_pixels_per_tick: f64) -> Vec<f64> {
        let step = self.nice_tick_step(approx_pixels_per_tick);
        let (lo, hi) = self.visible_range();
        if !step.is_finite() || step <= 0.0 {
            return Vec::new();
        }

        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last)
            .take(MAX_TICKS)
            .map(|k| k as f64 * step)
            .collect()
    }
}

/// Rounds `rough` to 1, 2, 5 or 10 times its power of ten.
#[must_use]
pub fn nice_step(rough: f64) -> f64 {
    if !rough.is_finite() || rough <= 0.0 {
        return 1.0;
    }
    let magnitude = 10_f64.powi(rough.log10().floor() as i32);
    let residual = rough / magnitude;
    let nice = if residual < 1.5 {
        1.0
    } else if residual < 3.0 {
        2.0
    } else if residual < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn validate_pixel_length(pixel_length: u32) -> ChartResult<()> {
    if pixel_length == 0 {
        return Err(ChartError::InvalidData(
            "axis pixel length must be > 0".to_owned(),
        ));
    }
    Ok(())
}

fn ensure_finite(value: f64, what: &str) -> ChartResult<()> {
    if !value.is_finite() {
        return Err(ChartError::InvalidData(format!("{what} must be finite")));
    }
    Ok(())
}
