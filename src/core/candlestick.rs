use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{AxisTransform, Bar};
use crate::error::{ChartError, ChartResult};

/// Projected candle geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub center_x: f64,
    pub body_left: f64,
    pub body_right: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub is_bullish: bool,
}

/// Projects bars into render geometry.
///
/// Each bar occupies `[timestamp, timestamp + bar_interval_secs)` on the time
/// axis and is drawn centred in that span. The body is `body_width_ratio` of
/// the span's pixel width, never narrower than one pixel.
pub fn project_candles(
    bars: &[Bar],
    time_axis: AxisTransform,
    price_axis: AxisTransform,
    bar_interval_secs: i64,
    body_width_ratio: f64,
) -> ChartResult<Vec<CandleGeometry>> {
    if bar_interval_secs <= 0 {
        return Err(ChartError::InvalidData(
            "bar interval must be > 0 seconds".to_owned(),
        ));
    }
    if !body_width_ratio.is_finite() || body_width_ratio <= 0.0 || body_width_ratio > 1.0 {
        return Err(ChartError::InvalidData(
            "body width ratio must be finite and within (0, 1]".to_owned(),
        ));
    }

    let spacing_px = bar_interval_secs as f64 * time_axis.scale();
    let body_width_px = (spacing_px * body_width_ratio).max(1.0);

    #[cfg(feature = "parallel-projection")]
    {
        Ok(bars
            .par_iter()
            .map(|bar| {
                project_single_candle(*bar, time_axis, price_axis, bar_interval_secs, body_width_px)
            })
            .collect())
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        Ok(bars
            .iter()
            .map(|bar| {
                project_single_candle(*bar, time_axis, price_axis, bar_interval_secs, body_width_px)
            })
            .collect())
    }
}

fn project_single_candle(
    bar: Bar,
    time_axis: AxisTransform,
    price_axis: AxisTransform,
    bar_interval_secs: i64,
    body_width_px: f64,
) -> CandleGeometry {
    let half = body_width_px / 2.0;
    let center_x = time_axis.to_pixel(bar.timestamp as f64 + bar_interval_secs as f64 / 2.0);
    let open_y = price_axis.to_pixel(bar.open);
    let close_y = price_axis.to_pixel(bar.close);
    let high_y = price_axis.to_pixel(bar.high);
    let low_y = price_axis.to_pixel(bar.low);

    CandleGeometry {
        center_x,
        body_left: center_x - half,
        body_right: center_x + half,
        body_top: open_y.min(close_y),
        body_bottom: open_y.max(close_y),
        wick_top: high_y.min(low_y),
        wick_bottom: high_y.max(low_y),
        is_bullish: bar.is_bullish(),
    }
}
