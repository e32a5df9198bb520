pub mod aggregation;
pub mod axis;
pub mod bar;
pub mod candlestick;
pub mod labels;
pub mod primitives;
pub mod sessions;
pub mod types;

pub use aggregation::{AggregateUpdate, BarAggregator, Timeframe, aggregate, aggregate_timeframe};
pub use axis::{AxisDirection, AxisTransform, MIN_RANGE_EPSILON, MIN_SCALE_FLOOR, ScaleBounds, nice_step};
pub use bar::{Bar, infer_bar_interval, price_envelope};
pub use candlestick::{CandleGeometry, project_candles};
pub use labels::{TimeLabelPattern, format_price_label, format_time_label};
pub use sessions::{index_at, previous_trading_dates, trading_dates};
pub use types::{CanvasSize, PixelPoint, VisibleRange};
