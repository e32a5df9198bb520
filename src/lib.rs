//! candle-viewport: candlestick chart viewport engine.
//!
//! Bars are aggregated from a native feed into timeframe buckets, mapped to
//! pixels through linear time and price axis transforms, and repainted by a
//! dirty-flag scheduler against any [`render::Renderer`] backend.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{Viewport, ViewportConfig};
pub use error::{ChartError, ChartResult};
