use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid timeframe multiplier: {0}")]
    InvalidTimeframe(u32),

    #[error("shared viewport lock was poisoned by a panicking writer")]
    ViewportLockPoisoned,
}
