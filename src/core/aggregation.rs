use serde::{Deserialize, Serialize};

use crate::core::Bar;
use crate::error::{ChartError, ChartResult};

/// Bucket width expressed as a multiple of the native bar granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeframe {
    multiplier: u32,
    native_granularity_secs: u32,
}

impl Timeframe {
    pub fn new(multiplier: u32, native_granularity_secs: u32) -> ChartResult<Self> {
        if multiplier == 0 {
            return Err(ChartError::InvalidTimeframe(multiplier));
        }
        if native_granularity_secs == 0 {
            return Err(ChartError::InvalidData(
                "native granularity must be > 0 seconds".to_owned(),
            ));
        }
        Ok(Self {
            multiplier,
            native_granularity_secs,
        })
    }

    /// The native timeframe itself (multiplier 1).
    pub fn native(native_granularity_secs: u32) -> ChartResult<Self> {
        Self::new(1, native_granularity_secs)
    }

    #[must_use]
    pub fn multiplier(self) -> u32 {
        self.multiplier
    }

    #[must_use]
    pub fn native_granularity_secs(self) -> u32 {
        self.native_granularity_secs
    }

    #[must_use]
    pub fn bucket_seconds(self) -> i64 {
        i64::from(self.multiplier) * i64::from(self.native_granularity_secs)
    }

    /// Floor-aligned bucket start for `timestamp`.
    #[must_use]
    pub fn bucket_start(self, timestamp: i64) -> i64 {
        let width = self.bucket_seconds();
        timestamp.div_euclid(width) * width
    }

    /// Short human label such as `5m`, `1h`, `1d` or `90s`.
    #[must_use]
    pub fn label(self) -> String {
        let secs = self.bucket_seconds();
        const DAY: i64 = 86_400;
        const HOUR: i64 = 3_600;
        const MINUTE: i64 = 60;
        if secs % DAY == 0 {
            format!("{}d", secs / DAY)
        } else if secs % HOUR == 0 {
            format!("{}h", secs / HOUR)
        } else if secs % MINUTE == 0 {
            format!("{}m", secs / MINUTE)
        } else {
            format!("{secs}s")
        }
    }
}

/// Downsamples a sorted native-resolution series into `multiplier`-wide buckets.
///
/// Buckets are keyed by `floor(timestamp / bucket) * bucket`, so aggregating any
/// bucket-aligned suffix reproduces the same output bars as the full series.
/// `multiplier <= 1` returns the input unchanged.
#[must_use]
pub fn aggregate(bars: &[Bar], multiplier: u32, native_granularity_secs: u32) -> Vec<Bar> {
    let Ok(timeframe) = Timeframe::new(multiplier, native_granularity_secs) else {
        return bars.to_vec();
    };
    aggregate_timeframe(bars, timeframe)
}

/// Same as [`aggregate`] with an already validated [`Timeframe`].
#[must_use]
pub fn aggregate_timeframe(bars: &[Bar], timeframe: Timeframe) -> Vec<Bar> {
    if timeframe.multiplier() <= 1 {
        return bars.to_vec();
    }

    let mut out = Vec::with_capacity(bars.len() / timeframe.multiplier() as usize + 1);
    let mut aggregator = BarAggregator::new(timeframe);
    for bar in bars {
        if let Some(closed) = aggregator.push_closing(*bar) {
            out.push(closed);
        }
    }
    if let Some(open) = aggregator.open_bucket() {
        out.push(open);
    }
    out
}

/// Outcome of feeding one native bar into a [`BarAggregator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AggregateUpdate {
    /// A new bucket started; the previous bucket (if any) is closed out.
    Opened(Bar),
    /// The open bucket absorbed the bar.
    Updated(Bar),
}

impl AggregateUpdate {
    #[must_use]
    pub fn bar(self) -> Bar {
        match self {
            Self::Opened(bar) | Self::Updated(bar) => bar,
        }
    }
}

/// Streaming aggregator holding a single open bucket.
///
/// Closed buckets are never revisited; only the open bucket mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct BarAggregator {
    timeframe: Timeframe,
    open: Option<Bar>,
}

impl BarAggregator {
    #[must_use]
    pub fn new(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            open: None,
        }
    }

    #[must_use]
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    #[must_use]
    pub fn open_bucket(&self) -> Option<Bar> {
        self.open
    }

    pub fn reset(&mut self) {
        self.open = None;
    }

    /// Feeds one bar and reports how the open bucket changed.
    pub fn push(&mut self, bar: Bar) -> AggregateUpdate {
        let key = self.timeframe.bucket_start(bar.timestamp);
        match self.open.as_mut() {
            Some(open) if open.timestamp == key => {
                open.high = open.high.max(bar.high);
                open.low = open.low.min(bar.low);
                open.close = bar.close;
                AggregateUpdate::Updated(*open)
            }
            _ => {
                let started = Bar { timestamp: key, ..bar };
                self.open = Some(started);
                AggregateUpdate::Opened(started)
            }
        }
    }

    /// Feeds one bar and returns the bucket it closed out, if any.
    fn push_closing(&mut self, bar: Bar) -> Option<Bar> {
        let previous = self.open;
        match self.push(bar) {
            AggregateUpdate::Opened(_) => previous,
            AggregateUpdate::Updated(_) => None,
        }
    }
}
