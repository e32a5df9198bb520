use candle_viewport::core::{
    AggregateUpdate, Bar, BarAggregator, Timeframe, aggregate, aggregate_timeframe,
};
use proptest::prelude::*;

fn bar(timestamp: i64, open: f64, high: f64, low: f64, close: f64) -> Bar {
    Bar::new(timestamp, open, high, low, close).expect("valid bar")
}

fn minute_series(count: usize, start: i64) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let base = 100.0 + (i as f64 * 0.7).sin() * 5.0;
            let close = base + if i % 3 == 0 { 0.4 } else { -0.3 };
            bar(
                start + i as i64 * 60,
                base,
                base.max(close) + 0.5,
                base.min(close) - 0.5,
                close,
            )
        })
        .collect()
}

#[test]
fn two_minute_buckets_merge_ohlc() {
    let bars = vec![
        bar(0, 10.0, 12.0, 9.0, 11.0),
        bar(60, 11.0, 13.0, 10.0, 12.0),
        bar(120, 12.0, 14.0, 11.0, 13.0),
        bar(180, 13.0, 15.0, 12.0, 14.0),
    ];

    let out = aggregate(&bars, 2, 60);

    assert_eq!(
        out,
        vec![
            bar(0, 10.0, 13.0, 9.0, 12.0),
            bar(120, 12.0, 15.0, 11.0, 14.0),
        ]
    );
}

#[test]
fn multiplier_one_or_zero_is_identity() {
    let bars = minute_series(7, 30);
    assert_eq!(aggregate(&bars, 1, 60), bars);
    assert_eq!(aggregate(&bars, 0, 60), bars);
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(aggregate(&[], 5, 60).is_empty());
}

#[test]
fn trailing_partial_bucket_is_flushed() {
    let bars = minute_series(7, 0);
    let out = aggregate(&bars, 5, 60);

    assert_eq!(out.len(), 2);
    assert_eq!(out[1].timestamp, 300);
    assert_eq!(out[1].open, bars[5].open);
    assert_eq!(out[1].close, bars[6].close);
}

#[test]
fn unaligned_first_bar_is_bucketed_by_floor() {
    let bars = minute_series(4, 120);
    let out = aggregate(&bars, 5, 60);

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].timestamp, 0);
    assert_eq!(out[1].timestamp, 300);
}

#[test]
fn gaps_between_bars_do_not_merge_distinct_buckets() {
    let bars = vec![
        bar(0, 1.0, 2.0, 0.5, 1.5),
        bar(3_600, 2.0, 3.0, 1.5, 2.5),
    ];
    let out = aggregate(&bars, 5, 60);
    assert_eq!(out.len(), 2);
    assert_eq!(out[1].timestamp, 3_600);
}

#[test]
fn streaming_aggregator_reports_open_and_update() {
    let timeframe = Timeframe::new(2, 60).expect("timeframe");
    let mut aggregator = BarAggregator::new(timeframe);

    let first = aggregator.push(bar(0, 10.0, 12.0, 9.0, 11.0));
    let second = aggregator.push(bar(60, 11.0, 13.0, 10.0, 12.0));
    let third = aggregator.push(bar(120, 12.0, 14.0, 11.0, 13.0));

    assert_eq!(first, AggregateUpdate::Opened(bar(0, 10.0, 12.0, 9.0, 11.0)));
    assert_eq!(second, AggregateUpdate::Updated(bar(0, 10.0, 13.0, 9.0, 12.0)));
    assert!(matches!(third, AggregateUpdate::Opened(b) if b.timestamp == 120));
    assert_eq!(aggregator.open_bucket().map(|b| b.timestamp), Some(120));
}

#[test]
fn timeframe_rejects_zero_multiplier() {
    assert!(Timeframe::new(0, 60).is_err());
    assert!(Timeframe::new(3, 0).is_err());
}

proptest! {
    #[test]
    fn bucket_boundaries_are_multiples_of_bucket_width(
        count in 0usize..300,
        start_minute in -500i64..500,
        multiplier in 1u32..20
    ) {
        let bars = minute_series(count, start_minute * 60);
        let width = i64::from(multiplier) * 60;
        for out in aggregate(&bars, multiplier, 60) {
            prop_assert_eq!(out.timestamp.rem_euclid(width), 0);
            prop_assert!(out.low <= out.open && out.open <= out.high);
            prop_assert!(out.low <= out.close && out.close <= out.high);
        }
    }

    #[test]
    fn aligned_suffix_reproduces_full_series_buckets(
        count in 1usize..300,
        multiplier in 2u32..15,
        cut in 0usize..300
    ) {
        let bars = minute_series(count, 0);
        let timeframe = Timeframe::new(multiplier, 60).expect("timeframe");
        let full = aggregate_timeframe(&bars, timeframe);

        // Move the cut forward to the next bucket boundary.
        let mut cut = cut.min(bars.len());
        while cut < bars.len() && bars[cut].timestamp % timeframe.bucket_seconds() != 0 {
            cut += 1;
        }
        let suffix = aggregate_timeframe(&bars[cut..], timeframe);
        let tail = &full[full.len() - suffix.len()..];

        prop_assert_eq!(suffix.as_slice(), tail);
    }

    #[test]
    fn streaming_matches_batch(count in 0usize..200, multiplier in 1u32..12) {
        let bars = minute_series(count, 0);
        let timeframe = Timeframe::new(multiplier, 60).expect("timeframe");
        let mut aggregator = BarAggregator::new(timeframe);
        let mut streamed: Vec<Bar> = Vec::new();
        for native in &bars {
            match aggregator.push(*native) {
                AggregateUpdate::Opened(b) => streamed.push(b),
                AggregateUpdate::Updated(b) => {
                    if let Some(last) = streamed.last_mut() {
                        *last = b;
                    }
                }
            }
        }
        prop_assert_eq!(streamed, aggregate_timeframe(&bars, timeframe));
    }
}
