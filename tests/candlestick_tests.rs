use candle_viewport::core::{AxisTransform, Bar, ScaleBounds, project_candles};

fn axes() -> (AxisTransform, AxisTransform) {
    let bounds = ScaleBounds::new(1e-9, 1e9).expect("bounds");
    // 0.1 px per second: a 60 s bar is 6 px wide.
    let time = AxisTransform::time(1_000, 0.1, 0.0, bounds).expect("time axis");
    // 5 px per price unit with 100 at the top edge.
    let price = AxisTransform::price(500, 5.0, 100.0, bounds).expect("price axis");
    (time, price)
}

#[test]
fn invalid_ohlc_is_rejected() {
    assert!(Bar::new(0, 120.0, 110.0, 90.0, 100.0).is_err());
    assert!(Bar::new(0, 100.0, 90.0, 110.0, 100.0).is_err());
    assert!(Bar::new(0, f64::NAN, 110.0, 90.0, 100.0).is_err());
}

#[test]
fn candle_is_centred_in_its_bar_span() {
    let (time, price) = axes();
    let bars = vec![Bar::new(600, 40.0, 60.0, 30.0, 50.0).expect("bar")];
    let candles = project_candles(&bars, time, price, 60, 0.5).expect("projection");

    let c = candles[0];
    assert!((c.center_x - 63.0).abs() <= 1e-9);
    assert!((c.body_left - 61.5).abs() <= 1e-9);
    assert!((c.body_right - 64.5).abs() <= 1e-9);
    assert!((c.wick_top - 200.0).abs() <= 1e-9);
    assert!((c.wick_bottom - 350.0).abs() <= 1e-9);
    assert!((c.body_top - 250.0).abs() <= 1e-9);
    assert!((c.body_bottom - 300.0).abs() <= 1e-9);
    assert!(c.is_bullish);
}

#[test]
fn body_never_narrower_than_one_pixel() {
    let bounds = ScaleBounds::new(1e-9, 1e9).expect("bounds");
    let time = AxisTransform::time(1_000, 0.001, 0.0, bounds).expect("time axis");
    let (_, price) = axes();
    let bars = vec![Bar::new(0, 50.0, 55.0, 45.0, 48.0).expect("bar")];

    let c = project_candles(&bars, time, price, 60, 0.8).expect("projection")[0];
    assert!((c.body_right - c.body_left - 1.0).abs() <= 1e-12);
    assert!(!c.is_bullish);
}

#[test]
fn projection_rejects_bad_arguments() {
    let (time, price) = axes();
    assert!(project_candles(&[], time, price, 0, 0.8).is_err());
    assert!(project_candles(&[], time, price, 60, 0.0).is_err());
    assert!(project_candles(&[], time, price, 60, 1.2).is_err());
    assert!(project_candles(&[], time, price, 60, 0.8).expect("empty").is_empty());
}

#[test]
fn projection_preserves_bar_order() {
    let (time, price) = axes();
    let bars: Vec<Bar> = (0..500)
        .map(|i| Bar::new(i * 60, 50.0, 51.0, 49.0, 50.5).expect("bar"))
        .collect();
    let candles = project_candles(&bars, time, price, 60, 0.8).expect("projection");

    assert_eq!(candles.len(), bars.len());
    assert!(candles.windows(2).all(|pair| pair[0].center_x < pair[1].center_x));
}
