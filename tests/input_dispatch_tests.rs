use candle_viewport::api::{InputDispatcher, InteractionBehavior, Viewport, ViewportConfig};
use candle_viewport::core::{Bar, CanvasSize};
use candle_viewport::interaction::{AxisDragGesture, ChartRegion, InputEvent, InteractionMode};

fn build_viewport(behavior: InteractionBehavior) -> Viewport {
    let config = ViewportConfig::new(CanvasSize::new(900, 450))
        .with_time_pan_clamp(false)
        .with_interaction(behavior);
    let mut viewport = Viewport::new(config).expect("viewport init");
    let bars = (0..150)
        .map(|i| {
            let base = 75.0 + (i % 9) as f64;
            Bar::new(i * 60, base, base + 1.0, base - 1.0, base + 0.5).expect("bar")
        })
        .collect();
    viewport.load_bars(bars).expect("load");
    viewport
}

fn dispatch(viewport: &mut Viewport, region: ChartRegion, event: InputEvent) {
    InputDispatcher::dispatch(viewport, region, event).expect("dispatch");
}

#[test]
fn wheel_up_over_plot_zooms_time_in_at_pointer() {
    let mut viewport = build_viewport(InteractionBehavior::default());
    let scale = viewport.time_axis().scale();
    let pinned = viewport.time_axis().to_value(300.0);
    let price_before = viewport.price_axis();

    dispatch(
        &mut viewport,
        ChartRegion::Plot,
        InputEvent::Wheel { x: 300.0, y: 10.0, delta_y: -120.0 },
    );

    assert!((viewport.time_axis().scale() - scale * 1.1).abs() <= 1e-12);
    assert!((viewport.time_axis().to_value(300.0) - pinned).abs() <= 1e-6);
    assert_eq!(viewport.price_axis(), price_before);
}

#[test]
fn wheel_down_zooms_out() {
    let mut viewport = build_viewport(InteractionBehavior::default());
    let scale = viewport.time_axis().scale();
    dispatch(
        &mut viewport,
        ChartRegion::TimeAxis,
        InputEvent::Wheel { x: 450.0, y: 440.0, delta_y: 3.0 },
    );
    assert!((viewport.time_axis().scale() - scale / 1.1).abs() <= 1e-12);
}

#[test]
fn wheel_over_price_axis_zooms_price_at_pointer() {
    let mut viewport = build_viewport(InteractionBehavior::default());
    let time_before = viewport.time_axis();
    let scale = viewport.price_axis().scale();
    let pinned = viewport.price_axis().to_value(120.0);

    dispatch(
        &mut viewport,
        ChartRegion::PriceAxis,
        InputEvent::Wheel { x: 880.0, y: 120.0, delta_y: -1.0 },
    );

    assert!((viewport.price_axis().scale() - scale * 1.2).abs() <= 1e-9);
    assert!((viewport.price_axis().to_value(120.0) - pinned).abs() <= 1e-9);
    assert_eq!(viewport.time_axis(), time_before);
}

#[test]
fn zero_wheel_delta_is_ignored() {
    let mut viewport = build_viewport(InteractionBehavior::default());
    viewport.consume_dirty();
    dispatch(
        &mut viewport,
        ChartRegion::Plot,
        InputEvent::Wheel { x: 1.0, y: 1.0, delta_y: 0.0 },
    );
    assert!(!viewport.is_dirty());
}

#[test]
fn plot_drag_sequence_pans_both_axes() {
    let mut viewport = build_viewport(InteractionBehavior::default());
    let time_value = viewport.time_axis().to_value(200.0);
    let price_value = viewport.price_axis().to_value(200.0);

    dispatch(&mut viewport, ChartRegion::Plot, InputEvent::DragStart { x: 200.0, y: 200.0 });
    assert_eq!(viewport.interaction_mode(), InteractionMode::Dragging);
    dispatch(&mut viewport, ChartRegion::Plot, InputEvent::DragMove { x: 260.0, y: 230.0 });
    dispatch(&mut viewport, ChartRegion::Plot, InputEvent::DragEnd);

    assert_eq!(viewport.interaction_mode(), InteractionMode::Idle);
    assert!((viewport.time_axis().to_pixel(time_value) - 260.0).abs() <= 1e-9);
    assert!((viewport.price_axis().to_pixel(price_value) - 230.0).abs() <= 1e-9);
}

#[test]
fn price_axis_drag_uses_configured_gesture() {
    let rescale = InteractionBehavior::default();
    let mut viewport = build_viewport(rescale);
    let scale = viewport.price_axis().scale();
    dispatch(&mut viewport, ChartRegion::PriceAxis, InputEvent::DragStart { x: 880.0, y: 100.0 });
    dispatch(&mut viewport, ChartRegion::PriceAxis, InputEvent::DragMove { x: 880.0, y: 40.0 });
    assert!(viewport.price_axis().scale() > scale);

    let pan = InteractionBehavior {
        price_axis_drag: AxisDragGesture::Pan,
        ..InteractionBehavior::default()
    };
    let mut viewport = build_viewport(pan);
    let scale = viewport.price_axis().scale();
    dispatch(&mut viewport, ChartRegion::PriceAxis, InputEvent::DragStart { x: 880.0, y: 100.0 });
    dispatch(&mut viewport, ChartRegion::PriceAxis, InputEvent::DragMove { x: 880.0, y: 40.0 });
    assert_eq!(viewport.price_axis().scale(), scale);
}

#[test]
fn pointer_moves_drive_crosshair() {
    let mut viewport = build_viewport(InteractionBehavior::default());

    dispatch(&mut viewport, ChartRegion::Plot, InputEvent::PointerMove { x: 33.0, y: 100.0 });
    assert_eq!(viewport.hovered_bar().map(|bar| bar.timestamp), Some(300));

    dispatch(&mut viewport, ChartRegion::PriceAxis, InputEvent::PointerMove { x: 880.0, y: 100.0 });
    assert!(viewport.cursor().is_none());

    dispatch(&mut viewport, ChartRegion::Plot, InputEvent::PointerMove { x: 10.0, y: 10.0 });
    dispatch(&mut viewport, ChartRegion::Plot, InputEvent::DragStart { x: 10.0, y: 10.0 });
    dispatch(&mut viewport, ChartRegion::Plot, InputEvent::PointerLeave);
    assert!(viewport.cursor().is_none());
    assert!(!viewport.is_dragging());
}

#[test]
fn behavior_validation_rejects_non_zooming_steps() {
    let behavior = InteractionBehavior {
        time_wheel_zoom_step: 1.0,
        ..InteractionBehavior::default()
    };
    let config = ViewportConfig::new(CanvasSize::new(100, 100)).with_interaction(behavior);
    assert!(Viewport::new(config).is_err());
}
