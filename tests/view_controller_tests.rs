use gpui_stream_dashboard::data_types::{Category, DataPoint, ScreenPoint, Viewport, MAX_SCALE, MIN_SCALE};
use gpui_stream_dashboard::plot_types::{ChartKind, ChartPlot};
use gpui_stream_dashboard::view_controller::ViewController;

#[test]
fn test_zoom_steps_are_multiplicative() {
    let mut vc = ViewController::new();
    assert!((vc.zoom_wheel(-100.0) - 1.1).abs() < 1e-9);
    assert!((vc.zoom_wheel(-3.0) - 1.21).abs() < 1e-9);
    assert!((vc.zoom_wheel(40.0) - 1.089).abs() < 1e-9);
}

#[test]
fn test_zoom_clamped() {
    let mut vc = ViewController::new();
    for _ in 0..100 {
        vc.zoom_wheel(-1.0);
        assert!(vc.view().scale <= MAX_SCALE);
    }
    assert_eq!(vc.view().scale, MAX_SCALE);

    for _ in 0..100 {
        vc.zoom_wheel(1.0);
        assert!(vc.view().scale >= MIN_SCALE);
    }
    assert_eq!(vc.view().scale, MIN_SCALE);
}

#[test]
fn test_zero_delta_is_noop() {
    let mut vc = ViewController::new();
    assert_eq!(vc.zoom_wheel(0.0), 1.0);
    assert_eq!(vc.zoom_wheel(f32::NAN), 1.0);
}

#[test]
fn test_drag_translates_offset() {
    let mut vc = ViewController::new();
    assert!(!vc.drag_to(ScreenPoint::new(5.0, 5.0)));

    vc.begin_drag(ScreenPoint::new(10.0, 10.0));
    assert!(vc.is_dragging());
    assert!(vc.drag_to(ScreenPoint::new(30.0, 25.0)));
    assert_eq!(vc.view().offset, ScreenPoint::new(20.0, 15.0));
    assert!(vc.drag_to(ScreenPoint::new(35.0, 25.0)));
    assert_eq!(vc.view().offset, ScreenPoint::new(25.0, 15.0));

    vc.end_drag();
    assert!(!vc.is_dragging());
    assert!(!vc.drag_to(ScreenPoint::new(100.0, 100.0)));
    assert_eq!(vc.view().offset, ScreenPoint::new(25.0, 15.0));
}

#[test]
fn test_hover_suppressed_while_dragging() {
    let plot = ChartPlot::new(ChartKind::Bar);
    let points: Vec<DataPoint> = (0..4)
        .map(|i| DataPoint::new(i * 100, i as f64 * 10.0, Category::B))
        .collect();
    let viewport = Viewport::new(800.0, 400.0);
    let pointer = ScreenPoint::new(250.0, 200.0);

    let mut vc = ViewController::new();
    assert_eq!(vc.hover(&plot, &points, viewport, pointer).map(|h| h.index), Some(1));

    vc.begin_drag(pointer);
    assert!(vc.hovered().is_none());
    assert!(vc.hover(&plot, &points, viewport, pointer).is_none());

    vc.end_drag();
    vc.hover(&plot, &points, viewport, pointer);
    assert!(vc.hovered().is_some());
    vc.clear_hover();
    assert!(vc.hovered().is_none());
}

#[test]
fn test_zoom_label_and_reset() {
    let mut vc = ViewController::new();
    assert_eq!(vc.zoom_label(), "Zoom: 1.00 | Offset: (0, 0)");

    vc.zoom_wheel(-1.0);
    vc.begin_drag(ScreenPoint::new(0.0, 0.0));
    vc.drag_to(ScreenPoint::new(12.4, -7.6));
    assert_eq!(vc.zoom_label(), "Zoom: 1.10 | Offset: (12, -8)");

    vc.reset();
    assert_eq!(vc.zoom_label(), "Zoom: 1.00 | Offset: (0, 0)");
    assert!(!vc.is_dragging());
}
