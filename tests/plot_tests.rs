use gpui_stream_dashboard::data_types::{Category, DataPoint, ScreenPoint, ViewTransform, Viewport};
use gpui_stream_dashboard::plot_types::{
    BarPlot, ChartKind, ChartPlot, FrameOutcome, HeatmapPlot, LabelAlign, LinePlot, PlotRenderer,
    Primitive, ScatterPlot,
};

fn p(timestamp: i64, value: f64) -> DataPoint {
    DataPoint::new(timestamp, value, Category::C)
}

fn ramp() -> Vec<DataPoint> {
    vec![p(0, 0.0), p(1_000, 50.0), p(2_000, 100.0)]
}

fn viewport() -> Viewport {
    Viewport::new(800.0, 400.0)
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-2
}

#[test]
fn test_point_budgets() {
    assert_eq!(ChartKind::Line.point_budget(), 2000);
    assert_eq!(ChartKind::Bar.point_budget(), 100);
    assert_eq!(ChartKind::Scatter.point_budget(), 1000);
    assert_eq!(ChartKind::Heatmap.point_budget(), 400);

    let points: Vec<DataPoint> = (0..50_000).map(|i| p(i * 100, (i % 100) as f64)).collect();
    for kind in ChartKind::ALL {
        let plot = ChartPlot::new(kind);
        let selected = plot.renderer().select_points(&points);
        assert!(selected.len() <= kind.point_budget(), "{kind}");
    }
}

#[test]
fn test_heatmap_selects_latest_cells() {
    let points: Vec<DataPoint> = (0..500).map(|i| p(i, i as f64)).collect();
    let selected = HeatmapPlot::default().select_points(&points);
    assert_eq!(selected.len(), 400);
    assert_eq!(selected.first().map(|p| p.timestamp), Some(100));
    assert_eq!(selected.last().map(|p| p.timestamp), Some(499));
}

#[test]
fn test_line_frame() {
    let frame = LinePlot::default().build_frame(&ramp(), viewport(), &ViewTransform::default());
    assert_eq!(frame.outcome, FrameOutcome::Drawn { points: 3 });

    let line = frame
        .primitives
        .iter()
        .filter_map(|prim| match prim {
            Primitive::Polyline { points, width, .. } if points.len() == 3 => Some((points, *width)),
            _ => None,
        })
        .next();
    let (points, width) = line.expect("data polyline");
    assert_eq!(width, 2.0);
    assert!(close(points[0].x, 60.0));
    assert!(close(points[2].x, 780.0));
    assert!(points[2].y < points[0].y, "higher values sit higher");

    let labels: Vec<(&str, LabelAlign)> = frame.labels().map(|(_, t, a)| (t, a)).collect();
    assert_eq!(labels, vec![("110", LabelAlign::Right), ("-10", LabelAlign::Right)]);
}

#[test]
fn test_line_zoom_scales_stroke() {
    let view = ViewTransform {
        scale: 2.0,
        offset: ScreenPoint::default(),
    };
    let frame = LinePlot::default().build_frame(&ramp(), viewport(), &view);
    let widths: Vec<f32> = frame
        .primitives
        .iter()
        .filter_map(|prim| match prim {
            Primitive::Polyline { points, width, .. } if points.len() == 3 => Some(*width),
            _ => None,
        })
        .collect();
    assert_eq!(widths, vec![4.0]);
}

#[test]
fn test_degenerate_frames_skip() {
    let flat = vec![p(0, 5.0), p(100, 5.0)];
    let view = ViewTransform::default();
    assert_eq!(
        LinePlot::default().build_frame(&flat, viewport(), &view).outcome,
        FrameOutcome::Degenerate
    );
    assert_eq!(
        BarPlot::default().build_frame(&flat, viewport(), &view).outcome,
        FrameOutcome::Degenerate
    );
    assert_eq!(
        HeatmapPlot::default().build_frame(&flat, viewport(), &view).outcome,
        FrameOutcome::Degenerate
    );

    let single = vec![p(0, 5.0)];
    let frame = ScatterPlot::default().build_frame(&single, viewport(), &view);
    assert_eq!(frame.outcome, FrameOutcome::Degenerate);
    assert!(frame.primitives.is_empty());

    let empty = LinePlot::default().build_frame(&[], viewport(), &view);
    assert_eq!(empty.outcome, FrameOutcome::Empty);
}

#[test]
fn test_bar_layout_and_hit() {
    let points = vec![p(0, 0.0), p(1, 10.0), p(2, 20.0), p(3, 30.0)];
    let view = ViewTransform::default();
    let frame = BarPlot::default().build_frame(&points, viewport(), &view);
    assert_eq!(frame.outcome, FrameOutcome::Drawn { points: 4 });

    let rects: Vec<(ScreenPoint, f32, f32)> = frame
        .primitives
        .iter()
        .filter_map(|prim| match prim {
            Primitive::Rect {
                origin,
                width,
                height,
                ..
            } => Some((*origin, *width, *height)),
            _ => None,
        })
        .collect();
    assert_eq!(rects.len(), 4);
    // 720px plot width over 4 bars, 2px gap
    assert!(close(rects[0].0.x, 60.0));
    assert!(close(rects[1].0.x, 240.0));
    assert!(close(rects[0].1, 178.0));
    assert!(rects[3].2 > rects[0].2);
    assert!(close(rects[3].0.y + rects[3].2, 360.0));

    let bar = BarPlot::default();
    let hit = bar.hit_test(&points, viewport(), &view, ScreenPoint::new(425.0, 100.0));
    assert_eq!(hit.map(|h| h.index), Some(2));
    assert!(bar
        .hit_test(&points, viewport(), &view, ScreenPoint::new(50.0, 100.0))
        .is_none());
    assert!(bar
        .hit_test(&points, viewport(), &view, ScreenPoint::new(790.0, 100.0))
        .is_none());
}

#[test]
fn test_bar_hit_follows_pan() {
    let points = vec![p(0, 0.0), p(1, 10.0), p(2, 20.0), p(3, 30.0)];
    let view = ViewTransform {
        scale: 1.0,
        offset: ScreenPoint::new(180.0, 0.0),
    };
    let hit = BarPlot::default().hit_test(&points, viewport(), &view, ScreenPoint::new(425.0, 0.0));
    assert_eq!(hit.map(|h| h.index), Some(1));
}

#[test]
fn test_line_hit_nearest_by_time() {
    let line = LinePlot::default();
    let view = ViewTransform::default();
    let hit = line.hit_test(&ramp(), viewport(), &view, ScreenPoint::new(420.0, 0.0));
    assert_eq!(hit.as_ref().map(|h| h.index), Some(1));
    assert_eq!(hit.map(|h| h.point.value), Some(50.0));

    let hit = line.hit_test(&ramp(), viewport(), &view, ScreenPoint::new(250.0, 0.0));
    assert_eq!(hit.map(|h| h.index), Some(1));
    let hit = line.hit_test(&ramp(), viewport(), &view, ScreenPoint::new(200.0, 0.0));
    assert_eq!(hit.map(|h| h.index), Some(0));

    assert!(line
        .hit_test(&ramp(), viewport(), &view, ScreenPoint::new(30.0, 0.0))
        .is_none());
}

#[test]
fn test_scatter_hit_within_radius() {
    let scatter = ScatterPlot::default();
    let view = ViewTransform::default();
    // ramp()[1] is drawn at (420, 190)
    let hit = scatter.hit_test(&ramp(), viewport(), &view, ScreenPoint::new(423.0, 194.0));
    assert_eq!(hit.map(|h| h.index), Some(1));
    assert!(scatter
        .hit_test(&ramp(), viewport(), &view, ScreenPoint::new(420.0, 215.0))
        .is_none());

    let frame = scatter.build_frame(&ramp(), viewport(), &view);
    let centers: Vec<ScreenPoint> = frame
        .primitives
        .iter()
        .filter_map(|prim| match prim {
            Primitive::Dot { center, radius, .. } => {
                assert_eq!(*radius, 2.0);
                Some(*center)
            }
            _ => None,
        })
        .collect();
    assert_eq!(centers.len(), 3);
    assert!(close(centers[1].x, 420.0));
    assert!(close(centers[1].y, 190.0));
}

#[test]
fn test_heatmap_cells_and_hit() {
    let points: Vec<DataPoint> = (0..400).map(|i| p(i, i as f64)).collect();
    let heatmap = HeatmapPlot::default();
    let view = ViewTransform::default();
    let vp = Viewport::new(400.0, 200.0);

    let frame = heatmap.build_frame(&points, vp, &view);
    assert_eq!(frame.outcome, FrameOutcome::Drawn { points: 400 });
    match &frame.primitives[21] {
        Primitive::Rect {
            origin,
            width,
            height,
            ..
        } => {
            assert!(close(origin.x, 20.0));
            assert!(close(origin.y, 10.0));
            assert!(close(*width, 19.0));
            assert!(close(*height, 9.0));
        }
        other => panic!("expected a cell, got {other:?}"),
    }

    let hit = heatmap.hit_test(&points, vp, &view, ScreenPoint::new(25.0, 15.0));
    assert_eq!(hit.map(|h| h.index), Some(21));
    assert!(heatmap
        .hit_test(&points, vp, &view, ScreenPoint::new(-1.0, 15.0))
        .is_none());

    let partial: Vec<DataPoint> = points[..30].to_vec();
    assert!(heatmap
        .hit_test(&partial, vp, &view, ScreenPoint::new(395.0, 195.0))
        .is_none());
}

#[test]
fn test_chart_kind_names() {
    assert_eq!("scatter".parse::<ChartKind>().unwrap(), ChartKind::Scatter);
    assert!("pie".parse::<ChartKind>().is_err());
    assert_eq!(ChartPlot::from(ChartKind::Heatmap).kind(), ChartKind::Heatmap);
    assert_eq!(ChartKind::default(), ChartKind::Line);
}
