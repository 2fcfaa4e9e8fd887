use gpui::TestAppContext;
use gpui_stream_dashboard::config::StreamConfig;
use gpui_stream_dashboard::performance::PerformanceMonitor;
use gpui_stream_dashboard::plot_types::ChartKind;
use gpui_stream_dashboard::render_loop::LoopState;
use gpui_stream_dashboard::stream::{DataStream, StreamShared};
use gpui_stream_dashboard::{ChartView, Dashboard};
use std::sync::Arc;

fn quiet_stream() -> DataStream {
    let config = StreamConfig {
        initial_count: 200,
        max_points: 1_000,
        auto_start_delay_ms: 60_000,
        seed: Some(11),
        ..StreamConfig::default()
    };
    DataStream::spawn(&config).unwrap()
}

#[gpui::test]
fn test_chart_view_mounts_scheduled(cx: &mut TestAppContext) {
    let shared = Arc::new(StreamShared::new(1_000));
    let monitor = Arc::new(PerformanceMonitor::new());

    let window = cx.add_window(|window, cx| {
        ChartView::new(shared.clone(), monitor.clone(), ChartKind::Line, window, cx)
    });

    let token = window
        .update(cx, |view, _window, _cx| {
            assert_eq!(view.kind(), ChartKind::Line);
            assert_eq!(view.loop_state(), LoopState::Scheduled);
            view.cancellation_token()
        })
        .unwrap();
    assert!(!token.is_cancelled());

    window
        .update(cx, |view, _window, _cx| view.stop())
        .unwrap();
    assert!(token.is_cancelled());
    window
        .update(cx, |view, _window, _cx| {
            assert_eq!(view.loop_state(), LoopState::Cancelled);
        })
        .unwrap();
}

#[gpui::test]
fn test_chart_view_zoom_and_reset(cx: &mut TestAppContext) {
    let shared = Arc::new(StreamShared::new(1_000));
    let monitor = Arc::new(PerformanceMonitor::new());
    let window = cx.add_window(|window, cx| {
        ChartView::new(shared.clone(), monitor.clone(), ChartKind::Bar, window, cx)
    });

    window
        .update(cx, |view, _window, cx| {
            view.zoom_step(true, cx);
            assert!(view.controller().view().scale > 1.0);
            view.zoom_step(false, cx);
            view.zoom_step(false, cx);
            assert!(view.controller().view().scale < 1.0);
            view.reset_view(cx);
            assert_eq!(view.controller().view().scale, 1.0);
        })
        .unwrap();
}

#[gpui::test]
fn test_switching_chart_kind_remounts(cx: &mut TestAppContext) {
    let stream = quiet_stream();
    let window = cx.add_window(|window, cx| Dashboard::new(stream, window, cx));

    let old_token = window
        .update(cx, |dashboard, _window, cx| {
            let chart = dashboard.chart().read(cx);
            assert_eq!(chart.kind(), ChartKind::Line);
            chart.cancellation_token()
        })
        .unwrap();

    window
        .update(cx, |dashboard, window, cx| {
            dashboard.set_chart_kind(ChartKind::Bar, window, cx);
        })
        .unwrap();
    cx.run_until_parked();

    assert!(old_token.is_cancelled());
    window
        .update(cx, |dashboard, _window, cx| {
            let chart = dashboard.chart().read(cx);
            assert_eq!(chart.kind(), ChartKind::Bar);
            assert_eq!(chart.loop_state(), LoopState::Scheduled);
            assert!(!chart.cancellation_token().is_cancelled());
        })
        .unwrap();
}
