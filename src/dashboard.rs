//! Top-level dashboard view: stream controls, the mounted chart, the
//! performance overlay and the data table.

use crate::aggregation::AggregationPeriod;
use crate::chart_view::{
    ChartView, GrowDataset, ResetDataset, ResetView, ShrinkDataset, ToggleStreaming, ZoomIn,
    ZoomOut,
};
use crate::data_types::TimeRange;
use crate::performance::PerformanceMonitor;
use crate::plot_types::ChartKind;
use crate::stream::DataStream;
use crate::table::{VirtualTable, ROW_HEIGHT, VISIBLE_ROWS};
use crate::theme::DashboardTheme;
use crate::utils::PixelsExt;
use gpui::prelude::*;
use gpui::*;
use std::sync::Arc;
use std::time::Duration;

const CHART_HEIGHT: f32 = 400.0;
const SAMPLE_PERIOD: Duration = Duration::from_secs(1);

pub struct Dashboard {
    stream: DataStream,
    monitor: Arc<PerformanceMonitor>,
    chart: Entity<ChartView>,
    kind: ChartKind,
    aggregation: AggregationPeriod,
    time_range: TimeRange,
    table: VirtualTable,
    theme: DashboardTheme,
    focus_handle: FocusHandle,
    _chart_observer: Subscription,
    _sampler: Task<()>,
}

impl Dashboard {
    pub fn new(stream: DataStream, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let monitor = Arc::new(PerformanceMonitor::new());
        let kind = ChartKind::default();
        let chart = Self::mount_chart(&stream, &monitor, kind, window, cx);
        let chart_observer = cx.observe(&chart, |_, _, cx| cx.notify());

        let sampled = monitor.clone();
        let sampler = cx.spawn(async move |this, cx| loop {
            cx.background_executor().timer(SAMPLE_PERIOD).await;
            let snapshot = sampled.sample();
            tracing::debug!(
                fps = snapshot.fps,
                memory_mb = snapshot.memory_usage_mb,
                render_ms = snapshot.render_time_ms,
                points = snapshot.data_point_count,
                "performance sample"
            );
            if this.update(cx, |_, cx| cx.notify()).is_err() {
                break;
            }
        });

        Self {
            aggregation: stream.aggregation(),
            stream,
            monitor,
            chart,
            kind,
            time_range: TimeRange::default(),
            table: VirtualTable::new(),
            theme: DashboardTheme::default(),
            focus_handle: cx.focus_handle(),
            _chart_observer: chart_observer,
            _sampler: sampler,
        }
    }

    fn mount_chart(
        stream: &DataStream,
        monitor: &Arc<PerformanceMonitor>,
        kind: ChartKind,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Entity<ChartView> {
        let shared = stream.shared().clone();
        let monitor = monitor.clone();
        cx.new(|cx| ChartView::new(shared, monitor, kind, window, cx))
    }

    pub fn stream(&self) -> &DataStream {
        &self.stream
    }

    pub fn chart(&self) -> &Entity<ChartView> {
        &self.chart
    }

    pub fn monitor(&self) -> &Arc<PerformanceMonitor> {
        &self.monitor
    }

    /// Unmounts the current chart and mounts a fresh one; pan and zoom
    /// start over.
    pub fn set_chart_kind(&mut self, kind: ChartKind, window: &mut Window, cx: &mut Context<Self>) {
        if kind == self.kind {
            return;
        }
        tracing::info!(from = %self.kind, to = %kind, "switching chart");
        self.chart.update(cx, |c, _| c.stop());
        let chart = Self::mount_chart(&self.stream, &self.monitor, kind, window, cx);
        let (aggregation, time_range) = (self.aggregation, self.time_range);
        chart.update(cx, |c, cx| {
            c.set_aggregation(aggregation, cx);
            c.set_time_range(time_range, cx);
        });
        self._chart_observer = cx.observe(&chart, |_, _, cx| cx.notify());
        self.chart = chart;
        self.kind = kind;
        cx.notify();
    }

    pub fn set_aggregation(&mut self, period: AggregationPeriod, cx: &mut Context<Self>) {
        self.aggregation = period;
        self.stream.set_aggregation(period);
        self.chart.update(cx, |c, cx| c.set_aggregation(period, cx));
        cx.notify();
    }

    pub fn set_time_range(&mut self, range: TimeRange, cx: &mut Context<Self>) {
        self.time_range = range;
        self.table = VirtualTable::new();
        self.chart.update(cx, |c, cx| c.set_time_range(range, cx));
        cx.notify();
    }

    fn toggle_streaming(&mut self, _: &ToggleStreaming, _: &mut Window, cx: &mut Context<Self>) {
        self.stream.toggle_streaming();
        cx.notify();
    }

    fn grow(&mut self, _: &GrowDataset, _: &mut Window, cx: &mut Context<Self>) {
        self.stream.grow();
        cx.notify();
    }

    fn shrink(&mut self, _: &ShrinkDataset, _: &mut Window, cx: &mut Context<Self>) {
        self.stream.shrink();
        cx.notify();
    }

    fn reset(&mut self, _: &ResetDataset, _: &mut Window, cx: &mut Context<Self>) {
        self.stream.reset();
        self.table = VirtualTable::new();
        cx.notify();
    }

    fn button(&self, id: impl Into<ElementId>, label: impl Into<SharedString>, active: bool) -> Stateful<Div> {
        let theme = &self.theme;
        div()
            .id(id)
            .px(px(12.0))
            .py(px(6.0))
            .rounded(px(4.0))
            .cursor_pointer()
            .text_size(px(13.0))
            .bg(if active {
                theme.button_active
            } else {
                theme.button_background
            })
            .text_color(if active {
                gpui::white()
            } else {
                theme.button_text
            })
            .child(label.into())
    }

    fn render_controls(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let streaming = self.stream.is_streaming();
        let stream_row = div()
            .flex()
            .gap_2()
            .child(
                self.button(
                    "toggle-streaming",
                    if streaming {
                        "Stop Streaming"
                    } else {
                        "Start Streaming"
                    },
                    streaming,
                )
                .on_click(cx.listener(|this, _, window, cx| {
                    this.toggle_streaming(&ToggleStreaming, window, cx)
                })),
            )
            .child(
                self.button("grow", "Add Data", false)
                    .on_click(cx.listener(|this, _, window, cx| this.grow(&GrowDataset, window, cx))),
            )
            .child(
                self.button("shrink", "Remove Data", false).on_click(
                    cx.listener(|this, _, window, cx| this.shrink(&ShrinkDataset, window, cx)),
                ),
            )
            .child(
                self.button("reset", "Reset", false)
                    .on_click(cx.listener(|this, _, window, cx| this.reset(&ResetDataset, window, cx))),
            );

        let kind_row = ChartKind::ALL.iter().fold(div().flex().gap_2(), |row, &kind| {
            row.child(
                self.button(("chart-kind", kind as usize), kind.label(), kind == self.kind)
                    .on_click(cx.listener(move |this, _, window, cx| {
                        this.set_chart_kind(kind, window, cx)
                    })),
            )
        });

        let aggregation_row =
            AggregationPeriod::ALL
                .iter()
                .fold(div().flex().gap_2(), |row, &period| {
                    row.child(
                        self.button(
                            ("aggregation", period as usize),
                            period.as_str(),
                            period == self.aggregation,
                        )
                        .on_click(cx.listener(move |this, _, _, cx| {
                            this.set_aggregation(period, cx)
                        })),
                    )
                });

        let range_row = TimeRange::ALL.iter().fold(div().flex().gap_2(), |row, &range| {
            row.child(
                self.button(("time-range", range as usize), range.label(), range == self.time_range)
                    .on_click(cx.listener(move |this, _, _, cx| this.set_time_range(range, cx))),
            )
        });

        div()
            .flex()
            .flex_col()
            .gap_2()
            .p(px(12.0))
            .bg(self.theme.panel_background)
            .border_1()
            .border_color(self.theme.panel_border)
            .rounded(px(6.0))
            .child(stream_row)
            .child(kind_row)
            .child(aggregation_row)
            .child(range_row)
    }

    fn render_performance(&self, visible: usize) -> impl IntoElement {
        let theme = &self.theme;
        let snapshot = self.monitor.latest();
        let (len, total) = {
            let buffer = self.stream.buffer();
            (buffer.len(), buffer.total_count())
        };
        let stat = |label: String| {
            div()
                .text_size(px(13.0))
                .text_color(theme.text)
                .child(label)
        };

        div()
            .flex()
            .gap_4()
            .p(px(10.0))
            .bg(theme.panel_background)
            .border_1()
            .border_color(theme.panel_border)
            .rounded(px(6.0))
            .child(
                div()
                    .text_size(px(13.0))
                    .text_color(theme.fps_color(f64::from(snapshot.fps)))
                    .child(format!("FPS: {}", snapshot.fps)),
            )
            .child(stat(format!("Avg FPS: {:.1}", self.monitor.average_fps())))
            .child(stat(format!("Render: {:.2}ms", snapshot.render_time_ms)))
            .child(stat(format!("Memory: {}MB", snapshot.memory_usage_mb)))
            .child(stat(format!("Visible: {visible}")))
            .child(stat(format!("Buffered: {len}")))
            .child(stat(format!("Total: {total}")))
    }

    fn render_table(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = &self.theme;
        let rows = self.chart.read(cx).rows();
        let window = self.table.window(rows.len());
        let visible = self.table.visible_rows(&rows);
        let shift = window.offset_y - self.table.scroll_top();

        let header = div()
            .flex()
            .h(px(ROW_HEIGHT))
            .items_center()
            .text_size(px(13.0))
            .text_color(theme.muted_text)
            .child(div().w(px(80.0)).child("#"))
            .child(div().w(px(140.0)).child("Time"))
            .child(div().w(px(120.0)).child("Value"))
            .child(div().w(px(100.0)).child("Category"));

        let body = visible.into_iter().fold(
            div().absolute().top(px(shift)).left_0().right_0(),
            |body, row| {
                body.child(
                    div()
                        .flex()
                        .h(px(ROW_HEIGHT))
                        .items_center()
                        .border_b_1()
                        .border_color(theme.panel_border)
                        .text_size(px(13.0))
                        .text_color(theme.text)
                        .child(div().w(px(80.0)).child(row.index.to_string()))
                        .child(div().w(px(140.0)).child(row.time))
                        .child(div().w(px(120.0)).child(row.value))
                        .child(div().w(px(100.0)).child(row.category)),
                )
            },
        );

        let row_count = rows.len();
        div()
            .flex()
            .flex_col()
            .p(px(10.0))
            .bg(theme.panel_background)
            .border_1()
            .border_color(theme.panel_border)
            .rounded(px(6.0))
            .child(
                div()
                    .text_size(px(12.0))
                    .text_color(theme.muted_text)
                    .child(format!(
                        "Rows {}-{} of {}",
                        window.start,
                        window.end,
                        row_count
                    )),
            )
            .child(header)
            .child(
                div()
                    .id("data-table")
                    .relative()
                    .overflow_hidden()
                    .h(px(ROW_HEIGHT * VISIBLE_ROWS as f32))
                    .on_scroll_wheel(cx.listener(move |this, event: &ScrollWheelEvent, _, cx| {
                        let dy = match event.delta {
                            ScrollDelta::Pixels(p) => p.y.as_f32(),
                            ScrollDelta::Lines(p) => p.y * ROW_HEIGHT,
                        };
                        this.table.scroll_by(-dy, row_count);
                        cx.notify();
                    }))
                    .child(body),
            )
    }
}

impl Focusable for Dashboard {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for Dashboard {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let visible = self.chart.read(cx).rows().len();

        div()
            .id("dashboard")
            .track_focus(&self.focus_handle)
            .key_context("Dashboard")
            .on_action(cx.listener(Self::toggle_streaming))
            .on_action(cx.listener(Self::grow))
            .on_action(cx.listener(Self::shrink))
            .on_action(cx.listener(Self::reset))
            .on_action(cx.listener(|this, _: &ZoomIn, _, cx| {
                this.chart.update(cx, |c, cx| c.zoom_step(true, cx))
            }))
            .on_action(cx.listener(|this, _: &ZoomOut, _, cx| {
                this.chart.update(cx, |c, cx| c.zoom_step(false, cx))
            }))
            .on_action(cx.listener(|this, _: &ResetView, _, cx| {
                this.chart.update(cx, |c, cx| c.reset_view(cx))
            }))
            .size_full()
            .flex()
            .flex_col()
            .gap_3()
            .p(px(16.0))
            .bg(self.theme.background)
            .overflow_y_scroll()
            .child(self.render_controls(cx))
            .child(self.render_performance(visible))
            .child(
                div()
                    .h(px(CHART_HEIGHT))
                    .w_full()
                    .border_1()
                    .border_color(self.theme.panel_border)
                    .rounded(px(6.0))
                    .overflow_hidden()
                    .child(self.chart.clone()),
            )
            .child(self.render_table(cx))
    }
}
