use super::ChartView;
use crate::plot_types::{ChartFrame, FrameOutcome};
use crate::rendering::paint_frame;
use crate::utils::date_formatter::format_time_precise;
use gpui::prelude::*;
use gpui::*;
use std::sync::Arc;

const TOOLTIP_WIDTH: f32 = 100.0;
const TOOLTIP_HEIGHT: f32 = 35.0;

impl ChartView {
    pub(super) fn schedule_next_cycle(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        cx.on_next_frame(window, |this, window, cx| this.run_render_cycle(window, cx));
    }

    /// Downsample, bound, project and build this frame's primitives, then
    /// schedule the next cycle unless the loop was cancelled meanwhile.
    fn run_render_cycle(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let viewport = self.viewport();
        let monitor = self.monitor.clone();
        let stream = self.stream.clone();

        let plot = &self.plot;
        let pipeline = &mut self.pipeline;
        let view = *self.controller.view();
        let cycle = self.render_loop.run_cycle(&monitor, || {
            let data = pipeline.prepare(&stream, plot);
            let frame = if viewport.is_empty() {
                ChartFrame::new(FrameOutcome::Empty)
            } else {
                plot.renderer().build_frame(&data.drawn, viewport, &view)
            };
            (data, frame)
        });

        let Some(((data, frame), report)) = cycle else {
            return;
        };
        if frame.outcome == FrameOutcome::Degenerate {
            tracing::trace!("degenerate bounds, frame skipped");
        }
        monitor.set_data_point_count(data.rows.len());
        self.data = data;
        self.frame = Arc::new(frame);
        cx.notify();

        if report.rescheduled {
            self.schedule_next_cycle(window, cx);
        }
    }

    pub(super) fn render_chart(&mut self, cx: &mut Context<Self>) -> Stateful<Div> {
        let bounds_cell = self.bounds.clone();
        let frame = self.frame.clone();
        let theme = &self.theme;
        let dragging = self.controller.is_dragging();

        let mut root = div()
            .id(("chart-view", cx.entity_id()))
            .relative()
            .size_full()
            .bg(theme.chart_background)
            .cursor(if dragging {
                CursorStyle::ClosedHand
            } else {
                CursorStyle::OpenHand
            })
            .child(
                canvas(
                    move |bounds, _, _| bounds_cell.set(bounds),
                    move |bounds, _, window, cx| paint_frame(&frame, bounds, window, cx),
                )
                .size_full(),
            )
            .child(
                div()
                    .absolute()
                    .top(px(10.0))
                    .right(px(10.0))
                    .px(px(8.0))
                    .py(px(4.0))
                    .rounded(px(4.0))
                    .bg(theme.zoom_info_background)
                    .text_size(px(12.0))
                    .text_color(theme.text)
                    .child(self.controller.zoom_label()),
            );

        if let Some(hit) = self.controller.hovered() {
            root = root.child(
                div()
                    .absolute()
                    .left(px(hit.anchor.x - TOOLTIP_WIDTH / 2.0))
                    .top(px(hit.anchor.y - 20.0 - TOOLTIP_HEIGHT))
                    .w(px(TOOLTIP_WIDTH))
                    .rounded(px(5.0))
                    .bg(theme.tooltip_background)
                    .text_color(theme.tooltip_text)
                    .text_size(px(12.0))
                    .flex()
                    .flex_col()
                    .items_center()
                    .child(format!("{:.2}", hit.point.value))
                    .child(format_time_precise(hit.point.timestamp)),
            );
        }

        root
    }
}
