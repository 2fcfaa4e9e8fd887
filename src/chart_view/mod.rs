pub mod actions;
pub mod input;
pub mod renderer;

pub use actions::*;

use crate::aggregation::AggregationPeriod;
use crate::data_types::{DataPoint, TimeRange, Viewport};
use crate::performance::PerformanceMonitor;
use crate::pipeline::{DisplayData, DisplayPipeline};
use crate::plot_types::{ChartFrame, ChartKind, ChartPlot, FrameOutcome};
use crate::render_loop::{CancellationToken, LoopState, RenderLoop};
use crate::stream::StreamShared;
use crate::theme::DashboardTheme;
use crate::utils::PixelsExt;
use crate::view_controller::ViewController;
use gpui::prelude::*;
use gpui::*;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

/// One mounted chart.
///
/// Owns its pan/zoom state and its render loop; both end with the view.
/// Switching geometry means mounting a new view.
pub struct ChartView {
    stream: Arc<StreamShared>,
    monitor: Arc<PerformanceMonitor>,
    plot: ChartPlot,
    pipeline: DisplayPipeline,
    controller: ViewController,
    render_loop: RenderLoop,
    theme: DashboardTheme,

    /// Canvas bounds from the last layout.
    bounds: Rc<Cell<Bounds<Pixels>>>,
    data: DisplayData,
    frame: Arc<ChartFrame>,
}

impl ChartView {
    pub fn new(
        stream: Arc<StreamShared>,
        monitor: Arc<PerformanceMonitor>,
        kind: ChartKind,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let mut view = Self {
            stream,
            monitor,
            plot: ChartPlot::new(kind),
            pipeline: DisplayPipeline::default(),
            controller: ViewController::new(),
            render_loop: RenderLoop::new(),
            theme: DashboardTheme::default(),
            bounds: Rc::new(Cell::new(Bounds::default())),
            data: DisplayData::default(),
            frame: Arc::new(ChartFrame::new(FrameOutcome::Empty)),
        };
        if view.render_loop.start() {
            view.schedule_next_cycle(window, cx);
        }
        tracing::debug!(%kind, "chart mounted");
        view
    }

    pub fn kind(&self) -> ChartKind {
        self.plot.kind()
    }

    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    pub fn loop_state(&self) -> LoopState {
        self.render_loop.state()
    }

    /// Cancelled once this view stops drawing, including on drop.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.render_loop.token()
    }

    pub fn set_aggregation(&mut self, period: AggregationPeriod, cx: &mut Context<Self>) {
        if self.pipeline.aggregation != period {
            self.pipeline.aggregation = period;
            self.pipeline.invalidate();
            cx.notify();
        }
    }

    pub fn set_time_range(&mut self, range: TimeRange, cx: &mut Context<Self>) {
        if self.pipeline.time_range != range {
            self.pipeline.time_range = range;
            self.pipeline.invalidate();
            cx.notify();
        }
    }

    /// Rows behind the last drawn frame, for the table.
    pub fn rows(&self) -> Arc<Vec<DataPoint>> {
        self.data.rows.clone()
    }

    pub fn last_frame(&self) -> Arc<ChartFrame> {
        self.frame.clone()
    }

    /// One wheel step from the keyboard; `zoom_in` picks the direction.
    pub fn zoom_step(&mut self, zoom_in: bool, cx: &mut Context<Self>) {
        self.controller.zoom_wheel(if zoom_in { -1.0 } else { 1.0 });
        cx.notify();
    }

    pub fn reset_view(&mut self, cx: &mut Context<Self>) {
        self.controller.reset();
        cx.notify();
    }

    /// Stops the render loop; the view keeps its last frame.
    pub fn stop(&mut self) {
        self.render_loop.cancel();
    }

    fn viewport(&self) -> Viewport {
        let size = self.bounds.get().size;
        Viewport::new(size.width.as_f32(), size.height.as_f32())
    }
}

impl Drop for ChartView {
    fn drop(&mut self) {
        self.render_loop.cancel();
        tracing::debug!(kind = %self.plot.kind(), "chart unmounted");
    }
}

impl Render for ChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let element = self.render_chart(cx);

        element
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, event: &MouseDownEvent, _, cx| {
                    this.handle_mouse_down(event, cx)
                }),
            )
            .on_mouse_move(cx.listener(|this, event: &MouseMoveEvent, _, cx| {
                this.handle_mouse_move(event, cx)
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, event: &MouseUpEvent, _, cx| this.handle_mouse_up(event, cx)),
            )
            .on_mouse_up_out(
                MouseButton::Left,
                cx.listener(|this, event: &MouseUpEvent, _, cx| this.handle_mouse_up(event, cx)),
            )
            .on_scroll_wheel(cx.listener(|this, event: &ScrollWheelEvent, _, cx| {
                this.handle_scroll_wheel(event, cx)
            }))
            .on_hover(cx.listener(|this, hovered: &bool, _, cx| {
                if !*hovered {
                    this.handle_pointer_left(cx);
                }
            }))
    }
}
