use super::{ChartFrame, ChartKind, FrameOutcome, HoverHit, PlotRenderer, Primitive};
use crate::data_types::{BarPlotConfig, ChartBounds, DataPoint, ScreenPoint, ViewTransform, Viewport};

/// Bar plot type
///
/// Bars are laid out by index across the plot width. Zoom widens the bars
/// and pan translates them; bar heights are not scaled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BarPlot {
    pub config: BarPlotConfig,
}

impl BarPlot {
    pub fn new(config: BarPlotConfig) -> Self {
        Self { config }
    }

    fn bar_width(&self, count: usize, viewport: &Viewport, view: &ViewTransform) -> f32 {
        viewport.plot_width() / count as f32 * view.scale as f32
    }
}

impl PlotRenderer for BarPlot {
    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn build_frame(
        &self,
        points: &[DataPoint],
        viewport: Viewport,
        view: &ViewTransform,
    ) -> ChartFrame {
        let mut frame = ChartFrame::new(FrameOutcome::Empty);
        if points.is_empty() {
            return frame;
        }

        let bounds = ChartBounds::from_points(points);
        // Only the value range matters: bars are placed by index.
        if !(bounds.y_span() > f64::EPSILON) {
            frame.outcome = FrameOutcome::Degenerate;
            return frame;
        }

        let p = viewport.padding;
        let bar_width = self.bar_width(points.len(), &viewport, view);
        let plot_height = viewport.plot_height();
        let baseline = viewport.height - p.bottom + view.offset.y;

        for (i, point) in points.iter().enumerate() {
            let height = ((point.value - bounds.min_y) / bounds.y_span()) as f32 * plot_height;
            let x = p.left + i as f32 * bar_width + view.offset.x;
            frame.push(Primitive::Rect {
                origin: ScreenPoint::new(x, baseline - height),
                width: (bar_width - self.config.gap_px).max(0.0),
                height,
                color: self.config.color,
            });
        }

        frame.outcome = FrameOutcome::Drawn {
            points: points.len(),
        };
        frame
    }

    /// The bar whose column contains the pointer.
    fn hit_test(
        &self,
        points: &[DataPoint],
        viewport: Viewport,
        view: &ViewTransform,
        pointer: ScreenPoint,
    ) -> Option<HoverHit> {
        if points.is_empty() {
            return None;
        }
        let bar_width = self.bar_width(points.len(), &viewport, view);
        if bar_width <= 0.0 {
            return None;
        }
        let column = (pointer.x - view.offset.x - viewport.padding.left) / bar_width;
        if column < 0.0 {
            return None;
        }
        let index = column.floor() as usize;
        let point = points.get(index)?;
        Some(HoverHit {
            index,
            point: point.clone(),
            anchor: pointer,
        })
    }
}
