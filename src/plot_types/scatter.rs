use super::{ChartFrame, ChartKind, FrameOutcome, HoverHit, PlotRenderer, Primitive};
use crate::data_types::{ChartBounds, DataPoint, ScatterPlotConfig, ScreenPoint, ViewTransform, Viewport};
use crate::transform::PlotTransform;

/// Scatter plot type
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScatterPlot {
    pub config: ScatterPlotConfig,
}

impl ScatterPlot {
    pub fn new(config: ScatterPlotConfig) -> Self {
        Self { config }
    }
}

impl PlotRenderer for ScatterPlot {
    fn kind(&self) -> ChartKind {
        ChartKind::Scatter
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
        let Some(transform) = PlotTransform::new(&bounds, viewport, *view) else {
            frame.outcome = FrameOutcome::Degenerate;
            return frame;
        };

        let radius = self.config.radius * view.scale as f32;
        frame.primitives.extend(points.iter().map(|p| Primitive::Dot {
            center: transform.data_to_screen(p),
            radius,
            color: self.config.color,
        }));

        frame.outcome = FrameOutcome::Drawn {
            points: points.len(),
        };
        frame
    }

    /// Euclidean nearest drawn point within `hit_radius` pixels.
    fn hit_test(
        &self,
        points: &[DataPoint],
        viewport: Viewport,
        view: &ViewTransform,
        pointer: ScreenPoint,
    ) -> Option<HoverHit> {
        let bounds = ChartBounds::from_points(points);
        let transform = PlotTransform::new(&bounds, viewport, *view)?;

        let mut best: Option<(usize, f32)> = None;
        for (i, p) in points.iter().enumerate() {
            let d = transform.data_to_screen(p).distance(pointer);
            if d < self.config.hit_radius && best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }

        best.map(|(index, _)| HoverHit {
            index,
            point: points[index].clone(),
            anchor: pointer,
        })
    }
}
