// Heatmap plot implementation

use super::{ChartFrame, ChartKind, FrameOutcome, HoverHit, PlotRenderer, Primitive};
use crate::data_types::{
    DataPoint, HeatmapPlotConfig, PlotDataSource, ScreenPoint, ViewTransform, Viewport,
};

pub const DEFAULT_GRID_SIZE: usize = 20;

/// Heatmap plot type
///
/// The most recent `grid_size²` points fill the grid row by row across the
/// whole canvas, coloured from blue (minimum) to red (maximum).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeatmapPlot {
    pub config: HeatmapPlotConfig,
}

impl HeatmapPlot {
    pub fn new(config: HeatmapPlotConfig) -> Self {
        Self { config }
    }

    fn cell_size(&self, viewport: &Viewport, view: &ViewTransform) -> (f32, f32) {
        let n = self.config.grid_size.max(1) as f32;
        let s = view.scale as f32;
        (viewport.width / n * s, viewport.height / n * s)
    }
}

impl PlotRenderer for HeatmapPlot {
    fn kind(&self) -> ChartKind {
        ChartKind::Heatmap
    }

    fn select_points(&self, source: &dyn PlotDataSource) -> Vec<DataPoint> {
        source.latest(self.config.cell_count())
    }

    fn build_frame(
        &self,
        points: &[DataPoint],
        viewport: Viewport,
        view: &ViewTransform,
    ) -> ChartFrame {
        let mut frame = ChartFrame::new(FrameOutcome::Empty);
        let cells = &points[points.len().saturating_sub(self.config.cell_count())..];
        if cells.is_empty() {
            return frame;
        }

        let (min, max) = cells
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.value), hi.max(p.value))
            });
        let range = max - min;
        if !(range.abs() > f64::EPSILON) {
            frame.outcome = FrameOutcome::Degenerate;
            return frame;
        }

        let grid = self.config.grid_size.max(1);
        let (cell_w, cell_h) = self.cell_size(&viewport, view);
        let gap = self.config.cell_gap_px;
        for (i, p) in cells.iter().enumerate() {
            let x = (i % grid) as f32 * cell_w + view.offset.x;
            let y = (i / grid) as f32 * cell_h + view.offset.y;
            frame.push(Primitive::Rect {
                origin: ScreenPoint::new(x, y),
                width: (cell_w - gap).max(0.0),
                height: (cell_h - gap).max(0.0),
                color: self.config.color_for((p.value - min) / range),
            });
        }

        frame.outcome = FrameOutcome::Drawn {
            points: cells.len(),
        };
        frame
    }

    /// The cell under the pointer, if it holds a point.
    fn hit_test(
        &self,
        points: &[DataPoint],
        viewport: Viewport,
        view: &ViewTransform,
        pointer: ScreenPoint,
    ) -> Option<HoverHit> {
        let cells = &points[points.len().saturating_sub(self.config.cell_count())..];
        let grid = self.config.grid_size.max(1);
        let (cell_w, cell_h) = self.cell_size(&viewport, view);
        if cell_w <= 0.0 || cell_h <= 0.0 {
            return None;
        }
        let col = ((pointer.x - view.offset.x) / cell_w).floor();
        let row = ((pointer.y - view.offset.y) / cell_h).floor();
        if col < 0.0 || row < 0.0 || col >= grid as f32 || row >= grid as f32 {
            return None;
        }
        let index = row as usize * grid + col as usize;
        let point = cells.get(index)?;
        Some(HoverHit {
            index,
            point: point.clone(),
            anchor: pointer,
        })
    }
}
