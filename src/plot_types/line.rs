use super::{ChartFrame, ChartKind, FrameOutcome, HoverHit, LabelAlign, PlotRenderer, Primitive};
use crate::data_types::{
    ChartBounds, DataPoint, LinePlotConfig, ScreenPoint, ViewTransform, Viewport,
};
use crate::transform::PlotTransform;
use gpui::rgb;

/// Line plot type
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinePlot {
    pub config: LinePlotConfig,
}

impl LinePlot {
    pub fn new(config: LinePlotConfig) -> Self {
        Self { config }
    }

    /// Background grid over the padded plot area; not affected by pan/zoom.
    fn push_grid(&self, frame: &mut ChartFrame, viewport: &Viewport) {
        let p = viewport.padding;
        let (cols, rows) = self.config.grid_cells;
        let left = p.left;
        let right = viewport.width - p.right;
        let top = p.top;
        let bottom = viewport.height - p.bottom;

        for i in 0..=cols {
            let x = left + i as f32 * viewport.plot_width() / cols.max(1) as f32;
            frame.push(Primitive::Polyline {
                points: vec![ScreenPoint::new(x, top), ScreenPoint::new(x, bottom)],
                width: 1.0,
                color: self.config.grid_color,
            });
        }
        for i in 0..=rows {
            let y = top + i as f32 * viewport.plot_height() / rows.max(1) as f32;
            frame.push(Primitive::Polyline {
                points: vec![ScreenPoint::new(left, y), ScreenPoint::new(right, y)],
                width: 1.0,
                color: self.config.grid_color,
            });
        }
    }
}

impl PlotRenderer for LinePlot {
    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn build_frame(
        &self,
        points: &[DataPoint],
        viewport: Viewport,
        view: &ViewTransform,
    ) -> ChartFrame {
        let mut frame = ChartFrame::new(FrameOutcome::Empty);
        self.push_grid(&mut frame, &viewport);
        if points.is_empty() {
            return frame;
        }

        let bounds = ChartBounds::from_points(points);
        let Some(transform) = PlotTransform::new(&bounds, viewport, *view) else {
            frame.outcome = FrameOutcome::Degenerate;
            return frame;
        };

        frame.push(Primitive::Polyline {
            points: points.iter().map(|p| transform.data_to_screen(p)).collect(),
            width: self.config.line_width * view.scale as f32,
            color: self.config.color,
        });

        let p = viewport.padding;
        let label_color = rgb(0x333333).into();
        frame.push(Primitive::Label {
            position: ScreenPoint::new(p.left - 10.0, p.top + 10.0),
            text: format!("{}", bounds.max_y.round()),
            align: LabelAlign::Right,
            color: label_color,
        });
        frame.push(Primitive::Label {
            position: ScreenPoint::new(p.left - 10.0, viewport.height - p.bottom - 5.0),
            text: format!("{}", bounds.min_y.round()),
            align: LabelAlign::Right,
            color: label_color,
        });

        frame.outcome = FrameOutcome::Drawn {
            points: points.len(),
        };
        frame
    }

    /// Nearest drawn point by time under the pointer.
    fn hit_test(
        &self,
        points: &[DataPoint],
        viewport: Viewport,
        view: &ViewTransform,
        pointer: ScreenPoint,
    ) -> Option<HoverHit> {
        let bounds = ChartBounds::from_points(points);
        let transform = PlotTransform::new(&bounds, viewport, *view)?;
        let (t, _) = transform.screen_to_data(pointer);
        if t < bounds.min_x || t > bounds.max_x {
            return None;
        }

        let idx = points.partition_point(|p| (p.timestamp as f64) < t);
        let index = match (idx.checked_sub(1), points.get(idx)) {
            (Some(before), Some(after)) => {
                if t - points[before].timestamp as f64 <= after.timestamp as f64 - t {
                    before
                } else {
                    idx
                }
            }
            (Some(before), None) => before,
            (None, Some(_)) => idx,
            (None, None) => return None,
        };

        Some(HoverHit {
            index,
            point: points[index].clone(),
            anchor: pointer,
        })
    }
}
