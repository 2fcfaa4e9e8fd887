//! Data-space to canvas projection.

use crate::data_types::{ChartBounds, DataPoint, Padding, ScreenPoint, ViewTransform, Viewport};
use crate::scales::LinearScale;

/// Maps data points into canvas pixels for one frame.
///
/// X covers `[padding.left, width - padding.right]`; Y covers
/// `[height - padding.bottom, padding.top]`, so larger values sit higher.
/// The view transform is applied after the affine map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotTransform {
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub viewport: Viewport,
    pub view: ViewTransform,
}

impl PlotTransform {
    /// `None` when either bounds range is empty: the frame is skipped.
    pub fn new(bounds: &ChartBounds, viewport: Viewport, view: ViewTransform) -> Option<Self> {
        let p = viewport.padding;
        let x_scale = LinearScale::new(
            (bounds.min_x, bounds.max_x),
            (p.left, viewport.width - p.right),
        )?;
        let y_scale = LinearScale::new(
            (bounds.min_y, bounds.max_y),
            (viewport.height - p.bottom, p.top),
        )?;
        Some(Self {
            x_scale,
            y_scale,
            viewport,
            view,
        })
    }

    /// Position before pan/zoom.
    pub fn project(&self, point: &DataPoint) -> ScreenPoint {
        ScreenPoint::new(
            self.x_scale.map(point.timestamp as f64),
            self.y_scale.map(point.value),
        )
    }

    /// Position as drawn.
    pub fn data_to_screen(&self, point: &DataPoint) -> ScreenPoint {
        self.view.apply(self.project(point))
    }

    /// `(timestamp, value)` under a drawn position.
    pub fn screen_to_data(&self, screen: ScreenPoint) -> (f64, f64) {
        let raw = self.view.invert(screen);
        (self.x_scale.invert(raw.x), self.y_scale.invert(raw.y))
    }
}

/// One-off projection of `point` without pan/zoom. `None` when the bounds
/// have no width or height.
pub fn project(
    point: &DataPoint,
    bounds: &ChartBounds,
    width: f32,
    height: f32,
    padding: Padding,
) -> Option<ScreenPoint> {
    let viewport = Viewport::new(width, height).with_padding(padding);
    PlotTransform::new(bounds, viewport, ViewTransform::default()).map(|t| t.project(point))
}
