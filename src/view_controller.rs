use crate::data_types::{DataPoint, ScreenPoint, ViewTransform, Viewport};
use crate::plot_types::{ChartPlot, HoverHit};

/// Scale multiplier for one wheel step towards the user (zoom in).
pub const ZOOM_IN_FACTOR: f64 = 1.1;
/// Scale multiplier for one wheel step away from the user (zoom out).
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

/// ViewController handles the business logic of interactions (zoom, pan,
/// hover) independently of the GPUI infrastructure to facilitate testing.
///
/// One instance per mounted chart. The geometry only enters through the
/// hit test passed to [`ViewController::hover`].
#[derive(Clone, Debug, Default)]
pub struct ViewController {
    view: ViewTransform,
    drag_origin: Option<ScreenPoint>,
    hover: Option<HoverHit>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    pub fn hovered(&self) -> Option<&HoverHit> {
        self.hover.as_ref()
    }

    /// Applies one wheel step. Negative `delta_y` zooms in. The scale stays
    /// within `[MIN_SCALE, MAX_SCALE]`; a zero delta changes nothing.
    pub fn zoom_wheel(&mut self, delta_y: f32) -> f64 {
        if delta_y == 0.0 || delta_y.is_nan() {
            return self.view.scale;
        }
        let factor = if delta_y < 0.0 {
            ZOOM_IN_FACTOR
        } else {
            ZOOM_OUT_FACTOR
        };
        self.view.scale = ViewTransform::clamp_scale(self.view.scale * factor);
        self.view.scale
    }

    pub fn begin_drag(&mut self, position: ScreenPoint) {
        self.drag_origin = Some(position);
        self.hover = None;
    }

    /// Translates the offset by the pointer movement since the last call.
    /// Returns `false` when no drag is active.
    pub fn drag_to(&mut self, position: ScreenPoint) -> bool {
        let Some(last) = self.drag_origin else {
            return false;
        };
        self.view.offset.x += position.x - last.x;
        self.view.offset.y += position.y - last.y;
        self.drag_origin = Some(position);
        true
    }

    pub fn end_drag(&mut self) {
        self.drag_origin = None;
    }

    /// Updates the hovered point. Ignored while dragging.
    pub fn hover(
        &mut self,
        plot: &ChartPlot,
        points: &[DataPoint],
        viewport: Viewport,
        pointer: ScreenPoint,
    ) -> Option<&HoverHit> {
        if self.is_dragging() {
            return None;
        }
        self.hover = plot
            .renderer()
            .hit_test(points, viewport, &self.view, pointer);
        self.hover.as_ref()
    }

    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    /// Back to identity, as on remount.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn zoom_label(&self) -> String {
        format!(
            "Zoom: {:.2} | Offset: ({:.0}, {:.0})",
            self.view.scale, self.view.offset.x, self.view.offset.y
        )
    }
}
