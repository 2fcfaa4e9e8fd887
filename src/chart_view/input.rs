use super::ChartView;
use crate::data_types::ScreenPoint;
use crate::utils::PixelsExt;
use gpui::*;

impl ChartView {
    fn local_position(&self, position: Point<Pixels>) -> ScreenPoint {
        let origin = self.bounds.get().origin;
        ScreenPoint::new(
            (position.x - origin.x).as_f32(),
            (position.y - origin.y).as_f32(),
        )
    }

    pub(super) fn handle_mouse_down(&mut self, event: &MouseDownEvent, cx: &mut Context<Self>) {
        let pos = self.local_position(event.position);
        self.controller.begin_drag(pos);
        cx.notify();
    }

    pub(super) fn handle_mouse_move(&mut self, event: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = self.local_position(event.position);
        if self.controller.drag_to(pos) {
            cx.notify();
            return;
        }

        let was_hovering = self.controller.hovered().is_some();
        let viewport = self.viewport();
        let hit = self
            .controller
            .hover(&self.plot, &self.data.drawn, viewport, pos)
            .is_some();
        if hit || was_hovering {
            cx.notify();
        }
    }

    pub(super) fn handle_mouse_up(&mut self, _event: &MouseUpEvent, cx: &mut Context<Self>) {
        if self.controller.is_dragging() {
            self.controller.end_drag();
            cx.notify();
        }
    }

    pub(super) fn handle_scroll_wheel(&mut self, event: &ScrollWheelEvent, cx: &mut Context<Self>) {
        // gpui reports wheel-up as positive; the controller wants it negative.
        let delta_y = -match event.delta {
            ScrollDelta::Pixels(p) => p.y.as_f32(),
            ScrollDelta::Lines(p) => p.y * 20.0,
        };
        let before = self.controller.view().scale;
        let after = self.controller.zoom_wheel(delta_y);
        if before != after {
            tracing::trace!(scale = after, "zoom");
            cx.notify();
        }
    }

    pub(super) fn handle_pointer_left(&mut self, cx: &mut Context<Self>) {
        if self.controller.hovered().is_some() {
            self.controller.clear_hover();
            cx.notify();
        }
    }
}
