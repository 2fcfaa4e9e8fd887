use crate::performance::FpsLevel;
use gpui::*;

#[derive(Clone, Debug)]
pub struct DashboardTheme {
    pub background: Hsla,
    pub panel_background: Hsla,
    pub panel_border: Hsla,
    pub chart_background: Hsla,
    pub axis_label: Hsla,
    pub axis_label_size: Pixels,
    pub text: Hsla,
    pub muted_text: Hsla,
    pub tooltip_background: Hsla,
    pub tooltip_text: Hsla,
    pub zoom_info_background: Hsla,
    pub button_background: Hsla,
    pub button_active: Hsla,
    pub button_text: Hsla,
    pub fps_good: Hsla,
    pub fps_fair: Hsla,
    pub fps_poor: Hsla,
}

impl Default for DashboardTheme {
    fn default() -> Self {
        Self {
            background: rgb(0xF5F5F5).into(),
            panel_background: gpui::white(),
            panel_border: rgb(0xE0E0E0).into(),
            chart_background: gpui::white(),
            axis_label: rgb(0x333333).into(),
            axis_label_size: px(12.0),
            text: rgb(0x212121).into(),
            muted_text: rgb(0x666666).into(),
            tooltip_background: gpui::black().alpha(0.7),
            tooltip_text: gpui::white(),
            zoom_info_background: gpui::white().alpha(0.8),
            button_background: rgb(0xE0E0E0).into(),
            button_active: rgb(0x2196F3).into(),
            button_text: rgb(0x212121).into(),
            fps_good: rgb(0x4CAF50).into(),
            fps_fair: rgb(0xFF9800).into(),
            fps_poor: rgb(0xF44336).into(),
        }
    }
}

impl DashboardTheme {
    pub fn fps_color(&self, fps: f64) -> Hsla {
        match FpsLevel::of(fps) {
            FpsLevel::Good => self.fps_good,
            FpsLevel::Fair => self.fps_fair,
            FpsLevel::Poor => self.fps_poor,
        }
    }
}
