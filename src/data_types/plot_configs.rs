use gpui::{hsla, rgb, Hsla};

#[derive(Clone, Debug, PartialEq)]
pub struct LinePlotConfig {
    pub color: Hsla,
    pub line_width: f32,
    pub grid_color: Hsla,
    /// Grid divisions along X and Y.
    pub grid_cells: (u32, u32),
}

impl Default for LinePlotConfig {
    fn default() -> Self {
        Self {
            color: rgb(0x2196F3).into(),
            line_width: 2.0,
            grid_color: rgb(0xE0E0E0).into(),
            grid_cells: (10, 8),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarPlotConfig {
    pub color: Hsla,
    /// Horizontal gap between adjacent bars, in pixels.
    pub gap_px: f32,
}

impl Default for BarPlotConfig {
    fn default() -> Self {
        Self {
            color: rgb(0x4CAF50).into(),
            gap_px: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScatterPlotConfig {
    pub color: Hsla,
    pub radius: f32,
    /// Maximum pointer distance for a hover hit, in pixels.
    pub hit_radius: f32,
}

impl Default for ScatterPlotConfig {
    fn default() -> Self {
        Self {
            color: rgb(0xFF5722).into(),
            radius: 2.0,
            hit_radius: 10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeatmapPlotConfig {
    /// Cells per side; the grid holds `grid_size * grid_size` points.
    pub grid_size: usize,
    pub cell_gap_px: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Default for HeatmapPlotConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            cell_gap_px: 1.0,
            saturation: 0.7,
            lightness: 0.5,
        }
    }
}

impl HeatmapPlotConfig {
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Blue for the minimum, red for the maximum.
    pub fn color_for(&self, normalized: f64) -> Hsla {
        let hue = (1.0 - normalized.clamp(0.0, 1.0)) * 240.0;
        hsla(hue as f32 / 360.0, self.saturation, self.lightness, 1.0)
    }
}
