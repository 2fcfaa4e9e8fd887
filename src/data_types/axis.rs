use super::data::DataPoint;
use serde::{Deserialize, Serialize};

/// Fraction of the value range added above and below the extrema.
pub const Y_PADDING_PCT: f64 = 0.1;

/// Data-space extent of a slice of points.
///
/// Derived on every frame from the slice being drawn and never kept across
/// buffer mutations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl ChartBounds {
    /// Bounds used when there is nothing to measure.
    pub const FALLBACK: ChartBounds = ChartBounds {
        min_x: 0.0,
        max_x: 1.0,
        min_y: 0.0,
        max_y: 100.0,
    };

    /// Single pass over `points`; value bounds are padded by 10% of the range
    /// on each side.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a DataPoint>,
    {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut seen = false;

        for p in points {
            seen = true;
            let x = p.timestamp as f64;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(p.value);
            max_y = max_y.max(p.value);
        }

        if !seen {
            return Self::FALLBACK;
        }

        let pad = (max_y - min_y) * Y_PADDING_PCT;
        Self {
            min_x,
            max_x,
            min_y: min_y - pad,
            max_y: max_y + pad,
        }
    }

    pub fn x_span(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn y_span(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when either axis has no extent, which makes projection undefined.
    pub fn is_degenerate(&self) -> bool {
        !(self.x_span().abs() > f64::EPSILON && self.y_span().abs() > f64::EPSILON)
    }
}

/// Convenience wrapper over [`ChartBounds::from_points`].
pub fn compute_bounds(points: &[DataPoint]) -> ChartBounds {
    ChartBounds::from_points(points)
}

/// Space reserved around the plot area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const ZERO: Padding = Padding::new(0.0, 0.0, 0.0, 0.0);
}

/// Padding shared by every chart geometry.
pub const CHART_PADDING: Padding = Padding::new(20.0, 20.0, 40.0, 60.0);

impl Default for Padding {
    fn default() -> Self {
        CHART_PADDING
    }
}

/// A position in canvas-local pixels (origin top-left, Y grows downwards).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: ScreenPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Canvas size plus the padding the geometries draw inside.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub padding: Padding,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            padding: CHART_PADDING,
        }
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn plot_width(&self) -> f32 {
        self.width - self.padding.left - self.padding.right
    }

    pub fn plot_height(&self) -> f32 {
        self.height - self.padding.top - self.padding.bottom
    }

    pub fn is_empty(&self) -> bool {
        self.plot_width() <= 0.0 || self.plot_height() <= 0.0
    }
}
