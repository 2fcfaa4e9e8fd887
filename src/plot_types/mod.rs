// Plot types module

pub mod bar;
pub mod heatmap;
pub mod line;
pub mod scatter;

pub use bar::BarPlot;
pub use heatmap::HeatmapPlot;
pub use line::LinePlot;
pub use scatter::ScatterPlot;

use crate::data_types::{DataPoint, PlotDataSource, ScreenPoint, ViewTransform, Viewport};
use gpui::{rgb, Hsla};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chart geometry selectable from the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Scatter,
    Heatmap,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Scatter,
        ChartKind::Heatmap,
    ];

    /// Most points a geometry draws per frame. Discrete geometries get far
    /// fewer than dense ones.
    pub fn point_budget(&self) -> usize {
        match self {
            Self::Line => 2000,
            Self::Bar => 100,
            Self::Scatter => 1000,
            Self::Heatmap => heatmap::DEFAULT_GRID_SIZE * heatmap::DEFAULT_GRID_SIZE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Scatter => "scatter",
            Self::Heatmap => "heatmap",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Line => "Line Chart",
            Self::Bar => "Bar Chart",
            Self::Scatter => "Scatter Plot",
            Self::Heatmap => "Heatmap",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| eyre::eyre!("unknown chart type `{s}`"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelAlign {
    Left,
    Right,
}

/// A drawing instruction in canvas-local pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Rect {
        origin: ScreenPoint,
        width: f32,
        height: f32,
        color: Hsla,
    },
    Polyline {
        points: Vec<ScreenPoint>,
        width: f32,
        color: Hsla,
    },
    Dot {
        center: ScreenPoint,
        radius: f32,
        color: Hsla,
    },
    Label {
        position: ScreenPoint,
        text: String,
        align: LabelAlign,
        color: Hsla,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn { points: usize },
    /// Nothing to draw.
    Empty,
    /// Bounds had no width or height; the frame was skipped.
    Degenerate,
}

/// Everything one render cycle paints.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartFrame {
    pub background: Hsla,
    pub primitives: Vec<Primitive>,
    pub outcome: FrameOutcome,
}

impl ChartFrame {
    pub fn new(outcome: FrameOutcome) -> Self {
        Self {
            background: rgb(0xFFFFFF).into(),
            primitives: Vec::new(),
            outcome,
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn is_drawn(&self) -> bool {
        matches!(self.outcome, FrameOutcome::Drawn { .. })
    }

    pub fn labels(&self) -> impl Iterator<Item = (&ScreenPoint, &str, LabelAlign)> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Label {
                position,
                text,
                align,
                ..
            } => Some((position, text.as_str(), *align)),
            _ => None,
        })
    }
}

/// Result of a hover lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverHit {
    /// Index into the drawn points.
    pub index: usize,
    pub point: DataPoint,
    /// Where the tooltip is anchored.
    pub anchor: ScreenPoint,
}

/// One chart geometry: which points it draws, how it draws them, and how a
/// pointer position maps back onto them.
pub trait PlotRenderer: Send + Sync {
    fn kind(&self) -> ChartKind;

    /// The points a frame draws, reduced to the geometry's budget.
    fn select_points(&self, source: &dyn PlotDataSource) -> Vec<DataPoint> {
        source.downsampled(self.kind().point_budget())
    }

    fn build_frame(&self, points: &[DataPoint], viewport: Viewport, view: &ViewTransform)
        -> ChartFrame;

    /// Runs over the drawn points only, never the full buffer.
    fn hit_test(
        &self,
        points: &[DataPoint],
        viewport: Viewport,
        view: &ViewTransform,
        pointer: ScreenPoint,
    ) -> Option<HoverHit>;
}

/// A configured geometry, dispatched by kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartPlot {
    Line(LinePlot),
    Bar(BarPlot),
    Scatter(ScatterPlot),
    Heatmap(HeatmapPlot),
}

impl ChartPlot {
    pub fn new(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Line => Self::Line(LinePlot::default()),
            ChartKind::Bar => Self::Bar(BarPlot::default()),
            ChartKind::Scatter => Self::Scatter(ScatterPlot::default()),
            ChartKind::Heatmap => Self::Heatmap(HeatmapPlot::default()),
        }
    }

    pub fn renderer(&self) -> &dyn PlotRenderer {
        match self {
            Self::Line(p) => p,
            Self::Bar(p) => p,
            Self::Scatter(p) => p,
            Self::Heatmap(p) => p,
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.renderer().kind()
    }
}

impl From<ChartKind> for ChartPlot {
    fn from(kind: ChartKind) -> Self {
        Self::new(kind)
    }
}
