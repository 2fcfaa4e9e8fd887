use super::axis::ScreenPoint;
use super::data::DataPoint;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 5.0;

/// Pan/zoom state of one mounted chart.
///
/// Lives as long as the chart instance; a remount starts again from
/// [`ViewTransform::default`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset: ScreenPoint,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: ScreenPoint::default(),
        }
    }
}

impl ViewTransform {
    /// Maps an untransformed canvas position to where it is drawn.
    pub fn apply(&self, p: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(
            p.x * self.scale as f32 + self.offset.x,
            p.y * self.scale as f32 + self.offset.y,
        )
    }

    /// Inverse of [`ViewTransform::apply`].
    pub fn invert(&self, p: ScreenPoint) -> ScreenPoint {
        let s = self.scale as f32;
        ScreenPoint::new((p.x - self.offset.x) / s, (p.y - self.offset.y) / s)
    }

    pub fn clamp_scale(scale: f64) -> f64 {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    }
}

/// Metrics published by the performance monitor once per second.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSnapshot {
    /// Measured frames per second, capped at 60 for display.
    pub fps: u32,
    #[serde(rename = "memoryUsageMB")]
    pub memory_usage_mb: u64,
    /// Mean of the last 60 render durations, rounded to 2 decimals.
    pub render_time_ms: f64,
    pub data_point_count: usize,
}

impl Default for PerformanceSnapshot {
    fn default() -> Self {
        Self {
            fps: 60,
            memory_usage_mb: 0,
            render_time_ms: 0.0,
            data_point_count: 0,
        }
    }
}

const HOUR_MS: i64 = 3_600_000;

/// Display filter relative to the newest displayed point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1h")]
    LastHour,
    #[serde(rename = "6h")]
    LastSixHours,
    #[serde(rename = "24h")]
    LastDay,
    #[serde(rename = "7d")]
    LastWeek,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    pub const ALL: [TimeRange; 5] = [
        TimeRange::LastHour,
        TimeRange::LastSixHours,
        TimeRange::LastDay,
        TimeRange::LastWeek,
        TimeRange::All,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::LastHour => "1h",
            Self::LastSixHours => "6h",
            Self::LastDay => "24h",
            Self::LastWeek => "7d",
            Self::All => "All",
        }
    }

    pub fn span_ms(&self) -> Option<i64> {
        match self {
            Self::LastHour => Some(HOUR_MS),
            Self::LastSixHours => Some(6 * HOUR_MS),
            Self::LastDay => Some(24 * HOUR_MS),
            Self::LastWeek => Some(7 * 24 * HOUR_MS),
            Self::All => None,
        }
    }

    /// Keeps the points whose timestamp lies within the span ending at the
    /// newest point. Input order is preserved.
    pub fn filter(&self, points: Vec<DataPoint>) -> Vec<DataPoint> {
        let Some(span) = self.span_ms() else {
            return points;
        };
        let Some(newest) = points.iter().map(|p| p.timestamp).max() else {
            return points;
        };
        let start = newest.saturating_sub(span);
        points.into_iter().filter(|p| p.timestamp >= start).collect()
    }
}

impl FromStr for TimeRange {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1h" => Ok(Self::LastHour),
            "6h" => Ok(Self::LastSixHours),
            "24h" => Ok(Self::LastDay),
            "7d" => Ok(Self::LastWeek),
            "all" => Ok(Self::All),
            other => Err(eyre::eyre!("unknown time range `{other}`")),
        }
    }
}
