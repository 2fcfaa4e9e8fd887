use super::axis::ChartBounds;
use super::data::DataPoint;

/// Read-only view over an ordered sequence of points, as consumed by the
/// chart geometries.
pub trait PlotDataSource: Send + Sync {
    /// Number of points currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point at `index`, oldest first.
    fn point(&self, index: usize) -> Option<&DataPoint>;

    /// Stride-sampled copy holding at most `max_points` points.
    fn downsampled(&self, max_points: usize) -> Vec<DataPoint>;

    /// The most recent `count` points in order (fewer if the source is
    /// shorter).
    fn latest(&self, count: usize) -> Vec<DataPoint>;

    /// Bounds over every held point.
    fn bounds(&self) -> ChartBounds;

    /// Newest timestamp, if any.
    fn last_timestamp(&self) -> Option<i64> {
        self.len()
            .checked_sub(1)
            .and_then(|i| self.point(i))
            .map(|p| p.timestamp)
    }
}

impl PlotDataSource for [DataPoint] {
    fn len(&self) -> usize {
        <[DataPoint]>::len(self)
    }

    fn point(&self, index: usize) -> Option<&DataPoint> {
        self.get(index)
    }

    fn downsampled(&self, max_points: usize) -> Vec<DataPoint> {
        crate::decimation::downsample(self, max_points)
    }

    fn latest(&self, count: usize) -> Vec<DataPoint> {
        let start = <[DataPoint]>::len(self).saturating_sub(count);
        self[start..].to_vec()
    }

    fn bounds(&self) -> ChartBounds {
        ChartBounds::from_points(self)
    }
}

impl PlotDataSource for Vec<DataPoint> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn point(&self, index: usize) -> Option<&DataPoint> {
        self.as_slice().get(index)
    }

    fn downsampled(&self, max_points: usize) -> Vec<DataPoint> {
        self.as_slice().downsampled(max_points)
    }

    fn latest(&self, count: usize) -> Vec<DataPoint> {
        PlotDataSource::latest(self.as_slice(), count)
    }

    fn bounds(&self) -> ChartBounds {
        ChartBounds::from_points(self)
    }
}
