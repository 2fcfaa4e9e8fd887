use super::generator::SampleGenerator;
use crate::aggregation;
use crate::data_types::{ChartBounds, DataPoint, PlotDataSource};
use rand::Rng;
use std::collections::VecDeque;

pub const DEFAULT_MAX_POINTS: usize = 50_000;
pub const DEFAULT_GROW_INCREMENT: usize = 5_000;

/// Result of appending a single point.
#[derive(Clone, Debug, PartialEq)]
pub enum AppendOutcome {
    Appended,
    /// Appended, and the oldest point was dropped to stay within capacity.
    Evicted(DataPoint),
    /// Nothing to extend from.
    EmptyBuffer,
    /// The point was older than the newest held point and was rejected.
    OutOfOrder,
}

impl AppendOutcome {
    pub fn is_appended(&self) -> bool {
        matches!(self, Self::Appended | Self::Evicted(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowOutcome {
    Grown { added: usize, evicted: usize },
    NothingToGrow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShrinkOutcome {
    Shrunk { removed: usize },
    NothingToShrink,
}

/// Bounded sliding window of points plus a cumulative production counter.
///
/// The window never holds more than `max_points` points and evicts oldest
/// first. `total_count` counts points ever produced; eviction leaves it
/// alone and only [`StreamBuffer::shrink`] lowers it, never below `len()`.
/// `revision` changes on every mutation.
#[derive(Clone, Debug)]
pub struct StreamBuffer {
    points: VecDeque<DataPoint>,
    max_points: usize,
    total_count: u64,
    revision: u64,
}

impl Default for StreamBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POINTS)
    }
}

impl StreamBuffer {
    /// A capacity of zero is raised to one.
    pub fn new(max_points: usize) -> Self {
        let max_points = max_points.max(1);
        Self {
            points: VecDeque::with_capacity(max_points.min(DEFAULT_MAX_POINTS)),
            max_points,
            total_count: 0,
            revision: 0,
        }
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn front(&self) -> Option<&DataPoint> {
        self.points.front()
    }

    pub fn back(&self) -> Option<&DataPoint> {
        self.points.back()
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.points.back().map(|p| p.timestamp)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &DataPoint> + '_ {
        self.points.iter()
    }

    pub fn to_vec(&self) -> Vec<DataPoint> {
        self.points.iter().cloned().collect()
    }

    /// Replaces the contents with a fresh initial batch.
    pub fn initialize<R: Rng>(&mut self, generator: &mut SampleGenerator<R>, count: usize, now_ms: i64) {
        let points = generator.generate_initial(count, now_ms);
        self.replace(points);
    }

    /// Replaces the contents with `points` and sets the total to their count.
    /// Only the newest `max_points` are kept.
    pub fn replace(&mut self, points: Vec<DataPoint>) {
        self.total_count = points.len() as u64;
        self.points = VecDeque::from(points);
        self.truncate_front();
        self.bump();
        tracing::debug!(
            len = self.points.len(),
            total = self.total_count,
            "stream buffer replaced"
        );
    }

    /// Appends a point produced elsewhere.
    pub fn push(&mut self, point: DataPoint) -> AppendOutcome {
        let Some(last) = self.points.back() else {
            return AppendOutcome::EmptyBuffer;
        };
        if point.timestamp < last.timestamp {
            return AppendOutcome::OutOfOrder;
        }
        self.points.push_back(point);
        self.total_count += 1;
        self.bump();
        if self.points.len() > self.max_points {
            if let Some(oldest) = self.points.pop_front() {
                return AppendOutcome::Evicted(oldest);
            }
        }
        AppendOutcome::Appended
    }

    /// Extends the window by one generated point.
    pub fn tick<R: Rng>(&mut self, generator: &mut SampleGenerator<R>) -> AppendOutcome {
        let Some(last) = self.last_timestamp() else {
            tracing::trace!("tick on empty buffer ignored");
            return AppendOutcome::EmptyBuffer;
        };
        let point = generator.generate_next(last);
        self.push(point)
    }

    /// Appends `n` consecutive points, then trims to capacity once.
    pub fn grow<R: Rng>(&mut self, generator: &mut SampleGenerator<R>, n: usize) -> GrowOutcome {
        let Some(last) = self.last_timestamp() else {
            tracing::debug!("nothing to grow: buffer is empty");
            return GrowOutcome::NothingToGrow;
        };
        self.points.extend(generator.generate_batch(last, n));
        let evicted = self.truncate_front();
        self.total_count += n as u64;
        self.bump();
        tracing::debug!(
            added = n,
            evicted,
            len = self.points.len(),
            total = self.total_count,
            "stream buffer grown"
        );
        GrowOutcome::Grown { added: n, evicted }
    }

    /// Drops the oldest half.
    pub fn shrink(&mut self) -> ShrinkOutcome {
        let removed = self.points.len() / 2;
        if removed == 0 {
            return ShrinkOutcome::NothingToShrink;
        }
        self.points.drain(..removed);
        let remaining = self.points.len() as u64;
        self.total_count = self.total_count.saturating_sub(removed as u64).max(remaining);
        self.bump();
        tracing::debug!(
            removed,
            len = remaining,
            total = self.total_count,
            "stream buffer shrunk"
        );
        ShrinkOutcome::Shrunk { removed }
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.total_count = 0;
        self.bump();
    }

    /// Mean-per-bucket view of the whole window.
    pub fn aggregated(&self, period_ms: i64) -> Vec<DataPoint> {
        let (a, b) = self.points.as_slices();
        aggregation::aggregate_parts([a, b], period_ms)
    }

    fn truncate_front(&mut self) -> usize {
        let excess = self.points.len().saturating_sub(self.max_points);
        if excess > 0 {
            self.points.drain(..excess);
        }
        excess
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl PlotDataSource for StreamBuffer {
    fn len(&self) -> usize {
        self.points.len()
    }

    fn point(&self, index: usize) -> Option<&DataPoint> {
        self.points.get(index)
    }

    fn downsampled(&self, max_points: usize) -> Vec<DataPoint> {
        crate::decimation::downsample_iter(self.points.iter(), max_points)
    }

    fn latest(&self, count: usize) -> Vec<DataPoint> {
        let start = self.points.len().saturating_sub(count);
        self.points.range(start..).cloned().collect()
    }

    fn bounds(&self) -> ChartBounds {
        ChartBounds::from_points(self.points.iter())
    }
}
