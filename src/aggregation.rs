use crate::data_types::{Category, DataPoint};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Inputs at least this long are bucketed in parallel chunks.
pub const PARALLEL_THRESHOLD: usize = 20_000;
const PARALLEL_CHUNK: usize = 4_096;

/// Bucket width selectable from the dashboard controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregationPeriod {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "1min")]
    OneMinute,
    #[serde(rename = "5min")]
    FiveMinutes,
    #[serde(rename = "1hour")]
    OneHour,
}

impl AggregationPeriod {
    pub const ALL: [AggregationPeriod; 4] = [
        AggregationPeriod::None,
        AggregationPeriod::OneMinute,
        AggregationPeriod::FiveMinutes,
        AggregationPeriod::OneHour,
    ];

    pub fn period_ms(&self) -> Option<i64> {
        match self {
            Self::None => None,
            Self::OneMinute => Some(60_000),
            Self::FiveMinutes => Some(5 * 60_000),
            Self::OneHour => Some(60 * 60_000),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::OneMinute => "1min",
            Self::FiveMinutes => "5min",
            Self::OneHour => "1hour",
        }
    }

    /// Unknown names mean "no aggregation" rather than an error.
    pub fn parse_lossy(s: &str) -> Self {
        match Self::ALL.into_iter().find(|p| p.as_str() == s) {
            Some(p) => p,
            None => {
                tracing::debug!("unsupported aggregation period `{s}`, aggregation disabled");
                Self::None
            }
        }
    }

    /// Maps an arbitrary millisecond width back onto a known period.
    pub fn from_period_ms(period_ms: i64) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.period_ms() == Some(period_ms))
            .unwrap_or_default()
    }
}

impl fmt::Display for AggregationPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug)]
struct Bucket {
    sum: f64,
    count: usize,
    category: Category,
}

/// Running per-bucket sums keyed by bucket start.
///
/// The category of a bucket is the one of the first point pushed into it;
/// [`BucketAccumulator::merge`] keeps that rule as long as `self` covers
/// earlier input than `other`.
#[derive(Clone, Debug, Default)]
pub struct BucketAccumulator {
    period_ms: i64,
    buckets: BTreeMap<i64, Bucket>,
}

impl BucketAccumulator {
    pub fn new(period_ms: i64) -> Self {
        Self {
            period_ms,
            buckets: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, point: &DataPoint) {
        let key = point.timestamp.div_euclid(self.period_ms) * self.period_ms;
        self.buckets
            .entry(key)
            .and_modify(|b| {
                b.sum += point.value;
                b.count += 1;
            })
            .or_insert(Bucket {
                sum: point.value,
                count: 1,
                category: point.category,
            });
    }

    pub fn extend<'a>(&mut self, points: impl IntoIterator<Item = &'a DataPoint>) {
        for p in points {
            self.push(p);
        }
    }

    pub fn merge(mut self, other: BucketAccumulator) -> Self {
        if self.buckets.is_empty() {
            return Self {
                period_ms: other.period_ms,
                buckets: other.buckets,
            };
        }
        for (key, b) in other.buckets {
            self.buckets
                .entry(key)
                .and_modify(|acc| {
                    acc.sum += b.sum;
                    acc.count += b.count;
                })
                .or_insert(b);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// One mean point per bucket, ascending by bucket start.
    pub fn finish(self) -> Vec<DataPoint> {
        self.buckets
            .into_iter()
            .map(|(key, b)| DataPoint::new(key, b.sum / b.count as f64, b.category))
            .collect()
    }
}

/// Buckets `points` into `period_ms` windows and reduces each to its mean.
///
/// A non-positive period returns the input unchanged.
pub fn aggregate(points: &[DataPoint], period_ms: i64) -> Vec<DataPoint> {
    aggregate_parts([points], period_ms)
}

/// Same as [`aggregate`] over consecutive slices, e.g. the two halves of a
/// ring buffer. Slices must be given oldest first.
pub fn aggregate_parts<'a, I>(parts: I, period_ms: i64) -> Vec<DataPoint>
where
    I: IntoIterator<Item = &'a [DataPoint]>,
{
    let parts: Vec<&[DataPoint]> = parts.into_iter().collect();
    if period_ms <= 0 {
        return parts.iter().flat_map(|p| p.iter().cloned()).collect();
    }

    let total: usize = parts.iter().map(|p| p.len()).sum();
    let acc = if total >= PARALLEL_THRESHOLD {
        parts
            .iter()
            .map(|part| accumulate_par(part, period_ms))
            .fold(BucketAccumulator::new(period_ms), BucketAccumulator::merge)
    } else {
        let mut acc = BucketAccumulator::new(period_ms);
        for part in &parts {
            acc.extend(part.iter());
        }
        acc
    };
    acc.finish()
}

fn accumulate_par(points: &[DataPoint], period_ms: i64) -> BucketAccumulator {
    points
        .par_chunks(PARALLEL_CHUNK)
        .map(|chunk| {
            let mut acc = BucketAccumulator::new(period_ms);
            acc.extend(chunk);
            acc
        })
        .reduce(|| BucketAccumulator::new(period_ms), BucketAccumulator::merge)
}
