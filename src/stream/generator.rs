use crate::data_types::{Category, DataPoint};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Spacing between consecutive samples, in milliseconds.
pub const SAMPLE_INTERVAL_MS: i64 = 100;

/// Synthetic sample source.
///
/// Deterministic for a given random source. The initial batch phases its
/// sine wave on the sample index while incremental points phase on the
/// previous timestamp, so the waveform jumps where live data meets the
/// initial history.
pub struct SampleGenerator<R = StdRng> {
    rng: R,
}

impl SampleGenerator<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Seeded when `seed` is given, otherwise drawn from the OS.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_os_rng(),
        }
    }
}

impl<R: Rng> SampleGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// `count` points spaced 100ms apart; the i-th one sits at
    /// `now_ms - (count - i) * 100`.
    pub fn generate_initial(&mut self, count: usize, now_ms: i64) -> Vec<DataPoint> {
        (0..count)
            .map(|i| {
                let timestamp = now_ms - (count - i) as i64 * SAMPLE_INTERVAL_MS;
                let value = self.sample_value(i as f64 / 100.0);
                DataPoint::new(timestamp, value, self.sample_category())
            })
            .collect()
    }

    /// The point following `last_timestamp`.
    pub fn generate_next(&mut self, last_timestamp: i64) -> DataPoint {
        let value = self.sample_value(last_timestamp as f64 / 10_000.0);
        DataPoint::new(
            last_timestamp + SAMPLE_INTERVAL_MS,
            value,
            self.sample_category(),
        )
    }

    /// `count` consecutive points after `last_timestamp`.
    pub fn generate_batch(&mut self, last_timestamp: i64, count: usize) -> Vec<DataPoint> {
        let mut out = Vec::with_capacity(count);
        let mut last = last_timestamp;
        for _ in 0..count {
            let p = self.generate_next(last);
            last = p.timestamp;
            out.push(p);
        }
        out
    }

    fn sample_value(&mut self, phase: f64) -> f64 {
        phase.sin() * 50.0 + self.rng.random_range(0.0..20.0) + 50.0
    }

    fn sample_category(&mut self) -> Category {
        Category::ALL[self.rng.random_range(0..Category::ALL.len())]
    }
}

/// Current wall-clock time in milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Initial dataset ending at the current time, drawn from the thread-local
/// random source.
pub fn generate_initial_dataset(count: usize) -> Vec<DataPoint> {
    SampleGenerator::new(rand::rng()).generate_initial(count, now_ms())
}
