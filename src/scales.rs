/// Affine map from a data domain onto a pixel range.
///
/// The range may be inverted (`range.0 > range.1`), which is how the Y axis
/// puts larger values higher on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl LinearScale {
    /// Returns `None` for an empty or non-finite domain, where the map is
    /// undefined and nothing should be drawn.
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Option<Self> {
        let span = domain.1 - domain.0;
        if !span.is_finite() || span.abs() <= f64::EPSILON {
            return None;
        }
        Some(Self { domain, range })
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    /// Computed relative to the domain start so epoch-millisecond inputs
    /// keep their precision.
    pub fn map(&self, value: f64) -> f32 {
        let t = (value - self.domain.0) / (self.domain.1 - self.domain.0);
        (self.range.0 as f64 + t * (self.range.1 - self.range.0) as f64) as f32
    }

    pub fn invert(&self, pixel: f32) -> f64 {
        let t = (pixel - self.range.0) as f64 / (self.range.1 - self.range.0) as f64;
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }
}
