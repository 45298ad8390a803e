use serde::{Deserialize, Serialize};

/// Inclusive scalar interval `[low, high]` with `low <= high`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthRange {
    low: f64,
    high: f64,
}

impl DepthRange {
    /// Returns `None` if either bound is NaN or `low > high`.
    pub fn new(low: f64, high: f64) -> Option<Self> {
        if low.is_nan() || high.is_nan() || low > high {
            return None;
        }
        Some(Self { low, high })
    }

    /// Always succeeds: an inverted range collapses onto `high`, a NaN bound
    /// takes the other bound's value (zero if both are NaN).
    pub fn saturating(low: f64, high: f64) -> Self {
        let high = match (high.is_nan(), low.is_nan()) {
            (false, _) => high,
            (true, false) => low,
            (true, true) => 0.0,
        };
        let low = if low.is_nan() { high } else { low.min(high) };
        Self { low, high }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.low;
        }
        value.clamp(self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::DepthRange;

    #[test]
    fn rejects_inverted_and_nan_bounds() {
        assert!(DepthRange::new(20.0, 10.0).is_none());
        assert!(DepthRange::new(f64::NAN, 10.0).is_none());
        assert!(DepthRange::new(0.0, f64::NAN).is_none());
        assert!(DepthRange::new(5.0, 5.0).is_some());
    }

    #[test]
    fn saturating_collapses_inverted_bounds() {
        let r = DepthRange::saturating(50.0, 20.0);
        assert_eq!((r.low(), r.high()), (20.0, 20.0));
        let r = DepthRange::saturating(f64::NAN, 20.0);
        assert_eq!((r.low(), r.high()), (20.0, 20.0));
        let r = DepthRange::saturating(5.0, 20.0);
        assert_eq!((r.low(), r.high()), (5.0, 20.0));
    }

    #[test]
    fn contains_is_inclusive() {
        let r = DepthRange::new(10.0, 20.0).unwrap();
        assert!(!r.contains(5.0));
        assert!(r.contains(10.0));
        assert!(r.contains(20.0));
        assert!(!r.contains(21.0));
        assert!(!r.contains(f64::NAN));
    }

    #[test]
    fn clamp_saturates() {
        let r = DepthRange::new(0.0, 120.0).unwrap();
        assert_eq!(r.clamp(-50.0), 0.0);
        assert_eq!(r.clamp(500.0), 120.0);
        assert_eq!(r.clamp(f64::NAN), 0.0);
    }
}
