use serde::Serialize;
use std::ops::RangeInclusive;

/// Linear mapping from a level to its distance from the chart center.
///
/// `radius(0) == inner` and `radius(max_level) == outer`. Levels outside `0..=max_level`
/// are extrapolated along the same line. A `max_level` of zero collapses every level onto
/// the inner radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelScale {
    max_level: u32,
    inner: f64,
    outer: f64,
}

impl LevelScale {
    pub fn new(max_level: u32, inner: f64, outer: f64) -> Self {
        Self {
            max_level,
            inner,
            outer,
        }
    }

    pub fn radius(&self, level: f64) -> f64 {
        if self.max_level == 0 {
            return self.inner;
        }
        self.inner + level / self.max_level as f64 * (self.outer - self.inner)
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn inner(&self) -> f64 {
        self.inner
    }

    pub fn outer(&self) -> f64 {
        self.outer
    }

    /// The levels that get a ring and a label: `1..=max_level`.
    pub fn levels(&self) -> RangeInclusive<u32> {
        1..=self.max_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let scale = LevelScale::new(7, 90.0, 200.0);
        assert_eq!(scale.radius(0.0), 90.0);
        assert!((scale.radius(7.0) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic() {
        let scale = LevelScale::new(5, 60.0, 180.0);
        let radii: Vec<f64> = (0..=5).map(|l| scale.radius(l as f64)).collect();
        assert!(radii.windows(2).all(|w| w[0] <= w[1]));
        assert!((radii[1] - radii[0] - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_max_level_collapses() {
        let scale = LevelScale::new(0, 90.0, 200.0);
        for level in [0.0, 1.0, 42.0] {
            assert_eq!(scale.radius(level), 90.0);
        }
        assert_eq!(scale.levels().count(), 0);
    }
}
