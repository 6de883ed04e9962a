//! Match confidence bounded to [0.0, 1.0].
//!
//! The matcher scores on a 0-100 scale; entities carry that score divided by
//! 100. Ranking in the pipeline compares these values directly, which is only
//! meaningful because every entity comes from the same gazetteer scorer.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Normalized gazetteer match score.
///
/// ```rust
/// use gaffer_core::Confidence;
///
/// let conf = Confidence::from_score(94.7);
/// assert!((conf.get() - 0.947).abs() < 1e-9);
/// assert_eq!(Confidence::from_score(250.0), Confidence::MAX);
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// No confidence.
    pub const MIN: Self = Self(0.0);

    /// An exact match.
    pub const MAX: Self = Self(1.0);

    /// Clamp into [0.0, 1.0]; NaN becomes 0.
    #[must_use]
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Self::MIN
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Normalize a 0-100 similarity score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        Self::saturating(score / 100.0)
    }

    /// The value in [0.0, 1.0].
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Highest first; NaN cannot occur so the order is total.
    #[must_use]
    pub fn cmp_desc(&self, other: &Self) -> Ordering {
        other.0.total_cmp(&self.0)
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Debug for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Confidence({:.4})", self.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturating_clamps() {
        assert_eq!(Confidence::saturating(-1.0), Confidence::MIN);
        assert_eq!(Confidence::saturating(2.0), Confidence::MAX);
        assert_eq!(Confidence::saturating(f64::NAN), Confidence::MIN);
    }

    #[test]
    fn from_score_divides_by_hundred() {
        assert_eq!(Confidence::from_score(100.0).get(), 1.0);
        assert_eq!(Confidence::from_score(80.0).get(), 0.8);
        assert_eq!(Confidence::from_score(150.0).get(), 1.0);
    }

    #[test]
    fn cmp_desc_puts_higher_first() {
        let mut v = [Confidence(0.8), Confidence(0.95), Confidence(0.9)];
        v.sort_by(Confidence::cmp_desc);
        assert_eq!(v.map(Confidence::get), [0.95, 0.9, 0.8]);
    }

    #[test]
    fn serializes_as_bare_number() {
        assert_eq!(serde_json::to_string(&Confidence(0.5)).unwrap(), "0.5");
        assert_eq!(Confidence::from_score(92.0).to_string(), "0.92");
    }
}
