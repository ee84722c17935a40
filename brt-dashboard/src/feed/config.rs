//! Actionable-window policy for the feed processor.

/// Upper bound on estimates worth displaying, in minutes.
///
/// Predictions further out are noisy and are dropped.
pub const DEFAULT_MAX_MINUTES: f64 = 16.0;

/// Which predictions count as actionable.
///
/// A prediction is actionable when its estimate lies strictly between the
/// lower bound and, if set, the upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedPolicy {
    /// Exclusive lower bound (minutes).
    pub min_minutes: f64,

    /// Exclusive upper bound (minutes), if any.
    pub max_minutes: Option<f64>,
}

impl FeedPolicy {
    /// Create a policy with the given bounds.
    pub fn new(min_minutes: f64, max_minutes: Option<f64>) -> Self {
        Self {
            min_minutes,
            max_minutes,
        }
    }

    /// Accept every strictly positive estimate, with no upper bound.
    pub fn positive_only() -> Self {
        Self::new(0.0, None)
    }

    /// Replace the upper bound.
    pub fn with_max_minutes(mut self, max_minutes: Option<f64>) -> Self {
        self.max_minutes = max_minutes;
        self
    }

    /// Whether an estimate falls inside the actionable window.
    pub fn is_actionable(&self, estimated_minutes: f64) -> bool {
        estimated_minutes > self.min_minutes
            && self.max_minutes.is_none_or(|max| estimated_minutes < max)
    }
}

impl Default for FeedPolicy {
    fn default() -> Self {
        Self::new(0.0, Some(DEFAULT_MAX_MINUTES))
    }
}
