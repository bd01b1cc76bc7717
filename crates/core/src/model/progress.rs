/// Completed share of the curriculum, in `[0, 1]`.
///
/// A curriculum without topics has a ratio of `0.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress_ratio(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (completed as f64 / total as f64).clamp(0.0, 1.0)
}

/// Aggregated view of learner progress, useful for a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    #[must_use]
    pub fn ratio(&self) -> f64 {
        progress_ratio(self.completed, self.total)
    }

    /// Whole percent, rounded to nearest.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u8 {
        (self.ratio() * 100.0).round() as u8
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }
}
