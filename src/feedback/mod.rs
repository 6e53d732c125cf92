//! Feedback Tracker
//!
//! Collects the user's judgment of each recognition result and derives a
//! running session accuracy from the counts.

use tracing::{debug, info};

/// User judgment of a recognition result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackCategory {
    /// The text matched the drawing
    Correct,
    /// Partially right
    Kinda,
    /// Not even close
    Wrong,
}

impl FeedbackCategory {
    /// All categories in display order
    pub const ALL: [FeedbackCategory; 3] = [
        FeedbackCategory::Correct,
        FeedbackCategory::Kinda,
        FeedbackCategory::Wrong,
    ];

    /// Button/label text for this category
    pub fn label(&self) -> &'static str {
        match self {
            FeedbackCategory::Correct => "Correct",
            FeedbackCategory::Kinda => "Kinda",
            FeedbackCategory::Wrong => "Wrong",
        }
    }

    /// Contribution of one judgment to the weighted score
    pub fn weight(&self) -> f64 {
        match self {
            FeedbackCategory::Correct => 1.0,
            FeedbackCategory::Kinda => 0.5,
            FeedbackCategory::Wrong => 0.0,
        }
    }
}

/// Per-category judgment counts for the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackCounts {
    pub correct: u64,
    pub kinda: u64,
    pub wrong: u64,
}

impl FeedbackCounts {
    /// Count recorded for a category
    pub fn get(&self, category: FeedbackCategory) -> u64 {
        match category {
            FeedbackCategory::Correct => self.correct,
            FeedbackCategory::Kinda => self.kinda,
            FeedbackCategory::Wrong => self.wrong,
        }
    }

    fn increment(&mut self, category: FeedbackCategory) {
        let slot = match category {
            FeedbackCategory::Correct => &mut self.correct,
            FeedbackCategory::Kinda => &mut self.kinda,
            FeedbackCategory::Wrong => &mut self.wrong,
        };
        *slot = slot.saturating_add(1);
    }

    /// Total number of judgments
    pub fn total(&self) -> u64 {
        self.correct + self.kinda + self.wrong
    }

    /// Weighted accuracy in percent, `None` until the first judgment
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }

        let score: f64 = FeedbackCategory::ALL
            .iter()
            .map(|c| self.get(*c) as f64 * c.weight())
            .sum();

        Some(score / total as f64 * 100.0)
    }
}

/// Session-scoped feedback state
///
/// Counts only ever grow. The `given` flag makes feedback one-shot per
/// recognition result and is re-armed by [`FeedbackTracker::begin_result`].
#[derive(Debug, Clone, Default)]
pub struct FeedbackTracker {
    counts: FeedbackCounts,
    given: bool,
}

impl FeedbackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-arm for a new submission
    pub fn begin_result(&mut self) {
        self.given = false;
    }

    /// Whether feedback was already recorded for the current result
    pub fn is_given(&self) -> bool {
        self.given
    }

    /// Record a judgment for the displayed result
    ///
    /// Returns `false` (and changes nothing) when no result is displayed or
    /// feedback was already given for it.
    pub fn record(&mut self, category: FeedbackCategory, result_displayed: bool) -> bool {
        if !result_displayed {
            debug!("Ignoring {:?} feedback: no result displayed", category);
            return false;
        }
        if self.given {
            debug!("Ignoring {:?} feedback: already given for this result", category);
            return false;
        }

        self.counts.increment(category);
        self.given = true;
        info!(
            "Feedback recorded: {:?} (correct={}, kinda={}, wrong={})",
            category, self.counts.correct, self.counts.kinda, self.counts.wrong
        );
        true
    }

    pub fn counts(&self) -> FeedbackCounts {
        self.counts
    }

    /// Running accuracy, `None` when there is no feedback yet
    pub fn current_accuracy(&self) -> Option<f64> {
        self.counts.accuracy()
    }
}

/// Format an accuracy value the way the status strip shows it
pub fn format_accuracy(accuracy: f64) -> String {
    format!("{:.1}%", accuracy)
}
