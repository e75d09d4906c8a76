//! Learner progress statistics
//!
//! Storage produces one [`EnrollmentSnapshot`] per enrollment; the summary is
//! pure arithmetic over those snapshots.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Per-enrollment input to the progress summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentSnapshot {
    /// Percentage in 0..=100
    pub progress: Decimal,
    pub completed: bool,
    /// Sum of the course's lesson durations
    pub course_minutes: i64,
}

/// Aggregated statistics for one learner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total_courses: u64,
    pub completed_courses: u64,
    pub total_hours: i64,
    pub overall_progress: i64,
}

impl ProgressSummary {
    /// Summarize a learner's enrollments; no enrollments yields all zeros
    pub fn from_snapshots(snapshots: &[EnrollmentSnapshot]) -> Self {
        if snapshots.is_empty() {
            return Self::default();
        }

        let total_courses = snapshots.len() as u64;
        let completed_courses = snapshots.iter().filter(|s| s.completed).count() as u64;

        let learned_minutes: Decimal = snapshots
            .iter()
            .map(|s| Decimal::from(s.course_minutes) * s.progress / Decimal::ONE_HUNDRED)
            .sum();
        let progress_sum: Decimal = snapshots.iter().map(|s| s.progress).sum();

        Self {
            total_courses,
            completed_courses,
            total_hours: round_whole(learned_minutes / Decimal::from(60)),
            overall_progress: round_whole(progress_sum / Decimal::from(total_courses)),
        }
    }
}

fn round_whole(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}
