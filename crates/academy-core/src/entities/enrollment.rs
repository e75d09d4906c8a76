//! Enrollment entity - links a user to a course they are taking

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::entities::{Course, User};
use crate::value_objects::{EntityId, ProgressPercent};

/// Enrollment entity; at most one per (user, course)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub id: EntityId,
    pub user_id: EntityId,
    pub course_id: EntityId,
    /// Percentage in 0..=100
    pub progress: Decimal,
    /// Set exactly when progress is at least 100
    pub completed_at: Option<DateTime<Utc>>,
    pub enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(user_id: EntityId, course_id: EntityId) -> Self {
        Self {
            id: EntityId::generate(),
            user_id,
            course_id,
            progress: Decimal::ZERO,
            completed_at: None,
            enrolled_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Apply a new progress value.
    ///
    /// `completed_at` is stamped the first time progress reaches 100, kept while
    /// it stays there and cleared when it drops below.
    pub fn apply_progress(&mut self, progress: ProgressPercent, now: DateTime<Utc>) {
        self.progress = progress.value();
        if progress.is_complete() {
            self.completed_at.get_or_insert(now);
        } else {
            self.completed_at = None;
        }
    }
}

/// Enrollment joined with its course, for "my courses" listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentWithCourse {
    pub enrollment: Enrollment,
    pub course: Course,
}

/// Enrollment joined with its learner, for instructor rosters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentWithUser {
    pub enrollment: Enrollment,
    pub user: User,
}
