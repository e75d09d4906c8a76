//! Enrollment database models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for enrollments table
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub progress: Decimal,
    pub completed_at: Option<DateTime<Utc>>,
    pub enrolled_at: DateTime<Utc>,
}

/// Row of the per-user progress aggregate query
#[derive(Debug, Clone, FromRow)]
pub struct ProgressSnapshotModel {
    pub progress: Decimal,
    pub completed: bool,
    pub course_minutes: i64,
}
