//! Course and lesson database models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for courses table
#[derive(Debug, Clone, FromRow)]
pub struct CourseModel {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub price: Decimal,
    pub currency: String,
    pub category_id: Option<Uuid>,
    pub instructor_id: Uuid,
    pub level: String,
    pub duration: Option<i32>,
    pub is_published: bool,
    pub rating: Decimal,
    pub total_enrollments: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl CourseModel {
    /// Check if course is soft deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Database model for lessons table
#[derive(Debug, Clone, FromRow)]
pub struct LessonModel {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub duration: Option<i32>,
    pub order: i32,
    pub is_preview: bool,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
