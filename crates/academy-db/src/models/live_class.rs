//! Live class database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for live_classes table
#[derive(Debug, Clone, FromRow)]
pub struct LiveClassModel {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: Uuid,
    pub course_id: Option<Uuid>,
    pub scheduled_at: DateTime<Utc>,
    pub duration: i32,
    pub meeting_url: Option<String>,
    pub is_active: bool,
    pub max_attendees: i32,
    pub created_at: DateTime<Utc>,
}

/// Database model for live_class_attendees table
#[derive(Debug, Clone, FromRow)]
pub struct LiveClassAttendeeModel {
    pub id: Uuid,
    pub live_class_id: Uuid,
    pub user_id: Uuid,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
}
