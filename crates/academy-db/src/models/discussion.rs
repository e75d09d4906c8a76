//! Discussion database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for discussions table
#[derive(Debug, Clone, FromRow)]
pub struct DiscussionModel {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub course_id: Option<Uuid>,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub view_count: i32,
    pub reply_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for discussion_replies table
#[derive(Debug, Clone, FromRow)]
pub struct DiscussionReplyModel {
    pub id: Uuid,
    pub discussion_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub parent_reply_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
