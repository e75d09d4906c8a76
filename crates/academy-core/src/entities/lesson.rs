//! Lesson entity and per-user lesson progress

use chrono::{DateTime, Utc};

use crate::value_objects::EntityId;

/// Lesson within a course; `order` is unique among a course's live lessons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub id: EntityId,
    pub course_id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub video_url: Option<String>,
    /// Minutes
    pub duration: Option<i32>,
    pub order: i32,
    pub is_preview: bool,
    pub created_at: DateTime<Utc>,
}

impl Lesson {
    pub fn new(course_id: EntityId, title: String, order: i32) -> Self {
        Self {
            id: EntityId::generate(),
            course_id,
            title,
            description: None,
            content: None,
            video_url: None,
            duration: None,
            order,
            is_preview: false,
            created_at: Utc::now(),
        }
    }

    /// Duration in minutes, counting a missing value as zero
    #[inline]
    pub fn minutes(&self) -> i64 {
        i64::from(self.duration.unwrap_or(0))
    }
}

/// Completion record for one (user, lesson) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonProgress {
    pub id: EntityId,
    pub user_id: EntityId,
    pub lesson_id: EntityId,
    pub is_completed: bool,
    /// Seconds
    pub watch_time: i32,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LessonProgress {
    pub fn new(user_id: EntityId, lesson_id: EntityId) -> Self {
        Self {
            id: EntityId::generate(),
            user_id,
            lesson_id,
            is_completed: false,
            watch_time: 0,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    /// Mark completed, adding watch time and keeping the first completion instant
    pub fn complete(&mut self, watch_time_seconds: i32, now: DateTime<Utc>) {
        self.is_completed = true;
        self.watch_time = self.watch_time.saturating_add(watch_time_seconds.max(0));
        self.completed_at.get_or_insert(now);
    }
}
