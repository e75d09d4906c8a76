//! Live class entity and attendance records

use chrono::{DateTime, Utc};

use crate::value_objects::EntityId;

/// Scheduled live session run by an instructor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveClass {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: EntityId,
    pub course_id: Option<EntityId>,
    pub scheduled_at: DateTime<Utc>,
    /// Minutes
    pub duration: i32,
    pub meeting_url: Option<String>,
    pub is_active: bool,
    pub max_attendees: i32,
    pub created_at: DateTime<Utc>,
}

impl LiveClass {
    pub const DEFAULT_MAX_ATTENDEES: i32 = 100;

    pub fn new(
        title: String,
        instructor_id: EntityId,
        scheduled_at: DateTime<Utc>,
        duration: i32,
    ) -> Self {
        Self {
            id: EntityId::generate(),
            title,
            description: None,
            instructor_id,
            course_id: None,
            scheduled_at,
            duration,
            meeting_url: None,
            is_active: false,
            max_attendees: Self::DEFAULT_MAX_ATTENDEES,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_at > now
    }

    #[inline]
    pub fn has_capacity(&self, present: i64) -> bool {
        present < i64::from(self.max_attendees)
    }
}

/// One attendance of a user in a live class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveClassAttendee {
    pub id: EntityId,
    pub live_class_id: EntityId,
    pub user_id: EntityId,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
}

impl LiveClassAttendee {
    pub fn new(live_class_id: EntityId, user_id: EntityId) -> Self {
        Self {
            id: EntityId::generate(),
            live_class_id,
            user_id,
            joined_at: Utc::now(),
            left_at: None,
        }
    }

    /// Joined and not yet left
    #[inline]
    pub fn is_present(&self) -> bool {
        self.left_at.is_none()
    }
}
