//! Notification entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::EntityId;

/// Kind of notification, stored as its snake_case name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    CourseUpdate,
    LiveClass,
    Achievement,
    Discussion,
    System,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CourseUpdate => "course_update",
            Self::LiveClass => "live_class",
            Self::Achievement => "achievement",
            Self::Discussion => "discussion",
            Self::System => "system",
        }
    }

    /// Parse a stored kind; unknown values fall back to `System`
    pub fn parse(s: &str) -> Self {
        match s {
            "course_update" => Self::CourseUpdate,
            "live_class" => Self::LiveClass,
            "achievement" => Self::Achievement,
            "discussion" => Self::Discussion,
            _ => Self::System,
        }
    }
}

/// Notification delivered to a single user
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: EntityId,
    pub user_id: EntityId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub is_read: bool,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(user_id: EntityId, title: String, message: String, kind: NotificationKind) -> Self {
        Self {
            id: EntityId::generate(),
            user_id,
            title,
            message,
            kind,
            is_read: false,
            metadata: None,
            created_at: Utc::now(),
        }
    }

    /// Sent after a successful course purchase
    pub fn enrollment_confirmed(user_id: EntityId, course_id: EntityId) -> Self {
        let mut notification = Self::new(
            user_id,
            "Course Enrollment Successful".to_string(),
            "You have been successfully enrolled in the course!".to_string(),
            NotificationKind::CourseUpdate,
        );
        notification.metadata = Some(serde_json::json!({ "courseId": course_id.to_string() }));
        notification
    }

    /// Whether this is the purchase confirmation for `course_id`
    pub fn confirms_enrollment(&self, course_id: EntityId) -> bool {
        let course = course_id.to_string();
        self.kind == NotificationKind::CourseUpdate
            && self
                .metadata
                .as_ref()
                .and_then(|m| m.get("courseId"))
                .and_then(|v| v.as_str())
                == Some(course.as_str())
    }
}
