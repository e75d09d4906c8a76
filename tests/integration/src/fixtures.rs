//! Test fixtures and request/response bodies
//!
//! Mirrors the camelCase wire format. Decimals arrive as strings.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique names
static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique suffix for test data
pub fn unique_suffix() -> String {
    let count = COUNTER.fetch_add(1, Ordering::SeqCst);
    let timestamp = Utc::now().timestamp_millis();
    format!("{timestamp}_{count}")
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseBody {
    pub title: String,
    pub description: String,
    pub price: String,
    pub level: String,
    pub is_published: bool,
}

impl CreateCourseBody {
    /// A published beginner course priced 499.00
    pub fn published() -> Self {
        Self {
            title: format!("Rust Basics {}", unique_suffix()),
            description: "Ownership, borrowing and lifetimes".to_string(),
            price: "499.00".to_string(),
            level: "beginner".to_string(),
            is_published: true,
        }
    }

    pub fn draft() -> Self {
        Self {
            is_published: false,
            ..Self::published()
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonBody {
    pub title: String,
    pub duration: Option<i32>,
    pub order: i32,
}

impl CreateLessonBody {
    pub fn new(order: i32, duration: i32) -> Self {
        Self {
            title: format!("Lesson {order}"),
            duration: Some(duration),
            order,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLiveClassBody {
    pub title: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration: i32,
    pub max_attendees: Option<i32>,
}

impl CreateLiveClassBody {
    /// A one-hour class tomorrow
    pub fn tomorrow(max_attendees: Option<i32>) -> Self {
        Self {
            title: format!("Office hours {}", unique_suffix()),
            scheduled_at: Utc::now() + Duration::days(1),
            duration: 60,
            max_attendees,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiscussionBody {
    pub title: String,
    pub content: String,
    pub category_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplyBody {
    pub content: String,
    pub parent_reply_id: Option<String>,
}

// ============================================================================
// Response bodies
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub role: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseBody {
    pub id: String,
    pub title: String,
    pub price: String,
    pub currency: String,
    pub instructor_id: String,
    pub level: String,
    pub is_published: bool,
    pub rating: String,
    pub total_enrollments: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailBody {
    #[serde(flatten)]
    pub course: CourseBody,
    pub lessons: Vec<LessonBody>,
    pub reviews: Vec<ReviewBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonBody {
    pub id: String,
    pub course_id: String,
    pub order: i32,
    pub duration: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBody {
    pub id: String,
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmittedBody {
    pub review: ReviewBody,
    pub course_rating: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentBody {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub progress: String,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummaryBody {
    pub total_courses: u64,
    pub completed_courses: u64,
    pub total_hours: i64,
    pub overall_progress: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveClassBody {
    pub id: String,
    pub instructor_id: String,
    pub is_active: bool,
    pub max_attendees: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeBody {
    pub live_class_id: String,
    pub user_id: String,
    pub left_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumCategoryBody {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionBody {
    pub id: String,
    pub view_count: i32,
    pub reply_count: i32,
    pub is_locked: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionDetailBody {
    #[serde(flatten)]
    pub discussion: DiscussionBody,
    pub replies: Vec<ReplyBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyBody {
    pub id: String,
    pub parent_reply_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationBody {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_read: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentBody {
    pub client_secret: String,
    pub payment_intent_id: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmPaymentBody {
    pub message: String,
    pub enrollment: EnrollmentBody,
    pub notification: NotificationBody,
}

#[derive(Debug, Deserialize)]
pub struct HealthBody {
    pub status: String,
}
