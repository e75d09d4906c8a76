//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Field names are camelCase on the wire.

use academy_core::EntityId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// User Requests
// ============================================================================

/// Profile sync from the identity provider
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SyncProfileRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: Option<String>,

    #[validate(url(message = "Profile image must be a URL"))]
    pub profile_image_url: Option<String>,
}

/// Change a user's role (admin only)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    /// learner, instructor or admin
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}

// ============================================================================
// Catalog Requests
// ============================================================================

/// Create course category request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Category name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Create forum category request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateForumCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Category name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 50, message = "Icon must be at most 50 characters"))]
    pub icon: Option<String>,
}

// ============================================================================
// Course Requests
// ============================================================================

/// Create course request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Description must be 1-10000 characters"))]
    pub description: String,

    #[validate(url(message = "Thumbnail must be a URL"))]
    pub thumbnail: Option<String>,

    /// Decimal amount in major units, accepted as string or number
    pub price: Decimal,

    /// ISO currency code, defaults to INR
    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: Option<String>,

    pub category_id: Option<EntityId>,

    /// beginner, intermediate or advanced
    #[serde(default = "default_level")]
    pub level: String,

    /// Total length in minutes
    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration: Option<i32>,

    #[serde(default)]
    pub is_published: bool,
}

fn default_level() -> String {
    "beginner".to_string()
}

/// Update course request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 10000, message = "Description must be 1-10000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Thumbnail must be a URL"))]
    pub thumbnail: Option<String>,

    pub price: Option<Decimal>,

    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: Option<String>,

    pub category_id: Option<EntityId>,

    pub level: Option<String>,

    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration: Option<i32>,

    pub is_published: Option<bool>,
}

// ============================================================================
// Lesson Requests
// ============================================================================

/// Create lesson request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    pub description: Option<String>,

    pub content: Option<String>,

    #[validate(url(message = "Video URL must be a URL"))]
    pub video_url: Option<String>,

    /// Length in minutes
    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration: Option<i32>,

    /// Position within the course, unique per course
    #[validate(range(min = 0, message = "Order cannot be negative"))]
    pub order: i32,

    #[serde(default)]
    pub is_preview: bool,
}

/// Update lesson request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLessonRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub content: Option<String>,

    #[validate(url(message = "Video URL must be a URL"))]
    pub video_url: Option<String>,

    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration: Option<i32>,

    #[validate(range(min = 0, message = "Order cannot be negative"))]
    pub order: Option<i32>,

    pub is_preview: Option<bool>,
}

/// Mark a lesson completed
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteLessonRequest {
    /// Seconds watched in this session
    #[serde(default)]
    #[validate(range(min = 0, message = "Watch time cannot be negative"))]
    pub watch_time_seconds: i32,
}

// ============================================================================
// Enrollment Requests
// ============================================================================

/// Enroll in a course
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub course_id: EntityId,
}

/// Set enrollment progress directly
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProgressRequest {
    /// Percentage in [0, 100]
    pub progress: Decimal,
}

/// Submit a course review
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitReviewRequest {
    /// Stars in [1, 5]; range is checked by the domain
    pub rating: i32,

    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub comment: Option<String>,
}

// ============================================================================
// Live Class Requests
// ============================================================================

/// Schedule a live class
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLiveClassRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    pub description: Option<String>,

    pub course_id: Option<EntityId>,

    pub scheduled_at: DateTime<Utc>,

    /// Length in minutes
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration: i32,

    #[validate(url(message = "Meeting URL must be a URL"))]
    pub meeting_url: Option<String>,

    #[validate(range(min = 1, message = "Max attendees must be at least 1"))]
    pub max_attendees: Option<i32>,
}

/// Toggle the active flag of a live class
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetLiveClassActiveRequest {
    pub is_active: bool,
}

// ============================================================================
// Discussion Requests
// ============================================================================

/// Start a discussion
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiscussionRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,

    pub category_id: EntityId,

    pub course_id: Option<EntityId>,
}

/// Pin or lock a discussion (admin only)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDiscussionRequest {
    pub is_pinned: Option<bool>,
    pub is_locked: Option<bool>,
}

/// Reply to a discussion
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplyRequest {
    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,

    /// Top-level reply to answer; omitted for a top-level reply
    pub parent_reply_id: Option<EntityId>,
}

// ============================================================================
// Checkout Requests
// ============================================================================

/// Start paying for a course
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub course_id: EntityId,
}

/// Report a successful payment
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    pub course_id: EntityId,

    pub payment_intent_id: Option<String>,
}
