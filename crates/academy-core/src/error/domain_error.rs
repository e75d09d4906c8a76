//! Domain errors - error types for the domain layer

use rust_decimal::Decimal;
use thiserror::Error;

use crate::value_objects::EntityId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(EntityId),

    #[error("Course not found: {0}")]
    CourseNotFound(EntityId),

    #[error("Lesson not found: {0}")]
    LessonNotFound(EntityId),

    #[error("Category not found: {0}")]
    CategoryNotFound(EntityId),

    #[error("Forum category not found: {0}")]
    ForumCategoryNotFound(EntityId),

    #[error("Live class not found: {0}")]
    LiveClassNotFound(EntityId),

    #[error("Discussion not found: {0}")]
    DiscussionNotFound(EntityId),

    #[error("Reply not found: {0}")]
    ReplyNotFound(EntityId),

    #[error("Notification not found: {0}")]
    NotificationNotFound(EntityId),

    #[error("Not attending this live class")]
    AttendanceNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(i32),

    #[error("Progress must be between 0 and 100, got {0}")]
    InvalidProgress(Decimal),

    #[error("Parent reply belongs to a different discussion")]
    ReplyParentMismatch,

    #[error("Replies can only be nested one level deep")]
    NestedReply,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Instructor role required")]
    NotInstructor,

    #[error("Not the instructor of this course")]
    NotCourseOwner,

    #[error("Admin role required")]
    AdminRequired,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Already enrolled in this course")]
    AlreadyEnrolled,

    #[error("Lesson order {0} already used in this course")]
    LessonOrderTaken(i32),

    #[error("Already attending this live class")]
    AlreadyAttending,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Live class is full: max {max} attendees")]
    LiveClassFull { max: i32 },

    #[error("Discussion is locked")]
    DiscussionLocked,

    #[error("Not enrolled in this course")]
    NotEnrolled,

    // =========================================================================
    // Consistency Errors (retryable)
    // =========================================================================
    #[error("Aggregate update failed: {0}")]
    ConsistencyError(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::CourseNotFound(_) => "UNKNOWN_COURSE",
            Self::LessonNotFound(_) => "UNKNOWN_LESSON",
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::ForumCategoryNotFound(_) => "UNKNOWN_FORUM_CATEGORY",
            Self::LiveClassNotFound(_) => "UNKNOWN_LIVE_CLASS",
            Self::DiscussionNotFound(_) => "UNKNOWN_DISCUSSION",
            Self::ReplyNotFound(_) => "UNKNOWN_REPLY",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::AttendanceNotFound => "UNKNOWN_ATTENDANCE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidRating(_) => "INVALID_RATING",
            Self::InvalidProgress(_) => "INVALID_PROGRESS",
            Self::ReplyParentMismatch => "REPLY_PARENT_MISMATCH",
            Self::NestedReply => "NESTED_REPLY",

            // Authorization
            Self::NotInstructor => "NOT_INSTRUCTOR",
            Self::NotCourseOwner => "NOT_COURSE_OWNER",
            Self::AdminRequired => "ADMIN_REQUIRED",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyEnrolled => "ALREADY_ENROLLED",
            Self::LessonOrderTaken(_) => "LESSON_ORDER_TAKEN",
            Self::AlreadyAttending => "ALREADY_ATTENDING",

            // Business Rules
            Self::LiveClassFull { .. } => "LIVE_CLASS_FULL",
            Self::DiscussionLocked => "DISCUSSION_LOCKED",
            Self::NotEnrolled => "NOT_ENROLLED",

            // Consistency
            Self::ConsistencyError(_) => "CONSISTENCY_ERROR",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::CourseNotFound(_)
                | Self::LessonNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::ForumCategoryNotFound(_)
                | Self::LiveClassNotFound(_)
                | Self::DiscussionNotFound(_)
                | Self::ReplyNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::AttendanceNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidRating(_)
                | Self::InvalidProgress(_)
                | Self::ReplyParentMismatch
                | Self::NestedReply
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotInstructor | Self::NotCourseOwner | Self::AdminRequired
        )
    }

    /// Check if this is a conflict (duplicate) error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::AlreadyEnrolled
                | Self::LessonOrderTaken(_)
                | Self::AlreadyAttending
        )
    }

    /// Check if this is a business rule violation
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::LiveClassFull { .. } | Self::DiscussionLocked | Self::NotEnrolled
        )
    }

    /// Whether the caller may retry the same request
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConsistencyError(_))
    }
}
