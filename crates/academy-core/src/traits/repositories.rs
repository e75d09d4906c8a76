//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.
//!
//! Operations that touch a derived field (enrollment counts, course rating,
//! discussion view and reply counts) are single calls here so that an
//! implementation can run the source write and the counter write atomically.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::entities::{
    Category, Course, Discussion, DiscussionReply, Enrollment, EnrollmentWithCourse,
    EnrollmentWithUser, ForumCategory, Lesson, LiveClass, LiveClassAttendee, Notification,
    Review, ReviewWithUser, User, UserRole,
};
use crate::error::DomainError;
use crate::progress::EnrollmentSnapshot;
use crate::value_objects::{EntityId, ProgressPercent};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Insert on first sign-in, otherwise merge profile fields and stamp `updated_at`.
    /// Role and billing reference of an existing user are left untouched.
    async fn upsert(&self, user: &User) -> RepoResult<User>;

    /// Change a user's role
    async fn update_role(&self, id: EntityId, role: UserRole) -> RepoResult<User>;

    /// Store the payment provider's customer reference
    async fn set_billing_customer(&self, id: EntityId, customer_id: &str) -> RepoResult<()>;
}

// ============================================================================
// Category Repositories
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: &Category) -> RepoResult<()>;

    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Category>>;

    /// All categories ordered by name
    async fn list(&self) -> RepoResult<Vec<Category>>;
}

#[async_trait]
pub trait ForumCategoryRepository: Send + Sync {
    async fn create(&self, category: &ForumCategory) -> RepoResult<()>;

    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<ForumCategory>>;

    /// All forum categories ordered by name
    async fn list(&self) -> RepoResult<Vec<ForumCategory>>;
}

// ============================================================================
// Course Repository
// ============================================================================

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Create a new course
    async fn create(&self, course: &Course) -> RepoResult<()>;

    /// Find a course that has not been deleted
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Course>>;

    /// Published courses, newest first
    async fn list_published(&self) -> RepoResult<Vec<Course>>;

    /// Courses taught by an instructor, newest first
    async fn find_by_instructor(&self, instructor_id: EntityId) -> RepoResult<Vec<Course>>;

    /// Persist editable fields and `updated_at`. Derived fields are not written.
    async fn update(&self, course: &Course) -> RepoResult<()>;

    /// Soft delete a course
    async fn delete(&self, id: EntityId) -> RepoResult<()>;
}

// ============================================================================
// Lesson Repository
// ============================================================================

#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Create a lesson; fails with `LessonOrderTaken` on a duplicate order
    async fn create(&self, lesson: &Lesson) -> RepoResult<()>;

    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Lesson>>;

    /// Lessons of a course sorted by `order`
    async fn find_by_course(&self, course_id: EntityId) -> RepoResult<Vec<Lesson>>;

    async fn update(&self, lesson: &Lesson) -> RepoResult<()>;

    /// Soft delete a lesson
    async fn delete(&self, id: EntityId) -> RepoResult<()>;
}

// ============================================================================
// Enrollment Repository
// ============================================================================

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Insert the enrollment and increment the course's `total_enrollments`
    /// as one atomic unit. Fails with `AlreadyEnrolled` for a duplicate pair.
    async fn create(&self, enrollment: &Enrollment) -> RepoResult<()>;

    /// Find the enrollment of a user in a course
    async fn find(&self, user_id: EntityId, course_id: EntityId) -> RepoResult<Option<Enrollment>>;

    /// A user's enrollments with their courses, newest first
    async fn find_by_user(&self, user_id: EntityId) -> RepoResult<Vec<EnrollmentWithCourse>>;

    /// A course's enrollments with their learners, newest first
    async fn find_by_course(&self, course_id: EntityId) -> RepoResult<Vec<EnrollmentWithUser>>;

    /// Set progress, maintaining `completed_at`. Fails with `NotEnrolled`.
    async fn update_progress(
        &self,
        user_id: EntityId,
        course_id: EntityId,
        progress: ProgressPercent,
    ) -> RepoResult<Enrollment>;

    /// Mark a lesson completed for the user and recompute the enrollment's
    /// progress from completed lessons, in one atomic unit.
    async fn record_lesson_completion(
        &self,
        user_id: EntityId,
        lesson: &Lesson,
        watch_time_seconds: i32,
    ) -> RepoResult<Enrollment>;

    /// One snapshot per enrollment of the user, with the summed lesson minutes
    /// of its course
    async fn progress_snapshots(&self, user_id: EntityId) -> RepoResult<Vec<EnrollmentSnapshot>>;
}

// ============================================================================
// Live Class Repository
// ============================================================================

#[async_trait]
pub trait LiveClassRepository: Send + Sync {
    async fn create(&self, live_class: &LiveClass) -> RepoResult<()>;

    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<LiveClass>>;

    /// All classes, latest scheduled first
    async fn list(&self) -> RepoResult<Vec<LiveClass>>;

    /// Classes scheduled after `now`, soonest first
    async fn list_upcoming(&self, now: DateTime<Utc>) -> RepoResult<Vec<LiveClass>>;

    async fn set_active(&self, id: EntityId, active: bool) -> RepoResult<LiveClass>;

    /// Record an attendance, enforcing `max_attendees` and one open
    /// attendance per user
    async fn join(&self, attendee: &LiveClassAttendee) -> RepoResult<()>;

    /// Close the user's open attendance
    async fn leave(
        &self,
        live_class_id: EntityId,
        user_id: EntityId,
        left_at: DateTime<Utc>,
    ) -> RepoResult<LiveClassAttendee>;

    /// Attendances of a class in join order
    async fn find_attendees(&self, live_class_id: EntityId) -> RepoResult<Vec<LiveClassAttendee>>;
}

// ============================================================================
// Discussion Repository
// ============================================================================

#[async_trait]
pub trait DiscussionRepository: Send + Sync {
    async fn create(&self, discussion: &Discussion) -> RepoResult<()>;

    /// Discussions, optionally of one forum category, newest first
    async fn list(&self, category_id: Option<EntityId>) -> RepoResult<Vec<Discussion>>;

    /// Increment `view_count` and return the updated discussion
    async fn find_and_record_view(&self, id: EntityId) -> RepoResult<Option<Discussion>>;

    /// Read without counting a view
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Discussion>>;

    /// Update pinned/locked flags; `None` leaves a flag unchanged
    async fn set_flags(
        &self,
        id: EntityId,
        pinned: Option<bool>,
        locked: Option<bool>,
    ) -> RepoResult<Discussion>;

    /// Insert the reply and increment the discussion's `reply_count` atomically
    async fn create_reply(&self, reply: &DiscussionReply) -> RepoResult<()>;

    async fn find_reply(&self, id: EntityId) -> RepoResult<Option<DiscussionReply>>;

    /// Replies of a discussion, oldest first
    async fn find_replies(&self, discussion_id: EntityId) -> RepoResult<Vec<DiscussionReply>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// A user's notifications, newest first
    async fn find_by_user(&self, user_id: EntityId) -> RepoResult<Vec<Notification>>;

    /// Mark one notification read; fails with NotFound unless owned by `user_id`
    async fn mark_read(&self, id: EntityId, user_id: EntityId) -> RepoResult<()>;

    /// Mark all of a user's notifications read, returning how many changed
    async fn mark_all_read(&self, user_id: EntityId) -> RepoResult<u64>;
}

// ============================================================================
// Review Repository
// ============================================================================

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert the review and recompute the course rating atomically.
    /// Returns the new rating.
    async fn create(&self, review: &Review) -> RepoResult<Decimal>;

    /// Reviews of a course with their authors, newest first
    async fn find_by_course(&self, course_id: EntityId) -> RepoResult<Vec<ReviewWithUser>>;
}
