//! # academy-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! progress rules derived from enrollments.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod progress;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Category, Course, CourseLevel, Discussion, DiscussionReply, Enrollment, EnrollmentWithCourse,
    EnrollmentWithUser, ForumCategory, Lesson, LessonProgress, LiveClass, LiveClassAttendee,
    Notification, NotificationKind, Review, ReviewWithUser, User, UserRole,
};
pub use error::DomainError;
pub use progress::{EnrollmentSnapshot, ProgressSummary};
pub use traits::{
    CategoryRepository, CourseRepository, DiscussionRepository, EnrollmentRepository,
    ForumCategoryRepository, LessonRepository, LiveClassRepository, NotificationRepository,
    RepoResult, ReviewRepository, UserRepository,
};
pub use value_objects::{EntityId, EntityIdParseError, ProgressPercent, Rating};
