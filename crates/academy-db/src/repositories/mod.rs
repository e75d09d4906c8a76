//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in academy-core.
//! Each repository handles database operations for a specific domain entity.

mod category;
mod course;
mod discussion;
mod enrollment;
mod error;
mod lesson;
mod live_class;
mod notification;
mod review;
mod user;

pub use category::{PgCategoryRepository, PgForumCategoryRepository};
pub use course::PgCourseRepository;
pub use discussion::PgDiscussionRepository;
pub use enrollment::PgEnrollmentRepository;
pub use lesson::PgLessonRepository;
pub use live_class::PgLiveClassRepository;
pub use notification::PgNotificationRepository;
pub use review::PgReviewRepository;
pub use user::PgUserRepository;
