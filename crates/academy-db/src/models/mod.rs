//! Database models - SQLx-compatible structs for PostgreSQL tables

mod category;
mod course;
mod discussion;
mod enrollment;
mod live_class;
mod notification;
mod review;
mod user;

pub use category::{CategoryModel, ForumCategoryModel};
pub use course::{CourseModel, LessonModel};
pub use discussion::{DiscussionModel, DiscussionReplyModel};
pub use enrollment::{EnrollmentModel, ProgressSnapshotModel};
pub use live_class::{LiveClassAttendeeModel, LiveClassModel};
pub use notification::NotificationModel;
pub use review::ReviewModel;
pub use user::UserModel;
