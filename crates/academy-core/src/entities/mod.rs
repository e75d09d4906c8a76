//! Domain entities - core business objects

mod category;
mod course;
mod discussion;
mod enrollment;
mod lesson;
mod live_class;
mod notification;
mod review;
mod user;

pub use category::{Category, ForumCategory};
pub use course::{Course, CourseLevel};
pub use discussion::{Discussion, DiscussionReply};
pub use enrollment::{Enrollment, EnrollmentWithCourse, EnrollmentWithUser};
pub use lesson::{Lesson, LessonProgress};
pub use live_class::{LiveClass, LiveClassAttendee};
pub use notification::{Notification, NotificationKind};
pub use review::{Review, ReviewWithUser};
pub use user::{User, UserRole};
