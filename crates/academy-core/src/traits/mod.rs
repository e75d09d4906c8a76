//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CategoryRepository, CourseRepository, DiscussionRepository, EnrollmentRepository,
    ForumCategoryRepository, LessonRepository, LiveClassRepository, NotificationRepository,
    RepoResult, ReviewRepository, UserRepository,
};
