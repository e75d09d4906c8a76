//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use academy_core::entities::{
    Category, Course, Discussion, DiscussionReply, Enrollment, EnrollmentWithCourse,
    EnrollmentWithUser, ForumCategory, Lesson, LiveClass, LiveClassAttendee, Notification, Review,
    ReviewWithUser, User,
};

use super::responses::{
    AttendeeResponse, CategoryResponse, CourseResponse, DiscussionResponse, EnrollmentResponse,
    ForumCategoryResponse, LessonResponse, LiveClassResponse, NotificationResponse,
    PublicUserResponse, ReplyResponse, ReviewResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            profile_image_url: user.profile_image_url.clone(),
            role: user.role.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            profile_image_url: user.profile_image_url.clone(),
        }
    }
}

// ============================================================================
// Catalog Mappers
// ============================================================================

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            description: category.description.clone(),
            created_at: category.created_at,
        }
    }
}

impl From<&ForumCategory> for ForumCategoryResponse {
    fn from(category: &ForumCategory) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            description: category.description.clone(),
            icon: category.icon.clone(),
            created_at: category.created_at,
        }
    }
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title.clone(),
            description: course.description.clone(),
            thumbnail: course.thumbnail.clone(),
            price: course.price,
            currency: course.currency.clone(),
            category_id: course.category_id.map(|id| id.to_string()),
            instructor_id: course.instructor_id.to_string(),
            level: course.level.as_str().to_string(),
            duration: course.duration,
            is_published: course.is_published,
            rating: course.rating,
            total_enrollments: course.total_enrollments,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self::from(&course)
    }
}

impl From<&Lesson> for LessonResponse {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id.to_string(),
            course_id: lesson.course_id.to_string(),
            title: lesson.title.clone(),
            description: lesson.description.clone(),
            content: lesson.content.clone(),
            video_url: lesson.video_url.clone(),
            duration: lesson.duration,
            order: lesson.order,
            is_preview: lesson.is_preview,
            created_at: lesson.created_at,
        }
    }
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.to_string(),
            course_id: review.course_id.to_string(),
            user_id: review.user_id.to_string(),
            rating: review.rating,
            comment: review.comment.clone(),
            created_at: review.created_at,
            user: None,
        }
    }
}

impl From<&ReviewWithUser> for ReviewResponse {
    fn from(row: &ReviewWithUser) -> Self {
        Self {
            user: Some(PublicUserResponse::from(&row.user)),
            ..Self::from(&row.review)
        }
    }
}

// ============================================================================
// Enrollment Mappers
// ============================================================================

impl From<&Enrollment> for EnrollmentResponse {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            id: enrollment.id.to_string(),
            user_id: enrollment.user_id.to_string(),
            course_id: enrollment.course_id.to_string(),
            progress: enrollment.progress,
            completed_at: enrollment.completed_at,
            enrolled_at: enrollment.enrolled_at,
            course: None,
            user: None,
        }
    }
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(enrollment: Enrollment) -> Self {
        Self::from(&enrollment)
    }
}

impl From<&EnrollmentWithCourse> for EnrollmentResponse {
    fn from(row: &EnrollmentWithCourse) -> Self {
        Self {
            course: Some(CourseResponse::from(&row.course)),
            ..Self::from(&row.enrollment)
        }
    }
}

impl From<&EnrollmentWithUser> for EnrollmentResponse {
    fn from(row: &EnrollmentWithUser) -> Self {
        Self {
            user: Some(PublicUserResponse::from(&row.user)),
            ..Self::from(&row.enrollment)
        }
    }
}

// ============================================================================
// Live Class Mappers
// ============================================================================

impl From<&LiveClass> for LiveClassResponse {
    fn from(class: &LiveClass) -> Self {
        Self {
            id: class.id.to_string(),
            title: class.title.clone(),
            description: class.description.clone(),
            instructor_id: class.instructor_id.to_string(),
            course_id: class.course_id.map(|id| id.to_string()),
            scheduled_at: class.scheduled_at,
            duration: class.duration,
            meeting_url: class.meeting_url.clone(),
            is_active: class.is_active,
            max_attendees: class.max_attendees,
            created_at: class.created_at,
        }
    }
}

impl From<&LiveClassAttendee> for AttendeeResponse {
    fn from(attendee: &LiveClassAttendee) -> Self {
        Self {
            id: attendee.id.to_string(),
            live_class_id: attendee.live_class_id.to_string(),
            user_id: attendee.user_id.to_string(),
            joined_at: attendee.joined_at,
            left_at: attendee.left_at,
        }
    }
}

// ============================================================================
// Discussion Mappers
// ============================================================================

impl From<&Discussion> for DiscussionResponse {
    fn from(discussion: &Discussion) -> Self {
        Self {
            id: discussion.id.to_string(),
            title: discussion.title.clone(),
            content: discussion.content.clone(),
            author_id: discussion.author_id.to_string(),
            category_id: discussion.category_id.to_string(),
            course_id: discussion.course_id.map(|id| id.to_string()),
            is_pinned: discussion.is_pinned,
            is_locked: discussion.is_locked,
            view_count: discussion.view_count,
            reply_count: discussion.reply_count,
            created_at: discussion.created_at,
            updated_at: discussion.updated_at,
        }
    }
}

impl From<&DiscussionReply> for ReplyResponse {
    fn from(reply: &DiscussionReply) -> Self {
        Self {
            id: reply.id.to_string(),
            discussion_id: reply.discussion_id.to_string(),
            author_id: reply.author_id.to_string(),
            content: reply.content.clone(),
            parent_reply_id: reply.parent_reply_id.map(|id| id.to_string()),
            created_at: reply.created_at,
            updated_at: reply.updated_at,
        }
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            user_id: notification.user_id.to_string(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.kind.as_str().to_string(),
            is_read: notification.is_read,
            metadata: notification.metadata.clone(),
            created_at: notification.created_at,
        }
    }
}
