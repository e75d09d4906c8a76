//! Enrollments, live classes and reviews

use academy_core::entities::{Enrollment, LiveClass, LiveClassAttendee, Review};
use academy_core::progress::EnrollmentSnapshot;
use academy_core::value_objects::{EntityId, Rating};
use academy_core::DomainError;

use crate::models::{
    EnrollmentModel, LiveClassAttendeeModel, LiveClassModel, ProgressSnapshotModel, ReviewModel,
};

impl From<EnrollmentModel> for Enrollment {
    fn from(model: EnrollmentModel) -> Self {
        Enrollment {
            id: EntityId::from(model.id),
            user_id: EntityId::from(model.user_id),
            course_id: EntityId::from(model.course_id),
            progress: model.progress,
            completed_at: model.completed_at,
            enrolled_at: model.enrolled_at,
        }
    }
}

impl From<ProgressSnapshotModel> for EnrollmentSnapshot {
    fn from(model: ProgressSnapshotModel) -> Self {
        EnrollmentSnapshot {
            progress: model.progress,
            completed: model.completed,
            course_minutes: model.course_minutes,
        }
    }
}

impl From<LiveClassModel> for LiveClass {
    fn from(model: LiveClassModel) -> Self {
        LiveClass {
            id: EntityId::from(model.id),
            title: model.title,
            description: model.description,
            instructor_id: EntityId::from(model.instructor_id),
            course_id: model.course_id.map(EntityId::from),
            scheduled_at: model.scheduled_at,
            duration: model.duration,
            meeting_url: model.meeting_url,
            is_active: model.is_active,
            max_attendees: model.max_attendees,
            created_at: model.created_at,
        }
    }
}

impl From<LiveClassAttendeeModel> for LiveClassAttendee {
    fn from(model: LiveClassAttendeeModel) -> Self {
        LiveClassAttendee {
            id: EntityId::from(model.id),
            live_class_id: EntityId::from(model.live_class_id),
            user_id: EntityId::from(model.user_id),
            joined_at: model.joined_at,
            left_at: model.left_at,
        }
    }
}

impl TryFrom<ReviewModel> for Review {
    type Error = DomainError;

    fn try_from(model: ReviewModel) -> Result<Self, Self::Error> {
        let rating = Rating::new(model.rating).map_err(|_| {
            DomainError::DatabaseError(format!("review {} has rating {}", model.id, model.rating))
        })?;
        Ok(Review {
            id: EntityId::from(model.id),
            course_id: EntityId::from(model.course_id),
            user_id: EntityId::from(model.user_id),
            rating: i32::from(rating),
            comment: model.comment,
            created_at: model.created_at,
        })
    }
}
