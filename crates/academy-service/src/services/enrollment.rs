//! Enrollment service
//!
//! Free enrollment, rosters, and progress tracking. Paid enrollment goes
//! through the checkout service, which reuses [`EnrollmentService::create_enrollment`].

use academy_core::entities::{Course, Enrollment};
use academy_core::{DomainError, EntityId, ProgressPercent};
use tracing::{info, instrument};

use crate::dto::{CompleteLessonRequest, EnrollmentResponse, UpdateProgressRequest};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Enrollment service
pub struct EnrollmentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EnrollmentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Enroll the caller in a published course
    #[instrument(skip(self))]
    pub async fn enroll(&self, user_id: EntityId, course_id: EntityId) -> ServiceResult<EnrollmentResponse> {
        let course = self.require_published(course_id).await?;
        let enrollment = self.create_enrollment(user_id, &course).await?;
        Ok(EnrollmentResponse::from(enrollment))
    }

    /// Load a course open for enrollment
    pub(crate) async fn require_published(&self, course_id: EntityId) -> ServiceResult<Course> {
        let course = self
            .ctx
            .course_repo()
            .find_by_id(course_id)
            .await?
            .ok_or(DomainError::CourseNotFound(course_id))?;

        if !course.is_published {
            return Err(DomainError::ValidationError(
                "Course is not open for enrollment".to_string(),
            )
            .into());
        }
        Ok(course)
    }

    /// Insert the enrollment; the repository bumps the course counter
    pub(crate) async fn create_enrollment(
        &self,
        user_id: EntityId,
        course: &Course,
    ) -> ServiceResult<Enrollment> {
        let enrollment = Enrollment::new(user_id, course.id);
        self.ctx.enrollment_repo().create(&enrollment).await?;

        info!(
            enrollment_id = %enrollment.id,
            user_id = %user_id,
            course_id = %course.id,
            "User enrolled"
        );
        Ok(enrollment)
    }

    /// The caller's enrollments with their courses
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: EntityId) -> ServiceResult<Vec<EnrollmentResponse>> {
        let enrollments = self.ctx.enrollment_repo().find_by_user(user_id).await?;
        Ok(enrollments.iter().map(EnrollmentResponse::from).collect())
    }

    /// Course roster; instructor or admin
    #[instrument(skip(self))]
    pub async fn list_for_course(
        &self,
        actor_id: EntityId,
        course_id: EntityId,
    ) -> ServiceResult<Vec<EnrollmentResponse>> {
        AccessService::new(self.ctx)
            .require_course_manager(actor_id, course_id)
            .await?;

        let enrollments = self.ctx.enrollment_repo().find_by_course(course_id).await?;
        Ok(enrollments.iter().map(EnrollmentResponse::from).collect())
    }

    /// Set the caller's progress in a course directly
    #[instrument(skip(self, request))]
    pub async fn update_progress(
        &self,
        user_id: EntityId,
        course_id: EntityId,
        request: UpdateProgressRequest,
    ) -> ServiceResult<EnrollmentResponse> {
        let progress = ProgressPercent::new(request.progress)?;
        let enrollment = self
            .ctx
            .enrollment_repo()
            .update_progress(user_id, course_id, progress)
            .await?;
        Ok(EnrollmentResponse::from(enrollment))
    }

    /// Mark a lesson done and return the recomputed enrollment
    #[instrument(skip(self, request))]
    pub async fn complete_lesson(
        &self,
        user_id: EntityId,
        lesson_id: EntityId,
        request: CompleteLessonRequest,
    ) -> ServiceResult<EnrollmentResponse> {
        let lesson = self
            .ctx
            .lesson_repo()
            .find_by_id(lesson_id)
            .await?
            .ok_or(DomainError::LessonNotFound(lesson_id))?;

        let enrollment = self
            .ctx
            .enrollment_repo()
            .record_lesson_completion(user_id, &lesson, request.watch_time_seconds)
            .await?;

        if enrollment.is_completed() {
            info!(user_id = %user_id, course_id = %lesson.course_id, "Course completed");
        }
        Ok(EnrollmentResponse::from(enrollment))
    }
}
