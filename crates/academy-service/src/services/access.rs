//! Access rules shared by the services
//!
//! Roles come from the stored user row, never from the token.

use academy_core::entities::{Course, User};
use academy_core::{DomainError, EntityId};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Role and ownership checks
pub struct AccessService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load a synced user
    #[instrument(skip(self))]
    pub async fn require_user(&self, user_id: EntityId) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }

    /// Load a user holding the admin role
    #[instrument(skip(self))]
    pub async fn require_admin(&self, user_id: EntityId) -> ServiceResult<User> {
        let user = self.require_user(user_id).await?;
        if !user.is_admin() {
            return Err(DomainError::AdminRequired.into());
        }
        Ok(user)
    }

    /// Load a user allowed to create courses and live classes
    #[instrument(skip(self))]
    pub async fn require_instructor(&self, user_id: EntityId) -> ServiceResult<User> {
        let user = self.require_user(user_id).await?;
        if !user.can_teach() {
            return Err(DomainError::NotInstructor.into());
        }
        Ok(user)
    }

    /// Load a live course the user owns, or any course for an admin
    #[instrument(skip(self))]
    pub async fn require_course_manager(
        &self,
        user_id: EntityId,
        course_id: EntityId,
    ) -> ServiceResult<Course> {
        let course = self
            .ctx
            .course_repo()
            .find_by_id(course_id)
            .await?
            .ok_or(DomainError::CourseNotFound(course_id))?;

        if course.is_instructor(user_id) {
            return Ok(course);
        }

        let user = self.require_user(user_id).await?;
        if !user.is_admin() {
            return Err(DomainError::NotCourseOwner.into());
        }
        Ok(course)
    }

    /// Whether `viewer` may see unpublished courses of `instructor_id`
    pub async fn can_view_drafts(
        &self,
        viewer: Option<EntityId>,
        instructor_id: EntityId,
    ) -> ServiceResult<bool> {
        let Some(viewer) = viewer else {
            return Ok(false);
        };
        if viewer == instructor_id {
            return Ok(true);
        }
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(viewer)
            .await?
            .is_some_and(|u| u.is_admin()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{seed_course, seed_user, test_context};
    use academy_core::UserRole;

    #[tokio::test]
    async fn test_unknown_user() {
        let ctx = test_context();
        let err = AccessService::new(&ctx)
            .require_user(EntityId::generate())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_USER");
    }

    #[tokio::test]
    async fn test_learner_cannot_teach() {
        let ctx = test_context();
        let learner = seed_user(&ctx, UserRole::Learner).await;
        let err = AccessService::new(&ctx)
            .require_instructor(learner.id)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "NOT_INSTRUCTOR");
    }

    #[tokio::test]
    async fn test_course_manager_rules() {
        let ctx = test_context();
        let course = seed_course(&ctx, true).await;
        let stranger = seed_user(&ctx, UserRole::Instructor).await;
        let admin = seed_user(&ctx, UserRole::Admin).await;
        let access = AccessService::new(&ctx);

        assert!(access.require_course_manager(course.instructor_id, course.id).await.is_ok());
        assert!(access.require_course_manager(admin.id, course.id).await.is_ok());

        let err = access.require_course_manager(stranger.id, course.id).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_COURSE_OWNER");
    }

    #[tokio::test]
    async fn test_draft_visibility() {
        let ctx = test_context();
        let instructor = seed_user(&ctx, UserRole::Instructor).await;
        let admin = seed_user(&ctx, UserRole::Admin).await;
        let learner = seed_user(&ctx, UserRole::Learner).await;
        let access = AccessService::new(&ctx);

        assert!(access.can_view_drafts(Some(instructor.id), instructor.id).await.unwrap());
        assert!(access.can_view_drafts(Some(admin.id), instructor.id).await.unwrap());
        assert!(!access.can_view_drafts(Some(learner.id), instructor.id).await.unwrap());
        assert!(!access.can_view_drafts(None, instructor.id).await.unwrap());
    }
}
