//! Live class service
//!
//! Scheduling and attendance. Capacity and the one-open-attendance rule are
//! enforced by the repository under a lock on the class row.

use academy_core::entities::{LiveClass, LiveClassAttendee};
use academy_core::{DomainError, EntityId};
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{AttendeeResponse, CreateLiveClassRequest, LiveClassResponse};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Live class service
pub struct LiveClassService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LiveClassService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All classes latest first, or only upcoming ones soonest first
    #[instrument(skip(self))]
    pub async fn list(&self, upcoming: bool) -> ServiceResult<Vec<LiveClassResponse>> {
        let classes = if upcoming {
            self.ctx.live_class_repo().list_upcoming(Utc::now()).await?
        } else {
            self.ctx.live_class_repo().list().await?
        };
        Ok(classes.iter().map(LiveClassResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, live_class_id: EntityId) -> ServiceResult<LiveClassResponse> {
        let class = self.require_class(live_class_id).await?;
        Ok(LiveClassResponse::from(&class))
    }

    /// Schedule a class hosted by the caller
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        actor_id: EntityId,
        request: CreateLiveClassRequest,
    ) -> ServiceResult<LiveClassResponse> {
        AccessService::new(self.ctx).require_instructor(actor_id).await?;

        if let Some(course_id) = request.course_id {
            if self.ctx.course_repo().find_by_id(course_id).await?.is_none() {
                return Err(DomainError::CourseNotFound(course_id).into());
            }
        }

        let mut class = LiveClass::new(request.title, actor_id, request.scheduled_at, request.duration);
        class.description = request.description;
        class.course_id = request.course_id;
        class.meeting_url = request.meeting_url;
        if let Some(max) = request.max_attendees {
            class.max_attendees = max;
        }

        self.ctx.live_class_repo().create(&class).await?;

        info!(
            live_class_id = %class.id,
            instructor_id = %actor_id,
            scheduled_at = %class.scheduled_at,
            "Live class scheduled"
        );
        Ok(LiveClassResponse::from(&class))
    }

    /// Start or end a class; host or admin
    #[instrument(skip(self))]
    pub async fn set_active(
        &self,
        actor_id: EntityId,
        live_class_id: EntityId,
        active: bool,
    ) -> ServiceResult<LiveClassResponse> {
        let class = self.require_class(live_class_id).await?;
        if class.instructor_id != actor_id {
            let actor = AccessService::new(self.ctx).require_user(actor_id).await?;
            if !actor.is_admin() {
                return Err(ServiceError::permission_denied(
                    "Only the host can start or end this class",
                ));
            }
        }

        let class = self.ctx.live_class_repo().set_active(live_class_id, active).await?;

        info!(live_class_id = %live_class_id, active, "Live class state changed");
        Ok(LiveClassResponse::from(&class))
    }

    #[instrument(skip(self))]
    pub async fn join(&self, user_id: EntityId, live_class_id: EntityId) -> ServiceResult<AttendeeResponse> {
        let attendee = LiveClassAttendee::new(live_class_id, user_id);
        self.ctx.live_class_repo().join(&attendee).await?;

        info!(live_class_id = %live_class_id, user_id = %user_id, "Joined live class");
        Ok(AttendeeResponse::from(&attendee))
    }

    #[instrument(skip(self))]
    pub async fn leave(&self, user_id: EntityId, live_class_id: EntityId) -> ServiceResult<AttendeeResponse> {
        let attendee = self
            .ctx
            .live_class_repo()
            .leave(live_class_id, user_id, Utc::now())
            .await?;

        info!(live_class_id = %live_class_id, user_id = %user_id, "Left live class");
        Ok(AttendeeResponse::from(&attendee))
    }

    /// Attendance history of a class in join order
    #[instrument(skip(self))]
    pub async fn attendees(&self, live_class_id: EntityId) -> ServiceResult<Vec<AttendeeResponse>> {
        self.require_class(live_class_id).await?;
        let attendees = self.ctx.live_class_repo().find_attendees(live_class_id).await?;
        Ok(attendees.iter().map(AttendeeResponse::from).collect())
    }

    async fn require_class(&self, live_class_id: EntityId) -> ServiceResult<LiveClass> {
        Ok(self
            .ctx
            .live_class_repo()
            .find_by_id(live_class_id)
            .await?
            .ok_or(DomainError::LiveClassNotFound(live_class_id))?)
    }
}
