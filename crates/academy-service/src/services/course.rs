//! Course service
//!
//! Course catalog, course pages and lesson management. Unpublished courses are
//! visible only to their instructor and admins.

use academy_core::entities::{Course, CourseLevel, Lesson};
use academy_core::{DomainError, EntityId};
use rust_decimal::Decimal;
use tracing::{info, instrument};

use crate::dto::{
    CourseDetailResponse, CourseResponse, CreateCourseRequest, CreateLessonRequest,
    LessonResponse, ReviewResponse, UpdateCourseRequest, UpdateLessonRequest,
};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::ServiceResult;

fn parse_level(level: &str) -> Result<CourseLevel, DomainError> {
    CourseLevel::parse(level)
        .ok_or_else(|| DomainError::ValidationError(format!("Unknown course level '{level}'")))
}

fn check_price(price: Decimal) -> Result<Decimal, DomainError> {
    if price.is_sign_negative() {
        return Err(DomainError::ValidationError(
            "Price cannot be negative".to_string(),
        ));
    }
    Ok(price)
}

/// Course service
pub struct CourseService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CourseService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Published courses, newest first
    #[instrument(skip(self))]
    pub async fn list_published(&self) -> ServiceResult<Vec<CourseResponse>> {
        let courses = self.ctx.course_repo().list_published().await?;
        Ok(courses.iter().map(CourseResponse::from).collect())
    }

    /// Courses of one instructor; drafts included for the instructor and admins
    #[instrument(skip(self))]
    pub async fn list_by_instructor(
        &self,
        instructor_id: EntityId,
        viewer: Option<EntityId>,
    ) -> ServiceResult<Vec<CourseResponse>> {
        let with_drafts = AccessService::new(self.ctx)
            .can_view_drafts(viewer, instructor_id)
            .await?;

        let courses = self.ctx.course_repo().find_by_instructor(instructor_id).await?;
        Ok(courses
            .iter()
            .filter(|c| with_drafts || c.is_published)
            .map(CourseResponse::from)
            .collect())
    }

    /// Course page with lessons by order and reviews newest first
    #[instrument(skip(self))]
    pub async fn get_course(
        &self,
        course_id: EntityId,
        viewer: Option<EntityId>,
    ) -> ServiceResult<CourseDetailResponse> {
        let course = self
            .ctx
            .course_repo()
            .find_by_id(course_id)
            .await?
            .ok_or(DomainError::CourseNotFound(course_id))?;

        if !course.is_published
            && !AccessService::new(self.ctx)
                .can_view_drafts(viewer, course.instructor_id)
                .await?
        {
            return Err(DomainError::CourseNotFound(course_id).into());
        }

        let lessons = self.ctx.lesson_repo().find_by_course(course_id).await?;
        let reviews = self.ctx.review_repo().find_by_course(course_id).await?;

        Ok(CourseDetailResponse {
            course: CourseResponse::from(&course),
            lessons: lessons.iter().map(LessonResponse::from).collect(),
            reviews: reviews.iter().map(ReviewResponse::from).collect(),
        })
    }

    /// Create a course owned by the caller
    #[instrument(skip(self, request))]
    pub async fn create_course(
        &self,
        actor_id: EntityId,
        request: CreateCourseRequest,
    ) -> ServiceResult<CourseResponse> {
        AccessService::new(self.ctx).require_instructor(actor_id).await?;

        let mut course = Course::new(
            request.title,
            request.description,
            check_price(request.price)?,
            actor_id,
            parse_level(&request.level)?,
        );
        course.thumbnail = request.thumbnail;
        course.category_id = request.category_id;
        course.duration = request.duration;
        course.is_published = request.is_published;
        if let Some(currency) = request.currency {
            course.currency = currency.to_uppercase();
        }

        self.ctx.course_repo().create(&course).await?;

        info!(course_id = %course.id, instructor_id = %actor_id, "Course created");
        Ok(CourseResponse::from(&course))
    }

    /// Edit a course; owner or admin
    #[instrument(skip(self, request))]
    pub async fn update_course(
        &self,
        actor_id: EntityId,
        course_id: EntityId,
        request: UpdateCourseRequest,
    ) -> ServiceResult<CourseResponse> {
        let mut course = AccessService::new(self.ctx)
            .require_course_manager(actor_id, course_id)
            .await?;

        if let Some(title) = request.title {
            course.title = title;
        }
        if let Some(description) = request.description {
            course.description = description;
        }
        if let Some(thumbnail) = request.thumbnail {
            course.thumbnail = Some(thumbnail);
        }
        if let Some(price) = request.price {
            course.price = check_price(price)?;
        }
        if let Some(currency) = request.currency {
            course.currency = currency.to_uppercase();
        }
        if let Some(category_id) = request.category_id {
            course.category_id = Some(category_id);
        }
        if let Some(level) = request.level {
            course.level = parse_level(&level)?;
        }
        if let Some(duration) = request.duration {
            course.duration = Some(duration);
        }
        if let Some(is_published) = request.is_published {
            course.is_published = is_published;
        }
        course.touch();

        self.ctx.course_repo().update(&course).await?;

        // counters may have moved since the first read
        let stored = self
            .ctx
            .course_repo()
            .find_by_id(course_id)
            .await?
            .ok_or(DomainError::CourseNotFound(course_id))?;

        info!(course_id = %course_id, "Course updated");
        Ok(CourseResponse::from(&stored))
    }

    /// Soft-delete a course; owner or admin
    #[instrument(skip(self))]
    pub async fn delete_course(&self, actor_id: EntityId, course_id: EntityId) -> ServiceResult<()> {
        AccessService::new(self.ctx)
            .require_course_manager(actor_id, course_id)
            .await?;

        self.ctx.course_repo().delete(course_id).await?;

        info!(course_id = %course_id, "Course deleted");
        Ok(())
    }

    // === Lessons ===

    /// Add a lesson at a free `order` slot
    #[instrument(skip(self, request))]
    pub async fn create_lesson(
        &self,
        actor_id: EntityId,
        course_id: EntityId,
        request: CreateLessonRequest,
    ) -> ServiceResult<LessonResponse> {
        AccessService::new(self.ctx)
            .require_course_manager(actor_id, course_id)
            .await?;

        let mut lesson = Lesson::new(course_id, request.title, request.order);
        lesson.description = request.description;
        lesson.content = request.content;
        lesson.video_url = request.video_url;
        lesson.duration = request.duration;
        lesson.is_preview = request.is_preview;

        self.ctx.lesson_repo().create(&lesson).await?;

        info!(lesson_id = %lesson.id, course_id = %course_id, order = lesson.order, "Lesson created");
        Ok(LessonResponse::from(&lesson))
    }

    #[instrument(skip(self, request))]
    pub async fn update_lesson(
        &self,
        actor_id: EntityId,
        lesson_id: EntityId,
        request: UpdateLessonRequest,
    ) -> ServiceResult<LessonResponse> {
        let mut lesson = self.require_lesson(lesson_id).await?;
        AccessService::new(self.ctx)
            .require_course_manager(actor_id, lesson.course_id)
            .await?;

        if let Some(title) = request.title {
            lesson.title = title;
        }
        if let Some(description) = request.description {
            lesson.description = Some(description);
        }
        if let Some(content) = request.content {
            lesson.content = Some(content);
        }
        if let Some(video_url) = request.video_url {
            lesson.video_url = Some(video_url);
        }
        if let Some(duration) = request.duration {
            lesson.duration = Some(duration);
        }
        if let Some(order) = request.order {
            lesson.order = order;
        }
        if let Some(is_preview) = request.is_preview {
            lesson.is_preview = is_preview;
        }

        self.ctx.lesson_repo().update(&lesson).await?;
        Ok(LessonResponse::from(&lesson))
    }

    #[instrument(skip(self))]
    pub async fn delete_lesson(&self, actor_id: EntityId, lesson_id: EntityId) -> ServiceResult<()> {
        let lesson = self.require_lesson(lesson_id).await?;
        AccessService::new(self.ctx)
            .require_course_manager(actor_id, lesson.course_id)
            .await?;

        self.ctx.lesson_repo().delete(lesson_id).await?;

        info!(lesson_id = %lesson_id, "Lesson deleted");
        Ok(())
    }

    async fn require_lesson(&self, lesson_id: EntityId) -> ServiceResult<Lesson> {
        Ok(self
            .ctx
            .lesson_repo()
            .find_by_id(lesson_id)
            .await?
            .ok_or(DomainError::LessonNotFound(lesson_id))?)
    }
}
