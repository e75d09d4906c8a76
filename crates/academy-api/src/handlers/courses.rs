//! Course handlers
//!
//! Catalog, course pages, lessons of a course, rosters and reviews.

use academy_service::dto::{
    CourseDetailResponse, CourseResponse, CreateCourseRequest, CreateLessonRequest,
    EnrollmentResponse, LessonResponse, ReviewResponse, ReviewSubmittedResponse,
    SubmitReviewRequest, UpdateCourseRequest,
};
use academy_service::services::{CourseService, EnrollmentService, ReviewService};
use axum::{extract::State, Json};

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List published courses
///
/// GET /courses
pub async fn list_courses(State(state): State<AppState>) -> ApiResult<Json<Vec<CourseResponse>>> {
    let service = CourseService::new(state.service_context());
    Ok(Json(service.list_published().await?))
}

/// Create a course
///
/// POST /courses
pub async fn create_course(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCourseRequest>,
) -> ApiResult<Created<Json<CourseResponse>>> {
    let service = CourseService::new(state.service_context());
    let response = service.create_course(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Course page with lessons and reviews; drafts only for their instructor
///
/// GET /courses/{course_id}
pub async fn get_course(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(course_id): IdPath,
) -> ApiResult<Json<CourseDetailResponse>> {
    let service = CourseService::new(state.service_context());
    let response = service.get_course(course_id, viewer.user_id()).await?;
    Ok(Json(response))
}

/// PATCH /courses/{course_id}
pub async fn update_course(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(course_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateCourseRequest>,
) -> ApiResult<Json<CourseResponse>> {
    let service = CourseService::new(state.service_context());
    let response = service.update_course(auth.user_id, course_id, request).await?;
    Ok(Json(response))
}

/// DELETE /courses/{course_id}
pub async fn delete_course(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(course_id): IdPath,
) -> ApiResult<NoContent> {
    let service = CourseService::new(state.service_context());
    service.delete_course(auth.user_id, course_id).await?;
    Ok(NoContent)
}

/// Courses taught by one instructor
///
/// GET /instructors/{user_id}/courses
pub async fn list_instructor_courses(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(instructor_id): IdPath,
) -> ApiResult<Json<Vec<CourseResponse>>> {
    let service = CourseService::new(state.service_context());
    let response = service
        .list_by_instructor(instructor_id, viewer.user_id())
        .await?;
    Ok(Json(response))
}

/// POST /courses/{course_id}/lessons
pub async fn create_lesson(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(course_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateLessonRequest>,
) -> ApiResult<Created<Json<LessonResponse>>> {
    let service = CourseService::new(state.service_context());
    let response = service.create_lesson(auth.user_id, course_id, request).await?;
    Ok(Created(Json(response)))
}

/// Roster of a course (instructor or admin)
///
/// GET /courses/{course_id}/enrollments
pub async fn list_course_enrollments(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(course_id): IdPath,
) -> ApiResult<Json<Vec<EnrollmentResponse>>> {
    let service = EnrollmentService::new(state.service_context());
    let response = service.list_for_course(auth.user_id, course_id).await?;
    Ok(Json(response))
}

/// GET /courses/{course_id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    IdPath(course_id): IdPath,
) -> ApiResult<Json<Vec<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    Ok(Json(service.list_for_course(course_id).await?))
}

/// Review a course and get its new rating
///
/// POST /courses/{course_id}/reviews
pub async fn submit_review(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(course_id): IdPath,
    ValidatedJson(request): ValidatedJson<SubmitReviewRequest>,
) -> ApiResult<Created<Json<ReviewSubmittedResponse>>> {
    let service = ReviewService::new(state.service_context());
    let response = service.submit(auth.user_id, course_id, request).await?;
    Ok(Created(Json(response)))
}
