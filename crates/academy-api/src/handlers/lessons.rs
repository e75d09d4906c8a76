//! Lesson handlers

use academy_service::dto::{
    CompleteLessonRequest, EnrollmentResponse, LessonResponse, UpdateLessonRequest,
};
use academy_service::services::{CourseService, EnrollmentService};
use axum::{extract::State, Json};

use crate::extractors::{AuthUser, IdPath, OptionalValidatedJson, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// PATCH /lessons/{lesson_id}
pub async fn update_lesson(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(lesson_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateLessonRequest>,
) -> ApiResult<Json<LessonResponse>> {
    let service = CourseService::new(state.service_context());
    let response = service.update_lesson(auth.user_id, lesson_id, request).await?;
    Ok(Json(response))
}

/// DELETE /lessons/{lesson_id}
pub async fn delete_lesson(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(lesson_id): IdPath,
) -> ApiResult<NoContent> {
    let service = CourseService::new(state.service_context());
    service.delete_lesson(auth.user_id, lesson_id).await?;
    Ok(NoContent)
}

/// Mark a lesson completed; the body is optional
///
/// POST /lessons/{lesson_id}/complete
pub async fn complete_lesson(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(lesson_id): IdPath,
    OptionalValidatedJson(request): OptionalValidatedJson<CompleteLessonRequest>,
) -> ApiResult<Json<EnrollmentResponse>> {
    let service = EnrollmentService::new(state.service_context());
    let response = service
        .complete_lesson(auth.user_id, lesson_id, request.unwrap_or_default())
        .await?;
    Ok(Json(response))
}
