//! Enrollment and progress handlers

use academy_core::ProgressSummary;
use academy_service::dto::{EnrollRequest, EnrollmentResponse, UpdateProgressRequest};
use academy_service::services::{EnrollmentService, ProgressService};
use axum::{extract::State, Json};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Enroll in a free or already-paid course
///
/// POST /enrollments
pub async fn enroll(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<EnrollRequest>,
) -> ApiResult<Created<Json<EnrollmentResponse>>> {
    let service = EnrollmentService::new(state.service_context());
    let response = service.enroll(auth.user_id, request.course_id).await?;
    Ok(Created(Json(response)))
}

/// GET /user/enrollments
pub async fn list_my_enrollments(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<EnrollmentResponse>>> {
    let service = EnrollmentService::new(state.service_context());
    Ok(Json(service.list_for_user(auth.user_id).await?))
}

/// PUT /enrollments/{course_id}/progress
pub async fn update_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(course_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateProgressRequest>,
) -> ApiResult<Json<EnrollmentResponse>> {
    let service = EnrollmentService::new(state.service_context());
    let response = service.update_progress(auth.user_id, course_id, request).await?;
    Ok(Json(response))
}

/// Dashboard totals across the caller's enrollments
///
/// GET /user/progress
pub async fn my_progress(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProgressSummary>> {
    let service = ProgressService::new(state.service_context());
    Ok(Json(service.summary(auth.user_id).await?))
}
