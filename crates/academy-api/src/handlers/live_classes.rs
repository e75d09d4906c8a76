//! Live class handlers

use academy_service::dto::{
    AttendeeResponse, CreateLiveClassRequest, LiveClassResponse, SetLiveClassActiveRequest,
};
use academy_service::services::LiveClassService;
use axum::{extract::State, Json};
use serde::Deserialize;

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Query parameters for listing live classes
#[derive(Debug, Default, Deserialize)]
pub struct LiveClassListQuery {
    /// Only classes scheduled in the future, soonest first
    #[serde(default)]
    pub upcoming: bool,
}

/// GET /live-classes
pub async fn list_live_classes(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<LiveClassListQuery>,
) -> ApiResult<Json<Vec<LiveClassResponse>>> {
    let service = LiveClassService::new(state.service_context());
    Ok(Json(service.list(query.upcoming).await?))
}

/// POST /live-classes
pub async fn create_live_class(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateLiveClassRequest>,
) -> ApiResult<Created<Json<LiveClassResponse>>> {
    let service = LiveClassService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// GET /live-classes/{id}
pub async fn get_live_class(
    State(state): State<AppState>,
    IdPath(live_class_id): IdPath,
) -> ApiResult<Json<LiveClassResponse>> {
    let service = LiveClassService::new(state.service_context());
    Ok(Json(service.get(live_class_id).await?))
}

/// Start or end a class (host or admin)
///
/// PUT /live-classes/{id}/active
pub async fn set_live_class_active(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(live_class_id): IdPath,
    ValidatedJson(request): ValidatedJson<SetLiveClassActiveRequest>,
) -> ApiResult<Json<LiveClassResponse>> {
    let service = LiveClassService::new(state.service_context());
    let response = service
        .set_active(auth.user_id, live_class_id, request.is_active)
        .await?;
    Ok(Json(response))
}

/// POST /live-classes/{id}/join
pub async fn join_live_class(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(live_class_id): IdPath,
) -> ApiResult<Json<AttendeeResponse>> {
    let service = LiveClassService::new(state.service_context());
    Ok(Json(service.join(auth.user_id, live_class_id).await?))
}

/// POST /live-classes/{id}/leave
pub async fn leave_live_class(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(live_class_id): IdPath,
) -> ApiResult<Json<AttendeeResponse>> {
    let service = LiveClassService::new(state.service_context());
    Ok(Json(service.leave(auth.user_id, live_class_id).await?))
}

/// GET /live-classes/{id}/attendees
pub async fn list_attendees(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(live_class_id): IdPath,
) -> ApiResult<Json<Vec<AttendeeResponse>>> {
    let service = LiveClassService::new(state.service_context());
    Ok(Json(service.attendees(live_class_id).await?))
}
