//! Discussion forum handlers
//!
//! Reads are public; posting needs a signed-in user.

use academy_core::EntityId;
use academy_service::dto::{
    CreateDiscussionRequest, CreateReplyRequest, DiscussionDetailResponse, DiscussionResponse,
    ReplyResponse, UpdateDiscussionRequest,
};
use academy_service::services::DiscussionService;
use axum::{extract::State, Json};
use serde::Deserialize;

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Query parameters for listing discussions
#[derive(Debug, Default, Deserialize)]
pub struct DiscussionListQuery {
    pub category_id: Option<EntityId>,
}

/// GET /discussions
pub async fn list_discussions(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<DiscussionListQuery>,
) -> ApiResult<Json<Vec<DiscussionResponse>>> {
    let service = DiscussionService::new(state.service_context());
    Ok(Json(service.list(query.category_id).await?))
}

/// POST /discussions
pub async fn create_discussion(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateDiscussionRequest>,
) -> ApiResult<Created<Json<DiscussionResponse>>> {
    let service = DiscussionService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Discussion with its replies; counts a view
///
/// GET /discussions/{id}
pub async fn get_discussion(
    State(state): State<AppState>,
    IdPath(discussion_id): IdPath,
) -> ApiResult<Json<DiscussionDetailResponse>> {
    let service = DiscussionService::new(state.service_context());
    Ok(Json(service.get(discussion_id).await?))
}

/// Pin or lock (admin only)
///
/// PATCH /discussions/{id}
pub async fn update_discussion(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(discussion_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateDiscussionRequest>,
) -> ApiResult<Json<DiscussionResponse>> {
    let service = DiscussionService::new(state.service_context());
    let response = service
        .update_flags(auth.user_id, discussion_id, request)
        .await?;
    Ok(Json(response))
}

/// POST /discussions/{id}/replies
pub async fn create_reply(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(discussion_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateReplyRequest>,
) -> ApiResult<Created<Json<ReplyResponse>>> {
    let service = DiscussionService::new(state.service_context());
    let response = service.reply(auth.user_id, discussion_id, request).await?;
    Ok(Created(Json(response)))
}
