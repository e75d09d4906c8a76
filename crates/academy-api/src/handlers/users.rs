//! User handlers
//!
//! The caller's profile, synced from the identity provider, and role changes.

use academy_service::dto::{SyncProfileRequest, UpdateRoleRequest, UserResponse};
use academy_service::services::UserService;
use axum::{extract::State, Json};

use crate::extractors::{AuthUser, IdPath, OptionalValidatedJson, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the caller's profile
///
/// GET /auth/user
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(auth.user_id).await?;
    Ok(Json(response))
}

/// Create or refresh the caller's profile
///
/// PUT /auth/user
pub async fn sync_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    OptionalValidatedJson(request): OptionalValidatedJson<SyncProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service
        .sync_profile(auth.user_id, auth.email, request.unwrap_or_default())
        .await?;
    Ok(Json(response))
}

/// Change a user's role (admin only)
///
/// PUT /users/{user_id}/role
pub async fn update_user_role(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateRoleRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_role(auth.user_id, user_id, request).await?;
    Ok(Json(response))
}
