//! Category handlers

use academy_service::dto::{
    CategoryResponse, CreateCategoryRequest, CreateForumCategoryRequest, ForumCategoryResponse,
};
use academy_service::services::CatalogService;
use axum::{extract::State, Json};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let service = CatalogService::new(state.service_context());
    Ok(Json(service.list_categories().await?))
}

/// POST /categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCategoryRequest>,
) -> ApiResult<Created<Json<CategoryResponse>>> {
    let service = CatalogService::new(state.service_context());
    let response = service.create_category(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// GET /forum-categories
pub async fn list_forum_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ForumCategoryResponse>>> {
    let service = CatalogService::new(state.service_context());
    Ok(Json(service.list_forum_categories().await?))
}

/// POST /forum-categories
pub async fn create_forum_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateForumCategoryRequest>,
) -> ApiResult<Created<Json<ForumCategoryResponse>>> {
    let service = CatalogService::new(state.service_context());
    let response = service.create_forum_category(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}
