//! Notification handlers

use academy_service::dto::{MarkAllReadResponse, NotificationResponse};
use academy_service::services::NotificationService;
use axum::{extract::State, Json};

use crate::extractors::{AuthUser, IdPath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.list(auth.user_id).await?))
}

/// PUT /notifications/{id}/read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(notification_id): IdPath,
) -> ApiResult<NoContent> {
    let service = NotificationService::new(state.service_context());
    service.mark_read(auth.user_id, notification_id).await?;
    Ok(NoContent)
}

/// PUT /notifications/read-all
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MarkAllReadResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.mark_all_read(auth.user_id).await?))
}
