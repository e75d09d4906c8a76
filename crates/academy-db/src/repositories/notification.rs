//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use academy_core::entities::Notification;
use academy_core::error::DomainError;
use academy_core::traits::{NotificationRepository, RepoResult};
use academy_core::value_objects::EntityId;

use crate::models::NotificationModel;

use super::error::{map_db_error, map_insert_error};

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self, notification), fields(user_id = %notification.user_id))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO notifications (id, user_id, title, message, kind, is_read, metadata, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(notification.id.into_inner())
        .bind(notification.user_id.into_inner())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.kind.as_str())
        .bind(notification.is_read)
        .bind(&notification.metadata)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                || DomainError::InternalError("duplicate notification id".to_string()),
                |_| DomainError::UserNotFound(notification.user_id),
            )
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: EntityId) -> RepoResult<Vec<Notification>> {
        let results = sqlx::query_as::<_, NotificationModel>(
            r"
            SELECT id, user_id, title, message, kind, is_read, metadata, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Notification::from).collect())
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: EntityId, user_id: EntityId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotificationNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self, user_id: EntityId) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE notifications
            SET is_read = TRUE
            WHERE user_id = $1 AND NOT is_read
            ",
        )
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
