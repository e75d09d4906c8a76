//! Notification inbox

use academy_core::EntityId;
use tracing::instrument;

use crate::dto::{MarkAllReadResponse, NotificationResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's notifications, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: EntityId) -> ServiceResult<Vec<NotificationResponse>> {
        let notifications = self.ctx.notification_repo().find_by_user(user_id).await?;
        Ok(notifications.iter().map(NotificationResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn mark_read(&self, user_id: EntityId, notification_id: EntityId) -> ServiceResult<()> {
        self.ctx
            .notification_repo()
            .mark_read(notification_id, user_id)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, user_id: EntityId) -> ServiceResult<MarkAllReadResponse> {
        let updated = self.ctx.notification_repo().mark_all_read(user_id).await?;
        Ok(MarkAllReadResponse { updated })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{seed_user, test_context};
    use academy_core::entities::{Notification, NotificationKind};
    use academy_core::UserRole;

    #[tokio::test]
    async fn test_inbox_flow() {
        let ctx = test_context();
        let user = seed_user(&ctx, UserRole::Learner).await;
        let other = seed_user(&ctx, UserRole::Learner).await;
        let service = NotificationService::new(&ctx);

        let first = Notification::new(
            user.id,
            "Welcome".to_string(),
            "Glad to have you".to_string(),
            NotificationKind::System,
        );
        let second = Notification::enrollment_confirmed(user.id, EntityId::generate());
        ctx.notification_repo().create(&first).await.unwrap();
        ctx.notification_repo().create(&second).await.unwrap();

        let err = service.mark_read(other.id, first.id).await.unwrap_err();
        assert_eq!(err.status_code(), 404);

        service.mark_read(user.id, first.id).await.unwrap();
        let counted = service.mark_all_read(user.id).await.unwrap();
        assert_eq!(counted.updated, 1);

        let inbox = service.list(user.id).await.unwrap();
        assert_eq!(inbox.len(), 2);
        assert!(inbox.iter().all(|n| n.is_read));
        assert!(service.list(other.id).await.unwrap().is_empty());
    }
}
