//! PostgreSQL implementation of DiscussionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use academy_core::entities::{Discussion, DiscussionReply};
use academy_core::error::DomainError;
use academy_core::traits::{DiscussionRepository, RepoResult};
use academy_core::value_objects::EntityId;

use crate::models::{DiscussionModel, DiscussionReplyModel};

use super::error::{counter_not_updated, map_db_error, map_insert_error};

/// PostgreSQL implementation of DiscussionRepository
#[derive(Clone)]
pub struct PgDiscussionRepository {
    pool: PgPool,
}

impl PgDiscussionRepository {
    /// Create a new PgDiscussionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DiscussionRepository for PgDiscussionRepository {
    #[instrument(skip(self, discussion), fields(discussion_id = %discussion.id))]
    async fn create(&self, discussion: &Discussion) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO discussions (id, title, content, author_id, category_id, course_id,
                                     is_pinned, is_locked, view_count, reply_count,
                                     created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(discussion.id.into_inner())
        .bind(&discussion.title)
        .bind(&discussion.content)
        .bind(discussion.author_id.into_inner())
        .bind(discussion.category_id.into_inner())
        .bind(discussion.course_id.map(EntityId::into_inner))
        .bind(discussion.is_pinned)
        .bind(discussion.is_locked)
        .bind(discussion.view_count)
        .bind(discussion.reply_count)
        .bind(discussion.created_at)
        .bind(discussion.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                || DomainError::InternalError("duplicate discussion id".to_string()),
                |constraint| {
                    if constraint.contains("category_id") {
                        DomainError::ForumCategoryNotFound(discussion.category_id)
                    } else if let (true, Some(course_id)) =
                        (constraint.contains("course_id"), discussion.course_id)
                    {
                        DomainError::CourseNotFound(course_id)
                    } else {
                        DomainError::UserNotFound(discussion.author_id)
                    }
                },
            )
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, category_id: Option<EntityId>) -> RepoResult<Vec<Discussion>> {
        let results = sqlx::query_as::<_, DiscussionModel>(
            r"
            SELECT id, title, content, author_id, category_id, course_id, is_pinned, is_locked,
                   view_count, reply_count, created_at, updated_at
            FROM discussions
            WHERE $1::uuid IS NULL OR category_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(category_id.map(EntityId::into_inner))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Discussion::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_and_record_view(&self, id: EntityId) -> RepoResult<Option<Discussion>> {
        let result = sqlx::query_as::<_, DiscussionModel>(
            r"
            UPDATE discussions
            SET view_count = view_count + 1
            WHERE id = $1
            RETURNING id, title, content, author_id, category_id, course_id, is_pinned, is_locked,
                      view_count, reply_count, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Discussion::from))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Discussion>> {
        let result = sqlx::query_as::<_, DiscussionModel>(
            r"
            SELECT id, title, content, author_id, category_id, course_id, is_pinned, is_locked,
                   view_count, reply_count, created_at, updated_at
            FROM discussions
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Discussion::from))
    }

    #[instrument(skip(self))]
    async fn set_flags(
        &self,
        id: EntityId,
        pinned: Option<bool>,
        locked: Option<bool>,
    ) -> RepoResult<Discussion> {
        let result = sqlx::query_as::<_, DiscussionModel>(
            r"
            UPDATE discussions
            SET is_pinned = COALESCE($2, is_pinned),
                is_locked = COALESCE($3, is_locked),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, content, author_id, category_id, course_id, is_pinned, is_locked,
                      view_count, reply_count, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(pinned)
        .bind(locked)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Discussion::from).ok_or(DomainError::DiscussionNotFound(id))
    }

    #[instrument(skip(self, reply), fields(discussion_id = %reply.discussion_id))]
    async fn create_reply(&self, reply: &DiscussionReply) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Row lock orders the reply against a concurrent lock toggle
        let locked = sqlx::query_scalar::<_, bool>(
            r"
            SELECT is_locked
            FROM discussions
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(reply.discussion_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::DiscussionNotFound(reply.discussion_id))?;

        if locked {
            return Err(DomainError::DiscussionLocked);
        }

        sqlx::query(
            r"
            INSERT INTO discussion_replies (id, discussion_id, author_id, content, parent_reply_id,
                                            created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(reply.id.into_inner())
        .bind(reply.discussion_id.into_inner())
        .bind(reply.author_id.into_inner())
        .bind(&reply.content)
        .bind(reply.parent_reply_id.map(EntityId::into_inner))
        .bind(reply.created_at)
        .bind(reply.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                || DomainError::InternalError("duplicate reply id".to_string()),
                |constraint| {
                    if constraint.contains("discussion_id") {
                        DomainError::DiscussionNotFound(reply.discussion_id)
                    } else if let (true, Some(parent)) =
                        (constraint.contains("parent_reply_id"), reply.parent_reply_id)
                    {
                        DomainError::ReplyNotFound(parent)
                    } else {
                        DomainError::UserNotFound(reply.author_id)
                    }
                },
            )
        })?;

        let counted = sqlx::query(
            r"
            UPDATE discussions
            SET reply_count = reply_count + 1, updated_at = $2
            WHERE id = $1
            ",
        )
        .bind(reply.discussion_id.into_inner())
        .bind(reply.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if counted.rows_affected() == 0 {
            return Err(counter_not_updated("discussion reply count"));
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_reply(&self, id: EntityId) -> RepoResult<Option<DiscussionReply>> {
        let result = sqlx::query_as::<_, DiscussionReplyModel>(
            r"
            SELECT id, discussion_id, author_id, content, parent_reply_id, created_at, updated_at
            FROM discussion_replies
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(DiscussionReply::from))
    }

    #[instrument(skip(self))]
    async fn find_replies(&self, discussion_id: EntityId) -> RepoResult<Vec<DiscussionReply>> {
        let results = sqlx::query_as::<_, DiscussionReplyModel>(
            r"
            SELECT id, discussion_id, author_id, content, parent_reply_id, created_at, updated_at
            FROM discussion_replies
            WHERE discussion_id = $1
            ORDER BY created_at
            ",
        )
        .bind(Uuid::from(discussion_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(DiscussionReply::from).collect())
    }
}
