//! PostgreSQL implementation of ReviewRepository

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use academy_core::entities::{Review, ReviewWithUser, User};
use academy_core::error::DomainError;
use academy_core::traits::{RepoResult, ReviewRepository};
use academy_core::value_objects::EntityId;

use crate::models::{ReviewModel, UserModel};

use super::error::{counter_not_updated, map_db_error, map_insert_error};

/// PostgreSQL implementation of ReviewRepository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new PgReviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self, review), fields(course_id = %review.course_id, rating = review.rating))]
    async fn create(&self, review: &Review) -> RepoResult<Decimal> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Concurrent reviews of one course queue on this lock, so each average
        // below sees every committed review.
        sqlx::query_scalar::<_, Uuid>(
            r"
            SELECT id FROM courses WHERE id = $1 AND deleted_at IS NULL FOR UPDATE
            ",
        )
        .bind(review.course_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::CourseNotFound(review.course_id))?;

        sqlx::query(
            r"
            INSERT INTO reviews (id, course_id, user_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(review.id.into_inner())
        .bind(review.course_id.into_inner())
        .bind(review.user_id.into_inner())
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                || DomainError::InternalError("duplicate review id".to_string()),
                |_| DomainError::UserNotFound(review.user_id),
            )
        })?;

        let rating = sqlx::query_scalar::<_, Decimal>(
            r"
            UPDATE courses
            SET rating = (
                SELECT ROUND(AVG(rating)::NUMERIC, 2) FROM reviews WHERE course_id = $1
            )
            WHERE id = $1
            RETURNING rating
            ",
        )
        .bind(review.course_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| counter_not_updated("course rating"))?;

        tx.commit().await.map_err(map_db_error)?;
        debug!(%rating, "Course rating recomputed");
        Ok(rating)
    }

    #[instrument(skip(self))]
    async fn find_by_course(&self, course_id: EntityId) -> RepoResult<Vec<ReviewWithUser>> {
        let reviews = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT id, course_id, user_id, rating, comment, created_at
            FROM reviews
            WHERE course_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(course_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let user_ids: Vec<Uuid> = reviews.iter().map(|r| r.user_id).collect();
        let users: HashMap<Uuid, User> = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, first_name, last_name, profile_image_url, role,
                   billing_customer_id, created_at, updated_at
            FROM users
            WHERE id = ANY($1)
            ",
        )
        .bind(&user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?
        .into_iter()
        .map(|m| Ok((m.id, User::try_from(m)?)))
        .collect::<RepoResult<_>>()?;

        reviews
            .into_iter()
            .filter_map(|model| {
                let user = users.get(&model.user_id)?.clone();
                Some(Review::try_from(model).map(|review| ReviewWithUser { review, user }))
            })
            .collect()
    }
}
