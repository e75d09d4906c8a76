//! PostgreSQL implementation of LessonRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use academy_core::entities::Lesson;
use academy_core::error::DomainError;
use academy_core::traits::{LessonRepository, RepoResult};
use academy_core::value_objects::EntityId;

use crate::models::LessonModel;

use super::error::{map_db_error, map_insert_error, map_unique_violation};

/// PostgreSQL implementation of LessonRepository
#[derive(Clone)]
pub struct PgLessonRepository {
    pool: PgPool,
}

impl PgLessonRepository {
    /// Create a new PgLessonRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LessonRepository for PgLessonRepository {
    #[instrument(skip(self, lesson), fields(lesson_id = %lesson.id, course_id = %lesson.course_id))]
    async fn create(&self, lesson: &Lesson) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO lessons (id, course_id, title, description, content, video_url, duration,
                                 "order", is_preview, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(lesson.id.into_inner())
        .bind(lesson.course_id.into_inner())
        .bind(&lesson.title)
        .bind(&lesson.description)
        .bind(&lesson.content)
        .bind(&lesson.video_url)
        .bind(lesson.duration)
        .bind(lesson.order)
        .bind(lesson.is_preview)
        .bind(lesson.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                || DomainError::LessonOrderTaken(lesson.order),
                |_| DomainError::CourseNotFound(lesson.course_id),
            )
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Lesson>> {
        let result = sqlx::query_as::<_, LessonModel>(
            r#"
            SELECT id, course_id, title, description, content, video_url, duration, "order",
                   is_preview, created_at, deleted_at
            FROM lessons
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Lesson::from))
    }

    #[instrument(skip(self))]
    async fn find_by_course(&self, course_id: EntityId) -> RepoResult<Vec<Lesson>> {
        let results = sqlx::query_as::<_, LessonModel>(
            r#"
            SELECT id, course_id, title, description, content, video_url, duration, "order",
                   is_preview, created_at, deleted_at
            FROM lessons
            WHERE course_id = $1 AND deleted_at IS NULL
            ORDER BY "order"
            "#,
        )
        .bind(course_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Lesson::from).collect())
    }

    #[instrument(skip(self, lesson), fields(lesson_id = %lesson.id))]
    async fn update(&self, lesson: &Lesson) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE lessons
            SET title = $2, description = $3, content = $4, video_url = $5, duration = $6,
                "order" = $7, is_preview = $8
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(lesson.id.into_inner())
        .bind(&lesson.title)
        .bind(&lesson.description)
        .bind(&lesson.content)
        .bind(&lesson.video_url)
        .bind(lesson.duration)
        .bind(lesson.order)
        .bind(lesson.is_preview)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::LessonOrderTaken(lesson.order)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LessonNotFound(lesson.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE lessons
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LessonNotFound(id));
        }

        Ok(())
    }
}
