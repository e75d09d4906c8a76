//! PostgreSQL implementation of CourseRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use academy_core::entities::Course;
use academy_core::error::DomainError;
use academy_core::traits::{CourseRepository, RepoResult};
use academy_core::value_objects::EntityId;

use crate::models::CourseModel;

use super::error::{map_db_error, map_insert_error};

/// PostgreSQL implementation of CourseRepository
#[derive(Clone)]
pub struct PgCourseRepository {
    pool: PgPool,
}

impl PgCourseRepository {
    /// Create a new PgCourseRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn course_fk_error(course: &Course, constraint: &str) -> DomainError {
    match course.category_id {
        Some(category_id) if constraint.contains("category_id") => {
            DomainError::CategoryNotFound(category_id)
        }
        _ => DomainError::UserNotFound(course.instructor_id),
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    #[instrument(skip(self, course), fields(course_id = %course.id))]
    async fn create(&self, course: &Course) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO courses (id, title, description, thumbnail, price, currency, category_id,
                                 instructor_id, level, duration, is_published, rating,
                                 total_enrollments, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ",
        )
        .bind(course.id.into_inner())
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.thumbnail)
        .bind(course.price)
        .bind(&course.currency)
        .bind(course.category_id.map(EntityId::into_inner))
        .bind(course.instructor_id.into_inner())
        .bind(course.level.as_str())
        .bind(course.duration)
        .bind(course.is_published)
        .bind(course.rating)
        .bind(course.total_enrollments)
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                || DomainError::InternalError("duplicate course id".to_string()),
                |constraint| course_fk_error(course, constraint),
            )
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Course>> {
        let result = sqlx::query_as::<_, CourseModel>(
            r"
            SELECT id, title, description, thumbnail, price, currency, category_id, instructor_id,
                   level, duration, is_published, rating, total_enrollments,
                   created_at, updated_at, deleted_at
            FROM courses
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Course::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_published(&self) -> RepoResult<Vec<Course>> {
        let results = sqlx::query_as::<_, CourseModel>(
            r"
            SELECT id, title, description, thumbnail, price, currency, category_id, instructor_id,
                   level, duration, is_published, rating, total_enrollments,
                   created_at, updated_at, deleted_at
            FROM courses
            WHERE is_published AND deleted_at IS NULL
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Course::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_instructor(&self, instructor_id: EntityId) -> RepoResult<Vec<Course>> {
        let results = sqlx::query_as::<_, CourseModel>(
            r"
            SELECT id, title, description, thumbnail, price, currency, category_id, instructor_id,
                   level, duration, is_published, rating, total_enrollments,
                   created_at, updated_at, deleted_at
            FROM courses
            WHERE instructor_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC
            ",
        )
        .bind(instructor_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Course::try_from).collect()
    }

    #[instrument(skip(self, course), fields(course_id = %course.id))]
    async fn update(&self, course: &Course) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE courses
            SET title = $2, description = $3, thumbnail = $4, price = $5, currency = $6,
                category_id = $7, level = $8, duration = $9, is_published = $10, updated_at = $11
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(course.id.into_inner())
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.thumbnail)
        .bind(course.price)
        .bind(&course.currency)
        .bind(course.category_id.map(EntityId::into_inner))
        .bind(course.level.as_str())
        .bind(course.duration)
        .bind(course.is_published)
        .bind(course.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                || DomainError::InternalError("duplicate course id".to_string()),
                |constraint| course_fk_error(course, constraint),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CourseNotFound(course.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE courses
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CourseNotFound(id));
        }

        Ok(())
    }
}
