//! PostgreSQL implementation of EnrollmentRepository
//!
//! Enrollment inserts and lesson completions run in a transaction together with
//! the derived writes they cause.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use academy_core::entities::{
    Course, Enrollment, EnrollmentWithCourse, EnrollmentWithUser, Lesson, LessonProgress, User,
};
use academy_core::error::DomainError;
use academy_core::progress::EnrollmentSnapshot;
use academy_core::traits::{EnrollmentRepository, RepoResult};
use academy_core::value_objects::{EntityId, ProgressPercent};

use crate::models::{CourseModel, EnrollmentModel, ProgressSnapshotModel, UserModel};

use super::error::{counter_not_updated, map_db_error, map_insert_error};

/// PostgreSQL implementation of EnrollmentRepository
#[derive(Clone)]
pub struct PgEnrollmentRepository {
    pool: PgPool,
}

impl PgEnrollmentRepository {
    /// Create a new PgEnrollmentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load live courses by id
    async fn load_courses(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Course>, DomainError> {
        let courses = sqlx::query_as::<_, CourseModel>(
            r"
            SELECT id, title, description, thumbnail, price, currency, category_id, instructor_id,
                   level, duration, is_published, rating, total_enrollments,
                   created_at, updated_at, deleted_at
            FROM courses
            WHERE id = ANY($1) AND deleted_at IS NULL
            ",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        courses
            .into_iter()
            .map(|m| Ok((m.id, Course::try_from(m)?)))
            .collect()
    }

    /// Load users by id
    async fn load_users(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, User>, DomainError> {
        let users = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, first_name, last_name, profile_image_url, role,
                   billing_customer_id, created_at, updated_at
            FROM users
            WHERE id = ANY($1)
            ",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        users
            .into_iter()
            .map(|m| Ok((m.id, User::try_from(m)?)))
            .collect()
    }
}

#[async_trait]
impl EnrollmentRepository for PgEnrollmentRepository {
    #[instrument(skip(self, enrollment), fields(user_id = %enrollment.user_id, course_id = %enrollment.course_id))]
    async fn create(&self, enrollment: &Enrollment) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO enrollments (id, user_id, course_id, progress, completed_at, enrolled_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(enrollment.id.into_inner())
        .bind(enrollment.user_id.into_inner())
        .bind(enrollment.course_id.into_inner())
        .bind(enrollment.progress)
        .bind(enrollment.completed_at)
        .bind(enrollment.enrolled_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                || DomainError::AlreadyEnrolled,
                |constraint| {
                    if constraint.contains("user_id") {
                        DomainError::UserNotFound(enrollment.user_id)
                    } else {
                        DomainError::CourseNotFound(enrollment.course_id)
                    }
                },
            )
        })?;

        let counted = sqlx::query(
            r"
            UPDATE courses
            SET total_enrollments = total_enrollments + 1
            WHERE id = $1
            ",
        )
        .bind(enrollment.course_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if counted.rows_affected() == 0 {
            // dropping the transaction rolls back the insert
            return Err(counter_not_updated("course enrollment count"));
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find(&self, user_id: EntityId, course_id: EntityId) -> RepoResult<Option<Enrollment>> {
        let result = sqlx::query_as::<_, EnrollmentModel>(
            r"
            SELECT id, user_id, course_id, progress, completed_at, enrolled_at
            FROM enrollments
            WHERE user_id = $1 AND course_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(course_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Enrollment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: EntityId) -> RepoResult<Vec<EnrollmentWithCourse>> {
        let enrollments = sqlx::query_as::<_, EnrollmentModel>(
            r"
            SELECT id, user_id, course_id, progress, completed_at, enrolled_at
            FROM enrollments
            WHERE user_id = $1
            ORDER BY enrolled_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let course_ids: Vec<Uuid> = enrollments.iter().map(|e| e.course_id).collect();
        let mut courses = self.load_courses(&course_ids).await?;

        // Enrollments of deleted courses are skipped
        Ok(enrollments
            .into_iter()
            .filter_map(|model| {
                let course = courses.remove(&model.course_id)?;
                Some(EnrollmentWithCourse {
                    enrollment: Enrollment::from(model),
                    course,
                })
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn find_by_course(&self, course_id: EntityId) -> RepoResult<Vec<EnrollmentWithUser>> {
        let enrollments = sqlx::query_as::<_, EnrollmentModel>(
            r"
            SELECT id, user_id, course_id, progress, completed_at, enrolled_at
            FROM enrollments
            WHERE course_id = $1
            ORDER BY enrolled_at DESC
            ",
        )
        .bind(course_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let user_ids: Vec<Uuid> = enrollments.iter().map(|e| e.user_id).collect();
        let users = self.load_users(&user_ids).await?;

        Ok(enrollments
            .into_iter()
            .filter_map(|model| {
                let user = users.get(&model.user_id)?.clone();
                Some(EnrollmentWithUser {
                    enrollment: Enrollment::from(model),
                    user,
                })
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn update_progress(
        &self,
        user_id: EntityId,
        course_id: EntityId,
        progress: ProgressPercent,
    ) -> RepoResult<Enrollment> {
        let result = sqlx::query_as::<_, EnrollmentModel>(
            r"
            UPDATE enrollments
            SET progress = $3,
                completed_at = CASE WHEN $3 >= 100 THEN COALESCE(completed_at, $4) ELSE NULL END
            WHERE user_id = $1 AND course_id = $2
            RETURNING id, user_id, course_id, progress, completed_at, enrolled_at
            ",
        )
        .bind(user_id.into_inner())
        .bind(course_id.into_inner())
        .bind(progress.value())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Enrollment::from).ok_or(DomainError::NotEnrolled)
    }

    #[instrument(skip(self, lesson), fields(lesson_id = %lesson.id, course_id = %lesson.course_id))]
    async fn record_lesson_completion(
        &self,
        user_id: EntityId,
        lesson: &Lesson,
        watch_time_seconds: i32,
    ) -> RepoResult<Enrollment> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let locked = sqlx::query_as::<_, EnrollmentModel>(
            r"
            SELECT id, user_id, course_id, progress, completed_at, enrolled_at
            FROM enrollments
            WHERE user_id = $1 AND course_id = $2
            FOR UPDATE
            ",
        )
        .bind(user_id.into_inner())
        .bind(lesson.course_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let mut enrollment = locked.map(Enrollment::from).ok_or(DomainError::NotEnrolled)?;

        let mut record = LessonProgress::new(user_id, lesson.id);
        record.complete(watch_time_seconds, now);

        sqlx::query(
            r"
            INSERT INTO lesson_progress (id, user_id, lesson_id, is_completed, watch_time,
                                         completed_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, lesson_id) DO UPDATE
            SET is_completed = TRUE,
                watch_time = LEAST(lesson_progress.watch_time::BIGINT + EXCLUDED.watch_time, 2147483647)::INTEGER,
                completed_at = COALESCE(lesson_progress.completed_at, EXCLUDED.completed_at)
            ",
        )
        .bind(record.id.into_inner())
        .bind(record.user_id.into_inner())
        .bind(record.lesson_id.into_inner())
        .bind(record.is_completed)
        .bind(record.watch_time)
        .bind(record.completed_at)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let (total, completed) = sqlx::query_as::<_, (i64, i64)>(
            r"
            SELECT COUNT(*) AS total,
                   COUNT(lp.id) FILTER (WHERE lp.is_completed) AS completed
            FROM lessons l
            LEFT JOIN lesson_progress lp ON lp.lesson_id = l.id AND lp.user_id = $2
            WHERE l.course_id = $1 AND l.deleted_at IS NULL
            ",
        )
        .bind(lesson.course_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let progress = ProgressPercent::from_ratio(completed.unsigned_abs(), total.unsigned_abs());
        enrollment.apply_progress(progress, now);
        debug!(completed, total, progress = %progress.value(), "Recomputed course progress");

        let updated = sqlx::query(
            r"
            UPDATE enrollments
            SET progress = $2, completed_at = $3
            WHERE id = $1
            ",
        )
        .bind(enrollment.id.into_inner())
        .bind(enrollment.progress)
        .bind(enrollment.completed_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if updated.rows_affected() == 0 {
            return Err(counter_not_updated("enrollment progress"));
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(enrollment)
    }

    #[instrument(skip(self))]
    async fn progress_snapshots(&self, user_id: EntityId) -> RepoResult<Vec<EnrollmentSnapshot>> {
        let rows = sqlx::query_as::<_, ProgressSnapshotModel>(
            r"
            SELECT e.progress,
                   e.completed_at IS NOT NULL AS completed,
                   COALESCE(SUM(l.duration), 0)::BIGINT AS course_minutes
            FROM enrollments e
            JOIN courses c ON c.id = e.course_id AND c.deleted_at IS NULL
            LEFT JOIN lessons l ON l.course_id = e.course_id AND l.deleted_at IS NULL
            WHERE e.user_id = $1
            GROUP BY e.id, e.progress, e.completed_at
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(EnrollmentSnapshot::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgEnrollmentRepository>();
    }
}
