//! PostgreSQL implementation of LiveClassRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use academy_core::entities::{LiveClass, LiveClassAttendee};
use academy_core::error::DomainError;
use academy_core::traits::{LiveClassRepository, RepoResult};
use academy_core::value_objects::EntityId;

use crate::models::{LiveClassAttendeeModel, LiveClassModel};

use super::error::{map_db_error, map_insert_error};

/// PostgreSQL implementation of LiveClassRepository
#[derive(Clone)]
pub struct PgLiveClassRepository {
    pool: PgPool,
}

impl PgLiveClassRepository {
    /// Create a new PgLiveClassRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LiveClassRepository for PgLiveClassRepository {
    #[instrument(skip(self, live_class), fields(live_class_id = %live_class.id))]
    async fn create(&self, live_class: &LiveClass) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO live_classes (id, title, description, instructor_id, course_id, scheduled_at,
                                      duration, meeting_url, is_active, max_attendees, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(live_class.id.into_inner())
        .bind(&live_class.title)
        .bind(&live_class.description)
        .bind(live_class.instructor_id.into_inner())
        .bind(live_class.course_id.map(EntityId::into_inner))
        .bind(live_class.scheduled_at)
        .bind(live_class.duration)
        .bind(&live_class.meeting_url)
        .bind(live_class.is_active)
        .bind(live_class.max_attendees)
        .bind(live_class.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                || DomainError::InternalError("duplicate live class id".to_string()),
                |constraint| match live_class.course_id {
                    Some(course_id) if constraint.contains("course_id") => {
                        DomainError::CourseNotFound(course_id)
                    }
                    _ => DomainError::UserNotFound(live_class.instructor_id),
                },
            )
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<LiveClass>> {
        let result = sqlx::query_as::<_, LiveClassModel>(
            r"
            SELECT id, title, description, instructor_id, course_id, scheduled_at, duration,
                   meeting_url, is_active, max_attendees, created_at
            FROM live_classes
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(LiveClass::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<LiveClass>> {
        let results = sqlx::query_as::<_, LiveClassModel>(
            r"
            SELECT id, title, description, instructor_id, course_id, scheduled_at, duration,
                   meeting_url, is_active, max_attendees, created_at
            FROM live_classes
            ORDER BY scheduled_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(LiveClass::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_upcoming(&self, now: DateTime<Utc>) -> RepoResult<Vec<LiveClass>> {
        let results = sqlx::query_as::<_, LiveClassModel>(
            r"
            SELECT id, title, description, instructor_id, course_id, scheduled_at, duration,
                   meeting_url, is_active, max_attendees, created_at
            FROM live_classes
            WHERE scheduled_at > $1
            ORDER BY scheduled_at
            ",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(LiveClass::from).collect())
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: EntityId, active: bool) -> RepoResult<LiveClass> {
        let result = sqlx::query_as::<_, LiveClassModel>(
            r"
            UPDATE live_classes
            SET is_active = $2
            WHERE id = $1
            RETURNING id, title, description, instructor_id, course_id, scheduled_at, duration,
                      meeting_url, is_active, max_attendees, created_at
            ",
        )
        .bind(id.into_inner())
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(LiveClass::from).ok_or(DomainError::LiveClassNotFound(id))
    }

    #[instrument(skip(self, attendee), fields(live_class_id = %attendee.live_class_id, user_id = %attendee.user_id))]
    async fn join(&self, attendee: &LiveClassAttendee) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Row lock serializes concurrent joins of the same class
        let max_attendees = sqlx::query_scalar::<_, i32>(
            r"
            SELECT max_attendees FROM live_classes WHERE id = $1 FOR UPDATE
            ",
        )
        .bind(attendee.live_class_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::LiveClassNotFound(attendee.live_class_id))?;

        let (present, already_here) = sqlx::query_as::<_, (i64, bool)>(
            r"
            SELECT COUNT(*) AS present,
                   COALESCE(BOOL_OR(user_id = $2), FALSE) AS already_here
            FROM live_class_attendees
            WHERE live_class_id = $1 AND left_at IS NULL
            ",
        )
        .bind(attendee.live_class_id.into_inner())
        .bind(attendee.user_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if already_here {
            return Err(DomainError::AlreadyAttending);
        }
        if present >= i64::from(max_attendees) {
            return Err(DomainError::LiveClassFull { max: max_attendees });
        }

        sqlx::query(
            r"
            INSERT INTO live_class_attendees (id, live_class_id, user_id, joined_at, left_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(attendee.id.into_inner())
        .bind(attendee.live_class_id.into_inner())
        .bind(attendee.user_id.into_inner())
        .bind(attendee.joined_at)
        .bind(attendee.left_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                || DomainError::AlreadyAttending,
                |_| DomainError::UserNotFound(attendee.user_id),
            )
        })?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn leave(
        &self,
        live_class_id: EntityId,
        user_id: EntityId,
        left_at: DateTime<Utc>,
    ) -> RepoResult<LiveClassAttendee> {
        let result = sqlx::query_as::<_, LiveClassAttendeeModel>(
            r"
            UPDATE live_class_attendees
            SET left_at = $3
            WHERE live_class_id = $1 AND user_id = $2 AND left_at IS NULL
            RETURNING id, live_class_id, user_id, joined_at, left_at
            ",
        )
        .bind(live_class_id.into_inner())
        .bind(user_id.into_inner())
        .bind(left_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(LiveClassAttendee::from)
            .ok_or(DomainError::AttendanceNotFound)
    }

    #[instrument(skip(self))]
    async fn find_attendees(&self, live_class_id: EntityId) -> RepoResult<Vec<LiveClassAttendee>> {
        let results = sqlx::query_as::<_, LiveClassAttendeeModel>(
            r"
            SELECT id, live_class_id, user_id, joined_at, left_at
            FROM live_class_attendees
            WHERE live_class_id = $1
            ORDER BY joined_at
            ",
        )
        .bind(live_class_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(LiveClassAttendee::from).collect())
    }
}
