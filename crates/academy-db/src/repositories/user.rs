//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use academy_core::entities::{User, UserRole};
use academy_core::error::DomainError;
use academy_core::traits::{RepoResult, UserRepository};
use academy_core::value_objects::EntityId;

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, first_name, last_name, profile_image_url, role,
                   billing_customer_id, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, first_name, last_name, profile_image_url, role,
                   billing_customer_id, created_at, updated_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn upsert(&self, user: &User) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (id, email, first_name, last_name, profile_image_url, role,
                               billing_customer_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE
            SET email = EXCLUDED.email,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                profile_image_url = EXCLUDED.profile_image_url,
                updated_at = EXCLUDED.updated_at
            RETURNING id, email, first_name, last_name, profile_image_url, role,
                      billing_customer_id, created_at, updated_at
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.profile_image_url)
        .bind(user.role.as_str())
        .bind(&user.billing_customer_id)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        User::try_from(model)
    }

    #[instrument(skip(self))]
    async fn update_role(&self, id: EntityId, role: UserRole) -> RepoResult<User> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET role = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, first_name, last_name, profile_image_url, role,
                      billing_customer_id, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.ok_or(DomainError::UserNotFound(id)).and_then(User::try_from)
    }

    #[instrument(skip(self))]
    async fn set_billing_customer(&self, id: EntityId, customer_id: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET billing_customer_id = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(customer_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(id));
        }

        Ok(())
    }
}
