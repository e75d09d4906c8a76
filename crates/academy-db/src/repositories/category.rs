//! PostgreSQL implementations of CategoryRepository and ForumCategoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use academy_core::entities::{Category, ForumCategory};
use academy_core::traits::{CategoryRepository, ForumCategoryRepository, RepoResult};
use academy_core::value_objects::EntityId;

use crate::models::{CategoryModel, ForumCategoryModel};

use super::error::map_db_error;

/// PostgreSQL implementation of CategoryRepository
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn create(&self, category: &Category) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO categories (id, name, description, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(category.id.into_inner())
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Category>> {
        let result = sqlx::query_as::<_, CategoryModel>(
            r"
            SELECT id, name, description, created_at
            FROM categories
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Category::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Category>> {
        let results = sqlx::query_as::<_, CategoryModel>(
            r"
            SELECT id, name, description, created_at
            FROM categories
            ORDER BY name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Category::from).collect())
    }
}

/// PostgreSQL implementation of ForumCategoryRepository
#[derive(Clone)]
pub struct PgForumCategoryRepository {
    pool: PgPool,
}

impl PgForumCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ForumCategoryRepository for PgForumCategoryRepository {
    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn create(&self, category: &ForumCategory) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO forum_categories (id, name, description, icon, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(category.id.into_inner())
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.icon)
        .bind(category.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<ForumCategory>> {
        let result = sqlx::query_as::<_, ForumCategoryModel>(
            r"
            SELECT id, name, description, icon, created_at
            FROM forum_categories
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ForumCategory::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<ForumCategory>> {
        let results = sqlx::query_as::<_, ForumCategoryModel>(
            r"
            SELECT id, name, description, icon, created_at
            FROM forum_categories
            ORDER BY name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ForumCategory::from).collect())
    }
}
