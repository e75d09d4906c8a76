//! Catalog service
//!
//! Course categories and forum categories. Reads are public, writes are
//! admin-only.

use academy_core::entities::{Category, ForumCategory};
use academy_core::EntityId;
use tracing::{info, instrument};

use crate::dto::{
    CategoryResponse, CreateCategoryRequest, CreateForumCategoryRequest, ForumCategoryResponse,
};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Catalog service
pub struct CatalogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CatalogService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> ServiceResult<Vec<CategoryResponse>> {
        let categories = self.ctx.category_repo().list().await?;
        Ok(categories.iter().map(CategoryResponse::from).collect())
    }

    #[instrument(skip(self, request))]
    pub async fn create_category(
        &self,
        actor_id: EntityId,
        request: CreateCategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        AccessService::new(self.ctx).require_admin(actor_id).await?;

        let category = Category::new(request.name, request.description);
        self.ctx.category_repo().create(&category).await?;

        info!(category_id = %category.id, "Category created");
        Ok(CategoryResponse::from(&category))
    }

    #[instrument(skip(self))]
    pub async fn list_forum_categories(&self) -> ServiceResult<Vec<ForumCategoryResponse>> {
        let categories = self.ctx.forum_category_repo().list().await?;
        Ok(categories.iter().map(ForumCategoryResponse::from).collect())
    }

    #[instrument(skip(self, request))]
    pub async fn create_forum_category(
        &self,
        actor_id: EntityId,
        request: CreateForumCategoryRequest,
    ) -> ServiceResult<ForumCategoryResponse> {
        AccessService::new(self.ctx).require_admin(actor_id).await?;

        let category = ForumCategory::new(request.name, request.description, request.icon);
        self.ctx.forum_category_repo().create(&category).await?;

        info!(forum_category_id = %category.id, "Forum category created");
        Ok(ForumCategoryResponse::from(&category))
    }
}
