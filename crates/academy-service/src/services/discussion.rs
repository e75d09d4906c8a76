//! Discussion forum service

use academy_core::entities::{Discussion, DiscussionReply};
use academy_core::{DomainError, EntityId};
use tracing::{info, instrument};

use crate::dto::{
    CreateDiscussionRequest, CreateReplyRequest, DiscussionDetailResponse, DiscussionResponse,
    ReplyResponse, UpdateDiscussionRequest,
};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Discussion service
pub struct DiscussionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DiscussionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Discussions newest first, optionally of one forum category
    #[instrument(skip(self))]
    pub async fn list(&self, category_id: Option<EntityId>) -> ServiceResult<Vec<DiscussionResponse>> {
        let discussions = self.ctx.discussion_repo().list(category_id).await?;
        Ok(discussions.iter().map(DiscussionResponse::from).collect())
    }

    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        author_id: EntityId,
        request: CreateDiscussionRequest,
    ) -> ServiceResult<DiscussionResponse> {
        let mut discussion =
            Discussion::new(request.title, request.content, author_id, request.category_id);
        discussion.course_id = request.course_id;

        self.ctx.discussion_repo().create(&discussion).await?;

        info!(discussion_id = %discussion.id, author_id = %author_id, "Discussion started");
        Ok(DiscussionResponse::from(&discussion))
    }

    /// Open a discussion: counts a view and returns its replies oldest first
    #[instrument(skip(self))]
    pub async fn get(&self, discussion_id: EntityId) -> ServiceResult<DiscussionDetailResponse> {
        let discussion = self
            .ctx
            .discussion_repo()
            .find_and_record_view(discussion_id)
            .await?
            .ok_or(DomainError::DiscussionNotFound(discussion_id))?;
        let replies = self.ctx.discussion_repo().find_replies(discussion_id).await?;

        Ok(DiscussionDetailResponse {
            discussion: DiscussionResponse::from(&discussion),
            replies: replies.iter().map(ReplyResponse::from).collect(),
        })
    }

    /// Post a reply, optionally under a top-level reply
    #[instrument(skip(self, request))]
    pub async fn reply(
        &self,
        author_id: EntityId,
        discussion_id: EntityId,
        request: CreateReplyRequest,
    ) -> ServiceResult<ReplyResponse> {
        let discussion = self
            .ctx
            .discussion_repo()
            .find_by_id(discussion_id)
            .await?
            .ok_or(DomainError::DiscussionNotFound(discussion_id))?;

        let parent = match request.parent_reply_id {
            Some(parent_id) => Some(
                self.ctx
                    .discussion_repo()
                    .find_reply(parent_id)
                    .await?
                    .ok_or(DomainError::ReplyNotFound(parent_id))?,
            ),
            None => None,
        };
        discussion.check_reply(parent.as_ref())?;

        let reply = DiscussionReply::new(
            discussion_id,
            author_id,
            request.content,
            request.parent_reply_id,
        );
        self.ctx.discussion_repo().create_reply(&reply).await?;

        info!(reply_id = %reply.id, discussion_id = %discussion_id, "Reply posted");
        Ok(ReplyResponse::from(&reply))
    }

    /// Pin or lock a discussion; admin only
    #[instrument(skip(self, request))]
    pub async fn update_flags(
        &self,
        actor_id: EntityId,
        discussion_id: EntityId,
        request: UpdateDiscussionRequest,
    ) -> ServiceResult<DiscussionResponse> {
        AccessService::new(self.ctx).require_admin(actor_id).await?;

        let discussion = self
            .ctx
            .discussion_repo()
            .set_flags(discussion_id, request.is_pinned, request.is_locked)
            .await?;

        info!(
            discussion_id = %discussion_id,
            pinned = discussion.is_pinned,
            locked = discussion.is_locked,
            "Discussion flags updated"
        );
        Ok(DiscussionResponse::from(&discussion))
    }
}
