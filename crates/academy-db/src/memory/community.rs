//! Discussions, replies and notifications

use async_trait::async_trait;
use chrono::Utc;

use academy_core::entities::{Discussion, DiscussionReply, Notification};
use academy_core::error::DomainError;
use academy_core::traits::{DiscussionRepository, NotificationRepository, RepoResult};
use academy_core::value_objects::EntityId;

use super::{newest_first, MemoryStore};

#[async_trait]
impl DiscussionRepository for MemoryStore {
    async fn create(&self, discussion: &Discussion) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if !tables.forum_categories.iter().any(|c| c.id == discussion.category_id) {
            return Err(DomainError::ForumCategoryNotFound(discussion.category_id));
        }
        if let Some(course_id) = discussion.course_id {
            if tables.course_row_mut(course_id).is_none() {
                return Err(DomainError::CourseNotFound(course_id));
            }
        }
        tables.require_user(discussion.author_id)?;
        tables.discussions.push(discussion.clone());
        Ok(())
    }

    async fn list(&self, category_id: Option<EntityId>) -> RepoResult<Vec<Discussion>> {
        let tables = self.tables.lock();
        let rows = tables
            .discussions
            .iter()
            .filter(|d| category_id.map_or(true, |c| d.category_id == c))
            .cloned()
            .collect::<Vec<_>>();
        Ok(newest_first(rows.into_iter(), |d| d.created_at))
    }

    async fn find_and_record_view(&self, id: EntityId) -> RepoResult<Option<Discussion>> {
        let mut tables = self.tables.lock();
        Ok(tables.discussions.iter_mut().find(|d| d.id == id).map(|d| {
            d.view_count += 1;
            d.clone()
        }))
    }

    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Discussion>> {
        Ok(self.tables.lock().discussions.iter().find(|d| d.id == id).cloned())
    }

    async fn set_flags(
        &self,
        id: EntityId,
        pinned: Option<bool>,
        locked: Option<bool>,
    ) -> RepoResult<Discussion> {
        let mut tables = self.tables.lock();
        let discussion = tables
            .discussions
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(DomainError::DiscussionNotFound(id))?;
        if let Some(pinned) = pinned {
            discussion.is_pinned = pinned;
        }
        if let Some(locked) = locked {
            discussion.is_locked = locked;
        }
        discussion.updated_at = Utc::now();
        Ok(discussion.clone())
    }

    async fn create_reply(&self, reply: &DiscussionReply) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        let at = tables
            .discussions
            .iter()
            .position(|d| d.id == reply.discussion_id)
            .ok_or(DomainError::DiscussionNotFound(reply.discussion_id))?;
        if tables.discussions[at].is_locked {
            return Err(DomainError::DiscussionLocked);
        }
        if let Some(parent) = reply.parent_reply_id {
            if !tables.replies.iter().any(|r| r.id == parent) {
                return Err(DomainError::ReplyNotFound(parent));
            }
        }
        tables.require_user(reply.author_id)?;

        tables.replies.push(reply.clone());
        tables.discussions[at].reply_count += 1;
        Ok(())
    }

    async fn find_reply(&self, id: EntityId) -> RepoResult<Option<DiscussionReply>> {
        Ok(self.tables.lock().replies.iter().find(|r| r.id == id).cloned())
    }

    async fn find_replies(&self, discussion_id: EntityId) -> RepoResult<Vec<DiscussionReply>> {
        let mut replies: Vec<DiscussionReply> = self
            .tables
            .lock()
            .replies
            .iter()
            .filter(|r| r.discussion_id == discussion_id)
            .cloned()
            .collect();
        replies.sort_by_key(|r| r.created_at);
        Ok(replies)
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        tables.require_user(notification.user_id)?;
        tables.notifications.push(notification.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: EntityId) -> RepoResult<Vec<Notification>> {
        let tables = self.tables.lock();
        let rows = tables
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect::<Vec<_>>();
        Ok(newest_first(rows.into_iter(), |n| n.created_at))
    }

    async fn mark_read(&self, id: EntityId, user_id: EntityId) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        let notification = tables
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
            .ok_or(DomainError::NotificationNotFound(id))?;
        notification.is_read = true;
        Ok(())
    }

    async fn mark_all_read(&self, user_id: EntityId) -> RepoResult<u64> {
        let mut tables = self.tables.lock();
        let mut marked = 0;
        for notification in tables
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            notification.is_read = true;
            marked += 1;
        }
        Ok(marked)
    }
}
