//! Discussion threads and replies
//!
//! Replies support one level of threading: a reply may point at a top-level
//! reply of the same discussion.

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::EntityId;

/// Forum discussion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discussion {
    pub id: EntityId,
    pub title: String,
    pub content: String,
    pub author_id: EntityId,
    pub category_id: EntityId,
    pub course_id: Option<EntityId>,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub view_count: i32,
    pub reply_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Discussion {
    pub fn new(title: String, content: String, author_id: EntityId, category_id: EntityId) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            title,
            content,
            author_id,
            category_id,
            course_id: None,
            is_pinned: false,
            is_locked: false,
            view_count: 0,
            reply_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check that a reply may be posted, optionally under `parent`
    pub fn check_reply(&self, parent: Option<&DiscussionReply>) -> Result<(), DomainError> {
        if self.is_locked {
            return Err(DomainError::DiscussionLocked);
        }
        if let Some(parent) = parent {
            if parent.discussion_id != self.id {
                return Err(DomainError::ReplyParentMismatch);
            }
            if !parent.is_top_level() {
                return Err(DomainError::NestedReply);
            }
        }
        Ok(())
    }
}

/// Reply to a discussion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionReply {
    pub id: EntityId,
    pub discussion_id: EntityId,
    pub author_id: EntityId,
    pub content: String,
    pub parent_reply_id: Option<EntityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DiscussionReply {
    pub fn new(
        discussion_id: EntityId,
        author_id: EntityId,
        content: String,
        parent_reply_id: Option<EntityId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            discussion_id,
            author_id,
            content,
            parent_reply_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_top_level(&self) -> bool {
        self.parent_reply_id.is_none()
    }
}
