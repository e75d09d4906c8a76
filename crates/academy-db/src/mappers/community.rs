//! Discussions, replies and notifications

use academy_core::entities::{Discussion, DiscussionReply, Notification, NotificationKind};
use academy_core::value_objects::EntityId;

use crate::models::{DiscussionModel, DiscussionReplyModel, NotificationModel};

impl From<DiscussionModel> for Discussion {
    fn from(model: DiscussionModel) -> Self {
        Discussion {
            id: EntityId::from(model.id),
            title: model.title,
            content: model.content,
            author_id: EntityId::from(model.author_id),
            category_id: EntityId::from(model.category_id),
            course_id: model.course_id.map(EntityId::from),
            is_pinned: model.is_pinned,
            is_locked: model.is_locked,
            view_count: model.view_count,
            reply_count: model.reply_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<DiscussionReplyModel> for DiscussionReply {
    fn from(model: DiscussionReplyModel) -> Self {
        DiscussionReply {
            id: EntityId::from(model.id),
            discussion_id: EntityId::from(model.discussion_id),
            author_id: EntityId::from(model.author_id),
            content: model.content,
            parent_reply_id: model.parent_reply_id.map(EntityId::from),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: EntityId::from(model.id),
            user_id: EntityId::from(model.user_id),
            title: model.title,
            message: model.message,
            kind: NotificationKind::parse(&model.kind),
            is_read: model.is_read,
            metadata: model.metadata,
            created_at: model.created_at,
        }
    }
}
