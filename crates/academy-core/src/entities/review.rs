//! Review entity - a learner's rating of a course

use chrono::{DateTime, Utc};

use crate::entities::User;
use crate::value_objects::{EntityId, Rating};

/// Course review; `rating` is always within 1..=5
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: EntityId,
    pub course_id: EntityId,
    pub user_id: EntityId,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(course_id: EntityId, user_id: EntityId, rating: Rating, comment: Option<String>) -> Self {
        Self {
            id: EntityId::generate(),
            course_id,
            user_id,
            rating: rating.into(),
            comment,
            created_at: Utc::now(),
        }
    }
}

/// Review joined with its author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewWithUser {
    pub review: Review,
    pub user: User,
}
