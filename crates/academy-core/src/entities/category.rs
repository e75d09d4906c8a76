//! Category entities - course categories and forum categories

use chrono::{DateTime, Utc};

use crate::value_objects::EntityId;

/// Course category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: EntityId::generate(),
            name,
            description,
            created_at: Utc::now(),
        }
    }
}

/// Discussion forum category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumCategory {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ForumCategory {
    pub fn new(name: String, description: Option<String>, icon: Option<String>) -> Self {
        Self {
            id: EntityId::generate(),
            name,
            description,
            icon,
            created_at: Utc::now(),
        }
    }
}
