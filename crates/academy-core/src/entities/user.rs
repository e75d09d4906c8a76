//! User entity - a learner, instructor or administrator
//!
//! Users are created on first sign-in with the external identity provider and
//! re-synced on later sign-ins. They are never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::EntityId;

/// Role assigned to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Learner,
    Instructor,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Learner => "learner",
            Self::Instructor => "instructor",
            Self::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "learner" => Some(Self::Learner),
            "instructor" => Some(Self::Instructor),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Instructors and admins may author courses and live classes
    #[inline]
    pub fn can_teach(self) -> bool {
        matches!(self, Self::Instructor | Self::Admin)
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: EntityId,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: UserRole,
    pub billing_customer_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new learner account for an identity-provider subject
    pub fn new(id: EntityId, email: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            first_name: None,
            last_name: None,
            profile_image_url: None,
            role: UserRole::Learner,
            billing_customer_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    #[inline]
    pub fn can_teach(&self) -> bool {
        self.role.can_teach()
    }

    /// "First Last", falling back to whichever part is present
    pub fn display_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_learner() {
        let user = User::new(EntityId::generate(), Some("a@example.com".to_string()));
        assert_eq!(user.role, UserRole::Learner);
        assert!(!user.can_teach());
        assert!(!user.is_admin());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse("instructor"), Some(UserRole::Instructor));
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("teacher"), None);
        assert_eq!(UserRole::Admin.as_str(), "admin");
        assert!(UserRole::Admin.can_teach());
    }

    #[test]
    fn test_display_name() {
        let mut user = User::new(EntityId::generate(), None);
        assert!(user.display_name().is_none());

        user.first_name = Some("Asha".to_string());
        assert_eq!(user.display_name().as_deref(), Some("Asha"));

        user.last_name = Some("Rao".to_string());
        assert_eq!(user.display_name().as_deref(), Some("Asha Rao"));
    }
}
