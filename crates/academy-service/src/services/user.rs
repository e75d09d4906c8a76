//! User service
//!
//! Profiles are owned by the external identity provider and synced here on
//! sign-in. The token subject is the user id.

use academy_core::entities::{User, UserRole};
use academy_core::EntityId;
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{SyncProfileRequest, UpdateRoleRequest, UserResponse};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the caller's profile
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: EntityId) -> ServiceResult<UserResponse> {
        let user = AccessService::new(self.ctx).require_user(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Create or refresh the caller's profile
    ///
    /// `token_email` is the email claim of the access token; an email in the
    /// request body takes precedence.
    #[instrument(skip(self, request))]
    pub async fn sync_profile(
        &self,
        user_id: EntityId,
        token_email: Option<String>,
        request: SyncProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let existing = self.ctx.user_repo().find_by_id(user_id).await?;
        let is_new = existing.is_none();
        let mut user = existing.unwrap_or_else(|| User::new(user_id, None));

        if let Some(email) = request.email.or(token_email) {
            user.email = Some(email.to_lowercase());
        }
        if request.first_name.is_some() {
            user.first_name = request.first_name;
        }
        if request.last_name.is_some() {
            user.last_name = request.last_name;
        }
        if request.profile_image_url.is_some() {
            user.profile_image_url = request.profile_image_url;
        }
        user.updated_at = Utc::now();

        let stored = self.ctx.user_repo().upsert(&user).await?;
        if is_new {
            info!(user_id = %user_id, "User signed in for the first time");
        }
        Ok(UserResponse::from(&stored))
    }

    /// Change another user's role (admin only)
    #[instrument(skip(self, request))]
    pub async fn update_role(
        &self,
        actor_id: EntityId,
        target_id: EntityId,
        request: UpdateRoleRequest,
    ) -> ServiceResult<UserResponse> {
        AccessService::new(self.ctx).require_admin(actor_id).await?;

        let role = UserRole::parse(&request.role).ok_or_else(|| {
            ServiceError::validation(format!("Unknown role '{}'", request.role))
        })?;

        let user = self.ctx.user_repo().update_role(target_id, role).await?;

        info!(user_id = %target_id, role = role.as_str(), "User role changed");
        Ok(UserResponse::from(&user))
    }
}
