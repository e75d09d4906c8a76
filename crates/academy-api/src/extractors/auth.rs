//! Bearer-token extractors
//!
//! Access tokens are minted by the external identity provider; the API only
//! verifies them and trusts their subject as the caller's user id.

use academy_core::EntityId;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tracing::warn;

use crate::response::ApiError;
use crate::state::AppState;

/// Caller identified by a valid access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: EntityId,
    /// Email asserted by the identity provider, if any
    pub email: Option<String>,
}

fn verify_bearer(state: &AppState, token: &str) -> Result<AuthUser, ApiError> {
    let claims = state.jwt_service().validate(token).map_err(|err| {
        warn!(error = %err, "Rejected access token");
        ApiError::InvalidToken
    })?;
    let user_id = claims.user_id().map_err(|err| {
        warn!(error = %err, "Access token subject is not a user id");
        ApiError::InvalidToken
    })?;

    Ok(AuthUser {
        user_id,
        email: claims.email,
    })
}

async fn bearer_token<S: Send + Sync>(parts: &mut Parts, state: &S) -> Option<String> {
    TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
        .await
        .ok()
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts, state).await.ok_or(ApiError::MissingAuth)?;
        verify_bearer(&AppState::from_ref(state), &token)
    }
}

/// Caller on public routes: anonymous without a header, rejected with a bad token
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<EntityId> {
        self.0.as_ref().map(|u| u.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match bearer_token(parts, state).await {
            Some(token) => verify_bearer(&AppState::from_ref(state), &token).map(|u| Self(Some(u))),
            None => Ok(Self(None)),
        }
    }
}
