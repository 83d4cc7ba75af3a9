/**
 * Authentication Middleware
 *
 * This middleware protects routes that require an authenticated user. It
 * extracts the bearer credential from the Authorization header and runs the
 * dual-mode resolution chain:
 *
 * 1. Remote verification against the external identity provider; on a
 *    verified identity, the local user is resolved or provisioned
 *    just in time.
 * 2. On any remote failure (unconfigured provider, outage, rejection) the
 *    credential is tried as a locally-signed token instead.
 *
 * Only failure of both paths is surfaced, as 401. The remote failure itself
 * is never shown to the caller; it is logged at debug level with the
 * configuration-absence and rejection cases kept distinct.
 *
 * The resolved `User` is attached to request extensions; handlers pull it
 * out through the `AuthUser` extractor.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::auth::identity::{Verdict, VerifyFailure};
use crate::auth::provision::resolve_user;
use crate::auth::tokens;
use crate::auth::users::{get_user_by_id, User};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Authentication middleware
///
/// Attaches the resolved [`User`] to request extensions on success.
///
/// # Errors
///
/// * `401 Unauthorized` - missing/malformed header, or both verification
///   paths failed
/// * `400 Bad Request` - verified external identity with no email and no
///   existing account to link
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            ApiError::unauthorized("Missing Authorization header")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        ApiError::unauthorized("Invalid Authorization header format")
    })?;

    let user = resolve_bearer(&state, token).await?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Resolve a bearer credential to a local user
///
/// Tries remote verification first and falls back to the local signed-token
/// scheme on any remote failure.
async fn resolve_bearer(state: &AppState, token: &str) -> Result<User, ApiError> {
    match state.identity.verify(token).await {
        Verdict::Verified(identity) => resolve_user(&state.pool, &identity).await,
        Verdict::Failed(failure) => {
            match &failure {
                VerifyFailure::NotConfigured => {
                    tracing::debug!("Remote verification unavailable, trying local token");
                }
                VerifyFailure::Rejected(reason) => {
                    tracing::debug!("Remote verification failed ({}), trying local token", reason);
                }
            }

            let user_id = tokens::user_id_from_token(&state.tokens, token).map_err(|reason| {
                tracing::warn!("Local token rejected: {}", reason);
                ApiError::unauthorized("Token verification failed")
            })?;

            get_user_by_id(&state.pool, user_id)
                .await?
                .ok_or_else(|| {
                    tracing::warn!("Token subject {} has no matching user", user_id);
                    ApiError::unauthorized("Token verification failed")
                })
        }
    }
}

/// Axum extractor for the authenticated user
///
/// Pulls the [`User`] attached by [`authenticate`] out of request
/// extensions. Rejects with 401 when the middleware did not run.
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("Authenticated user not found in request extensions");
                ApiError::unauthorized("Not authenticated")
            })
    }
}
