/**
 * User Resolution and Provisioning
 *
 * Maps a verified external identity to a local user record, creating one
 * just in time if needed. The mutating steps are explicit in the interface:
 * `resolve_or_link` may attach an external reference to an existing account,
 * and `create_if_absent` inserts a new one.
 */

use sqlx::SqlitePool;

use crate::auth::identity::ExternalIdentity;
use crate::auth::users::{
    create_user, get_user_by_email, get_user_by_provider_uid, link_provider_uid, User,
};
use crate::error::ApiError;

/// Find the local user for a verified external identity
///
/// Resolution order:
/// 1. lookup by external reference;
/// 2. lookup by email, linking the external reference onto the match
///    (account linking).
///
/// Returns `None` when neither lookup matches; no record is created.
pub async fn resolve_or_link(
    pool: &SqlitePool,
    identity: &ExternalIdentity,
) -> Result<Option<User>, sqlx::Error> {
    if let Some(user) = get_user_by_provider_uid(pool, &identity.subject).await? {
        return Ok(Some(user));
    }

    if let Some(email) = &identity.email {
        if let Some(user) = get_user_by_email(pool, email).await? {
            tracing::info!(
                "Linking external identity {} to existing user {}",
                identity.subject,
                user.id
            );
            let user = link_provider_uid(pool, user.id, &identity.subject).await?;
            return Ok(Some(user));
        }
    }

    Ok(None)
}

/// Create a local user for a verified external identity
///
/// The new account carries no password hash. Fails with a validation error
/// when the identity carries no email, since email is required to provision
/// an account.
pub async fn create_if_absent(
    pool: &SqlitePool,
    identity: &ExternalIdentity,
) -> Result<User, ApiError> {
    let email = identity
        .email
        .as_deref()
        .ok_or_else(|| ApiError::validation("External identity carries no email"))?;

    let name = identity
        .display_name
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| {
            email
                .split('@')
                .next()
                .unwrap_or("User")
                .to_string()
        });

    let user = create_user(pool, &name, email, None, Some(identity.subject.clone())).await?;
    tracing::info!(
        "Provisioned user {} from external identity {}",
        user.id,
        identity.subject
    );

    Ok(user)
}

/// Resolve an external identity to a local user, provisioning if needed
pub async fn resolve_user(
    pool: &SqlitePool,
    identity: &ExternalIdentity,
) -> Result<User, ApiError> {
    if let Some(user) = resolve_or_link(pool, identity).await? {
        return Ok(user);
    }
    create_if_absent(pool, identity).await
}
