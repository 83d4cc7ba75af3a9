/**
 * Registration Handler
 *
 * Implements POST /auth/register.
 *
 * # Registration Process
 *
 * 1. Validate the email shape and reject already-registered emails
 * 2. Externally-identified shape: reject duplicate external references,
 *    create a passwordless account
 * 3. Local shape: require a password, enforce the hash input ceiling,
 *    hash with bcrypt, create the account
 *
 * # Validation
 *
 * - Email must contain '@'
 * - Duplicate email or external reference is a validation failure
 * - Passwords longer than 72 bytes are rejected before hashing
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::SqlitePool;

use crate::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::auth::users::{create_user, get_user_by_email, get_user_by_provider_uid};
use crate::error::ApiError;

// bcrypt ignores input beyond 72 bytes
const PASSWORD_MAX_BYTES: usize = 72;

/// Registration handler
///
/// Creates a user account in one of the two registration shapes and
/// returns the persisted record with status 201.
///
/// # Errors
///
/// * `400 Bad Request` - malformed email, missing password, password over
///   the ceiling, or an email/external-reference conflict
/// * `500 Internal Server Error` - hashing or database failure
pub async fn register(
    State(pool): State<SqlitePool>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    tracing::info!("Registration request for {}", request.email);

    if !request.email.contains('@') {
        tracing::warn!("Invalid email format: {}", request.email);
        return Err(ApiError::validation("Invalid email format"));
    }

    if get_user_by_email(&pool, &request.email).await?.is_some() {
        tracing::warn!("Email already registered: {}", request.email);
        return Err(ApiError::validation("Email already registered"));
    }

    let user = if let Some(provider_uid) = &request.provider_uid {
        // Externally-identified registration, no password involved
        if get_user_by_provider_uid(&pool, provider_uid)
            .await?
            .is_some()
        {
            tracing::warn!("External identity already registered: {}", provider_uid);
            return Err(ApiError::validation("External identity already registered"));
        }
        create_user(
            &pool,
            &request.name,
            &request.email,
            None,
            Some(provider_uid.clone()),
        )
        .await?
    } else {
        let password = match request.password.as_deref() {
            Some(password) if !password.is_empty() => password,
            _ => return Err(ApiError::validation("Password is required")),
        };
        if password.len() > PASSWORD_MAX_BYTES {
            tracing::warn!("Password over the length ceiling");
            return Err(ApiError::validation("Password must be at most 72 characters"));
        }
        let password_hash = hash(password, DEFAULT_COST)?;
        create_user(
            &pool,
            &request.name,
            &request.email,
            Some(password_hash),
            None,
        )
        .await?
    };

    tracing::info!("User {} registered ({})", user.id, user.email);
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
