/**
 * Login Handler
 *
 * Implements POST /auth/login for the local password scheme.
 *
 * # Authentication Process
 *
 * 1. Look up the user by email
 * 2. Verify the password against the stored bcrypt hash
 * 3. Issue a locally-signed token bound to the user id
 *
 * # Security
 *
 * No user, no stored hash (external-identity-only account), and a failed
 * hash comparison all return the same 401 message, so responses do not
 * reveal which accounts exist.
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;
use sqlx::SqlitePool;

use crate::auth::handlers::types::{LoginRequest, TokenResponse};
use crate::auth::tokens;
use crate::auth::users::get_user_by_email;
use crate::error::ApiError;
use crate::server::config::TokenConfig;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email, passwordless account, or wrong
///   password
/// * `500 Internal Server Error` - database, hashing, or token-issuance
///   failure
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<TokenConfig>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    tracing::info!("Login request for {}", request.email);

    let user = get_user_by_email(&pool, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login for unknown email");
            ApiError::unauthorized(INVALID_CREDENTIALS)
        })?;

    let password_hash = user.password_hash.as_deref().ok_or_else(|| {
        tracing::warn!("Login for passwordless account {}", user.id);
        ApiError::unauthorized(INVALID_CREDENTIALS)
    })?;

    if !verify(&request.password, password_hash)? {
        tracing::warn!("Wrong password for user {}", user.id);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let access_token = tokens::issue(&config, user.id)?;
    tracing::info!("User {} logged in", user.id);

    Ok(Json(TokenResponse::bearer(access_token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::users::create_user;
    use crate::test_support::memory_pool;
    use bcrypt::{hash, DEFAULT_COST};
    use jsonwebtoken::Algorithm;

    fn token_config() -> TokenConfig {
        TokenConfig {
            secret: "login-secret".to_string(),
            algorithm: Algorithm::HS256,
            expire_minutes: 60,
        }
    }

    fn request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let pool = memory_pool().await;
        let password_hash = hash("password123", DEFAULT_COST).unwrap();
        let user = create_user(
            &pool,
            "Test",
            "test@example.com",
            Some(password_hash),
            None,
        )
        .await
        .unwrap();

        let config = token_config();
        let Json(response) = login(
            State(pool),
            State(config.clone()),
            Json(request("test@example.com", "password123")),
        )
        .await
        .unwrap();

        assert_eq!(response.token_type, "bearer");
        let claimed = tokens::user_id_from_token(&config, &response.access_token).unwrap();
        assert_eq!(claimed, user.id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let pool = memory_pool().await;
        let password_hash = hash("password123", DEFAULT_COST).unwrap();
        create_user(
            &pool,
            "Test",
            "test@example.com",
            Some(password_hash),
            None,
        )
        .await
        .unwrap();

        let result = login(
            State(pool),
            State(token_config()),
            Json(request("test@example.com", "wrongpassword")),
        )
        .await;
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let pool = memory_pool().await;

        let result = login(
            State(pool),
            State(token_config()),
            Json(request("ghost@example.com", "password123")),
        )
        .await;
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_login_external_only_account_rejected() {
        let pool = memory_pool().await;
        create_user(
            &pool,
            "Ext",
            "ext@example.com",
            None,
            Some("ext-1".to_string()),
        )
        .await
        .unwrap();

        let result = login(
            State(pool),
            State(token_config()),
            Json(request("ext@example.com", "anything")),
        )
        .await;
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
