/**
 * Authentication Handler Types
 *
 * Request and response types shared by the register, login, and me handlers.
 */

use serde::{Deserialize, Serialize};

use crate::auth::users::User;

/// Registration request
///
/// Two mutually exclusive shapes: externally-identified registration
/// carries `provider_uid` and needs no password; local registration
/// requires `password`.
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Email address (unique per account)
    pub email: String,
    /// Password for local registration; ignored when `provider_uid` is set
    #[serde(default)]
    pub password: Option<String>,
    /// External identity reference for externally-identified registration
    #[serde(default)]
    pub provider_uid: Option<String>,
}

/// Login request for the local password scheme
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued-token response
#[derive(Serialize, Debug)]
pub struct TokenResponse {
    /// Locally-signed JWT
    pub access_token: String,
    /// Always "bearer"
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// User record returned to clients (never includes the password hash)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub provider_uid: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            provider_uid: user.provider_uid,
        }
    }
}
