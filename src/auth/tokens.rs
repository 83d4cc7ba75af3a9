/**
 * Local Signed Tokens
 *
 * This module handles issuing and verifying the locally-signed JWTs used
 * as the fallback credential scheme.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::server::config::TokenConfig;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Issue a signed token bound to a user identifier
///
/// The token expires after the configured number of minutes.
pub fn issue(config: &TokenConfig, user_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();

    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + config.expire_minutes * 60,
        iat: now,
    };

    let key = EncodingKey::from_secret(config.secret.as_ref());
    encode(&Header::new(config.algorithm), &claims, &key)
}

/// Verify and decode a signed token
pub fn verify(config: &TokenConfig, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.secret.as_ref());
    let validation = Validation::new(config.algorithm);

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

/// Extract the user identifier from a token
///
/// Fails if the token does not verify or the subject is missing or
/// non-numeric.
pub fn user_id_from_token(config: &TokenConfig, token: &str) -> Result<i64, String> {
    let claims = verify(config, token).map_err(|e| format!("Token verification failed: {}", e))?;
    claims
        .sub
        .parse::<i64>()
        .map_err(|e| format!("Invalid user ID in token: {}", e))
}
