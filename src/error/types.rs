/**
 * API Error Types
 *
 * This module defines the error type returned by HTTP handlers. Every
 * variant maps to one HTTP status code, so handlers can propagate errors
 * with `?` and let the response conversion pick the right code.
 *
 * # Error Categories
 *
 * - Validation errors (malformed input, email conflicts) map to 400
 * - Authentication failures map to 401
 * - Missing external-service configuration and provider failures map to 500,
 *   with the underlying reason included in the message
 * - Database, hashing, and token-issuance failures map to 500
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::chat::generation::GenerationError;

/// Errors surfaced by HTTP handlers
///
/// Each variant carries a human-readable message and maps to a single
/// HTTP status code via [`ApiError::status_code`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input, including email and identity conflicts
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid, or expired credentials
    #[error("{0}")]
    Unauthorized(String),

    /// A required external service has no credentials configured
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// The text-generation provider failed; the reason is passed through
    #[error("AI reply failed: {0}")]
    Generation(String),

    /// Database query failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing or verification failure (not a mismatch)
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Local token could not be issued
    #[error("Token issuance failed: {0}")]
    TokenIssue(#[from] jsonwebtoken::errors::Error),
}

impl ApiError {
    /// Create a validation error (400)
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an unauthorized error (401)
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotConfigured(_)
            | Self::Generation(_)
            | Self::Database(_)
            | Self::PasswordHash(_)
            | Self::TokenIssue(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message for the response body
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::NotConfigured => Self::NotConfigured("Text generation service"),
            GenerationError::Provider(reason) => Self::Generation(reason),
            GenerationError::EmptyReply => {
                Self::Generation("provider returned an empty reply".to_string())
            }
        }
    }
}
