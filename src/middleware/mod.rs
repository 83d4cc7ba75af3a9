//! Middleware Module
//!
//! Request-processing middleware. Currently this is the bearer
//! authentication middleware and its `AuthUser` handler extractor.

/// Bearer authentication middleware and extractor
pub mod auth;

pub use auth::{authenticate, AuthUser};
