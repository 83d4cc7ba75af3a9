//! Authentication Module
//!
//! This module implements the dual-mode authentication core: bearer
//! credentials are verified against the external identity provider first,
//! falling back to the locally-signed token scheme, with just-in-time user
//! provisioning for verified external identities.
//!
//! # Architecture
//!
//! - **`users`** - User model and database operations
//! - **`tokens`** - local JWT issue/verify (the fallback scheme)
//! - **`identity`** - remote identity-provider client and verdict types
//! - **`provision`** - resolution, account linking, and provisioning
//! - **`handlers`** - HTTP handlers for register, login, and me
//!
//! The verification chain itself lives in the authentication middleware,
//! which composes `identity`, `tokens`, and `provision`.

/// Authentication endpoint handlers
pub mod handlers;

/// External identity verification
pub mod identity;

/// User resolution and provisioning
pub mod provision;

/// Local signed tokens
pub mod tokens;

/// User model and database operations
pub mod users;

// Re-export commonly used types
pub use identity::{ExternalIdentity, IdentityProvider, Verdict, VerifyFailure};
pub use users::User;
