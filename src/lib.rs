//! resrv — chat application backend
//!
//! A small backend that authenticates users (through an external identity
//! provider, falling back to a local password scheme), relays chat messages
//! to an external AI text-generation service, and persists the exchanges.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── main.rs      - server binary entry point
//! ├── server/      - configuration, AppState, app construction
//! ├── routes/      - router assembly and CORS
//! ├── auth/        - identity verification, users, tokens, handlers
//! ├── chat/        - AI exchange, history persistence, conversation buffer
//! ├── middleware/  - bearer authentication middleware
//! └── error/       - ApiError taxonomy and response conversion
//! ```
//!
//! # Authentication
//!
//! Every protected request runs the dual-mode resolution chain: remote
//! verification against the identity provider (with just-in-time user
//! provisioning and account linking), falling back to the locally-signed
//! token scheme. Only failure of both paths is surfaced, as 401.

/// Authentication and user management
pub mod auth;

/// AI chat exchange and history
pub mod chat;

/// API error types
pub mod error;

/// Request-processing middleware
pub mod middleware;

/// Route configuration
pub mod routes;

/// Server setup and configuration
pub mod server;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use error::ApiError;
pub use server::{create_app, AppState};
