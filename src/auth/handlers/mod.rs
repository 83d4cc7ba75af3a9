//! Authentication HTTP Handlers
//!
//! Handlers for the authentication endpoints.
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports
//! ├── types.rs    - Request/response types
//! ├── register.rs - POST /auth/register
//! ├── login.rs    - POST /auth/login
//! └── me.rs       - GET /auth/me
//! ```

/// Login handler
pub mod login;

/// Current-user handler
pub mod me;

/// Registration handler
pub mod register;

/// Shared request/response types
pub mod types;

// Re-export handlers for route configuration
pub use login::login;
pub use me::me;
pub use register::register;
