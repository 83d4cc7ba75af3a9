//! Chat HTTP Handlers
//!
//! Handlers for the chat endpoints. All of them require the authenticated
//! user attached by the authentication middleware.
//!
//! ```text
//! handlers/
//! ├── mod.rs     - Module exports
//! ├── types.rs   - Request/response types
//! ├── send.rs    - POST /chat/send
//! ├── history.rs - GET /chat/history
//! └── clear.rs   - DELETE /chat/history
//! ```

/// Clear-history handler
pub mod clear;

/// History retrieval handler
pub mod history;

/// Send-message handler
pub mod send;

/// Shared request/response types
pub mod types;

// Re-export handlers for route configuration
pub use clear::clear_history;
pub use history::get_history;
pub use send::send_message;
