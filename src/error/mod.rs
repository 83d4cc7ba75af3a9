//! Error Types
//!
//! This module defines the error type shared by all HTTP handlers and its
//! conversion into JSON error responses.
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - ApiError and status mapping
//! └── conversion.rs - IntoResponse implementation
//! ```

/// Error type and status mapping
pub mod types;

/// HTTP response conversion
pub mod conversion;

pub use types::ApiError;
