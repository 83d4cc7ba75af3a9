//! Routes Module
//!
//! HTTP route configuration and router assembly.

/// Router assembly and CORS
pub mod router;

pub use router::create_router;
