//! Chat Module
//!
//! This module implements the AI chat exchange: forwarding user messages
//! (with prior-turn context) to the external generation service, persisting
//! completed exchanges, and serving history retrieval and clearing.
//!
//! # Architecture
//!
//! - **`db`** - ChatMessage model and persistence operations
//! - **`memory`** - in-memory per-user conversation buffer
//! - **`generation`** - client for the external generation service
//! - **`handlers`** - HTTP handlers for send, history, and clear
//!
//! The persisted rows are the source of truth for history; the conversation
//! buffer only supplies generation context and dies with the process.

/// ChatMessage model and database operations
pub mod db;

/// External generation-service client
pub mod generation;

/// Chat endpoint handlers
pub mod handlers;

/// In-memory conversation buffer
pub mod memory;

// Re-export commonly used types
pub use db::ChatMessage;
pub use generation::{GenerationClient, GenerationError};
pub use memory::ConversationBuffer;
