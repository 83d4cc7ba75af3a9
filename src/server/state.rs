/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow handlers to extract just the parts
 * of the state they need (`State<SqlitePool>`, `State<TokenConfig>`, ...)
 * without taking the whole `AppState`.
 *
 * # Thread Safety
 *
 * Every field is cheaply cloneable and safe to share across requests:
 * the pool and HTTP clients are handle types, and the conversation buffer
 * carries its own interior locking.
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::auth::identity::IdentityProvider;
use crate::chat::generation::GenerationClient;
use crate::chat::memory::ConversationBuffer;
use crate::server::config::TokenConfig;

/// Central state container for the application
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub pool: SqlitePool,

    /// Local signed-token configuration
    pub tokens: TokenConfig,

    /// External identity provider client
    pub identity: IdentityProvider,

    /// External generation-service client
    pub generation: GenerationClient,

    /// Per-user conversation context for generation calls
    pub conversations: ConversationBuffer,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for TokenConfig {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for IdentityProvider {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.identity.clone()
    }
}

impl FromRef<AppState> for GenerationClient {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.generation.clone()
    }
}

impl FromRef<AppState> for ConversationBuffer {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.conversations.clone()
    }
}
