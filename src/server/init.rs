/**
 * Server Initialization
 *
 * This module wires configuration into application state and builds the
 * router.
 *
 * # Initialization Process
 *
 * 1. Create the database pool and run migrations
 * 2. Load token, identity-provider, and generation configuration
 * 3. Assemble `AppState` and the router
 *
 * Missing external-service credentials are logged and leave that service
 * disabled; a database failure aborts startup.
 */

use axum::Router;

use crate::auth::identity::IdentityProvider;
use crate::chat::generation::GenerationClient;
use crate::chat::memory::ConversationBuffer;
use crate::routes::router::create_router;
use crate::server::config::{load_database, TokenConfig};
use crate::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Returns an error if the database pool cannot be created or migrations
/// fail.
pub async fn create_app() -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing resrv backend server");

    let pool = load_database().await?;

    let app_state = AppState {
        pool,
        tokens: TokenConfig::from_env(),
        identity: IdentityProvider::from_env(),
        generation: GenerationClient::from_env(),
        conversations: ConversationBuffer::new(),
    };

    tracing::info!("Application state initialized");

    Ok(create_router(app_state))
}
