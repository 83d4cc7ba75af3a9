/**
 * Clear History Handler
 *
 * Implements DELETE /chat/history. The database rows are removed first,
 * then the in-memory buffer: the rows are authoritative, so a failure
 * between the two at worst leaves stale context until restart.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::chat::db::delete_messages;
use crate::chat::handlers::types::ClearResponse;
use crate::chat::memory::ConversationBuffer;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Clear-history handler
///
/// Deletes all persisted exchanges for the authenticated user and empties
/// their conversation buffer.
pub async fn clear_history(
    State(pool): State<SqlitePool>,
    State(conversations): State<ConversationBuffer>,
    AuthUser(user): AuthUser,
) -> Result<Json<ClearResponse>, ApiError> {
    let removed = delete_messages(&pool, user.id).await?;
    conversations.clear(user.id);

    tracing::info!("Cleared {} chat messages for user {}", removed, user.id);

    Ok(Json(ClearResponse {
        message: "Chat history cleared".to_string(),
    }))
}
