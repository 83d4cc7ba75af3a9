/**
 * Send Message Handler
 *
 * Implements POST /chat/send.
 *
 * # Exchange Flow
 *
 * 1. Reject empty or whitespace-only input before anything else
 * 2. Collect the user's prior turns from the conversation buffer
 * 3. Forward the history plus the new message to the generation service
 * 4. Append the new turn pair to the buffer and persist the exchange
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::chat::db::save_exchange;
use crate::chat::generation::GenerationClient;
use crate::chat::handlers::types::{SendRequest, SendResponse};
use crate::chat::memory::ConversationBuffer;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Send-message handler
///
/// # Errors
///
/// * `400 Bad Request` - empty or whitespace-only message
/// * `500 Internal Server Error` - generation service unconfigured or
///   failed (the provider's reason is passed through), or database failure
pub async fn send_message(
    State(pool): State<SqlitePool>,
    State(generation): State<GenerationClient>,
    State(conversations): State<ConversationBuffer>,
    AuthUser(user): AuthUser,
    Json(request): Json<SendRequest>,
) -> Result<Json<SendResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::validation("Message must not be empty"));
    }

    tracing::info!("Chat message from user {}", user.id);

    let history = conversations.history(user.id);
    let ai_response = generation.generate(&history, &request.message).await?;

    conversations.append_exchange(user.id, &request.message, &ai_response);
    let saved = save_exchange(&pool, user.id, &request.message, &ai_response).await?;

    Ok(Json(SendResponse {
        user_message: saved.user_message,
        ai_response: saved.ai_response,
        timestamp: saved.created_at,
    }))
}
