/**
 * Chat History Handler
 *
 * Implements GET /chat/history. Rows are fetched most-recent-first so the
 * limit keeps the latest exchanges, then reversed to chronological order
 * for the response.
 */

use axum::{
    extract::{Query, State},
    response::Json,
};
use sqlx::SqlitePool;

use crate::chat::db::recent_messages;
use crate::chat::handlers::types::{HistoryItem, HistoryQuery};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// History retrieval handler
///
/// Returns the authenticated user's persisted exchanges in chronological
/// order, bounded by the `limit` query parameter (default 50).
pub async fn get_history(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryItem>>, ApiError> {
    let mut messages = recent_messages(&pool, user.id, query.limit).await?;
    messages.reverse();

    Ok(Json(messages.into_iter().map(HistoryItem::from).collect()))
}
