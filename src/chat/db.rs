/**
 * Chat Message Persistence
 *
 * This module handles the persisted chat exchanges. One row is written per
 * successful exchange; rows are removed only by the explicit bulk clear.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// One persisted chat exchange
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatMessage {
    /// Unique message ID (autoincrement)
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Text the user sent
    pub user_message: String,
    /// Text the generation service replied with
    pub ai_response: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Persist one chat exchange
pub async fn save_exchange(
    pool: &SqlitePool,
    user_id: i64,
    user_message: &str,
    ai_response: &str,
) -> Result<ChatMessage, sqlx::Error> {
    let now = Utc::now();

    let message = sqlx::query_as::<_, ChatMessage>(
        r#"
        INSERT INTO chat_messages (user_id, user_message, ai_response, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, user_id, user_message, ai_response, created_at
        "#,
    )
    .bind(user_id)
    .bind(user_message)
    .bind(ai_response)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(message)
}

/// Most recent exchanges for a user, newest first
///
/// `id` breaks ties so same-timestamp rows keep insertion order.
pub async fn recent_messages(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
) -> Result<Vec<ChatMessage>, sqlx::Error> {
    let messages = sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, user_id, user_message, ai_response, created_at
        FROM chat_messages
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Delete all exchanges for a user, returning how many were removed
pub async fn delete_messages(pool: &SqlitePool, user_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM chat_messages
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
