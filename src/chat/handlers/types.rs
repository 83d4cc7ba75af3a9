/**
 * Chat Handler Types
 *
 * Request and response types shared by the send, history, and clear
 * handlers.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::db::ChatMessage;

/// Send-message request
#[derive(Deserialize, Serialize, Debug)]
pub struct SendRequest {
    pub message: String,
}

/// Completed exchange returned from the send handler
#[derive(Serialize, Debug)]
pub struct SendResponse {
    /// The message as the user sent it
    pub user_message: String,
    /// The generated reply
    pub ai_response: String,
    /// When the exchange was persisted
    pub timestamp: DateTime<Utc>,
}

/// Query parameters for history retrieval
#[derive(Deserialize, Debug)]
pub struct HistoryQuery {
    /// Maximum number of exchanges to return
    #[serde(default = "default_history_limit")]
    pub limit: i64,
}

fn default_history_limit() -> i64 {
    50
}

/// One exchange in a history response
#[derive(Serialize, Deserialize, Debug)]
pub struct HistoryItem {
    pub id: i64,
    pub user_message: String,
    pub ai_response: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for HistoryItem {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            user_message: message.user_message,
            ai_response: message.ai_response,
            created_at: message.created_at,
        }
    }
}

/// Confirmation returned from the clear handler
#[derive(Serialize, Debug)]
pub struct ClearResponse {
    pub message: String,
}
