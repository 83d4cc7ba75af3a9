/**
 * In-Memory Conversation Buffer
 *
 * This module owns the per-user turn history handed to the generation
 * service as context. The buffer is a derived cache with process lifetime:
 * the persisted chat rows are authoritative, and losing the buffer on
 * restart only loses conversational context, never data.
 *
 * Handlers go through the `ConversationBuffer` methods and never touch the
 * map directly, so the buffer could be swapped for a durable store without
 * changing handler logic.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The human user
    User,
    /// The generation model
    Model,
}

impl Role {
    /// Wire name used by the generation provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One prior turn of a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// Per-user conversation history, keyed by user id
///
/// Shared mutable state across concurrent requests. Concurrent exchanges
/// from the same user may interleave; conversational context loss under
/// races is accepted.
#[derive(Clone, Default)]
pub struct ConversationBuffer {
    turns: Arc<Mutex<HashMap<i64, Vec<Turn>>>>,
}

impl ConversationBuffer {
    pub fn new() -> Self {
        Self {
            turns: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Prior turns for a user, oldest first; empty if none
    pub fn history(&self, user_id: i64) -> Vec<Turn> {
        self.turns
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Append one user/model turn pair to a user's history
    pub fn append_exchange(&self, user_id: i64, user_text: &str, model_text: &str) {
        let mut turns = self.turns.lock().unwrap();
        let history = turns.entry(user_id).or_default();
        history.push(Turn {
            role: Role::User,
            text: user_text.to_string(),
        });
        history.push(Turn {
            role: Role::Model,
            text: model_text.to_string(),
        });
    }

    /// Drop a user's history
    pub fn clear(&self, user_id: i64) {
        self.turns.lock().unwrap().remove(&user_id);
    }
}
