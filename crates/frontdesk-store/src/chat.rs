//! Chat message queries and mutations.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{ChatMessage, NewChatMessage};
use crate::store::Store;

impl Store {
    /// Messages for one concern in conversational order (oldest first) —
    /// the one collection that is not reverse-chronological.
    pub async fn chat_messages(&self, concern_id: Uuid) -> Vec<ChatMessage> {
        let tables = self.tables().await;
        let mut messages: Vec<ChatMessage> = tables
            .chat_messages
            .values()
            .filter(|msg| msg.concern_id == concern_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        messages
    }

    /// Insert a new chat message with a fresh id and creation timestamp.
    pub async fn create_chat_message(&self, new: NewChatMessage) -> ChatMessage {
        let message = ChatMessage {
            id: Uuid::new_v4(),
            concern_id: new.concern_id,
            sender: new.sender,
            message: new.message,
            created_at: Utc::now(),
        };
        self.tables_mut()
            .await
            .chat_messages
            .insert(message.id, message.clone());
        message
    }
}
