//! # Chat
//!
//! Outbound replies to players.

/// Delivers a reply to one player.
pub trait ChatSink {
    /// Sends `message` to the player identified by `user_id`.
    fn send_reply(&mut self, user_id: &str, message: &str);
}

/// A chat sink that keeps every reply in memory.
#[derive(Clone, Debug, Default)]
pub struct ChatLog {
    messages: Vec<(String, String)>,
}

impl ChatLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All replies as `(user_id, message)`, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[(String, String)] {
        &self.messages
    }

    /// Replies sent to one player, oldest first.
    #[must_use]
    pub fn messages_for(&self, user_id: &str) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(to, _)| to == user_id)
            .map(|(_, message)| message.as_str())
            .collect()
    }

    /// Forgets every reply.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl ChatSink for ChatLog {
    fn send_reply(&mut self, user_id: &str, message: &str) {
        self.messages.push((user_id.to_string(), message.to_string()));
    }
}
