use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Request body for the chat-completion endpoint.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
}

impl ChatRequest {
    /// A request holding a single `user` message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            messages: vec![Message {
                role: Role::User,
                content: content.into(),
            }],
        }
    }
}
