use serde::{Deserialize, Serialize};

/// 对话消息
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// 会话的对话状态
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatSession {
    pub messages: Vec<ChatMessage>,
    pub created_at: i64, // Unix timestamp
}
