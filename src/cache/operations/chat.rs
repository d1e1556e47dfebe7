use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::cache::models::chat::{ChatMessage, ChatSession};

/// 对话状态缓存操作
#[derive(Debug, Default)]
pub struct ChatStore {
    sessions: RwLock<HashMap<String, ChatSession>>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加消息，会话不存在时自动创建
    pub async fn append(&self, session_id: &str, message: ChatMessage) {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| ChatSession {
                messages: Vec::new(),
                created_at: chrono::Utc::now().timestamp(),
            })
            .messages
            .push(message);
    }

    pub async fn history(&self, session_id: &str) -> Vec<ChatMessage> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .map(|session| session.messages.clone())
            .unwrap_or_default()
    }

    pub async fn remove(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }
}
