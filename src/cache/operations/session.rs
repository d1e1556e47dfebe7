use crate::cache::models::session::AuthStatus;
use crate::cache::operations::chat::ChatStore;
use crate::cache::operations::credential::CredentialStore;

/// 会话注册表
///
/// 进程启动时创建，通过 axum 的 `State` 注入到各个处理函数。
#[derive(Debug, Default)]
pub struct SessionRegistry {
    pub credentials: CredentialStore,
    pub chats: ChatStore,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 将会话 ID 关联到已有凭证
    ///
    /// 源键没有凭证时返回 `false`。重复关联同一对键结果不变。
    pub async fn link(&self, session_id: &str, source_key: &str) -> bool {
        let linked = self.credentials.copy_entry(source_key, session_id).await;
        if linked {
            tracing::debug!("Linked session {} with user {}", session_id, source_key);
        } else {
            tracing::debug!(
                "Refused to link session {}: user {} has no credential",
                session_id,
                source_key
            );
        }
        linked
    }

    /// 删除会话的对话状态和凭证
    ///
    /// 只删除该键本身，指向同一凭证的其他键不受影响。
    pub async fn delete_session(&self, session_id: &str) {
        let had_chat = self.chats.remove(session_id).await;
        let had_credential = self.credentials.delete(session_id).await;
        tracing::info!(
            "Reset session {} (chat: {}, credential: {})",
            session_id,
            had_chat,
            had_credential
        );
    }

    pub async fn auth_status(&self, session_id: Option<&str>) -> AuthStatus {
        if let Some(session_id) = session_id {
            if self.credentials.contains(session_id).await {
                return AuthStatus::Session(session_id.to_string());
            }
        }

        let keys = self.credentials.keys().await;
        if keys.is_empty() {
            AuthStatus::Unauthenticated
        } else {
            AuthStatus::AvailableUsers(keys)
        }
    }
}
