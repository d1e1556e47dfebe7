use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::cache::models::credential::StoredCredential;

/// 凭证缓存操作
///
/// 以 OAuth `state` 或会话 ID 为键保存凭证。同一个键的并发写入以最后一次为准。
#[derive(Debug, Default)]
pub struct CredentialStore {
    entries: RwLock<HashMap<String, StoredCredential>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入凭证，已存在时直接覆盖
    pub async fn put(&self, key: &str, credential: StoredCredential) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), credential);
    }

    /// 获取凭证
    pub async fn get(&self, key: &str) -> Option<StoredCredential> {
        self.entries.read().await.get(key).cloned()
    }

    /// 删除凭证，不存在时什么也不做
    pub async fn delete(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    /// 所有键，按字典序排列
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// 将 `source_key` 的凭证复制到 `alias` 下
    ///
    /// 读取和写入在同一把写锁内完成。源键不存在时返回 `false`。
    pub async fn copy_entry(&self, source_key: &str, alias: &str) -> bool {
        let mut entries = self.entries.write().await;
        match entries.get(source_key).cloned() {
            Some(credential) => {
                entries.insert(alias.to_string(), credential);
                true
            }
            None => false,
        }
    }
}
