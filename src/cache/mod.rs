// 缓存模块
// 包含会话注册表的数据结构和操作逻辑

pub mod models;
pub mod operations;

// 重新导出常用类型，方便其他模块使用
pub use models::chat::ChatMessage;
pub use models::credential::StoredCredential;
pub use models::session::AuthStatus;
pub use operations::{ChatStore, CredentialStore, SessionRegistry};
