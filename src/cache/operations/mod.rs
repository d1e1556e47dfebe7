// 缓存操作
// 提供进程内注册表的操作实现

pub mod chat;
pub mod credential;
pub mod session;

pub use chat::ChatStore;
pub use credential::CredentialStore;
pub use session::SessionRegistry;
