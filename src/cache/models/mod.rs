// 缓存数据模型

pub mod chat;
pub mod credential;
pub mod session;
