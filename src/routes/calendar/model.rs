use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NOT_AUTHORIZED: &str = "User not authorized. Go to /auth to connect.";
pub const AUTHORIZATION_REVOKED: &str =
    "Authorization expired or revoked. Go to /auth to reconnect.";

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub user_id: String,
}

/// 未授权时同样返回 200，错误信息放在 `error` 字段
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EventsResponse {
    Events { events: Vec<Value> },
    Error { error: String },
}

impl EventsResponse {
    pub fn error(message: &str) -> Self {
        EventsResponse::Error {
            error: message.to_string(),
        }
    }
}
