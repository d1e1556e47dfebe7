use serde::{Deserialize, Serialize};

use crate::cache::AuthStatus;

#[derive(Debug, Deserialize)]
pub struct LinkSessionRequest {
    pub session_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LinkSessionResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthStatusQuery {
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_users: Option<Vec<String>>,
}

impl From<AuthStatus> for AuthStatusResponse {
    fn from(status: AuthStatus) -> Self {
        match status {
            AuthStatus::Session(session_id) => Self {
                authenticated: true,
                session_id: Some(session_id),
                available_users: None,
            },
            AuthStatus::AvailableUsers(users) => Self {
                authenticated: true,
                session_id: None,
                available_users: Some(users),
            },
            AuthStatus::Unauthenticated => Self {
                authenticated: false,
                session_id: None,
                available_users: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
