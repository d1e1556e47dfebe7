use thiserror::Error;

/// OAuth 与日历接口调用中的错误
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 凭证无效、过期或被撤销
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("invalid client secrets: {0}")]
    InvalidSecrets(String),
}

impl ProviderError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ProviderError::Unauthorized(_))
    }
}
