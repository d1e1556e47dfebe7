use reqwest::Url;
use serde::Deserialize;

use super::error::ProviderError;

const GOOGLE_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// OAuth 客户端密钥
#[derive(Debug, Clone)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
}

/// Google Cloud Console 下载的密钥文件，`web`/`installed` 两种嵌套格式或扁平格式
#[derive(Debug, Deserialize)]
struct SecretsDocument {
    web: Option<SecretsSection>,
    installed: Option<SecretsSection>,
    #[serde(flatten)]
    flat: Option<SecretsSection>,
}

#[derive(Debug, Deserialize)]
struct SecretsSection {
    client_id: String,
    client_secret: String,
    auth_uri: Option<String>,
    token_uri: Option<String>,
}

impl ClientSecrets {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_uri: GOOGLE_AUTH_URI.to_string(),
            token_uri: GOOGLE_TOKEN_URI.to_string(),
        }
    }

    /// 从环境变量中的 JSON 文本解析密钥
    pub fn from_json(json: &str) -> Result<Self, ProviderError> {
        let document: SecretsDocument = serde_json::from_str(json)
            .map_err(|e| ProviderError::InvalidSecrets(e.to_string()))?;

        let section = document
            .web
            .or(document.installed)
            .or(document.flat)
            .ok_or_else(|| {
                ProviderError::InvalidSecrets(
                    "expected a 'web' or 'installed' section, or client_id/client_secret at the root"
                        .into(),
                )
            })?;

        if section.client_id.is_empty() || section.client_secret.is_empty() {
            return Err(ProviderError::InvalidSecrets(
                "client_id and client_secret must not be empty".into(),
            ));
        }

        let secrets = Self {
            client_id: section.client_id,
            client_secret: section.client_secret,
            auth_uri: section.auth_uri.unwrap_or_else(|| GOOGLE_AUTH_URI.into()),
            token_uri: section.token_uri.unwrap_or_else(|| GOOGLE_TOKEN_URI.into()),
        };

        for uri in [&secrets.auth_uri, &secrets.token_uri] {
            Url::parse(uri)
                .map_err(|e| ProviderError::InvalidSecrets(format!("{}: {}", uri, e)))?;
        }

        Ok(secrets)
    }
}
