//! OAuth 2.0 授权码流程
//!
//! 生成授权地址、用授权码换取凭证，以及在凭证过期时用刷新令牌续期。

use chrono::{Duration, Utc};
use futures_util::future::BoxFuture;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info};

use crate::cache::StoredCredential;
use crate::config::Config;

use super::error::ProviderError;
use super::secrets::ClientSecrets;

/// 授权流程适配器
pub trait AuthorizationFlow: Send + Sync {
    /// 生成一次性的 state，同时作为新凭证在注册表中的键
    fn new_state(&self) -> String;

    fn authorization_url(&self, state: &str) -> Result<String, ProviderError>;

    fn exchange_code<'a>(
        &'a self,
        code: &'a str,
    ) -> BoxFuture<'a, Result<StoredCredential, ProviderError>>;
}

/// Google 授权码流程
#[derive(Debug, Clone)]
pub struct GoogleOAuth {
    secrets: ClientSecrets,
    scopes: Vec<String>,
    redirect_uri: String,
    http: reqwest::Client,
}

/// 令牌端点的响应
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    scope: Option<String>,
}

impl GoogleOAuth {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            secrets: config.client_secrets.clone(),
            scopes: config.scopes.clone(),
            redirect_uri: config.redirect_uri.clone(),
            http,
        }
    }

    async fn exchange(&self, code: &str) -> Result<StoredCredential, ProviderError> {
        let params = [
            ("client_id", self.secrets.client_id.as_str()),
            ("client_secret", self.secrets.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let token = request_token(&self.http, &self.secrets.token_uri, &params).await?;
        info!("Exchanged authorization code for tokens");

        Ok(StoredCredential {
            token: token.access_token,
            refresh_token: token.refresh_token,
            token_uri: self.secrets.token_uri.clone(),
            client_id: self.secrets.client_id.clone(),
            client_secret: self.secrets.client_secret.clone(),
            scopes: granted_scopes(token.scope.as_deref(), &self.scopes),
            expiry: token
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
        })
    }
}

impl AuthorizationFlow for GoogleOAuth {
    fn new_state(&self) -> String {
        crate::utils::new_state_token()
    }

    fn authorization_url(&self, state: &str) -> Result<String, ProviderError> {
        let scope = self.scopes.join(" ");
        let url = Url::parse_with_params(
            &self.secrets.auth_uri,
            &[
                ("response_type", "code"),
                ("client_id", self.secrets.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", scope.as_str()),
                ("state", state),
                ("access_type", "offline"),
                ("include_granted_scopes", "true"),
            ],
        )
        .map_err(|e| ProviderError::InvalidSecrets(e.to_string()))?;

        debug!("Authorization URL: {}", url);
        Ok(url.into())
    }

    fn exchange_code<'a>(
        &'a self,
        code: &'a str,
    ) -> BoxFuture<'a, Result<StoredCredential, ProviderError>> {
        Box::pin(self.exchange(code))
    }
}

/// 用刷新令牌换取新的访问令牌
///
/// 服务端没有返回新的刷新令牌时沿用旧的。
pub async fn refresh_credential(
    http: &reqwest::Client,
    credential: &StoredCredential,
) -> Result<StoredCredential, ProviderError> {
    let refresh_token = credential
        .refresh_token
        .as_deref()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ProviderError::Unauthorized("credential has no refresh token".into()))?;

    let params = [
        ("client_id", credential.client_id.as_str()),
        ("client_secret", credential.client_secret.as_str()),
        ("refresh_token", refresh_token),
        ("grant_type", "refresh_token"),
    ];

    let token = request_token(http, &credential.token_uri, &params).await?;
    info!("Refreshed access token");

    Ok(StoredCredential {
        token: token.access_token,
        refresh_token: token
            .refresh_token
            .filter(|token| !token.is_empty())
            .or_else(|| credential.refresh_token.clone()),
        token_uri: credential.token_uri.clone(),
        client_id: credential.client_id.clone(),
        client_secret: credential.client_secret.clone(),
        scopes: granted_scopes(token.scope.as_deref(), &credential.scopes),
        expiry: token
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs)),
    })
}

async fn request_token(
    http: &reqwest::Client,
    token_uri: &str,
    params: &[(&str, &str)],
) -> Result<TokenResponse, ProviderError> {
    let response = http.post(token_uri).form(params).send().await?;

    let status = response.status();
    let body = response.text().await?;

    // invalid_grant 等错误以 400/401 返回
    if status == reqwest::StatusCode::BAD_REQUEST || status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ProviderError::Unauthorized(format!(
            "token endpoint rejected the grant ({}): {}",
            status, body
        )));
    }
    if !status.is_success() {
        return Err(ProviderError::Api {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body)
        .map_err(|e| ProviderError::InvalidResponse(format!("invalid token response: {}", e)))
}

fn granted_scopes(granted: Option<&str>, requested: &[String]) -> Vec<String> {
    match granted {
        Some(scope) if !scope.trim().is_empty() => {
            scope.split_whitespace().map(str::to_string).collect()
        }
        _ => requested.to_vec(),
    }
}
