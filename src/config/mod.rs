use std::env;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::google::ClientSecrets;

const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
const DEFAULT_SERVER_PORT: u16 = 8000;
const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000/oauth2callback";
const DEFAULT_UI_URL: &str = "http://localhost:8501/";
const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/calendar";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid client secret document: {0}")]
    InvalidSecret(String),
    #[error("invalid URL in {var}: {value}")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub client_secrets: ClientSecrets,
    pub server_host: String,
    pub server_port: u16,
    pub redirect_uri: String,
    pub ui_url: String,
    pub scopes: Vec<String>,
    pub http_timeout_secs: u64,
    pub calendar_api_base: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        // 客户端密钥直接在内存中解析，不落盘
        let client_secrets = client_secrets_from(env::var("GOOGLE_OAUTH_CREDENTIALS").ok())?;
        tracing::info!("Loaded OAuth client {}", client_secrets.client_id);

        Ok(Config {
            client_secrets,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.into()),
            server_port: parse_or("SERVER_PORT", DEFAULT_SERVER_PORT),
            redirect_uri: url_or(
                "OAUTH_REDIRECT_URI",
                env::var("OAUTH_REDIRECT_URI").ok(),
                DEFAULT_REDIRECT_URI,
            )?,
            ui_url: url_or("UI_URL", env::var("UI_URL").ok(), DEFAULT_UI_URL)?,
            scopes: parse_scopes(env::var("OAUTH_SCOPES").ok().as_deref()),
            http_timeout_secs: parse_or("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
            calendar_api_base: env::var("CALENDAR_API_BASE")
                .unwrap_or_else(|_| DEFAULT_CALENDAR_API_BASE.into()),
        })
    }

    /// 测试与嵌入场景使用的默认配置
    pub fn with_secrets(client_secrets: ClientSecrets) -> Self {
        Config {
            client_secrets,
            server_host: DEFAULT_SERVER_HOST.into(),
            server_port: DEFAULT_SERVER_PORT,
            redirect_uri: DEFAULT_REDIRECT_URI.into(),
            ui_url: DEFAULT_UI_URL.into(),
            scopes: vec![DEFAULT_SCOPE.into()],
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            calendar_api_base: DEFAULT_CALENDAR_API_BASE.into(),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn client_secrets_from(raw: Option<String>) -> Result<ClientSecrets, ConfigError> {
    let raw = raw.ok_or(ConfigError::Missing("GOOGLE_OAUTH_CREDENTIALS"))?;
    ClientSecrets::from_json(&raw).map_err(|e| ConfigError::InvalidSecret(e.to_string()))
}

fn url_or(var: &'static str, raw: Option<String>, default: &str) -> Result<String, ConfigError> {
    let value = raw.unwrap_or_else(|| default.to_string());
    match Url::parse(&value) {
        Ok(_) => Ok(value),
        Err(_) => Err(ConfigError::InvalidUrl { var, value }),
    }
}

fn parse_or<T: FromStr>(var: &str, default: T) -> T {
    parse_value(var, env::var(var).ok().as_deref(), default)
}

fn parse_value<T: FromStr>(var: &str, raw: Option<&str>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {}={:?}, falling back to default", var, value);
            default
        }),
        None => default,
    }
}

fn parse_scopes(raw: Option<&str>) -> Vec<String> {
    let scopes: Vec<String> = raw
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if scopes.is_empty() {
        vec![DEFAULT_SCOPE.to_string()]
    } else {
        scopes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes_default_when_unset_or_blank() {
        assert_eq!(parse_scopes(None), vec![DEFAULT_SCOPE.to_string()]);
        assert_eq!(parse_scopes(Some("   ")), vec![DEFAULT_SCOPE.to_string()]);
    }

    #[test]
    fn scopes_split_on_whitespace() {
        let scopes = parse_scopes(Some("a  b\tc"));
        assert_eq!(scopes, vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_secret_is_fatal() {
        assert!(matches!(
            client_secrets_from(None),
            Err(ConfigError::Missing("GOOGLE_OAUTH_CREDENTIALS"))
        ));
    }

    #[test]
    fn unparsable_secret_is_fatal() {
        assert!(matches!(
            client_secrets_from(Some("{not json".into())),
            Err(ConfigError::InvalidSecret(_))
        ));
        assert!(matches!(
            client_secrets_from(Some(r#"{"web": {}}"#.into())),
            Err(ConfigError::InvalidSecret(_))
        ));
    }

    #[test]
    fn valid_secret_is_parsed() {
        let secrets =
            client_secrets_from(Some(r#"{"web": {"client_id": "a", "client_secret": "b"}}"#.into()))
                .unwrap();
        assert_eq!(secrets.client_id, "a");
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        assert_eq!(parse_value("SERVER_PORT", Some("eighty"), DEFAULT_SERVER_PORT), 8000);
        assert_eq!(parse_value("SERVER_PORT", Some("70000"), DEFAULT_SERVER_PORT), 8000);
        assert_eq!(parse_value("SERVER_PORT", Some(" 9000 "), DEFAULT_SERVER_PORT), 9000);
        assert_eq!(
            parse_value("HTTP_TIMEOUT_SECS", Some("-1"), DEFAULT_HTTP_TIMEOUT_SECS),
            30
        );
        assert_eq!(parse_value("HTTP_TIMEOUT_SECS", None, DEFAULT_HTTP_TIMEOUT_SECS), 30);
    }

    #[test]
    fn unset_variable_uses_default() {
        let port: u16 = parse_or("CALENDAR_BACKEND_UNSET_PORT_FOR_TESTS", 4321);
        assert_eq!(port, 4321);
    }

    #[test]
    fn urls_are_validated() {
        assert_eq!(
            url_or("UI_URL", None, DEFAULT_UI_URL).unwrap(),
            "http://localhost:8501/"
        );
        assert_eq!(
            url_or("UI_URL", Some("https://ui.example.com/app".into()), DEFAULT_UI_URL).unwrap(),
            "https://ui.example.com/app"
        );
        assert!(matches!(
            url_or("OAUTH_REDIRECT_URI", Some("localhost:8000 callback".into()), DEFAULT_REDIRECT_URI),
            Err(ConfigError::InvalidUrl { var: "OAUTH_REDIRECT_URI", .. })
        ));
    }

    #[test]
    fn with_secrets_uses_local_defaults() {
        let config = Config::with_secrets(ClientSecrets::new("id", "secret"));
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.redirect_uri, "http://localhost:8000/oauth2callback");
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
    }
}
