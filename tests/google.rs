use std::collections::HashMap;
use std::net::SocketAddr;

use axum::{
    Form, Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use calendar_backend::{
    cache::StoredCredential,
    config::Config,
    google::{
        AuthorizationFlow, CalendarApi, ClientSecrets, GoogleCalendar, GoogleOAuth,
        UPCOMING_EVENT_LIMIT, refresh_credential,
    },
};
use chrono::{Duration, Utc};
use serde_json::json;

/// 模拟 Google 的令牌端点
async fn token(Form(form): Form<HashMap<String, String>>) -> Response {
    match (form["grant_type"].as_str(), form.get("code").map(String::as_str)) {
        ("authorization_code", Some("good")) => Json(json!({
            "access_token": "a1",
            "refresh_token": "r1",
            "expires_in": 3600,
            "scope": "https://www.googleapis.com/auth/calendar",
            "token_type": "Bearer"
        }))
        .into_response(),
        ("refresh_token", _) if form["refresh_token"] == "r1" => Json(json!({
            "access_token": "a2",
            "expires_in": 3600,
            "token_type": "Bearer"
        }))
        .into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant"})),
        )
            .into_response(),
    }
}

/// 模拟日历事件接口，把收到的查询参数放在第一个事件里
async fn events(headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Response {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if auth != "Bearer a1" && auth != "Bearer a2" {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid"}))).into_response();
    }

    let mut items = vec![json!({"id": "e0", "query": query, "auth": auth})];
    items.extend((1..7).map(|i| json!({"id": format!("e{}", i)})));
    Json(json!({"kind": "calendar#events", "items": items})).into_response()
}

async fn spawn_fake_google() -> SocketAddr {
    let app = Router::new()
        .route("/token", post(token))
        .route("/calendar/v3/calendars/primary/events", get(events));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config_for(addr: SocketAddr) -> Config {
    let secrets = ClientSecrets {
        client_id: "client".into(),
        client_secret: "secret".into(),
        auth_uri: format!("http://{}/auth", addr),
        token_uri: format!("http://{}/token", addr),
    };
    let mut config = Config::with_secrets(secrets);
    config.calendar_api_base = format!("http://{}/calendar/v3", addr);
    config
}

fn credential(addr: SocketAddr, token: &str, refresh: Option<&str>) -> StoredCredential {
    StoredCredential {
        token: token.into(),
        refresh_token: refresh.map(str::to_string),
        token_uri: format!("http://{}/token", addr),
        client_id: "client".into(),
        client_secret: "secret".into(),
        scopes: Vec::new(),
        expiry: Some(Utc::now() - Duration::minutes(5)),
    }
}

#[tokio::test]
async fn exchange_code_builds_credential() {
    let addr = spawn_fake_google().await;
    let oauth = GoogleOAuth::new(&config_for(addr), reqwest::Client::new());

    let cred = oauth.exchange_code("good").await.unwrap();

    assert_eq!(cred.token, "a1");
    assert_eq!(cred.refresh_token.as_deref(), Some("r1"));
    assert_eq!(cred.token_uri, format!("http://{}/token", addr));
    assert_eq!(cred.scopes, vec!["https://www.googleapis.com/auth/calendar"]);
    assert!(cred.expiry.unwrap() > Utc::now() + Duration::minutes(50));
}

#[tokio::test]
async fn rejected_code_is_unauthorized() {
    let addr = spawn_fake_google().await;
    let oauth = GoogleOAuth::new(&config_for(addr), reqwest::Client::new());

    let err = oauth.exchange_code("stale").await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn refresh_keeps_existing_refresh_token() {
    let addr = spawn_fake_google().await;
    let http = reqwest::Client::new();

    let refreshed = refresh_credential(&http, &credential(addr, "stale", Some("r1")))
        .await
        .unwrap();

    assert_eq!(refreshed.token, "a2");
    assert_eq!(refreshed.refresh_token.as_deref(), Some("r1"));
    assert!(!refreshed.is_expired());
}

#[tokio::test]
async fn lists_five_upcoming_events_from_primary() {
    let addr = spawn_fake_google().await;
    let config = config_for(addr);
    let calendar = GoogleCalendar::new(config.calendar_api_base, reqwest::Client::new());
    let mut cred = credential(addr, "a1", None);
    cred.expiry = None;

    let events = calendar.upcoming_events(&cred).await.unwrap();

    assert_eq!(events.len(), UPCOMING_EVENT_LIMIT);
    let query = &events[0]["query"];
    assert_eq!(query["maxResults"], "5");
    assert_eq!(query["singleEvents"], "true");
    assert_eq!(query["orderBy"], "startTime");
    assert!(query["timeMin"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn expired_credential_is_refreshed_before_listing() {
    let addr = spawn_fake_google().await;
    let config = config_for(addr);
    let calendar = GoogleCalendar::new(config.calendar_api_base, reqwest::Client::new());

    let events = calendar
        .upcoming_events(&credential(addr, "stale", Some("r1")))
        .await
        .unwrap();

    assert_eq!(events[0]["auth"], "Bearer a2");
}

#[tokio::test]
async fn invalid_token_without_refresh_is_unauthorized() {
    let addr = spawn_fake_google().await;
    let config = config_for(addr);
    let calendar = GoogleCalendar::new(config.calendar_api_base, reqwest::Client::new());

    let err = calendar
        .upcoming_events(&credential(addr, "stale", None))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn rejected_token_is_refreshed_and_retried_once() {
    let addr = spawn_fake_google().await;
    let config = config_for(addr);
    let calendar = GoogleCalendar::new(config.calendar_api_base, reqwest::Client::new());
    let mut cred = credential(addr, "revoked-early", Some("r1"));
    cred.expiry = None;

    let events = calendar.upcoming_events(&cred).await.unwrap();

    assert_eq!(events.len(), UPCOMING_EVENT_LIMIT);
    assert_eq!(events[0]["auth"], "Bearer a2");
}

#[tokio::test]
async fn rejected_token_with_revoked_refresh_token_is_unauthorized() {
    let addr = spawn_fake_google().await;
    let config = config_for(addr);
    let calendar = GoogleCalendar::new(config.calendar_api_base, reqwest::Client::new());
    let mut cred = credential(addr, "revoked-early", Some("r-revoked"));
    cred.expiry = None;

    let err = calendar.upcoming_events(&cred).await.unwrap_err();

    assert!(err.is_unauthorized());
}
