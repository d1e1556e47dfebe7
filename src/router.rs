use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;

use crate::{AppState, middleware::log_errors, routes};

// 授权相关的路由
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth", get(routes::auth::authorize))
        .route("/oauth2callback", get(routes::auth::oauth2callback))
}

// 会话相关的路由
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/link_session", post(routes::session::link_session))
        .route("/auth_status", get(routes::session::auth_status))
        .route("/session/{session_id}", delete(routes::session::delete_session))
}

// 日历相关的路由
pub fn calendar_routes() -> Router<AppState> {
    Router::new().route("/calendar/events", get(routes::calendar::list_events))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .merge(auth_routes())
        .merge(session_routes())
        .merge(calendar_routes())
        .layer(axum::middleware::from_fn(log_errors))
        // 前端与后端不同源，允许所有来源
        .layer(CorsLayer::permissive())
        .with_state(state)
}
