use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::AppState;

use super::model::{
    AuthStatusQuery, AuthStatusResponse, LinkSessionRequest, LinkSessionResponse, MessageResponse,
};

#[axum::debug_handler]
pub async fn link_session(
    State(state): State<AppState>,
    Json(req): Json<LinkSessionRequest>,
) -> impl IntoResponse {
    let Some(session_id) = req.session_id.filter(|s| !s.is_empty()) else {
        return (
            StatusCode::OK,
            Json(LinkSessionResponse {
                success: false,
                message: "Missing session_id".to_string(),
            }),
        );
    };

    let linked = match req.user_id.as_deref() {
        Some(user_id) => state.registry.link(&session_id, user_id).await,
        None => false,
    };

    let message = if linked {
        "Session linked successfully"
    } else {
        "User not authenticated"
    };

    (
        StatusCode::OK,
        Json(LinkSessionResponse {
            success: linked,
            message: message.to_string(),
        }),
    )
}

/// 未命中会话时会列出注册表中的全部键
#[axum::debug_handler]
pub async fn auth_status(
    State(state): State<AppState>,
    Query(query): Query<AuthStatusQuery>,
) -> impl IntoResponse {
    let session_id = query.session_id.filter(|s| !s.is_empty());
    let status = state.registry.auth_status(session_id.as_deref()).await;
    (StatusCode::OK, Json(AuthStatusResponse::from(status)))
}

#[axum::debug_handler]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    state.registry.delete_session(&session_id).await;
    (
        StatusCode::OK,
        Json(MessageResponse {
            message: "Session reset".to_string(),
        }),
    )
}
