use axum::{
    extract::{Query, State},
    response::Response,
};

use crate::{AppState, error::AppError, utils::ui_redirect_url};

use crate::routes::found;
use super::model::CallbackParams;

#[axum::debug_handler]
pub async fn authorize(State(state): State<AppState>) -> Result<Response, AppError> {
    let auth_state = state.oauth.new_state();
    let auth_url = state.oauth.authorization_url(&auth_state)?;
    tracing::info!("Starting authorization with state {}", auth_state);
    Ok(found(&auth_url))
}

#[axum::debug_handler]
pub async fn oauth2callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Response, AppError> {
    if let Some(error) = params.error {
        tracing::warn!("Authorization denied by provider: {}", error);
        return Err(AppError::BadRequest(format!("Authorization failed: {}", error)));
    }

    let auth_state = params.state.filter(|s| !s.is_empty());
    let code = params.code.filter(|c| !c.is_empty());
    let (Some(auth_state), Some(code)) = (auth_state, code) else {
        return Err(AppError::BadRequest(
            "Missing state or code in callback".to_string(),
        ));
    };

    // 跳转地址和换取凭证都成功后才写入注册表
    let target =
        ui_redirect_url(&state.config.ui_url, &auth_state).map_err(AppError::InternalServerError)?;
    let credential = state.oauth.exchange_code(&code).await?;
    state.registry.credentials.put(&auth_state, credential).await;
    tracing::info!("Stored credential for user {}", auth_state);

    Ok(found(&target))
}
