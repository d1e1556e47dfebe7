use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::google::ProviderError;

#[derive(Debug)]
pub enum AppError {
    /// 回调参数缺失或授权被拒绝
    BadRequest(String),
    /// 调用 Google 接口失败
    Provider(ProviderError),
    InternalServerError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    code: i32,
    error_message: String,
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::Provider(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Provider(err) => {
                // 服务端返回的原始内容只写日志，不返回给客户端
                tracing::error!("Calendar provider error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Calendar provider error".to_string(),
                )
            }
            AppError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse {
            code: status.as_u16() as i32,
            error_message,
        });

        (status, body).into_response()
    }
}
