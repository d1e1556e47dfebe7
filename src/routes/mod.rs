use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub mod auth;
pub mod calendar;
pub mod session;

#[derive(Serialize)]
pub struct HomeResponse {
    pub message: String,
}

pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Welcome to the Google Calendar Booking API".to_string(),
    })
}

/// 302 跳转
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
