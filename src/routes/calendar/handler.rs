use axum::extract::{Json, Query, State};

use crate::{AppState, error::AppError};

use super::model::{AUTHORIZATION_REVOKED, EventsQuery, EventsResponse, NOT_AUTHORIZED};

#[axum::debug_handler]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<EventsResponse>, AppError> {
    let Some(credential) = state.registry.credentials.get(&query.user_id).await else {
        return Ok(Json(EventsResponse::error(NOT_AUTHORIZED)));
    };

    match state.calendar.upcoming_events(&credential).await {
        Ok(events) => Ok(Json(EventsResponse::Events { events })),
        Err(e) if e.is_unauthorized() => {
            tracing::warn!("Calendar access rejected for user {}: {}", query.user_id, e);
            Ok(Json(EventsResponse::error(AUTHORIZATION_REVOKED)))
        }
        Err(e) => Err(e.into()),
    }
}
