use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;

use crate::api_models::room_type::{RoomTypesParams, RoomTypesResponse};
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::handler::request::{bearer_token, required};
use crate::services::room_types::fetch_room_types;

pub async fn list_room_types(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<RoomTypesParams>,
) -> Result<Json<RoomTypesResponse>, AppError> {
    let property_id = required(params.property_id)
        .ok_or_else(|| AppError::BadRequest("propertyID is required".to_string()))?;
    let token = bearer_token(&headers)?;

    let room_types = fetch_room_types(state.pms.as_ref(), &token, &property_id).await;
    Ok(Json(RoomTypesResponse {
        success: true,
        room_types,
    }))
}
