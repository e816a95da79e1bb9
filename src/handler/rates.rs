use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;

use crate::api_models::rate::{RateParams, RateResponse, RatesBatchParams, RatesBatchResponse};
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::handler::request::{bearer_token, parse_date, required};
use crate::services::rate_reader::{fetch_rates_batch, lookup_rate, RateLookup};

/// 单日价格
pub async fn get_rate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<RateParams>,
) -> Result<Json<RateResponse>, AppError> {
    let (Some(property_id), Some(room_type_id), Some(date)) = (
        required(params.property_id),
        required(params.room_type_id),
        required(params.date),
    ) else {
        return Err(AppError::BadRequest(
            "propertyID, roomTypeID, and date are required".to_string(),
        ));
    };
    let token = bearer_token(&headers)?;
    let date = parse_date(&date, "date")?;

    let response = match lookup_rate(state.pms.as_ref(), &token, &property_id, &room_type_id, date).await {
        RateLookup::Found(rate) => RateResponse {
            success: true,
            rate: Some(rate),
            message: None,
        },
        RateLookup::NotFound => RateResponse {
            success: false,
            rate: None,
            message: Some("No rate found for this date".to_string()),
        },
    };
    Ok(Json(response))
}

/// 区间价格，按日期合并
pub async fn get_rates_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<RatesBatchParams>,
) -> Result<Json<RatesBatchResponse>, AppError> {
    let (Some(property_id), Some(room_type_id), Some(start_date), Some(end_date)) = (
        required(params.property_id),
        required(params.room_type_id),
        required(params.start_date),
        required(params.end_date),
    ) else {
        return Err(AppError::BadRequest(
            "propertyID, roomTypeID, startDate, and endDate are required".to_string(),
        ));
    };
    let token = bearer_token(&headers)?;
    let start_date = parse_date(&start_date, "startDate")?;
    let end_date = parse_date(&end_date, "endDate")?;

    let rates = fetch_rates_batch(
        state.pms.as_ref(),
        &token,
        &property_id,
        &room_type_id,
        start_date,
        end_date,
    )
    .await;
    Ok(Json(RatesBatchResponse {
        success: true,
        count: rates.len(),
        rates,
    }))
}
