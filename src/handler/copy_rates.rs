use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::api_models::copy_rates::{CopyRatesRequest, CopyRatesResponse};
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::handler::request::bearer_token;
use crate::services::rate_writer::copy_rates_batches;

/// 批量写入价格。只要入参结构合法就返回 200，单个批次的失败体现在 results/summary 中。
pub async fn copy_rates_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CopyRatesRequest>, JsonRejection>,
) -> Result<Json<CopyRatesResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!("copy-rates-batch 请求体无效: {}", rejection.body_text());
        AppError::BadRequest(rejection.body_text())
    })?;

    let (Some(property_id), Some(batches)) = (
        payload.property_id,
        payload.batches.filter(|b| !b.is_empty()),
    ) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };
    let token = bearer_token(&headers)?;

    let outcome = copy_rates_batches(state.pms.as_ref(), &token, &property_id, batches).await;
    Ok(Json(CopyRatesResponse {
        success: true,
        results: outcome.results,
        summary: outcome.summary,
    }))
}
