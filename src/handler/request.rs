use axum::http::HeaderMap;

use crate::handler::error::AppError;
use crate::utils::middleware::BEARER_TOKEN_HEADER;

/// 读取前端透传的 PMS 令牌，不做任何校验
pub fn bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get(BEARER_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::Unauthorized("Bearer token is required".to_string()))
}

/// 空串与缺失等价
pub fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn parse_date(value: &str, field: &str) -> Result<chrono::NaiveDate, AppError> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("{field} must be YYYY-MM-DD")))
}
