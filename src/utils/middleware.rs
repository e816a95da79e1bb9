use axum::http::{HeaderName, HeaderValue};
use tower_http::cors::{Any, CorsLayer};

/// 前端携带的令牌请求头
pub const BEARER_TOKEN_HEADER: &str = "x-bearer-token";

pub fn cors_layer() -> CorsLayer {
    let allowed_env = std::env::var("ALLOWED_ORIGINS").unwrap_or_default();
    let from_env: Vec<HeaderValue> = allowed_env
        .split(',')
        .filter_map(|o| {
            let trimmed = o.trim();
            if trimmed.is_empty() {
                None
            } else {
                HeaderValue::from_str(trimmed).ok()
            }
        })
        .collect();

    if !from_env.is_empty() {
        CorsLayer::new()
            .allow_origin(from_env)
            .allow_methods(Any)
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                HeaderName::from_static(BEARER_TOKEN_HEADER),
            ])
    } else {
        // 未配置时页面与接口同源，仅放行本地开发端口
        CorsLayer::new()
            .allow_origin([
                HeaderValue::from_static("http://localhost:5000"),
                HeaderValue::from_static("http://127.0.0.1:5000"),
            ])
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
