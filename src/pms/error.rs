use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PmsError {
    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP 状态错误 {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("解析失败: {0}")]
    Parse(String),
    #[error("PMS 地址无效: {0}")]
    InvalidUrl(String),
}
