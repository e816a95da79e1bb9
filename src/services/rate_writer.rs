use serde_json::Value;

use crate::api_models::copy_rates::{BatchResult, BatchSummary, RateCopyBatch};
use crate::pms::models::{PutRateRequest, PutRateResponse, RateInterval};
use crate::pms::PmsApi;

pub const MISSING_BATCH_FIELDS: &str = "Missing batch fields";
const JOB_REFERENCE_PLACEHOLDER: &str = "N/A";
const UNKNOWN_REMOTE_ERROR: &str = "Unknown error from API";

/// putRate 在 2xx 下的业务结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutRateOutcome {
    Accepted { job_reference_id: String },
    Rejected { message: String },
}

impl From<PutRateResponse> for PutRateOutcome {
    fn from(resp: PutRateResponse) -> Self {
        if resp.success {
            PutRateOutcome::Accepted {
                job_reference_id: resp
                    .job_reference_id
                    .unwrap_or_else(|| JOB_REFERENCE_PLACEHOLDER.to_string()),
            }
        } else {
            PutRateOutcome::Rejected {
                message: resp
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_REMOTE_ERROR.to_string()),
            }
        }
    }
}

/// 将调用方传入的区间解析为 putRate 区间，遇到第一个无法解析的区间即返回错误
pub fn decode_intervals(raw: Vec<Value>) -> Result<Vec<RateInterval>, String> {
    raw.into_iter()
        .enumerate()
        .map(|(idx, value)| {
            serde_json::from_value(value).map_err(|e| format!("Invalid interval #{}: {}", idx + 1, e))
        })
        .collect()
}

#[derive(Debug)]
pub struct CopyRatesOutcome {
    pub results: Vec<BatchResult>,
    pub summary: BatchSummary,
}

/// 一个批次只调用一次 putRate，所有区间放在同一个 rate 对象里。不重试。
pub async fn copy_rate_batch(
    api: &dyn PmsApi,
    token: &str,
    property_id: &str,
    room_type_id: &str,
    rate_id: &str,
    intervals: Vec<RateInterval>,
) -> BatchResult {
    let count = intervals.len();
    tracing::info!(
        "[copy-rates] 提交 {} 个区间: room_type_id={}, rate_id={}",
        count,
        room_type_id,
        rate_id
    );

    let request = PutRateRequest::single(property_id, rate_id, room_type_id, intervals);
    match api.put_rate(token, &request).await {
        Ok(resp) => match PutRateOutcome::from(resp) {
            PutRateOutcome::Accepted { job_reference_id } => {
                tracing::info!(
                    "[copy-rates] 写入成功: room_type_id={}, {} 个区间, job={}",
                    room_type_id,
                    count,
                    job_reference_id
                );
                BatchResult::succeeded(room_type_id, count, job_reference_id)
            }
            PutRateOutcome::Rejected { message } => {
                tracing::warn!(
                    "[copy-rates] PMS 拒绝写入: room_type_id={}, message={}",
                    room_type_id,
                    message
                );
                BatchResult::failed(Some(room_type_id), count, message)
            }
        },
        Err(e) => {
            tracing::error!(
                "[copy-rates] putRate 调用失败: room_type_id={}, error={}",
                room_type_id,
                e
            );
            BatchResult::failed(Some(room_type_id), count, e.to_string())
        }
    }
}

/// 按输入顺序串行执行每个批次。字段不全或区间无法解析的批次直接记为失败，不调用远端。
pub async fn copy_rates_batches(
    api: &dyn PmsApi,
    token: &str,
    property_id: &str,
    batches: Vec<RateCopyBatch>,
) -> CopyRatesOutcome {
    tracing::info!("[copy-rates] 收到 {} 个批次", batches.len());
    let mut results = Vec::with_capacity(batches.len());

    for batch in batches {
        let RateCopyBatch {
            room_type_id,
            rate_id,
            intervals,
        } = batch;

        let result = match (room_type_id.as_deref(), rate_id.as_deref(), intervals) {
            (Some(room_type_id), Some(rate_id), Some(raw)) if !raw.is_empty() => {
                let count = raw.len();
                match decode_intervals(raw) {
                    Ok(intervals) => {
                        copy_rate_batch(api, token, property_id, room_type_id, rate_id, intervals)
                            .await
                    }
                    Err(message) => {
                        tracing::warn!(
                            "[copy-rates] 区间格式错误: room_type_id={}, {}",
                            room_type_id,
                            message
                        );
                        BatchResult::failed(Some(room_type_id), count, message)
                    }
                }
            }
            _ => {
                tracing::warn!(
                    "[copy-rates] 批次字段缺失: room_type_id={:?}, rate_id={:?}",
                    room_type_id,
                    rate_id
                );
                BatchResult::failed(room_type_id.as_deref(), 0, MISSING_BATCH_FIELDS)
            }
        };
        results.push(result);
    }

    let summary = BatchSummary::from_results(&results);
    tracing::info!(
        "[copy-rates] 完成: {}/{} 个批次成功, 共 {} 个区间",
        summary.successful_batches,
        summary.total_batches,
        summary.total_rates
    );
    CopyRatesOutcome { results, summary }
}
