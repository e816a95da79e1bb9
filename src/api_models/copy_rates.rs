use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::json_parser::de_opt_id;

/// POST /api/copy-rates-batch 请求体
#[derive(Debug, Default, Deserialize)]
pub struct CopyRatesRequest {
    #[serde(rename = "propertyID", default, deserialize_with = "de_opt_id")]
    pub property_id: Option<String>,
    #[serde(default)]
    pub batches: Option<Vec<RateCopyBatch>>,
}

/// 单个房型/价格计划的写入批次
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateCopyBatch {
    #[serde(rename = "roomTypeID", default, deserialize_with = "de_opt_id")]
    pub room_type_id: Option<String>,
    #[serde(rename = "rateID", default, deserialize_with = "de_opt_id")]
    pub rate_id: Option<String>,
    /// 按批次解析，单个区间格式错误只影响所在批次
    #[serde(default)]
    pub intervals: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub success: bool,
    pub count: usize,
    #[serde(rename = "jobReferenceID", skip_serializing_if = "Option::is_none")]
    pub job_reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "roomTypeID")]
    pub room_type_id: Option<String>,
}

impl BatchResult {
    pub fn succeeded(room_type_id: &str, count: usize, job_reference_id: String) -> Self {
        Self {
            success: true,
            count,
            job_reference_id: Some(job_reference_id),
            error: None,
            room_type_id: Some(room_type_id.to_string()),
        }
    }

    pub fn failed(room_type_id: Option<&str>, count: usize, error: impl Into<String>) -> Self {
        Self {
            success: false,
            count,
            job_reference_id: None,
            error: Some(error.into()),
            room_type_id: room_type_id.map(str::to_string),
        }
    }
}

/// totalRates 统计的是提交的区间数，失败批次同样计入
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total_batches: usize,
    pub successful_batches: usize,
    pub total_rates: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[BatchResult]) -> Self {
        Self {
            total_batches: results.len(),
            successful_batches: results.iter().filter(|r| r.success).count(),
            total_rates: results.iter().map(|r| r.count).sum(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CopyRatesResponse {
    pub success: bool,
    pub results: Vec<BatchResult>,
    pub summary: BatchSummary,
}
