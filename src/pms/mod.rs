mod client;
mod error;
pub mod models;
#[cfg(test)]
pub mod testing;

use async_trait::async_trait;

pub use client::PmsClient;
pub use error::PmsError;
use models::{ApiEnvelope, OneOrMany, PutRateRequest, PutRateResponse, RatePlan, RateRecord, RoomType};

/// 查询窗口：某房型在 [start_date, end_date) 内的价格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateQuery {
    pub property_id: String,
    pub room_type_id: String,
    pub start_date: String,
    pub end_date: String,
}

/// 远端 PMS 接口。令牌由调用方逐请求透传，实现不持有任何凭据。
#[async_trait]
pub trait PmsApi: Send + Sync {
    async fn get_room_types(
        &self,
        token: &str,
        property_id: &str,
    ) -> Result<ApiEnvelope<Vec<RoomType>>, PmsError>;

    /// getRate，end_date 必须晚于 start_date
    async fn get_rate(
        &self,
        token: &str,
        query: &RateQuery,
    ) -> Result<ApiEnvelope<OneOrMany<RateRecord>>, PmsError>;

    /// getRatePlans（detailedRates=true），可返回历史日期
    async fn get_rate_plans(
        &self,
        token: &str,
        query: &RateQuery,
    ) -> Result<ApiEnvelope<Vec<RatePlan>>, PmsError>;

    async fn put_rate(
        &self,
        token: &str,
        request: &PutRateRequest,
    ) -> Result<PutRateResponse, PmsError>;
}
