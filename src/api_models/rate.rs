use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pms::models::RateRecord;

/// GET /api/rates 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct RateParams {
    #[serde(rename = "propertyID")]
    pub property_id: Option<String>,
    #[serde(rename = "roomTypeID")]
    pub room_type_id: Option<String>,
    pub date: Option<String>,
}

/// GET /api/rates-batch 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct RatesBatchParams {
    #[serde(rename = "propertyID")]
    pub property_id: Option<String>,
    #[serde(rename = "roomTypeID")]
    pub room_type_id: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

/// 单日合并后的价格，一个日期只保留一条
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledRate {
    #[serde(rename = "rateID")]
    pub rate_id: Option<String>,
    #[serde(rename = "roomTypeID")]
    pub room_type_id: String,
    pub date: String,
    /// roomRate 优先，缺失时用 totalRate
    pub rate: Option<f64>,
    #[serde(rename = "roomRate")]
    pub room_rate: Option<f64>,
    #[serde(rename = "totalRate")]
    pub total_rate: Option<f64>,
    #[serde(rename = "extraPersonRate")]
    pub extra_person_rate: Option<f64>,
    #[serde(rename = "maxGuests")]
    pub max_guests: Option<i64>,
    #[serde(rename = "minStay")]
    pub min_stay: Option<i64>,
    #[serde(rename = "maxStay")]
    pub max_stay: Option<i64>,
    #[serde(rename = "roomsAvailable")]
    pub rooms_available: Option<i64>,
    #[serde(rename = "stopSell")]
    pub stop_sell: Option<bool>,
    #[serde(rename = "closeToArrival")]
    pub close_to_arrival: Option<bool>,
    #[serde(rename = "closeToDeparture")]
    pub close_to_departure: Option<bool>,
    /// 仅非基础价计划携带
    #[serde(flatten)]
    pub plan: Option<RatePlanInfo>,
    #[serde(flatten)]
    pub derivation: Option<Derivation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatePlanInfo {
    #[serde(rename = "ratePlanID")]
    pub rate_plan_id: String,
    #[serde(rename = "ratePlanNamePublic")]
    pub rate_plan_name_public: Option<String>,
    #[serde(rename = "ratePlanNamePrivate")]
    pub rate_plan_name_private: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Derivation {
    pub derived: bool,
    pub derived_type: Option<String>,
    pub derived_value: Option<f64>,
    pub base_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<RateRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RatesBatchResponse {
    pub success: bool,
    pub rates: BTreeMap<String, ReconciledRate>,
    pub count: usize,
}
