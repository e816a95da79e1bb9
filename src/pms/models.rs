use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::utils::json_parser::{
    de_f64, de_opt_bool, de_opt_f64, de_opt_i64, de_opt_id, de_opt_text, parse_bool, parse_f64,
    parse_id,
};

fn de_flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(parse_bool(v.as_ref()).unwrap_or(false))
}

/// ratePlanID 为 0 时同样视为基础价
fn de_opt_plan_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(parse_id(v.as_ref()).filter(|id| id != "0"))
}

/// PMS 统一响应外壳 `{success, data, message}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default, deserialize_with = "de_flag")]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// success=true 时取出 data，否则 None
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

/// getRate 的 data 可能是单个对象，也可能是数组
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// 单个对象原样返回，数组只取第一个
    pub fn into_first(self) -> Option<T> {
        match self {
            OneOrMany::One(item) => Some(item),
            OneOrMany::Many(items) => items.into_iter().next(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    #[serde(rename = "roomTypeID", default, deserialize_with = "de_opt_id")]
    pub room_type_id: Option<String>,
    #[serde(rename = "roomTypeName", default, deserialize_with = "de_opt_text")]
    pub room_type_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// getRate 返回的单日价格记录，原样透传给前端，仅提供只读的类型化视图
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateRecord(pub Map<String, Value>);

impl RateRecord {
    pub fn rate_id(&self) -> Option<String> {
        parse_id(self.0.get("rateID"))
    }

    pub fn room_rate(&self) -> Option<f64> {
        parse_f64(self.0.get("roomRate"))
    }

    pub fn total_rate(&self) -> Option<f64> {
        parse_f64(self.0.get("totalRate"))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// getRatePlans 中的一个价格计划。没有 ratePlanID 的是该房型的基础价。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatePlan {
    #[serde(rename = "rateID", default, deserialize_with = "de_opt_id")]
    pub rate_id: Option<String>,
    #[serde(rename = "ratePlanID", default, deserialize_with = "de_opt_plan_id")]
    pub rate_plan_id: Option<String>,
    #[serde(rename = "ratePlanNamePublic", default, deserialize_with = "de_opt_text")]
    pub rate_plan_name_public: Option<String>,
    #[serde(rename = "ratePlanNamePrivate", default, deserialize_with = "de_opt_text")]
    pub rate_plan_name_private: Option<String>,
    #[serde(default, deserialize_with = "de_flag")]
    pub derived: bool,
    #[serde(rename = "derivedType", default, deserialize_with = "de_opt_text")]
    pub derived_type: Option<String>,
    #[serde(rename = "derivedValue", default, deserialize_with = "de_opt_f64")]
    pub derived_value: Option<f64>,
    #[serde(rename = "roomRateDetailed", default)]
    pub room_rate_detailed: Option<Vec<DailyRateEntry>>,
}

impl RatePlan {
    pub fn is_base(&self) -> bool {
        self.rate_plan_id.is_none()
    }

    pub fn daily_entries(&self) -> &[DailyRateEntry] {
        self.room_rate_detailed.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRateEntry {
    #[serde(default, deserialize_with = "de_opt_id")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub rate: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub total_rate: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub base_rate: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub extra_person_rate: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub max_guests: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub min_los: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub max_los: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub rooms_available: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_bool")]
    pub stop_sell: Option<bool>,
    #[serde(default, deserialize_with = "de_opt_bool")]
    pub closed_to_arrival: Option<bool>,
    #[serde(default, deserialize_with = "de_opt_bool")]
    pub closed_to_departure: Option<bool>,
}

/// 写入区间：一段连续日期使用同一价格，可附带限制条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateInterval {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(deserialize_with = "de_f64")]
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_person_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_los: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_los: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms_available: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sell: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_to_arrival: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_to_departure: Option<bool>,
}

/// putRate 请求体 `{propertyID, rates: [{rateID, roomTypeID, interval}]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PutRateRequest {
    #[serde(rename = "propertyID")]
    pub property_id: String,
    pub rates: Vec<PutRateItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PutRateItem {
    #[serde(rename = "rateID")]
    pub rate_id: String,
    #[serde(rename = "roomTypeID")]
    pub room_type_id: String,
    pub interval: Vec<RateInterval>,
}

impl PutRateRequest {
    /// 一个批次对应一个 rate 对象，全部区间一次提交
    pub fn single(
        property_id: &str,
        rate_id: &str,
        room_type_id: &str,
        intervals: Vec<RateInterval>,
    ) -> Self {
        Self {
            property_id: property_id.to_string(),
            rates: vec![PutRateItem {
                rate_id: rate_id.to_string(),
                room_type_id: room_type_id.to_string(),
                interval: intervals,
            }],
        }
    }

    /// 请求头 rateID 使用的值
    pub fn rate_id(&self) -> Option<&str> {
        self.rates.first().map(|r| r.rate_id.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PutRateResponse {
    #[serde(default, deserialize_with = "de_flag")]
    pub success: bool,
    #[serde(rename = "jobReferenceID", default, deserialize_with = "de_opt_id")]
    pub job_reference_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub message: Option<String>,
}
