use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::api_models::rate::{Derivation, RatePlanInfo, ReconciledRate};
use crate::pms::models::{DailyRateEntry, OneOrMany, RatePlan, RateRecord};
use crate::pms::{PmsApi, RateQuery};

const DATE_FMT: &str = "%Y-%m-%d";

/// 单日查询结果。查不到不是错误。
#[derive(Debug, Clone, PartialEq)]
pub enum RateLookup {
    Found(RateRecord),
    NotFound,
}

/// getRate 要求 endDate 严格晚于 startDate，单日查询用 [date, date+1)
pub fn rate_window(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    date.succ_opt().map(|next| (date, next))
}

pub async fn lookup_rate(
    api: &dyn PmsApi,
    token: &str,
    property_id: &str,
    room_type_id: &str,
    date: NaiveDate,
) -> RateLookup {
    let Some((start, end)) = rate_window(date) else {
        return RateLookup::NotFound;
    };
    let query = RateQuery {
        property_id: property_id.to_string(),
        room_type_id: room_type_id.to_string(),
        start_date: start.format(DATE_FMT).to_string(),
        end_date: end.format(DATE_FMT).to_string(),
    };

    match api.get_rate(token, &query).await {
        Ok(envelope) => match envelope.into_data().and_then(OneOrMany::into_first) {
            Some(record) if !record.is_empty() => {
                tracing::debug!(
                    "单日价格: rate_id={:?}, room_rate={:?}, total_rate={:?}",
                    record.rate_id(),
                    record.room_rate(),
                    record.total_rate()
                );
                RateLookup::Found(record)
            }
            _ => RateLookup::NotFound,
        },
        Err(e) => {
            tracing::error!(
                "获取单日价格失败: room_type_id={}, date={}, error={}",
                room_type_id,
                query.start_date,
                e
            );
            RateLookup::NotFound
        }
    }
}

/// 按日期区间拉取全部价格计划并合并为“每日一条”。任何失败都降级为空结果。
pub async fn fetch_rates_batch(
    api: &dyn PmsApi,
    token: &str,
    property_id: &str,
    room_type_id: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> BTreeMap<String, ReconciledRate> {
    let query = RateQuery {
        property_id: property_id.to_string(),
        room_type_id: room_type_id.to_string(),
        start_date: start_date.format(DATE_FMT).to_string(),
        end_date: end_date.format(DATE_FMT).to_string(),
    };
    tracing::info!(
        "[rates-batch] 拉取价格计划: room_type_id={}, {} ~ {}",
        room_type_id,
        query.start_date,
        query.end_date
    );

    let envelope = match api.get_rate_plans(token, &query).await {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::error!("[rates-batch] 获取价格计划失败: {}", e);
            return BTreeMap::new();
        }
    };
    if !envelope.success {
        tracing::warn!(
            "[rates-batch] PMS 返回 success=false: {}",
            envelope.message.as_deref().unwrap_or("-")
        );
        return BTreeMap::new();
    }
    let plans = envelope.data.unwrap_or_default();
    if plans.is_empty() {
        tracing::info!("[rates-batch] 未找到价格计划");
        return BTreeMap::new();
    }

    tracing::info!("[rates-batch] 共 {} 个价格计划", plans.len());
    let rates = reconcile_rate_plans(room_type_id, &plans);
    tracing::info!("[rates-batch] 合并后共 {} 个日期", rates.len());
    rates
}

/// 将多个价格计划的每日明细合并为 日期 -> 价格。
///
/// 优先级：基础价计划（无 ratePlanID）总是覆盖；其他计划只在该日期尚无记录时写入，
/// 因此多个非基础计划之间是“先到先得”，结果依赖 PMS 返回的计划顺序。
/// 没有日期的明细直接跳过。
pub fn reconcile_rate_plans(
    room_type_id: &str,
    plans: &[RatePlan],
) -> BTreeMap<String, ReconciledRate> {
    let mut rates_by_date: BTreeMap<String, ReconciledRate> = BTreeMap::new();

    for plan in plans {
        tracing::debug!(
            "[rates-batch] 处理价格计划 rate_id={:?}, derived={}, {} 条明细",
            plan.rate_id,
            plan.derived,
            plan.daily_entries().len()
        );
        for entry in plan.daily_entries() {
            let Some(date) = entry.date.as_deref() else {
                continue;
            };
            if plan.is_base() || !rates_by_date.contains_key(date) {
                rates_by_date.insert(
                    date.to_string(),
                    build_reconciled(room_type_id, plan, entry, date),
                );
            }
        }
    }

    rates_by_date
}

fn build_reconciled(
    room_type_id: &str,
    plan: &RatePlan,
    entry: &DailyRateEntry,
    date: &str,
) -> ReconciledRate {
    // 0 视同缺失
    let rate = entry.rate.filter(|r| *r != 0.0).or(entry.total_rate);

    let plan_info = plan.rate_plan_id.as_ref().map(|rate_plan_id| RatePlanInfo {
        rate_plan_id: rate_plan_id.clone(),
        rate_plan_name_public: plan.rate_plan_name_public.clone(),
        rate_plan_name_private: plan.rate_plan_name_private.clone(),
    });

    let derivation = plan.derived.then(|| Derivation {
        derived: true,
        derived_type: plan.derived_type.clone(),
        derived_value: plan.derived_value,
        base_rate: entry.base_rate,
    });

    ReconciledRate {
        rate_id: plan.rate_id.clone(),
        room_type_id: room_type_id.to_string(),
        date: date.to_string(),
        rate,
        room_rate: entry.rate,
        total_rate: entry.total_rate,
        extra_person_rate: entry.extra_person_rate,
        max_guests: entry.max_guests,
        min_stay: entry.min_los,
        max_stay: entry.max_los,
        rooms_available: entry.rooms_available,
        stop_sell: entry.stop_sell,
        close_to_arrival: entry.closed_to_arrival,
        close_to_departure: entry.closed_to_departure,
        plan: plan_info,
        derivation,
    }
}
