use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::models::{ApiEnvelope, OneOrMany, PutRateRequest, PutRateResponse, RatePlan, RateRecord, RoomType};
use super::{PmsApi, PmsError, RateQuery};

/// 测试替身：读接口返回预置 JSON，写接口按顺序弹出预置结果并记录请求
#[derive(Default)]
pub struct FakePms {
    pub room_types: Option<Value>,
    pub rate: Option<Value>,
    pub rate_plans: Option<Value>,
    pub put_responses: Mutex<VecDeque<Result<Value, StatusCode>>>,
    pub put_calls: AtomicUsize,
    pub read_calls: AtomicUsize,
    pub put_requests: Mutex<Vec<(String, PutRateRequest)>>,
    pub queries: Mutex<Vec<RateQuery>>,
}

impl FakePms {
    pub fn with_rate(rate: Value) -> Self {
        Self {
            rate: Some(rate),
            ..Default::default()
        }
    }

    pub fn with_rate_plans(rate_plans: Value) -> Self {
        Self {
            rate_plans: Some(rate_plans),
            ..Default::default()
        }
    }

    pub fn with_put_responses(responses: Vec<Result<Value, StatusCode>>) -> Self {
        Self {
            put_responses: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn recorded_puts(&self) -> Vec<(String, PutRateRequest)> {
        self.put_requests.lock().unwrap().clone()
    }

    pub fn recorded_queries(&self) -> Vec<RateQuery> {
        self.queries.lock().unwrap().clone()
    }

    fn canned<T: serde::de::DeserializeOwned>(value: &Option<Value>) -> Result<T, PmsError> {
        match value {
            Some(v) => serde_json::from_value(v.clone()).map_err(|e| PmsError::Parse(e.to_string())),
            None => Err(PmsError::Status {
                status: StatusCode::BAD_GATEWAY,
                body: "no canned response".to_string(),
            }),
        }
    }
}

#[async_trait]
impl PmsApi for FakePms {
    async fn get_room_types(
        &self,
        _token: &str,
        _property_id: &str,
    ) -> Result<ApiEnvelope<Vec<RoomType>>, PmsError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        Self::canned(&self.room_types)
    }

    async fn get_rate(
        &self,
        _token: &str,
        query: &RateQuery,
    ) -> Result<ApiEnvelope<OneOrMany<RateRecord>>, PmsError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        Self::canned(&self.rate)
    }

    async fn get_rate_plans(
        &self,
        _token: &str,
        query: &RateQuery,
    ) -> Result<ApiEnvelope<Vec<RatePlan>>, PmsError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        Self::canned(&self.rate_plans)
    }

    async fn put_rate(
        &self,
        token: &str,
        request: &PutRateRequest,
    ) -> Result<PutRateResponse, PmsError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        self.put_requests
            .lock()
            .unwrap()
            .push((token.to_string(), request.clone()));
        let next = self.put_responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(body)) => {
                serde_json::from_value(body).map_err(|e| PmsError::Parse(e.to_string()))
            }
            Some(Err(status)) => Err(PmsError::Status {
                status,
                body: String::new(),
            }),
            None => Ok(PutRateResponse {
                success: true,
                job_reference_id: Some("job-default".to_string()),
                message: None,
            }),
        }
    }
}
