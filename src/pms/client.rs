use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Request, Url};
use serde::de::DeserializeOwned;

use super::error::PmsError;
use super::models::{ApiEnvelope, OneOrMany, PutRateRequest, PutRateResponse, RatePlan, RateRecord, RoomType};
use super::{PmsApi, RateQuery};

const DEFAULT_API_BASE_URL: &str = "https://api.cloudbeds.com/api/v1.3";

#[derive(Debug, Clone)]
pub struct PmsConfig {
    pub base_url: String,
    /// None 时沿用 reqwest 默认行为
    pub timeout_secs: Option<u64>,
}

impl PmsConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("PMS_API_BASE_URL")
            .ok()
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let timeout_secs = env::var("PMS_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|value| *value > 0);

        Self {
            base_url,
            timeout_secs,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PmsClient {
    client: Client,
    base_url: String,
}

impl PmsClient {
    pub fn new(config: PmsConfig) -> Result<Self, PmsError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url,
        })
    }

    pub fn from_env() -> Result<Self, PmsError> {
        Self::new(PmsConfig::from_env())
    }

    fn endpoint(&self, operation: &str) -> Result<Url, PmsError> {
        let raw = format!("{}/{}", self.base_url, operation);
        Url::parse(&raw).map_err(|_| PmsError::InvalidUrl(raw))
    }

    fn headers(token: &str, rate_id: Option<&str>) -> Result<HeaderMap, PmsError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| PmsError::Parse("令牌包含非法字符".to_string()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(rate_id) = rate_id {
            let value = HeaderValue::from_str(rate_id)
                .map_err(|_| PmsError::Parse(format!("rateID 无效: {rate_id}")))?;
            headers.insert(HeaderName::from_static("rateid"), value);
        }
        Ok(headers)
    }

    pub(crate) fn build_get(
        &self,
        token: &str,
        operation: &str,
        params: &[(&str, &str)],
    ) -> Result<Request, PmsError> {
        Ok(self
            .client
            .request(Method::GET, self.endpoint(operation)?)
            .headers(Self::headers(token, None)?)
            .query(params)
            .build()?)
    }

    pub(crate) fn build_put_rate(
        &self,
        token: &str,
        request: &PutRateRequest,
    ) -> Result<Request, PmsError> {
        Ok(self
            .client
            .request(Method::PUT, self.endpoint("putRate")?)
            .headers(Self::headers(token, request.rate_id())?)
            .query(&[("propertyID", request.property_id.as_str())])
            .json(request)
            .build()?)
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<T, PmsError> {
        let operation = request.url().path().rsplit('/').next().unwrap_or_default().to_string();
        let resp = self.client.execute(request).await?;
        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!("PMS {} 响应状态: {}", operation, status);
        if !status.is_success() {
            return Err(PmsError::Status { status, body: text });
        }

        serde_json::from_str(&text)
            .map_err(|err| PmsError::Parse(format!("解析 {operation} 响应失败: {err}")))
    }
}

fn window_params(query: &RateQuery) -> [(&str, &str); 4] {
    [
        ("propertyID", query.property_id.as_str()),
        ("roomTypeID", query.room_type_id.as_str()),
        ("startDate", query.start_date.as_str()),
        ("endDate", query.end_date.as_str()),
    ]
}

#[async_trait]
impl PmsApi for PmsClient {
    async fn get_room_types(
        &self,
        token: &str,
        property_id: &str,
    ) -> Result<ApiEnvelope<Vec<RoomType>>, PmsError> {
        let request = self.build_get(token, "getRoomTypes", &[("propertyID", property_id)])?;
        self.execute(request).await
    }

    async fn get_rate(
        &self,
        token: &str,
        query: &RateQuery,
    ) -> Result<ApiEnvelope<OneOrMany<RateRecord>>, PmsError> {
        let request = self.build_get(token, "getRate", &window_params(query))?;
        self.execute(request).await
    }

    async fn get_rate_plans(
        &self,
        token: &str,
        query: &RateQuery,
    ) -> Result<ApiEnvelope<Vec<RatePlan>>, PmsError> {
        let mut params = window_params(query).to_vec();
        params.push(("detailedRates", "true"));
        let request = self.build_get(token, "getRatePlans", &params)?;
        self.execute(request).await
    }

    async fn put_rate(
        &self,
        token: &str,
        request: &PutRateRequest,
    ) -> Result<PutRateResponse, PmsError> {
        let request = self.build_put_rate(token, request)?;
        self.execute(request).await
    }
}
