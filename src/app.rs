use std::sync::Arc;

use axum::Router;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use crate::pms::{PmsApi, PmsClient};
use crate::routes;
use crate::utils::middleware;

#[derive(Clone)]
pub struct AppState {
    pub pms: Arc<dyn PmsApi>,
}

pub fn build_app() -> anyhow::Result<Router> {
    let pms = PmsClient::from_env()?;
    Ok(build_app_with_client(Arc::new(pms)))
}

pub fn build_app_with_client(pms: Arc<dyn PmsApi>) -> Router {
    let state = AppState { pms };

    routes::build_routes()
        .with_state(state)
        .layer(middleware::cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pms::testing::FakePms;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn call(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header("X-Bearer-Token", token);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("X-Bearer-Token", token);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn missing_inputs_are_rejected_before_token_check() {
        let app = build_app_with_client(Arc::new(FakePms::default()));

        let (status, body) = call(app.clone(), get("/api/room-types", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "propertyID is required");

        let (status, body) = call(app.clone(), get("/api/room-types?propertyID=6000", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Bearer token is required");

        let (status, body) = call(app.clone(), get("/api/rates?propertyID=6000&date=2025-06-01", Some("tok"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "propertyID, roomTypeID, and date are required");

        let (status, _) = call(app, get("/api/rates-batch?propertyID=6000&roomTypeID=10&startDate=2025-06-01&endDate=2025-06-30", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_date_is_bad_request() {
        let api = Arc::new(FakePms::default());
        let app = build_app_with_client(api.clone());
        let (status, body) = call(app, get("/api/rates?propertyID=6000&roomTypeID=10&date=06/01/2025", Some("tok"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "date must be YYYY-MM-DD");
        assert_eq!(api.read_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn single_rate_not_found_is_ok_with_flag() {
        let app = build_app_with_client(Arc::new(FakePms::with_rate(json!({"success": true, "data": []}))));
        let (status, body) = call(app, get("/api/rates?propertyID=6000&roomTypeID=10&date=2025-06-01", Some("tok"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": false, "message": "No rate found for this date"}));
    }

    #[tokio::test]
    async fn rates_batch_prefers_base_plan() {
        let api = FakePms::with_rate_plans(json!({
            "success": true,
            "data": [
                {"rateID": "1", "roomRateDetailed": [{"date": "2025-06-01", "rate": 100}]},
                {"rateID": "2", "ratePlanID": 7, "roomRateDetailed": [{"date": "2025-06-01", "rate": 120}]}
            ]
        }));
        let app = build_app_with_client(Arc::new(api));
        let (status, body) = call(
            app,
            get("/api/rates-batch?propertyID=6000&roomTypeID=10&startDate=2025-06-01&endDate=2025-06-02", Some("tok")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 1);
        assert_eq!(body["rates"]["2025-06-01"]["rate"], 100.0);
        assert!(body["rates"]["2025-06-01"].get("ratePlanID").is_none());
    }

    #[tokio::test]
    async fn copy_rates_batch_reports_partial_failure_with_200() {
        let api = Arc::new(FakePms::with_put_responses(vec![Ok(json!({
            "success": true,
            "jobReferenceID": "job-1"
        }))]));
        let app = build_app_with_client(api.clone());
        let body = json!({
            "propertyID": "6000",
            "batches": [
                {
                    "roomTypeID": 10,
                    "rateID": 3,
                    "intervals": [
                        {"startDate": "2025-06-01", "endDate": "2025-06-01", "rate": 100},
                        {"startDate": "2025-06-02", "endDate": "2025-06-05", "rate": 110, "minLos": 2}
                    ]
                },
                {
                    "roomTypeID": 11,
                    "intervals": [{"startDate": "2025-06-01", "endDate": "2025-06-01", "rate": 90}]
                }
            ]
        });
        let (status, resp) = call(app, post_json("/api/copy-rates-batch", Some("tok"), &body.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp["success"], true);
        assert_eq!(
            resp["results"],
            json!([
                {"success": true, "count": 2, "jobReferenceID": "job-1", "roomTypeID": "10"},
                {"success": false, "count": 0, "error": "Missing batch fields", "roomTypeID": "11"}
            ])
        );
        assert_eq!(
            resp["summary"],
            json!({"totalBatches": 2, "successfulBatches": 1, "totalRates": 2})
        );
        assert_eq!(api.put_calls(), 1);
        assert_eq!(api.recorded_puts()[0].1.rate_id(), Some("3"));
    }

    #[tokio::test]
    async fn copy_rates_batch_bad_interval_fails_only_its_batch() {
        let api = Arc::new(FakePms::with_put_responses(vec![Ok(json!({
            "success": true,
            "jobReferenceID": "job-7"
        }))]));
        let app = build_app_with_client(api.clone());
        let body = json!({
            "propertyID": "6000",
            "batches": [
                {
                    "roomTypeID": "10",
                    "rateID": "3",
                    "intervals": [{"startDate": "2025-06-01", "endDate": "2025-06-01", "rate": "120.00"}]
                },
                {
                    "roomTypeID": "11",
                    "rateID": "4",
                    "intervals": [{"startDate": "06/01/2025", "endDate": "2025-06-01", "rate": 90}]
                }
            ]
        });
        let (status, resp) = call(app, post_json("/api/copy-rates-batch", Some("tok"), &body.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp["results"][0]["success"], true);
        assert_eq!(resp["results"][0]["jobReferenceID"], "job-7");
        assert_eq!(resp["results"][1]["success"], false);
        assert_eq!(resp["results"][1]["count"], 1);
        assert_eq!(resp["results"][1]["roomTypeID"], "11");
        assert!(resp["results"][1]["error"].as_str().unwrap().starts_with("Invalid interval #1"));
        assert_eq!(
            resp["summary"],
            json!({"totalBatches": 2, "successfulBatches": 1, "totalRates": 2})
        );

        assert_eq!(api.put_calls(), 1);
        let puts = api.recorded_puts();
        assert_eq!(puts[0].1.rates[0].room_type_id, "10");
        assert_eq!(puts[0].1.rates[0].interval[0].rate, 120.0);
    }

    #[tokio::test]
    async fn copy_rates_batch_input_errors() {
        let api = Arc::new(FakePms::default());
        let app = build_app_with_client(api.clone());

        let (status, body) = call(app.clone(), post_json("/api/copy-rates-batch", Some("tok"), r#"{"propertyID": "6000", "batches": []}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");

        let (status, _) = call(
            app.clone(),
            post_json("/api/copy-rates-batch", None, r#"{"propertyID": "6000", "batches": [{"roomTypeID": 1}]}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = call(app, post_json("/api/copy-rates-batch", Some("tok"), "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(api.put_calls(), 0);
    }
}
