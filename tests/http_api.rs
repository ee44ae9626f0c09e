// Tests del router HTTP con un puerto de inferencia simulado.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use shelf_vision_dashboard::{
    adapters::http::{router, state::HttpState},
    application::{dto::PublicConfig, ports::InferencePort, services::AnalysisService},
    domain::{
        detection::{Detection, DetectionSet},
        errors::{DomainError, DomainResult},
        report::ImageUpload,
        statistics::SummaryOptions,
    },
};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const BOUNDARY: &str = "shelf-test-boundary";

struct StubInference {
    result: DomainResult<DetectionSet>,
    received: Mutex<Vec<ImageUpload>>,
}

#[async_trait]
impl InferencePort for StubInference {
    async fn detect(&self, image: ImageUpload) -> DomainResult<DetectionSet> {
        self.received.lock().unwrap().push(image);
        self.result.clone()
    }
}

fn shelf_detections() -> DetectionSet {
    DetectionSet::from(vec![
        Detection::new("RAMY_CANNETTE", 40.0, 10.0, 0.95),
        Detection::new("RAMY_PET", 90.0, 12.0, 0.88),
        Detection::new("COKE_PET", 60.0, 100.0, 0.5),
    ])
}

fn create_test_router(result: DomainResult<DetectionSet>) -> (Router, Arc<StubInference>) {
    let stub = Arc::new(StubInference {
        result,
        received: Mutex::new(Vec::new()),
    });
    let options = SummaryOptions::default();
    let state = HttpState {
        analysis: Arc::new(AnalysisService::new(stub.clone(), options)),
        config: Arc::new(PublicConfig {
            model_id: "shelves".into(),
            model_version: "2".into(),
            row_tolerance: options.row_tolerance,
            extended: options.extended,
        }),
    };
    (router(state), stub)
}

fn multipart_request(field: &str, payload: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"shelf.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\n\
         {payload}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn analyze_returns_statistics() {
    let (app, stub) = create_test_router(Ok(shelf_detections()));

    let response = app.oneshot(multipart_request("file", "fake-jpeg")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let stats = &json["statistics"];
    assert_eq!(stats["total_items"], 3);
    assert_eq!(stats["num_rows"], 2);
    assert_eq!(stats["rows"][0].as_array().unwrap().len(), 2);
    assert_eq!(stats["class_percentages"]["COKE_PET"], "33.33%");
    assert_eq!(stats["ramy_count"], 2);
    assert_eq!(stats["others_count"], 1);
    assert_eq!(stats["type_counts_by_product"]["COKE"]["PET"], 1);

    let received = stub.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].file_name.as_deref(), Some("shelf.jpg"));
    assert_eq!(received[0].content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(received[0].bytes, b"fake-jpeg");
}

#[tokio::test]
async fn image_field_name_is_also_accepted() {
    let (app, _) = create_test_router(Ok(shelf_detections()));
    let response = app.oneshot(multipart_request("image", "fake-jpeg")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_image_is_bad_request() {
    let (app, stub) = create_test_router(Ok(shelf_detections()));

    let response = app.oneshot(multipart_request("notes", "hello")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert_eq!(json["error"], "Please select an image first.");
    assert!(stub.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway_and_kept_in_state() {
    let (app, _) = create_test_router(Err(DomainError::Upstream("HTTP error! Status: 500".into())));

    let response = app
        .clone()
        .oneshot(multipart_request("file", "fake-jpeg"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(json_body(response).await["error"], "HTTP error! Status: 500");

    let state = json_body(app.oneshot(get("/api/state")).await.unwrap()).await;
    assert_eq!(state["status"], "error");
    assert_eq!(state["error"], "HTTP error! Status: 500");
}

#[tokio::test]
async fn state_goes_from_idle_to_ready() {
    let (app, _) = create_test_router(Ok(shelf_detections()));

    let idle = json_body(app.clone().oneshot(get("/api/state")).await.unwrap()).await;
    assert_eq!(idle["status"], "idle");
    assert!(idle["data"].is_null());

    app.clone()
        .oneshot(multipart_request("file", "fake-jpeg"))
        .await
        .unwrap();

    let ready = json_body(app.oneshot(get("/api/state")).await.unwrap()).await;
    assert_eq!(ready["status"], "ready");
    assert_eq!(ready["data"]["statistics"]["total_items"], 3);
}

#[tokio::test]
async fn config_does_not_expose_api_key() {
    let (app, _) = create_test_router(Ok(DetectionSet::default()));

    let json = json_body(app.oneshot(get("/api/config")).await.unwrap()).await;
    assert_eq!(json["model_id"], "shelves");
    assert_eq!(json["row_tolerance"], 20.0);
    assert!(json.get("api_key").is_none());
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = create_test_router(Ok(DetectionSet::default()));
    let json = json_body(app.oneshot(get("/api/health")).await.unwrap()).await;
    assert_eq!(json["status"], "ok");
}
