//! End-to-end quality-check tests against a mock scoring engine
//!
//! Binds an in-process HTTP server that answers like the BQAT engine and runs
//! the full check-quality path through it.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use bqat_common::sdk::BiometricSdk;
use bqat_common::types::{BiometricRecord, BiometricType, Bir};
use bqat_sdk::{BqatSdk, SdkSettings};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// What the mock engine answers and what it saw
#[derive(Clone)]
struct MockEngine {
    reply: Arc<Mutex<(StatusCode, Value)>>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockEngine {
    fn new(reply: Value) -> Self {
        Self {
            reply: Arc::new(Mutex::new((StatusCode::OK, reply))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn set_reply(&self, status: StatusCode, reply: Value) {
        *self.reply.lock().unwrap() = (status, reply);
    }

    fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

async fn scan_handler(
    State(engine): State<MockEngine>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    engine.requests.lock().unwrap().push(body);
    let (status, reply) = engine.reply.lock().unwrap().clone();
    (status, Json(reply))
}

/// Bind the mock engine on an ephemeral port and return an SDK pointed at it
async fn spawn_sdk(engine: MockEngine) -> BqatSdk {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("bqat_sdk=debug")
        .try_init();

    let app = Router::new()
        .route("/v1/scan", post(scan_handler))
        .with_state(engine);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock engine");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock engine");
    });

    let settings = SdkSettings {
        server_host: addr.ip().to_string(),
        server_port: addr.port(),
        server_path: "/v1/scan".to_string(),
        ..SdkSettings::default()
    };
    BqatSdk::new(settings).expect("build sdk")
}

fn sample_with(segments: Vec<Bir>) -> BiometricRecord {
    BiometricRecord::new(segments)
}

#[tokio::test]
async fn check_quality_scores_finger_segment() {
    let engine = MockEngine::new(json!({
        "engine": "BQAT",
        "timestamp": "2024-03-01T10:00:00Z",
        "results": { "NFIQ2": 61, "sharpness": 0.82, "dpi": "500" }
    }));
    let sdk = spawn_sdk(engine.clone()).await;

    let sample = sample_with(vec![Bir::new(BiometricType::Finger, "wsq", vec![9, 9, 9])]);
    let response = sdk
        .check_quality(&sample, &[BiometricType::Finger], &HashMap::new())
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.status_message, "OK");
    let check = response.response.expect("payload");
    let score = &check.scores[&BiometricType::Finger];
    assert_eq!(score.score, 61.0);
    assert!(score.errors.is_empty());
    assert_eq!(score.analytics_info["sharpness"], "0.82");
    assert_eq!(score.analytics_info["dpi"], "500");
    assert_eq!(score.analytics_info["engine"], "BQAT");
    assert_eq!(score.analytics_info["timestamp"], "2024-03-01T10:00:00Z");

    // request wire shape
    let requests = engine.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request["modality"], "fingerprint");
    assert_eq!(request["type"], "wsq");
    assert_eq!(request["version"], "1.0.0");
    assert!(request["data"].as_str().is_some());
    assert!(request["requestTime"].as_str().is_some());
}

#[tokio::test]
async fn check_quality_one_segment_at_a_time() {
    let engine = MockEngine::new(json!({
        "results": { "NFIQ2": 40 }
    }));
    let sdk = spawn_sdk(engine.clone()).await;

    let sample = sample_with(vec![
        Bir::new(BiometricType::Finger, "wsq", vec![1]),
        Bir::new(BiometricType::Finger, "wsq", vec![2]),
        Bir::new(BiometricType::Finger, "wsq", vec![3]),
    ]);
    let response = sdk
        .check_quality(&sample, &[BiometricType::Finger], &HashMap::new())
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(engine.requests().len(), 1, "only the first segment is posted");
}

#[tokio::test]
async fn check_quality_multiple_modalities() {
    let engine = MockEngine::new(json!({
        "engine": "BQAT",
        "timestamp": "t",
        "results": { "NFIQ2": 61, "quality": 70, "confidence": 0.9 }
    }));
    let sdk = spawn_sdk(engine.clone()).await;

    let sample = sample_with(vec![
        Bir::new(BiometricType::Finger, "wsq", vec![1]),
        Bir::new(BiometricType::Iris, "jp2", vec![2]),
    ]);
    let response = sdk
        .check_quality(
            &sample,
            &[BiometricType::Finger, BiometricType::Iris],
            &HashMap::new(),
        )
        .await;

    let check = response.response.expect("payload");
    assert_eq!(check.scores[&BiometricType::Finger].score, 61.0);
    assert_eq!(check.scores[&BiometricType::Iris].score, 70.0);
    assert_eq!(engine.requests().len(), 2, "one POST per scored modality");
}

#[tokio::test]
async fn check_quality_requested_modality_without_segments() {
    let engine = MockEngine::new(json!({ "results": { "NFIQ2": 61 } }));
    let sdk = spawn_sdk(engine.clone()).await;

    let sample = sample_with(vec![Bir::new(BiometricType::Finger, "wsq", vec![1])]);
    let response = sdk
        .check_quality(
            &sample,
            &[BiometricType::Finger, BiometricType::Face],
            &HashMap::new(),
        )
        .await;

    assert_eq!(response.status_code, 200, "missing modality never aborts the record");
    let check = response.response.expect("payload");
    let face = &check.scores[&BiometricType::Face];
    assert_eq!(face.score, 0.0);
    assert_eq!(face.errors, vec!["No face segments found in sample".to_string()]);
    assert_eq!(engine.requests().len(), 1);
}

#[tokio::test]
async fn check_quality_unsupported_modality() {
    let engine = MockEngine::new(json!({ "results": {} }));
    let sdk = spawn_sdk(engine.clone()).await;

    let sample = sample_with(vec![Bir::new(
        BiometricType::Other("voice".to_string()),
        "wav",
        vec![1],
    )]);
    let response = sdk
        .check_quality(
            &sample,
            &[BiometricType::Other("voice".to_string())],
            &HashMap::new(),
        )
        .await;

    assert_eq!(response.status_code, 200);
    let check = response.response.expect("payload");
    let voice = &check.scores[&BiometricType::Other("voice".to_string())];
    assert_eq!(voice.errors, vec!["Modality voice is not supported".to_string()]);
    assert!(engine.requests().is_empty(), "engine never contacted");
}

#[tokio::test]
async fn check_quality_invalid_segment_yields_zero_with_error() {
    let engine = MockEngine::new(json!({ "results": { "NFIQ2": 61 } }));
    let sdk = spawn_sdk(engine.clone()).await;

    // unrecognized format stops the scan before any engine call
    let sample = sample_with(vec![Bir::new(BiometricType::Finger, "bmp", vec![1])]);
    let response = sdk
        .check_quality(&sample, &[BiometricType::Finger], &HashMap::new())
        .await;

    assert_eq!(response.status_code, 200);
    let check = response.response.expect("payload");
    let finger = &check.scores[&BiometricType::Finger];
    assert_eq!(finger.score, 0.0);
    assert_eq!(finger.errors.len(), 1);
    assert!(finger.errors[0].contains("bmp"));
    assert!(engine.requests().is_empty());
}

#[tokio::test]
async fn check_quality_engine_http_error_classifies() {
    let engine = MockEngine::new(json!({}));
    engine.set_reply(StatusCode::INTERNAL_SERVER_ERROR, json!({ "detail": "boom" }));
    let sdk = spawn_sdk(engine).await;

    let sample = sample_with(vec![Bir::new(BiometricType::Face, "jp2", vec![1])]);
    let response = sdk
        .check_quality(&sample, &[BiometricType::Face], &HashMap::new())
        .await;

    assert_eq!(response.status_code, 403);
    assert_eq!(
        response.status_message,
        "Quality check of Biometric data failed"
    );
    assert!(response.response.is_none());
}

#[tokio::test]
async fn check_quality_malformed_reply_classifies() {
    let engine = MockEngine::new(json!({ "unexpected": true }));
    let sdk = spawn_sdk(engine).await;

    let sample = sample_with(vec![Bir::new(BiometricType::Iris, "jp2", vec![1])]);
    let response = sdk
        .check_quality(&sample, &[BiometricType::Iris], &HashMap::new())
        .await;

    assert_eq!(response.status_code, 403, "reply without results object");
    assert!(response.response.is_none());
}

#[tokio::test]
async fn check_quality_engine_unreachable() {
    // point the SDK at a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let settings = SdkSettings {
        server_host: addr.ip().to_string(),
        server_port: addr.port(),
        ..SdkSettings::default()
    };
    let sdk = BqatSdk::new(settings).unwrap();

    let sample = sample_with(vec![Bir::new(BiometricType::Finger, "wsq", vec![1])]);
    let response = sdk
        .check_quality(&sample, &[BiometricType::Finger], &HashMap::new())
        .await;

    assert_eq!(response.status_code, 403);
    assert!(response.response.is_none());
}

#[tokio::test]
async fn check_quality_missing_sample() {
    let engine = MockEngine::new(json!({ "results": {} }));
    let sdk = spawn_sdk(engine.clone()).await;

    let response = sdk
        .check_quality(
            &BiometricRecord::default(),
            &[BiometricType::Finger],
            &HashMap::new(),
        )
        .await;

    assert_eq!(response.status_code, 402);
    assert_eq!(response.status_message, "Missing Input Parameter sample");
    assert!(engine.requests().is_empty());
}
