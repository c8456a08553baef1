//--------------------------------------------------------------------------------------------------
// TEST MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Integration tests for the HTTP engine adapter against an in-process fake engine.
//--------------------------------------------------------------------------------------------------

use std::sync::Arc;
use std::time::Duration;

use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use face_service::{
    AnalyzeParams, EngineError, FaceEngine, FindParams, HttpFaceEngine, RepresentParams,
    VerifyParams, handle_analyze, handle_find,
};

/// Starts the fake engine on an ephemeral port and returns its base URL.
async fn spawn_fake_engine() -> String {
    let app = Router::new()
        // Echo the received body so tests can check what was forwarded
        .route("/represent", post(|Json(body): Json<Value>| async move { Json(json!([{ "echo": body }])) }))
        .route(
            "/verify",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Face could not be detected in numpy array" })),
                )
            }),
        )
        .route(
            "/find",
            post(|| async {
                Json(json!([
                    {
                        "identity": ["db/alice.jpg", "db/bob.jpg"],
                        "threshold": [0.68, 0.68],
                        "distance": [0.11, 0.47],
                        "hash": ["h1", "h2"]
                    }
                ]))
            }),
        )
        .route("/analyze", post(|Json(body): Json<Value>| async move { Json(json!([{ "echo": body }])) }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn engine(base_url: &str) -> HttpFaceEngine {
    HttpFaceEngine::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_represent_forwards_params() {
    let base_url = spawn_fake_engine().await;

    let mut params = RepresentParams::new("face.jpg");
    params.max_faces = Some(1);
    let result = engine(&base_url).represent(params).await.unwrap();

    let echo = &result[0]["echo"];
    assert_eq!(echo["img_path"], "face.jpg");
    assert_eq!(echo["model_name"], "VGG-Face");
    assert_eq!(echo["max_faces"], 1);
    assert_eq!(echo["enforce_detection"], true);
}

#[tokio::test]
async fn test_engine_failure_carries_upstream_error() {
    let base_url = spawn_fake_engine().await;

    let err = engine(&base_url)
        .verify(VerifyParams::new("a.jpg", "b.jpg"))
        .await
        .unwrap_err();

    match err {
        EngineError::Engine { operation, message } => {
            assert_eq!(operation, "verify");
            assert_eq!(message, "Face could not be detected in numpy array");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_find_decodes_tables_and_handler_flattens_them() {
    let base_url = spawn_fake_engine().await;
    let engine = Arc::new(engine(&base_url));

    let tables = engine.find(FindParams::new("q.jpg", "db")).await.unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].len(), 2);

    let response = handle_find(FindParams::new("q.jpg", "db"), engine).await;
    assert_eq!(
        response.body,
        json!([
            { "identity": "db/alice.jpg", "threshold": 0.68, "distance": 0.11 },
            { "identity": "db/bob.jpg", "threshold": 0.68, "distance": 0.47 }
        ])
    );
}

#[tokio::test]
async fn test_analyze_runs_silently() {
    let base_url = spawn_fake_engine().await;

    let response = handle_analyze(AnalyzeParams::new("face.jpg"), Arc::new(engine(&base_url))).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body["results"][0]["echo"]["silent"], true);
}

#[tokio::test]
async fn test_unreachable_engine_becomes_error_payload() {
    // Bind then drop a listener to get a port nothing is serving on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let engine = Arc::new(engine(&format!("http://{}", addr)));
    let response = handle_find(FindParams::new("q.jpg", "db"), engine).await;

    assert_eq!(response.status, 400);
    let message = response.error_message().unwrap();
    assert!(message.starts_with("Exception while finding: Transport error: "));
}
