//! Integration tests for `HttpBriefClient` against an in-process server.

use std::sync::{Arc, Mutex};

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use brief_client::{BriefService, ClientError, HttpBriefClient};
use brief_core::types::{BriefRunRequest, ConversationTurn, DocumentReference};
use brief_core::BriefConfig;

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(base_url: String) -> HttpBriefClient {
    HttpBriefClient::new(&BriefConfig {
        base_url,
        timeout_secs: 5,
    })
}

fn sample_request() -> BriefRunRequest {
    BriefRunRequest {
        conversation: vec![ConversationTurn::user("Build a marketplace app")],
        documents: vec![DocumentReference::new("d0", "notes.md")],
        prompt: None,
        thread_id: Some("thread-1".to_string()),
    }
}

fn success_body() -> Value {
    json!({
        "summary": {"project_title": "Marketplace"},
        "brief": {"project_title": "Marketplace", "timeline": "8 weeks"},
        "follow_up_questions": ["What is your budget?"],
        "thread_id": "thread-2",
        "assistant_message": "Tell me more."
    })
}

// ---- Brief run ----

#[tokio::test]
async fn run_brief_success_round_trip() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let seen_handler = Arc::clone(&seen);

    let app = Router::new().route(
        "/briefs/run",
        post(move |Json(body): Json<Value>| {
            let seen = Arc::clone(&seen_handler);
            async move {
                *seen.lock().unwrap() = Some(body);
                Json(success_body())
            }
        }),
    );
    let base = spawn_server(app).await;

    let payload = client_for(base).run_brief(&sample_request()).await.unwrap();
    assert_eq!(payload.thread_id, "thread-2");
    assert_eq!(payload.follow_up_questions, vec!["What is your budget?"]);
    assert_eq!(payload.summary.project_title, "Marketplace");

    let observed = seen.lock().unwrap().take().unwrap();
    assert_eq!(observed["thread_id"], "thread-1");
    assert_eq!(observed["conversation"][0]["role"], "user");
    assert_eq!(
        observed["conversation"][0]["content"],
        "Build a marketplace app"
    );
    assert_eq!(observed["documents"][0]["id"], "d0");
    // Absent optionals must not be serialized at all.
    assert!(observed.get("prompt").is_none());
}

#[tokio::test]
async fn run_brief_non_success_status_is_request_failed() {
    let app = Router::new().route(
        "/briefs/run",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_server(app).await;

    let err = client_for(base)
        .run_brief(&sample_request())
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::RequestFailed { status: 500 });
}

#[tokio::test]
async fn run_brief_unprocessable_status_is_request_failed() {
    let app = Router::new().route(
        "/briefs/run",
        post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, "bad request") }),
    );
    let base = spawn_server(app).await;

    let err = client_for(base)
        .run_brief(&sample_request())
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::RequestFailed { status: 422 });
}

#[tokio::test]
async fn run_brief_garbage_body_is_malformed() {
    let app = Router::new().route("/briefs/run", post(|| async { "not json at all" }));
    let base = spawn_server(app).await;

    let err = client_for(base)
        .run_brief(&sample_request())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse(_)));
}

#[tokio::test]
async fn run_brief_missing_thread_id_is_malformed() {
    let app = Router::new().route(
        "/briefs/run",
        post(|| async {
            Json(json!({
                "summary": {},
                "brief": {},
                "follow_up_questions": []
            }))
        }),
    );
    let base = spawn_server(app).await;

    let err = client_for(base)
        .run_brief(&sample_request())
        .await
        .unwrap_err();
    match err {
        ClientError::MalformedResponse(msg) => assert!(msg.contains("thread_id")),
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn run_brief_unreachable_server_is_transport() {
    // Bind then drop to get an address nothing is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(format!("http://{}", addr))
        .run_brief(&sample_request())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

// ---- Uploads ----

#[tokio::test]
async fn upload_document_returns_server_reference() {
    let seen_name: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let seen_handler = Arc::clone(&seen_name);

    let app = Router::new().route(
        "/uploads",
        post(move |mut multipart: Multipart| {
            let seen = Arc::clone(&seen_handler);
            async move {
                while let Some(field) = multipart.next_field().await.unwrap() {
                    if field.name() == Some("file") {
                        *seen.lock().unwrap() = field.file_name().map(|s| s.to_string());
                        let _ = field.bytes().await.unwrap();
                    }
                }
                Json(json!({"document": {"id": "d1", "name": "spec.pdf"}}))
            }
        }),
    );
    let base = spawn_server(app).await;

    let reference = client_for(base)
        .upload_document("spec.pdf", b"%PDF-1.4".to_vec())
        .await
        .unwrap();
    assert_eq!(reference.id, "d1");
    assert_eq!(reference.name, "spec.pdf");
    assert_eq!(seen_name.lock().unwrap().as_deref(), Some("spec.pdf"));
}

#[tokio::test]
async fn upload_non_success_status_is_upload_failed() {
    let app = Router::new().route(
        "/uploads",
        post(|| async { (StatusCode::PAYLOAD_TOO_LARGE, "too big") }),
    );
    let base = spawn_server(app).await;

    let err = client_for(base)
        .upload_document("spec.pdf", vec![0u8; 16])
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::UploadFailed { status: 413 });
}

#[tokio::test]
async fn upload_garbage_body_is_malformed() {
    let app = Router::new().route("/uploads", post(|| async { "ok" }));
    let base = spawn_server(app).await;

    let err = client_for(base)
        .upload_document("spec.pdf", vec![0u8; 16])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse(_)));
}
