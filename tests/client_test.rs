//! キャプションAPI連携テスト
//!
//! axumで立てたモックのキャプションAPIに対して送信〜結果反映までを検証

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use caption_form::client::CaptionClient;
use caption_form::error::CaptionFormError;
use caption_form::session::Session;
use caption_form_common::{CaptionError, ClientConfig, FormPhase, SelectedFile};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// モックが受け取ったmultipartのパート
#[derive(Debug, Clone)]
struct ReceivedPart {
    field: String,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Clone, Default)]
struct Received(Arc<Mutex<Vec<Vec<ReceivedPart>>>>);

impl Received {
    fn requests(&self) -> Vec<Vec<ReceivedPart>> {
        self.0.lock().unwrap().clone()
    }
}

async fn record(State(received): State<Received>, mut multipart: Multipart) -> impl IntoResponse {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap().to_vec();
        parts.push(ReceivedPart {
            field: name,
            file_name,
            content_type,
            bytes,
        });
    }
    received.0.lock().unwrap().push(parts);
    Json(json!({ "caption": "a dog running" }))
}

async fn reject() -> impl IntoResponse {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": "invalid image" })))
}

async fn crash() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn blank() -> impl IntoResponse {
    Json(json!({ "caption": "" }))
}

async fn slow() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!({ "caption": "too late" }))
}

/// モックAPIを起動してオリジンを返す
async fn spawn_service(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn dog_png() -> SelectedFile {
    SelectedFile::from_bytes("dog.png", vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A]).unwrap()
}

fn session_for(origin: &str, timeout: Duration) -> Session {
    let config = ClientConfig::new(origin).with_timeout(timeout);
    Session::new(CaptionClient::new(&config).expect("クライアント作成失敗"))
}

#[tokio::test]
async fn test_caption_success_sends_one_multipart_image() {
    let received = Received::default();
    let app = Router::new()
        .route("/api/caption", post(record))
        .with_state(received.clone());
    let origin = spawn_service(app).await;

    let mut session = session_for(&origin, Duration::from_secs(5));
    session.select(Some(dog_png())).await.unwrap();
    assert!(session.form().preview().is_some());

    let caption = session.submit().await.expect("送信失敗");
    assert_eq!(caption, "a dog running");
    assert_eq!(session.form().phase(), FormPhase::Resolved);
    assert_eq!(session.form().visible_caption(), Some("a dog running"));
    assert_eq!(session.form().visible_error(), None);
    assert!(!session.form().is_loading());
    assert!(session.form().can_submit());

    let requests = received.requests();
    assert_eq!(requests.len(), 1);
    let parts = &requests[0];
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].field, "image");
    assert_eq!(parts[0].file_name.as_deref(), Some("dog.png"));
    assert_eq!(parts[0].content_type.as_deref(), Some("image/png"));
    assert_eq!(parts[0].bytes, dog_png().bytes);
}

#[tokio::test]
async fn test_submit_without_file_sends_nothing() {
    let received = Received::default();
    let app = Router::new()
        .route("/api/caption", post(record))
        .with_state(received.clone());
    let origin = spawn_service(app).await;

    let mut session = session_for(&origin, Duration::from_secs(5));
    let result = session.submit().await;

    assert!(matches!(result, Err(CaptionFormError::Caption(CaptionError::NoFileSelected))));
    assert_eq!(session.form().phase(), FormPhase::Idle);
    assert_eq!(session.form().visible_error(), Some("Please select an image file first."));
    assert!(received.requests().is_empty());
}

#[tokio::test]
async fn test_service_error_shown_verbatim() {
    let origin = spawn_service(Router::new().route("/api/caption", post(reject))).await;

    let mut session = session_for(&origin, Duration::from_secs(5));
    session.select(Some(dog_png())).await.unwrap();
    let err = session.submit().await.unwrap_err();

    assert_eq!(format!("{}", err), "invalid image");
    assert_eq!(session.form().phase(), FormPhase::Failed);
    assert_eq!(session.form().visible_error(), Some("invalid image"));
    assert_eq!(session.form().visible_caption(), None);
    assert!(session.form().can_submit());
}

#[tokio::test]
async fn test_status_without_error_body() {
    let origin = spawn_service(Router::new().route("/api/caption", post(crash))).await;

    let client = CaptionClient::new(&ClientConfig::new(origin)).unwrap();
    let result = client.caption(&dog_png()).await;
    assert_eq!(
        result,
        Err(CaptionError::Transport("Request failed with status code 500".into()))
    );
}

#[tokio::test]
async fn test_empty_caption_is_unknown_error() {
    let origin = spawn_service(Router::new().route("/api/caption", post(blank))).await;

    let mut session = session_for(&origin, Duration::from_secs(5));
    session.select(Some(dog_png())).await.unwrap();
    let result = session.submit().await;

    assert!(matches!(result, Err(CaptionFormError::Caption(CaptionError::Unknown))));
    assert_eq!(session.form().phase(), FormPhase::Failed);
    assert_eq!(session.form().visible_caption(), None);
    assert_eq!(
        session.form().visible_error(),
        Some("An unknown error occurred while generating the caption.")
    );
}

#[tokio::test]
async fn test_timeout() {
    let origin = spawn_service(Router::new().route("/api/caption", post(slow))).await;

    let mut session = session_for(&origin, Duration::from_millis(200));
    session.select(Some(dog_png())).await.unwrap();
    let result = session.submit().await;

    assert!(matches!(result, Err(CaptionFormError::Caption(CaptionError::Timeout))));
    assert_eq!(session.form().phase(), FormPhase::Failed);
    assert_eq!(session.form().visible_error(), Some("Request timeout. Please try again."));
    assert!(!session.form().is_loading());
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // 一度バインドして閉じたポートには誰もいない
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut session = session_for(&format!("http://{}", addr), Duration::from_secs(5));
    session.select(Some(dog_png())).await.unwrap();
    let result = session.submit().await;

    assert!(matches!(result, Err(CaptionFormError::Caption(CaptionError::Transport(_)))));
    assert_eq!(session.form().phase(), FormPhase::Failed);
    let error = session.form().visible_error().expect("エラーなし");
    assert!(error.starts_with("Network error: "), "unexpected: {}", error);
}

#[tokio::test]
async fn test_form_usable_after_failure() {
    let received = Received::default();
    let app = Router::new()
        .route("/api/caption", post(record))
        .route("/broken/api/caption", post(reject))
        .with_state(received.clone());
    let origin = spawn_service(app).await;

    let mut broken = session_for(&format!("{}/broken", origin), Duration::from_secs(5));
    broken.select(Some(dog_png())).await.unwrap();
    assert!(broken.submit().await.is_err());
    assert_eq!(broken.form().phase(), FormPhase::Failed);
    assert!(broken.form().can_submit());

    let mut session = session_for(&origin, Duration::from_secs(5));
    session.select(Some(dog_png())).await.unwrap();
    assert_eq!(session.submit().await.unwrap(), "a dog running");
    assert_eq!(session.submit().await.unwrap(), "a dog running");
    assert_eq!(session.form().phase(), FormPhase::Resolved);
    assert_eq!(received.requests().len(), 2);
}
