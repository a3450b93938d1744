//! Route-level tests against a scripted in-process fake provider.
//!
//! The fake is a real axum server on `127.0.0.1:0`; the app under test is
//! pointed at it through its `ServiceTarget` endpoint and exercised with
//! `oneshot` requests, so no app socket is needed.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use promptgate::{AuthData, Client, Endpoint, ServiceTarget};
use promptgate_server::server::{AppState, build_router};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::util::ServiceExt;

// ---------------------------------------------------------------------------
// Fake provider
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeProvider {
    base: String,
    generate_calls: AtomicUsize,
    upload_calls: AtomicUsize,
    file_get_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    /// Scripted states drained one per state fetch; `ACTIVE` once exhausted.
    file_states: Mutex<VecDeque<&'static str>>,
    stream_chunks: Vec<&'static str>,
    /// Answer generation calls with zero candidates.
    empty_reply: bool,
    last_gen_payload: Mutex<Option<Value>>,
}

impl FakeProvider {
    fn provider_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
            + self.upload_calls.load(Ordering::SeqCst)
            + self.file_get_calls.load(Ordering::SeqCst)
            + self.delete_calls.load(Ordering::SeqCst)
    }

    fn last_parts(&self) -> Vec<Value> {
        let payload = self.last_gen_payload.lock().unwrap();
        payload
            .as_ref()
            .and_then(|p| p.pointer("/contents/0/parts"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }
}

async fn models_call(
    State(fake): State<Arc<FakeProvider>>,
    Path(call): Path<String>,
    Json(payload): Json<Value>,
) -> Response {
    fake.generate_calls.fetch_add(1, Ordering::SeqCst);
    *fake.last_gen_payload.lock().unwrap() = Some(payload.clone());

    if call.ends_with(":streamGenerateContent") {
        // A metadata-only event first; it carries no text and must be skipped.
        let mut body = format!("data: {}\n\n", json!({"usageMetadata": {"totalTokenCount": 3}}));
        for chunk in &fake.stream_chunks {
            let event = json!({"candidates": [{"content": {"parts": [{"text": chunk}]}}]});
            body.push_str(&format!("data: {event}\n\n"));
        }
        return ([(header::CONTENT_TYPE, "text/event-stream")], body).into_response();
    }

    if fake.empty_reply {
        return Json(json!({"candidates": []})).into_response();
    }

    // Echo double: reply with exactly the prompt text it received.
    let prompt = payload
        .pointer("/contents/0/parts/0/text")
        .and_then(Value::as_str)
        .unwrap_or_default();
    Json(json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": prompt}]}}]
    }))
    .into_response()
}

async fn upload_start(State(fake): State<Arc<FakeProvider>>) -> Response {
    fake.upload_calls.fetch_add(1, Ordering::SeqCst);
    (
        [("x-goog-upload-url", format!("{}/upload-session", fake.base))],
        Json(json!({})),
    )
        .into_response()
}

async fn upload_finalize(State(fake): State<Arc<FakeProvider>>) -> Json<Value> {
    Json(json!({
        "file": {
            "name": "files/fake-1",
            "uri": format!("{}/v1beta/files/fake-1", fake.base),
            "mimeType": "video/mp4",
            "state": "PROCESSING"
        }
    }))
}

async fn file_get(State(fake): State<Arc<FakeProvider>>) -> Json<Value> {
    fake.file_get_calls.fetch_add(1, Ordering::SeqCst);
    let state = fake.file_states.lock().unwrap().pop_front().unwrap_or("ACTIVE");
    Json(json!({
        "name": "files/fake-1",
        "uri": format!("{}/v1beta/files/fake-1", fake.base),
        "mimeType": "video/mp4",
        "state": state
    }))
}

async fn file_delete(State(fake): State<Arc<FakeProvider>>) -> Json<Value> {
    fake.delete_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({}))
}

async fn spawn_fake_provider(
    file_states: &[&'static str],
    stream_chunks: &[&'static str],
    empty_reply: bool,
) -> Arc<FakeProvider> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let fake = Arc::new(FakeProvider {
        base: format!("http://{addr}"),
        file_states: Mutex::new(file_states.iter().copied().collect()),
        stream_chunks: stream_chunks.to_vec(),
        empty_reply,
        ..FakeProvider::default()
    });

    let router = Router::new()
        .route("/v1beta/models/{call}", post(models_call))
        .route("/upload/v1beta/files", post(upload_start))
        .route("/upload-session", post(upload_finalize))
        .route("/v1beta/files/{id}", get(file_get).delete(file_delete))
        .with_state(fake.clone());

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    fake
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

struct Harness {
    app: Router,
    fake: Arc<FakeProvider>,
    _media_dir: tempfile::TempDir,
}

async fn setup(media_files: &[&str], file_states: &[&'static str]) -> Harness {
    setup_with(media_files, file_states, &["Hello", ", ", "world"], false).await
}

async fn setup_with(
    media_files: &[&str],
    file_states: &[&'static str],
    stream_chunks: &[&'static str],
    empty_reply: bool,
) -> Harness {
    let fake = spawn_fake_provider(file_states, stream_chunks, empty_reply).await;

    let media_dir = tempfile::tempdir().unwrap();
    for file in media_files {
        std::fs::write(media_dir.path().join(file), b"sample-bytes").unwrap();
    }

    let client = Client::builder().with_poll_interval(Duration::from_millis(5)).build();
    let target = ServiceTarget::default()
        .with_auth(AuthData::from_single("test-key"))
        .with_endpoint(Endpoint::from_owned(format!("{}/", fake.base)));

    let state = Arc::new(AppState {
        client,
        target,
        media_dir: media_dir.path().to_path_buf(),
    });

    Harness {
        app: build_router(state),
        fake,
        _media_dir: media_dir,
    }
}

async fn post_json(app: &Router, path: &str, body: Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_json(res: Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(res: Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Waits (bounded) for work that runs off the response path.
async fn wait_until(what: &str, predicate: impl Fn() -> bool) {
    for _ in 0..200 {
        if predicate() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for: {what}");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

const GENERATE_ROUTES: [&str; 6] = [
    "/generate-text",
    "/generate-text-streaming",
    "/generate-with-image",
    "/generate-with-images",
    "/generate-with-audio",
    "/generate-with-video",
];

#[tokio::test]
async fn test_missing_prompt_rejected_on_every_route() {
    let harness = setup(&["jetpack.jpg", "samplesmall.mp3", "Big_Buck_Bunny.mp4"], &[]).await;

    for route in GENERATE_ROUTES {
        for body in [json!({}), json!({"prompt": ""})] {
            let res = post_json(&harness.app, route, body).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "route {route}");

            let body = body_json(res).await;
            assert_eq!(body["error"], "Prompt is required", "route {route}");
        }
    }

    assert_eq!(harness.fake.provider_calls(), 0, "no provider call may be made without a prompt");
}

#[tokio::test]
async fn test_generate_text_echoes_provider_output() {
    let harness = setup(&[], &[]).await;

    let res = post_json(&harness.app, "/generate-text", json!({"prompt": "why is the sky blue"})).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res).await;
    assert_eq!(body["text"], "why is the sky blue");
    assert_eq!(harness.fake.generate_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_generate_text_empty_provider_result_is_error() {
    let harness = setup_with(&[], &[], &[], true).await;

    let res = post_json(&harness.app, "/generate-text", json!({"prompt": "anything"})).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(res).await;
    assert_eq!(body["error"], "Error generating text");
}

#[tokio::test]
async fn test_generate_with_image_includes_inline_part() {
    let harness = setup(&["jetpack.jpg"], &[]).await;

    let res = post_json(&harness.app, "/generate-with-image", json!({"prompt": "describe"})).await;
    assert_eq!(res.status(), StatusCode::OK);

    let parts = harness.fake.last_parts();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["text"], "describe");
    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
}

#[tokio::test]
async fn test_generate_with_image_missing_file() {
    let harness = setup(&[], &[]).await;

    let res = post_json(&harness.app, "/generate-with-image", json!({"prompt": "describe"})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = body_json(res).await;
    assert_eq!(body["error"], "Image file not found");
    assert_eq!(harness.fake.provider_calls(), 0);
}

#[tokio::test]
async fn test_generate_with_images_partial_subset() {
    // 1 of the 3 configured images resolves; the request proceeds with it.
    let harness = setup(&["piranha.jpg"], &[]).await;

    let res = post_json(&harness.app, "/generate-with-images", json!({"prompt": "compare"})).await;
    assert_eq!(res.status(), StatusCode::OK);

    let parts = harness.fake.last_parts();
    assert_eq!(parts.len(), 2, "prompt plus exactly one resolved image");
    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
}

#[tokio::test]
async fn test_generate_with_images_all_missing() {
    let harness = setup(&[], &[]).await;

    let res = post_json(&harness.app, "/generate-with-images", json!({"prompt": "compare"})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = body_json(res).await;
    assert_eq!(body["error"], "No valid image files found");
    assert_eq!(harness.fake.provider_calls(), 0);
}

#[tokio::test]
async fn test_generate_with_audio_missing_file() {
    let harness = setup(&[], &[]).await;

    let res = post_json(&harness.app, "/generate-with-audio", json!({"prompt": "transcribe"})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = body_json(res).await;
    assert_eq!(body["error"], "Audio file not found");
    assert_eq!(harness.fake.provider_calls(), 0);
}

#[tokio::test]
async fn test_generate_with_video_polls_until_active() {
    // PROCESSING exactly twice, then ACTIVE: three state fetches, and only
    // then the generation call.
    let harness = setup(&["Big_Buck_Bunny.mp4"], &["PROCESSING", "PROCESSING", "ACTIVE"]).await;

    let res = post_json(&harness.app, "/generate-with-video", json!({"prompt": "summarize"})).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res).await;
    assert_eq!(body["text"], "summarize");

    assert_eq!(harness.fake.upload_calls.load(Ordering::SeqCst), 1, "submitted exactly once");
    assert_eq!(harness.fake.file_get_calls.load(Ordering::SeqCst), 3, "polled exactly three times");
    assert_eq!(harness.fake.generate_calls.load(Ordering::SeqCst), 1);

    let parts = harness.fake.last_parts();
    assert_eq!(parts[1]["fileData"]["mimeType"], "video/mp4");

    // Cleanup runs off the response path.
    let fake = harness.fake.clone();
    wait_until("remote file delete", move || {
        fake.delete_calls.load(Ordering::SeqCst) == 1
    })
    .await;
}

#[tokio::test]
async fn test_generate_with_video_failed_processing() {
    let harness = setup(&["Big_Buck_Bunny.mp4"], &["FAILED"]).await;

    let res = post_json(&harness.app, "/generate-with-video", json!({"prompt": "summarize"})).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(res).await;
    assert_eq!(body["error"], "Error generating with video");

    assert_eq!(harness.fake.generate_calls.load(Ordering::SeqCst), 0, "a FAILED upload must never reach generation");
    assert_eq!(harness.fake.delete_calls.load(Ordering::SeqCst), 0, "no cleanup on the failure path");
}

#[tokio::test]
async fn test_generate_with_video_missing_file() {
    let harness = setup(&[], &[]).await;

    let res = post_json(&harness.app, "/generate-with-video", json!({"prompt": "summarize"})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = body_json(res).await;
    assert_eq!(body["error"], "Video file not found");
    assert_eq!(harness.fake.provider_calls(), 0);
}

#[tokio::test]
async fn test_streaming_route_chunk_order() {
    let harness = setup_with(&[], &[], &["Hello", ", ", "world"], false).await;

    let res = post_json(&harness.app, "/generate-text-streaming", json!({"prompt": "greet"})).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );

    // Collecting the body consumes the stream to its end, so this also
    // checks the body terminates after the last chunk.
    let text = body_text(res).await;
    assert_eq!(text, "Hello, world");
}

#[tokio::test]
async fn test_public_static_serving() {
    let harness = setup(&["jetpack.jpg"], &[]).await;

    let res = harness
        .app
        .clone()
        .oneshot(Request::builder().uri("/public/jetpack.jpg").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "sample-bytes");

    let res = harness
        .app
        .clone()
        .oneshot(Request::builder().uri("/public/absent.jpg").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
