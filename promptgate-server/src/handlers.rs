use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use promptgate::r#gen::{GenRequest, GenStreamEvent, MediaPart};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::future::Future;
use std::sync::Arc;

use crate::server::AppState;

/// Fixed sample assets, resolved against the media directory.
pub const IMAGE_FILE: &str = "jetpack.jpg";
pub const IMAGE_FILES: [&str; 3] = ["jetpack.jpg", "piranha.jpg", "firefighter.jpg"];
pub const AUDIO_FILE: &str = "samplesmall.mp3";
pub const VIDEO_FILE: &str = "Big_Buck_Bunny.mp4";

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct GenerateBody {
    #[serde(default)]
    prompt: Option<String>,
}

impl GenerateBody {
    /// The prompt; absent or empty is a client error, checked before anything
    /// else so no provider call is made for it.
    fn prompt(&self) -> Result<&str, ApiError> {
        match self.prompt.as_deref() {
            Some(prompt) if !prompt.is_empty() => Ok(prompt),
            _ => Err(ApiError::bad_request("Prompt is required")),
        }
    }
}

#[derive(Serialize)]
pub struct GenerateResponse {
    text: String,
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// Route-boundary error: a status plus a generic message. Upstream detail is
/// logged, never echoed to the caller.
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    fn bad_request(message: &'static str) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    fn internal(message: &'static str) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({"error": self.message}))).into_response()
    }
}

/// Logs the library error and converts it to a generic 500.
fn gen_failure(message: &'static str) -> impl FnOnce(promptgate::Error) -> ApiError {
    move |err| {
        tracing::error!(error = %err, "{message}");
        ApiError::internal(message)
    }
}

// ---------------------------------------------------------------------------
// Shared handler plumbing
// ---------------------------------------------------------------------------

/// Runs the provider work of an accepted request on a detached task: once
/// validation has passed, the work runs to completion or failure even if the
/// caller disconnects (dropping the connection does not cancel it).
async fn run_detached<T, F>(failure_message: &'static str, work: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(work).await.map_err(|err| {
        tracing::error!(error = %err, "request task aborted");
        ApiError::internal(failure_message)
    })?
}

/// Loads one fixed asset as an inline part; a missing file is a client error
/// raised before any provider call.
async fn load_inline_part(
    state: &AppState,
    file: &str,
    missing_message: &'static str,
    failure_message: &'static str,
) -> Result<MediaPart, ApiError> {
    match MediaPart::inline_from_path(state.media_dir.join(file)).await {
        Ok(part) => Ok(part),
        Err(promptgate::Error::MediaFileNotFound { path }) => {
            tracing::warn!(path = %path, "media file not found");
            Err(ApiError::bad_request(missing_message))
        }
        Err(err) => Err(gen_failure(failure_message)(err)),
    }
}

async fn exec_to_text(
    state: &AppState,
    gen_req: GenRequest,
    failure_message: &'static str,
) -> Result<String, ApiError> {
    state
        .client
        .exec_gen(&state.target, gen_req)
        .await
        .and_then(|res| res.into_text())
        .map_err(gen_failure(failure_message))
}

// ---------------------------------------------------------------------------
// POST /generate-text
// ---------------------------------------------------------------------------

pub async fn generate_text(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let prompt = body.prompt()?;
    let gen_req = GenRequest::from_prompt(prompt);

    let text = run_detached("Error generating text", async move {
        exec_to_text(&state, gen_req, "Error generating text").await
    })
    .await?;

    Ok(Json(GenerateResponse { text }))
}

// ---------------------------------------------------------------------------
// POST /generate-text-streaming
// ---------------------------------------------------------------------------

/// Streams the generated text as a chunked `text/plain` body, chunks in
/// provider order. Once the 200 head is sent, a mid-stream failure can only
/// leave the body incomplete.
pub async fn generate_text_streaming(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateBody>,
) -> Result<Response, ApiError> {
    let prompt = body.prompt()?;

    let gen_req = GenRequest::from_prompt(prompt);
    let stream_res = state
        .client
        .exec_gen_stream(&state.target, gen_req)
        .await
        .map_err(gen_failure("Error streaming text"))?;

    let chunks = stream_res.stream.filter_map(|event| async move {
        match event {
            Ok(GenStreamEvent::Chunk(text)) => Some(Ok(bytes::Bytes::from(text))),
            Ok(GenStreamEvent::End) => None,
            Err(err) => {
                tracing::error!(error = %err, "stream broke mid-flight, response left incomplete");
                Some(Err(axum::Error::new(err)))
            }
        }
    });

    let response = (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(chunks),
    )
        .into_response();

    Ok(response)
}

// ---------------------------------------------------------------------------
// POST /generate-with-image
// ---------------------------------------------------------------------------

pub async fn generate_with_image(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let prompt = body.prompt()?;
    let part = load_inline_part(&state, IMAGE_FILE, "Image file not found", "Error generating with image").await?;
    let gen_req = GenRequest::from_prompt(prompt).append_part(part);

    let text = run_detached("Error generating with image", async move {
        exec_to_text(&state, gen_req, "Error generating with image").await
    })
    .await?;

    Ok(Json(GenerateResponse { text }))
}

// ---------------------------------------------------------------------------
// POST /generate-with-images
// ---------------------------------------------------------------------------

/// Tolerates individually missing files and proceeds with the resolvable
/// subset; only zero resolvable images is a client error.
pub async fn generate_with_images(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let prompt = body.prompt()?;

    let mut parts = Vec::new();
    for file in IMAGE_FILES {
        match MediaPart::inline_from_path(state.media_dir.join(file)).await {
            Ok(part) => parts.push(part),
            Err(promptgate::Error::MediaFileNotFound { path }) => {
                tracing::warn!(path = %path, "skipping missing image");
            }
            Err(err) => return Err(gen_failure("Error generating with multiple images")(err)),
        }
    }

    if parts.is_empty() {
        return Err(ApiError::bad_request("No valid image files found"));
    }

    let gen_req = GenRequest::from_prompt(prompt).with_parts(parts);

    let text = run_detached("Error generating with multiple images", async move {
        exec_to_text(&state, gen_req, "Error generating with multiple images").await
    })
    .await?;

    Ok(Json(GenerateResponse { text }))
}

// ---------------------------------------------------------------------------
// POST /generate-with-audio
// ---------------------------------------------------------------------------

pub async fn generate_with_audio(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let prompt = body.prompt()?;
    let part = load_inline_part(&state, AUDIO_FILE, "Audio file not found", "Error generating with audio").await?;
    let gen_req = GenRequest::from_prompt(prompt).append_part(part);

    let text = run_detached("Error generating with audio", async move {
        exec_to_text(&state, gen_req, "Error generating with audio").await
    })
    .await?;

    Ok(Json(GenerateResponse { text }))
}

// ---------------------------------------------------------------------------
// POST /generate-with-video
// ---------------------------------------------------------------------------

/// The asynchronous media path: upload once, poll until the provider reports
/// the file active, then reference it in the generation call. Only an active
/// file is ever referenced; a FAILED state aborts the request.
pub async fn generate_with_video(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let prompt = body.prompt()?.to_string();

    let video_path = state.media_dir.join(VIDEO_FILE);
    if !video_path.exists() {
        return Err(ApiError::bad_request("Video file not found"));
    }

    let text = run_detached("Error generating with video", async move {
        let uploaded = state
            .client
            .upload_media(&state.target, &video_path)
            .await
            .map_err(gen_failure("Error generating with video"))?;

        let active = state
            .client
            .await_media_active(&state.target, &uploaded)
            .await
            .map_err(gen_failure("Error generating with video"))?;

        let gen_req = GenRequest::from_prompt(prompt).append_part(MediaPart::from(&active));
        let text = exec_to_text(&state, gen_req, "Error generating with video").await?;

        // Cleanup is off the response path: the reply stands whether or not
        // the delete succeeds, and a failure is only logged. On generation
        // failure nothing is deleted, so the remote file is left behind
        // (known leak, see DESIGN.md).
        let client = state.client.clone();
        let target = state.target.clone();
        tokio::spawn(async move {
            if let Err(err) = client.delete_media(&target, &active.name).await {
                tracing::warn!(name = %active.name, error = %err, "remote media cleanup failed");
            }
        });

        Ok(text)
    })
    .await?;

    Ok(Json(GenerateResponse { text }))
}
