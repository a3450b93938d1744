//! Provider wire mapping (Google Gemini REST API).
//! API Documentation:     <https://ai.google.dev/api>
//!
//! Three surfaces are used:
//! - `models/{model}:generateContent` - one-shot generation
//! - `models/{model}:streamGenerateContent?alt=sse` - streaming generation
//! - `upload/v1beta/files` + `v1beta/{name}` - resumable upload, state fetch, delete
//!
//! There is exactly one upstream, so the mapping lives in this flat module
//! rather than behind a per-provider dispatch.

use crate::client::{AuthData, Endpoint, Headers};
use crate::files::RemoteFile;
use crate::r#gen::{GenRequest, GenResponse, MediaPart};
use crate::Result;
use serde_json::{json, Value};
use value_ext::JsonValueExt;

// region:    --- Constants

pub const BASE_URL: &str = "https://generativelanguage.googleapis.com/";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

// endregion: --- Constants

// region:    --- Urls & Headers

pub fn gen_url(endpoint: &Endpoint, model: &str) -> String {
	endpoint.join(&format!("v1beta/models/{model}:generateContent"))
}

pub fn gen_stream_url(endpoint: &Endpoint, model: &str) -> String {
	endpoint.join(&format!("v1beta/models/{model}:streamGenerateContent?alt=sse"))
}

pub fn upload_start_url(endpoint: &Endpoint) -> String {
	endpoint.join("upload/v1beta/files")
}

/// `name` is the opaque provider handle, e.g. `files/abc-123`.
pub fn file_url(endpoint: &Endpoint, name: &str) -> String {
	endpoint.join(&format!("v1beta/{name}"))
}

pub fn auth_headers(auth: &AuthData) -> Result<Headers> {
	let key = auth.single_key_value()?;
	Ok(Headers::from(("x-goog-api-key", key)))
}

/// Headers of the resumable-upload start call.
pub fn upload_start_headers(auth: &AuthData, content_len: usize, mime_type: &str) -> Result<Headers> {
	let headers = auth_headers(auth)?
		.append("X-Goog-Upload-Protocol", "resumable")
		.append("X-Goog-Upload-Command", "start")
		.append("X-Goog-Upload-Header-Content-Length", content_len.to_string())
		.append("X-Goog-Upload-Header-Content-Type", mime_type);
	Ok(headers)
}

/// Headers of the single upload+finalize body post.
pub fn upload_finalize_headers(auth: &AuthData, mime_type: &str) -> Result<Headers> {
	let headers = auth_headers(auth)?
		.append("X-Goog-Upload-Command", "upload, finalize")
		.append("X-Goog-Upload-Offset", "0")
		.append("Content-Type", mime_type);
	Ok(headers)
}

// endregion: --- Urls & Headers

// region:    --- Generation Payload & Response

/// Builds the `generateContent` payload: the prompt text first, then the
/// media parts in request order.
pub fn into_gen_payload(gen_req: &GenRequest) -> Value {
	let mut parts = vec![json!({"text": gen_req.prompt})];

	for part in &gen_req.parts {
		let part_value = match part {
			MediaPart::Inline { data, mime_type } => json!({
				"inlineData": {"mimeType": mime_type, "data": data}
			}),
			MediaPart::Remote { uri, mime_type } => json!({
				"fileData": {"fileUri": uri, "mimeType": mime_type}
			}),
		};
		parts.push(part_value);
	}

	json!({
		"contents": [{"role": "user", "parts": parts}]
	})
}

pub fn into_gen_response(mut body: Value) -> Result<GenResponse> {
	let mut candidates: Vec<Value> = body.x_take("candidates").unwrap_or_default();
	let text = candidates.first_mut().and_then(candidate_text);

	Ok(GenResponse { text })
}

/// Extracts the text chunk of one SSE event, if it carries any.
pub fn stream_chunk_text(data: &str) -> Result<Option<String>> {
	let mut body: Value = serde_json::from_str(data)?;
	let mut candidates: Vec<Value> = body.x_take("candidates").unwrap_or_default();

	Ok(candidates.first_mut().and_then(candidate_text))
}

/// Concatenated text of a candidate's parts; `None` when there is none or
/// it is empty (an empty answer is not a valid answer).
fn candidate_text(candidate: &mut Value) -> Option<String> {
	let parts: Vec<Value> = candidate.x_take("/content/parts").ok()?;

	let text: String = parts
		.iter()
		.filter_map(|part| part.x_get::<String>("text").ok())
		.collect();

	if text.is_empty() { None } else { Some(text) }
}

// endregion: --- Generation Payload & Response

// region:    --- Files

/// Parses a file-metadata body. The upload finalize response wraps the file
/// object under `"file"`; the get call returns it bare.
pub fn into_remote_file(mut body: Value) -> Result<RemoteFile> {
	let file_value: Value = body.x_take("file").unwrap_or(body);
	let file: RemoteFile = serde_json::from_value(file_value)?;

	Ok(file)
}

// endregion: --- Files

// region:    --- Tests

#[cfg(test)]
mod tests {
	use super::*;
	use crate::files::FileState;

	#[test]
	fn test_gen_payload_shape() {
		let req = GenRequest::from_prompt("describe the scene")
			.append_part(MediaPart::inline("QUJD", "image/jpeg"))
			.append_part(MediaPart::remote("https://p.example/files/v1", "video/mp4"));

		let payload = into_gen_payload(&req);

		let parts = payload.x_get::<Vec<Value>>("/contents/0/parts").unwrap();
		assert_eq!(parts.len(), 3);
		assert_eq!(parts[0].x_get::<String>("text").unwrap(), "describe the scene");
		assert_eq!(parts[1].x_get::<String>("/inlineData/mimeType").unwrap(), "image/jpeg");
		assert_eq!(parts[1].x_get::<String>("/inlineData/data").unwrap(), "QUJD");
		assert_eq!(parts[2].x_get::<String>("/fileData/fileUri").unwrap(), "https://p.example/files/v1");
	}

	#[test]
	fn test_gen_response_concatenates_candidate_parts() {
		let body = json!({
			"candidates": [{
				"content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "world"}]}
			}]
		});

		let res = into_gen_response(body).unwrap();

		assert_eq!(res.first_text(), Some("Hello, world"));
	}

	#[test]
	fn test_gen_response_empty_text_is_none() {
		let no_candidates = into_gen_response(json!({})).unwrap();
		assert!(no_candidates.first_text().is_none());

		let empty_part = into_gen_response(json!({
			"candidates": [{"content": {"parts": [{"text": ""}]}}]
		}))
		.unwrap();
		assert!(empty_part.first_text().is_none());
	}

	#[test]
	fn test_stream_chunk_text() {
		let data = r#"{"candidates": [{"content": {"parts": [{"text": "chunk-1"}]}}]}"#;
		assert_eq!(stream_chunk_text(data).unwrap(), Some("chunk-1".to_string()));

		let keep_alive = r#"{"usageMetadata": {"totalTokenCount": 7}}"#;
		assert_eq!(stream_chunk_text(keep_alive).unwrap(), None);
	}

	#[test]
	fn test_remote_file_wrapped_and_bare() {
		let wrapped = json!({
			"file": {"name": "files/abc", "uri": "https://p.example/v1beta/files/abc", "mimeType": "video/mp4", "state": "PROCESSING"}
		});
		let file = into_remote_file(wrapped).unwrap();
		assert_eq!(file.name, "files/abc");
		assert_eq!(file.state, FileState::Processing);

		let bare = json!({"name": "files/abc", "state": "ACTIVE"});
		let file = into_remote_file(bare).unwrap();
		assert!(file.is_active());
	}

	#[test]
	fn test_urls() {
		let endpoint = Endpoint::from_owned("http://127.0.0.1:9009/");

		assert_eq!(
			gen_url(&endpoint, "gemini-1.5-flash"),
			"http://127.0.0.1:9009/v1beta/models/gemini-1.5-flash:generateContent"
		);
		assert_eq!(upload_start_url(&endpoint), "http://127.0.0.1:9009/upload/v1beta/files");
		assert_eq!(file_url(&endpoint, "files/abc"), "http://127.0.0.1:9009/v1beta/files/abc");
	}
}

// endregion: --- Tests
