use crate::files::{FileState, RemoteFile};
use crate::r#gen::{GenRequest, GenResponse, GenStreamEvent, GenStreamResponse};
use crate::provider;
use crate::{Client, Error, Result, ServiceTarget};
use futures::StreamExt;
use serde_json::json;
use std::path::Path;

/// Generation
impl Client {
	/// Executes one generation call: the prompt plus every media part in one
	/// round trip.
	pub async fn exec_gen(&self, target: &ServiceTarget, gen_req: GenRequest) -> Result<GenResponse> {
		let url = provider::gen_url(&target.endpoint, &target.model);
		let headers = provider::auth_headers(&target.auth)?;
		let payload = provider::into_gen_payload(&gen_req);

		let web_res = self.web_client().do_post(&url, &headers, payload).await?;

		provider::into_gen_response(web_res.body)
	}

	/// Executes a streaming generation call.
	///
	/// Chunks are emitted in provider order; `GenStreamEvent::End` follows the
	/// last one. An `Err` item means the provider stream broke mid-way.
	pub async fn exec_gen_stream(&self, target: &ServiceTarget, gen_req: GenRequest) -> Result<GenStreamResponse> {
		let url = provider::gen_stream_url(&target.endpoint, &target.model);
		let headers = provider::auth_headers(&target.auth)?;
		let payload = provider::into_gen_payload(&gen_req);

		let sse = self.web_client().do_post_sse(&url, &headers, payload).await?;

		let chunks = sse.filter_map(|event| async move {
			match event {
				Ok(event) => match provider::stream_chunk_text(&event.data) {
					Ok(Some(text)) => Some(Ok(GenStreamEvent::Chunk(text))),
					// Keep-alive or metadata-only events carry no text.
					Ok(None) => None,
					Err(err) => Some(Err(err)),
				},
				Err(err) => Some(Err(Error::Stream { cause: err.to_string() })),
			}
		});
		let stream = chunks.chain(futures::stream::once(async { Ok(GenStreamEvent::End) }));

		Ok(GenStreamResponse { stream: Box::pin(stream) })
	}
}

/// Remote media (asynchronous upload protocol)
impl Client {
	/// Uploads a local media file to the provider and returns its handle.
	///
	/// Submits exactly once, via the provider's resumable handshake (a start
	/// call yielding an upload URL, then one upload+finalize body post). The
	/// returned state is usually still `Processing`; callers go through
	/// [`Client::await_media_active`] before referencing the file.
	pub async fn upload_media(&self, target: &ServiceTarget, path: impl AsRef<Path>) -> Result<RemoteFile> {
		let path = path.as_ref();
		if !path.exists() {
			return Err(Error::MediaFileNotFound {
				path: path.display().to_string(),
			});
		}

		let mime_type = mime_guess::from_path(path).first_or_octet_stream().to_string();
		let content = tokio::fs::read(path).await?;
		let display_name = path.file_name().and_then(|name| name.to_str()).unwrap_or("upload");

		let start_url = provider::upload_start_url(&target.endpoint);
		let start_headers = provider::upload_start_headers(&target.auth, content.len(), &mime_type)?;
		let start_payload = json!({"file": {"display_name": display_name}});
		let start_res = self.web_client().do_post(&start_url, &start_headers, start_payload).await?;

		let upload_url = start_res
			.header("x-goog-upload-url")
			.ok_or(Error::UploadUrlMissing)?
			.to_string();

		let finalize_headers = provider::upload_finalize_headers(&target.auth, &mime_type)?;
		let finalize_res = self
			.web_client()
			.do_post_bytes(&upload_url, &finalize_headers, content)
			.await?;

		let file = provider::into_remote_file(finalize_res.body)?;
		tracing::debug!(name = %file.name, mime_type = %file.mime_type, "media submitted");

		Ok(file)
	}

	/// Fetches the current provider-side metadata (including state) of a file.
	pub async fn get_media(&self, target: &ServiceTarget, name: &str) -> Result<RemoteFile> {
		let url = provider::file_url(&target.endpoint, name);
		let headers = provider::auth_headers(&target.auth)?;

		let web_res = self.web_client().do_get(&url, &headers).await?;

		provider::into_remote_file(web_res.body)
	}

	/// Polls the provider until the file leaves processing.
	///
	/// Each round fetches a fresh state (the provider owns it; nothing is
	/// cached between polls). While processing, suspends on the configured
	/// interval timer and re-fetches. There is no retry cap or overall
	/// timeout: a file that never settles keeps this future pending. A
	/// `Failed` state aborts and is never retried.
	pub async fn await_media_active(&self, target: &ServiceTarget, file: &RemoteFile) -> Result<RemoteFile> {
		let interval = self.config().poll_interval();

		loop {
			let current = self.get_media(target, &file.name).await?;
			match current.state {
				FileState::Active => return Ok(current),
				FileState::Failed => {
					tracing::warn!(name = %current.name, "media processing failed");
					return Err(Error::FileProcessingFailed { name: current.name });
				}
				FileState::Processing | FileState::Unspecified => {
					tracing::debug!(name = %current.name, state = ?current.state, "media still processing");
					tokio::time::sleep(interval).await;
				}
			}
		}
	}

	/// Deletes a remote file.
	pub async fn delete_media(&self, target: &ServiceTarget, name: &str) -> Result<()> {
		let url = provider::file_url(&target.endpoint, name);
		let headers = provider::auth_headers(&target.auth)?;

		self.web_client().do_delete(&url, &headers).await?;
		tracing::debug!(name, "media deleted");

		Ok(())
	}
}
