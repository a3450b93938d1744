use crate::client::Headers;
use crate::webc::{Error, Result};
use bytes::Bytes;
use eventsource_stream::{EventStream, Eventsource};
use futures::StreamExt;
use futures::stream::BoxStream;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde_json::Value;

/// Server-sent-event stream over the raw response bytes.
pub type WebStream = EventStream<BoxStream<'static, reqwest::Result<Bytes>>>;

// region:    --- WebClient

#[derive(Debug, Default, Clone)]
pub struct WebClient {
	reqwest_client: reqwest::Client,
}

/// Constructors
impl WebClient {
	pub fn from_reqwest_client(reqwest_client: reqwest::Client) -> Self {
		WebClient { reqwest_client }
	}
}

/// Web methods
impl WebClient {
	pub async fn do_get(&self, url: &str, headers: &Headers) -> Result<WebResponse> {
		let req = apply_headers(self.reqwest_client.get(url), headers);
		exec(req).await
	}

	pub async fn do_delete(&self, url: &str, headers: &Headers) -> Result<WebResponse> {
		let req = apply_headers(self.reqwest_client.delete(url), headers);
		exec(req).await
	}

	pub async fn do_post(&self, url: &str, headers: &Headers, payload: Value) -> Result<WebResponse> {
		let req = apply_headers(self.reqwest_client.post(url), headers).json(&payload);
		exec(req).await
	}

	/// Posts a raw body (the upload finalize step sends the file bytes as-is).
	pub async fn do_post_bytes(&self, url: &str, headers: &Headers, body: Vec<u8>) -> Result<WebResponse> {
		let req = apply_headers(self.reqwest_client.post(url), headers).body(body);
		exec(req).await
	}

	/// Posts a JSON payload and returns the response as an SSE event stream.
	///
	/// Status is checked before handing the stream back, so a provider-side
	/// rejection surfaces as an error here rather than mid-stream.
	pub async fn do_post_sse(&self, url: &str, headers: &Headers, payload: Value) -> Result<WebStream> {
		let req = apply_headers(self.reqwest_client.post(url), headers).json(&payload);
		let res = req.send().await?;

		let status = res.status();
		if !status.is_success() {
			let body = res.text().await.unwrap_or_default();
			return Err(Error::ResponseFailedStatus { status, body });
		}

		Ok(res.bytes_stream().boxed().eventsource())
	}
}

fn apply_headers(mut req: reqwest::RequestBuilder, headers: &Headers) -> reqwest::RequestBuilder {
	for (name, value) in headers.iter() {
		req = req.header(name, value);
	}
	req
}

async fn exec(req: reqwest::RequestBuilder) -> Result<WebResponse> {
	let res = req.send().await?;

	let status = res.status();
	let headers = res.headers().clone();
	let text = res.text().await?;

	if !status.is_success() {
		return Err(Error::ResponseFailedStatus { status, body: text });
	}

	// Some calls (file delete) legitimately answer with an empty body.
	let body = if text.is_empty() {
		Value::Null
	} else {
		serde_json::from_str(&text).map_err(|_| Error::ResponseFailedNotJson { body: text })?
	};

	Ok(WebResponse { status, headers, body })
}

// endregion: --- WebClient

// region:    --- WebResponse

#[derive(Debug)]
pub struct WebResponse {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Value,
}

impl WebResponse {
	/// Returns the named response header as a str, if present and valid UTF-8.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}
}

// endregion: --- WebResponse
