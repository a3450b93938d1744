use crate::webc::WebClient;
use crate::{Client, ClientConfig};
use std::sync::Arc;
use std::time::Duration;

/// Builder for `Client`.
///
/// Create via:
/// - `ClientBuilder::default()`
/// - `Client::builder()`
#[derive(Debug, Default)]
pub struct ClientBuilder {
	web_client: Option<WebClient>,
	config: Option<ClientConfig>,
}

/// Builder methods
impl ClientBuilder {
	/// Use a custom `reqwest::Client`.
	pub fn with_reqwest(mut self, reqwest_client: reqwest::Client) -> Self {
		self.web_client = Some(WebClient::from_reqwest_client(reqwest_client));
		self
	}

	/// Set a `ClientConfig`.
	pub fn with_config(mut self, config: ClientConfig) -> Self {
		self.config = Some(config);
		self
	}
}

/// Builder ClientConfig passthrough convenient setters.
impl ClientBuilder {
	/// Set the remote-file poll interval on `ClientConfig` (creates it if absent).
	pub fn with_poll_interval(mut self, interval: Duration) -> Self {
		let client_config = self.config.get_or_insert_with(ClientConfig::default);
		client_config.poll_interval = Some(interval);
		self
	}
}

impl ClientBuilder {
	/// Build a `Client`.
	pub fn build(self) -> Client {
		let config = self.config.unwrap_or_default();
		let web_client = self.web_client.unwrap_or_default();

		let inner = super::ClientInner { web_client, config };
		Client { inner: Arc::new(inner) }
	}
}
