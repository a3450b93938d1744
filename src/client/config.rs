use std::time::Duration;

/// Default wait between remote-file state polls.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Configuration for building and customizing a `Client`.
#[derive(Debug, Default, Clone)]
pub struct ClientConfig {
	pub(super) poll_interval: Option<Duration>,
}

/// Chainable setters related to the ClientConfig.
impl ClientConfig {
	/// Sets the wait between remote-file state polls (see
	/// [`Client::await_media_active`](crate::Client::await_media_active)).
	pub fn with_poll_interval(mut self, interval: Duration) -> Self {
		self.poll_interval = Some(interval);
		self
	}
}

/// Getters for the fields of ClientConfig (resolved to their defaults).
impl ClientConfig {
	/// Returns the poll interval, defaulting to 10 seconds.
	pub fn poll_interval(&self) -> Duration {
		self.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL)
	}
}
