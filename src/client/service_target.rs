use crate::client::{AuthData, Endpoint};
use crate::provider;

/// Fully resolved destination for one provider call: which model, against
/// which endpoint, with which credentials.
///
/// Constructed once at startup and cloned per request; no field mutates
/// after construction.
#[derive(Debug, Clone)]
pub struct ServiceTarget {
	pub model: String,
	pub auth: AuthData,
	pub endpoint: Endpoint,
}

impl Default for ServiceTarget {
	/// Public provider endpoint, default model, key from the `GEMINI_API_KEY`
	/// environment variable.
	fn default() -> Self {
		ServiceTarget {
			model: provider::DEFAULT_MODEL.to_string(),
			auth: AuthData::from_env(provider::API_KEY_ENV),
			endpoint: Endpoint::from_static(provider::BASE_URL),
		}
	}
}

/// Chainable setters
impl ServiceTarget {
	pub fn with_model(mut self, model: impl Into<String>) -> Self {
		self.model = model.into();
		self
	}

	pub fn with_auth(mut self, auth: AuthData) -> Self {
		self.auth = auth;
		self
	}

	pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
		self.endpoint = endpoint;
		self
	}
}
