use std::sync::Arc;

/// A construct to store the base URL of the provider service.
/// Efficiently clonable.
///
/// The default points at the public provider endpoint; tests substitute a
/// local fake by building their [`crate::ServiceTarget`] with `from_owned`.
#[derive(Debug, Clone)]
pub struct Endpoint {
	inner: EndpointInner,
}

#[derive(Debug, Clone)]
enum EndpointInner {
	Static(&'static str),
	Owned(Arc<str>),
}

/// Constructors
impl Endpoint {
	pub fn from_static(url: &'static str) -> Self {
		Endpoint {
			inner: EndpointInner::Static(url),
		}
	}

	pub fn from_owned(url: impl Into<Arc<str>>) -> Self {
		Endpoint {
			inner: EndpointInner::Owned(url.into()),
		}
	}
}

/// Getters
impl Endpoint {
	pub fn base_url(&self) -> &str {
		match &self.inner {
			EndpointInner::Static(url) => url,
			EndpointInner::Owned(url) => url,
		}
	}

	/// Joins a relative path to the base URL, normalizing the `/` between them.
	pub fn join(&self, path: &str) -> String {
		let base = self.base_url();
		let base = base.strip_suffix('/').unwrap_or(base);
		let path = path.strip_prefix('/').unwrap_or(path);
		format!("{base}/{path}")
	}
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_endpoint_join_normalizes_slashes() {
		let with_slash = Endpoint::from_static("http://localhost:9000/");
		let without_slash = Endpoint::from_owned("http://localhost:9000");

		assert_eq!(with_slash.join("v1beta/files/abc"), "http://localhost:9000/v1beta/files/abc");
		assert_eq!(without_slash.join("/v1beta/files/abc"), "http://localhost:9000/v1beta/files/abc");
	}
}

// endregion: --- Tests
