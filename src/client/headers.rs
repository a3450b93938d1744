/// Ordered list of HTTP headers applied to outbound provider requests.
#[derive(Debug, Clone, Default)]
pub struct Headers {
	inner: Vec<(String, String)>,
}

/// Constructors & mutators
impl Headers {
	pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.inner.push((name.into(), value.into()));
	}

	pub fn append(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.push(name, value);
		self
	}
}

/// Getters
impl Headers {
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.inner.iter().map(|(name, value)| (name.as_str(), value.as_str()))
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for Headers {
	fn from((name, value): (N, V)) -> Self {
		Headers {
			inner: vec![(name.into(), value.into())],
		}
	}
}

impl<N: Into<String>, V: Into<String>> From<Vec<(N, V)>> for Headers {
	fn from(pairs: Vec<(N, V)>) -> Self {
		Headers {
			inner: pairs.into_iter().map(|(n, v)| (n.into(), v.into())).collect(),
		}
	}
}
