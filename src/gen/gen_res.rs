use crate::{Error, Result};

/// Response of a (non-streaming) generation call.
#[derive(Debug, Clone, Default)]
pub struct GenResponse {
	/// Concatenated text of the first candidate's parts. `None` when the
	/// provider returned no candidate or only empty text.
	pub text: Option<String>,
}

/// Getters
impl GenResponse {
	pub fn first_text(&self) -> Option<&str> {
		self.text.as_deref()
	}

	/// Consumes the response into its text, treating a missing or empty text
	/// as [`Error::NoGeneratedText`].
	pub fn into_text(self) -> Result<String> {
		self.text.ok_or(Error::NoGeneratedText)
	}
}
