use crate::files::RemoteFile;
use crate::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose;
use std::path::Path;

// region:    --- GenRequest

/// One generation request: a prompt plus zero or more ordered media parts.
///
/// Built per call and discarded once the response is produced.
#[derive(Debug, Clone, Default)]
pub struct GenRequest {
	pub prompt: String,
	pub parts: Vec<MediaPart>,
}

/// Constructors
impl GenRequest {
	pub fn from_prompt(prompt: impl Into<String>) -> Self {
		GenRequest {
			prompt: prompt.into(),
			parts: Vec::new(),
		}
	}
}

/// Chainable setters
impl GenRequest {
	pub fn append_part(mut self, part: MediaPart) -> Self {
		self.parts.push(part);
		self
	}

	pub fn with_parts(mut self, parts: impl IntoIterator<Item = MediaPart>) -> Self {
		self.parts.extend(parts);
		self
	}
}

// endregion: --- GenRequest

// region:    --- MediaPart

/// A media attachment of a [`GenRequest`].
///
/// Inline parts own their (encoded) bytes for the request's lifetime only;
/// remote parts reference a file the provider holds until it is deleted.
#[derive(Debug, Clone)]
pub enum MediaPart {
	Inline {
		/// Base64-encoded content.
		data: String,
		mime_type: String,
	},
	Remote {
		uri: String,
		mime_type: String,
	},
}

/// Constructors
impl MediaPart {
	/// Reads a local file and encodes it as an inline part, guessing the MIME
	/// type from the extension.
	///
	/// Fails with [`Error::MediaFileNotFound`] before touching the bytes when
	/// the file is absent.
	pub async fn inline_from_path(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		if !path.exists() {
			return Err(Error::MediaFileNotFound {
				path: path.display().to_string(),
			});
		}

		let mime_type = mime_guess::from_path(path).first_or_octet_stream().to_string();
		let content = tokio::fs::read(path).await?;

		Ok(MediaPart::Inline {
			data: general_purpose::STANDARD.encode(content),
			mime_type,
		})
	}

	pub fn inline(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
		MediaPart::Inline {
			data: data.into(),
			mime_type: mime_type.into(),
		}
	}

	pub fn remote(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
		MediaPart::Remote {
			uri: uri.into(),
			mime_type: mime_type.into(),
		}
	}
}

impl From<&RemoteFile> for MediaPart {
	fn from(file: &RemoteFile) -> Self {
		MediaPart::Remote {
			uri: file.uri.clone(),
			mime_type: file.mime_type.clone(),
		}
	}
}

/// Getters
impl MediaPart {
	pub fn mime_type(&self) -> &str {
		match self {
			MediaPart::Inline { mime_type, .. } => mime_type,
			MediaPart::Remote { mime_type, .. } => mime_type,
		}
	}
}

// endregion: --- MediaPart

// region:    --- Tests


// endregion: --- Tests
