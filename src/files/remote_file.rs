use serde::{Deserialize, Serialize};

// region:    --- RemoteFile

/// Handle to a media file held by the provider.
///
/// Obtained from the upload call; the provider remains the authoritative
/// owner of `state`, so it is re-fetched on every poll rather than trusted
/// from an earlier response. Each handle belongs to exactly one request and
/// is never shared or reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
	/// Opaque provider handle, e.g. `files/abc-123`.
	pub name: String,
	#[serde(default)]
	pub uri: String,
	#[serde(default)]
	pub mime_type: String,
	#[serde(default)]
	pub state: FileState,
}

/// Getters
impl RemoteFile {
	pub fn is_active(&self) -> bool {
		matches!(self.state, FileState::Active)
	}

	pub fn is_failed(&self) -> bool {
		matches!(self.state, FileState::Failed)
	}
}

// endregion: --- RemoteFile

// region:    --- FileState

/// Provider-side processing state of an uploaded file.
///
/// Only `Active` files may be referenced in a generation call; a `Failed`
/// file aborts its request and is never retried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileState {
	Processing,
	Active,
	Failed,
	/// `STATE_UNSPECIFIED` and any state this crate does not know; treated
	/// like `Processing` when polling.
	#[default]
	Unspecified,
}

impl FileState {
	pub fn as_str(&self) -> &'static str {
		match self {
			FileState::Processing => "PROCESSING",
			FileState::Active => "ACTIVE",
			FileState::Failed => "FAILED",
			FileState::Unspecified => "STATE_UNSPECIFIED",
		}
	}

	fn from_wire(value: &str) -> Self {
		match value {
			"PROCESSING" => FileState::Processing,
			"ACTIVE" => FileState::Active,
			"FAILED" => FileState::Failed,
			// Unknown states are not an error; they just keep the poll going.
			_ => FileState::Unspecified,
		}
	}
}

impl Serialize for FileState {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for FileState {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let value = String::deserialize(deserializer)?;
		Ok(FileState::from_wire(&value))
	}
}

// endregion: --- FileState

// region:    --- Tests


// endregion: --- Tests
