use crate::client::AuthDataError;
use crate::webc;
use derive_more::From;

pub type Result<T> = core::result::Result<T, Error>;

/// Main promptgate error type.
#[derive(Debug, From)]
pub enum Error {
	// -- Local media input
	/// The local media file does not exist. Raised before any provider call.
	MediaFileNotFound {
		path: String,
	},

	// -- Generation
	/// The provider responded, but with no usable text. Never a valid empty answer.
	NoGeneratedText,

	// -- Remote files (asynchronous upload protocol)
	/// The provider reported the uploaded file as FAILED. Not retried.
	FileProcessingFailed {
		name: String,
	},
	/// The resumable-upload start call did not return an upload URL header.
	UploadUrlMissing,

	// -- Streaming
	Stream {
		cause: String,
	},

	// -- Auth
	#[from]
	Auth(AuthDataError),

	// -- Web call
	#[from]
	Webc(webc::Error),

	// -- Externals
	#[from]
	JsonValueExt(value_ext::JsonValueExtError),
	#[from]
	SerdeJson(serde_json::Error),
	#[from]
	Io(std::io::Error),
}

// region:    --- Error Boilerplate

impl core::fmt::Display for Error {
	fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
		write!(fmt, "{self:?}")
	}
}

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
