use derive_more::From;
use reqwest::StatusCode;

pub type Result<T> = core::result::Result<T, Error>;

/// Error type for the web client layer.
#[derive(Debug, From)]
pub enum Error {
	/// The provider answered with a non-success status.
	ResponseFailedStatus {
		status: StatusCode,
		body: String,
	},

	/// The provider answered 2xx but the body was not the expected JSON.
	ResponseFailedNotJson {
		body: String,
	},

	#[from]
	Reqwest(reqwest::Error),
}

// region:    --- Error Boilerplate

impl core::fmt::Display for Error {
	fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
		write!(fmt, "{self:?}")
	}
}

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
