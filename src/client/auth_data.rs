use derive_more::From;

// region:    --- AuthDataError

/// Error type for AuthData resolution.
pub type AuthDataResult<T> = core::result::Result<T, AuthDataError>;

#[derive(Debug, From)]
pub enum AuthDataError {
	ApiKeyEnvNotFound { env_name: String },
}

impl core::fmt::Display for AuthDataError {
	fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
		write!(fmt, "{self:?}")
	}
}

impl std::error::Error for AuthDataError {}

// endregion: --- AuthDataError

// region:    --- AuthData

/// `AuthData` specifies either how to obtain the provider key or the key itself.
#[derive(Clone)]
pub enum AuthData {
	/// Specify the environment name to get the key value from.
	FromEnv(String),

	/// The key value itself.
	Key(String),
}

/// Constructors
impl AuthData {
	pub fn from_env(env_name: impl Into<String>) -> Self {
		AuthData::FromEnv(env_name.into())
	}

	pub fn from_single(value: impl Into<String>) -> Self {
		AuthData::Key(value.into())
	}
}

/// Getters
impl AuthData {
	pub fn single_key_value(&self) -> AuthDataResult<String> {
		match self {
			AuthData::FromEnv(env_name) => {
				let value = std::env::var(env_name).map_err(|_| AuthDataError::ApiKeyEnvNotFound {
					env_name: env_name.to_string(),
				})?;
				Ok(value)
			}
			AuthData::Key(value) => Ok(value.to_string()),
		}
	}
}

impl std::fmt::Debug for AuthData {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			AuthData::FromEnv(_) => write!(f, "AuthData::FromEnv(REDACTED)"),
			AuthData::Key(_) => write!(f, "AuthData::Key(REDACTED)"),
		}
	}
}

// endregion: --- AuthData
