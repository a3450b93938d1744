//! Web client support for the provider REST calls.
//!
//! Thin layer over `reqwest`: JSON calls, a raw-bytes post for the upload
//! finalize step, and an SSE post for streaming generation.

// region:    --- Modules

mod error;
mod web_client;

pub use error::{Error, Result};
pub use web_client::*;

// endregion: --- Modules
