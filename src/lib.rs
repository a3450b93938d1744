//! `promptgate` library - text generation over prompts and local media,
//! including the provider's asynchronous large-media upload protocol.

// region:    --- Modules

mod client;
mod error;

// -- Flatten
pub use client::*;
pub use error::{Error, Result};

// -- Public Modules
pub mod files;
pub mod r#gen;
pub mod provider;
pub mod webc;

// endregion: --- Modules
