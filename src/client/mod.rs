//! Client module.
//!
//! Re-exports the public client API: builder, client types, configuration,
//! headers, service target, auth data, and endpoint.

// region:    --- Modules

mod auth_data;
mod builder;
mod client_impl;
mod client_types;
mod config;
mod endpoint;
mod headers;
mod service_target;

pub use auth_data::*;
pub use builder::*;
pub use client_types::*;
pub use config::*;
pub use endpoint::*;
pub use headers::*;
pub use service_target::*;

// endregion: --- Modules
