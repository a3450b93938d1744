//! Remote file handles for the asynchronous media upload protocol.

// region:    --- Modules

mod remote_file;

pub use remote_file::*;

// endregion: --- Modules
