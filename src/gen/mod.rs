//! Generation request and response types.

// region:    --- Modules

mod gen_req;
mod gen_res;
mod gen_stream;

pub use gen_req::*;
pub use gen_res::*;
pub use gen_stream::*;

// endregion: --- Modules
