//! `promptgate-server` - HTTP surface over the promptgate client.
//!
//! Routes map one-to-one onto generation calls; the only long-lived work is
//! the video route's upload/poll protocol inside the promptgate library.

pub mod config;
pub mod handlers;
pub mod server;
