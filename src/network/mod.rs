//! Network Module
//!
//! Client connections to the daemon.
//!
//! ## Architecture
//! - One transport per connection (Unix socket by default)
//! - Commands serialized by a per-connection lock
//! - No pooling, no retries

mod connection;
mod transport;

pub use connection::Connection;
pub use transport::Transport;
