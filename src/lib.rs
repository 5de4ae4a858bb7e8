//! # collectd-client
//!
//! A synchronous client for collectd's `unixsock` control protocol:
//! - Line-framed requests and replies over a local stream socket
//! - Typed GETVAL / PUTVAL / PUTNOTIF / LISTVAL / FLUSH commands
//! - Transport failures kept apart from daemon rejections
//! - Partial replies returned alongside the error that cut them short
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Command Layer                          │
//! │   get_value / put_value / put_notification / list_values    │
//! │                    / flush / send                           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command → line
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Connection (Mutex)                        │
//! │        write line → read status → read N lines              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │   Transport   │
//!               │ (UnixStream)  │
//!               └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use collectd_client::{Connection, Value};
//!
//! let conn = Connection::connect("/var/run/collectd-unixsock")?;
//! conn.put_value(
//!     "myhost/app/gauge-queue",
//!     [("interval", "10")],
//!     None,
//!     [Value::Number(42.0)],
//! )?;
//! let values = conn.get_value("myhost/app/gauge-queue")?;
//! println!("{:?}", values);
//! conn.close()?;
//! # Ok::<(), collectd_client::CollectdError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod network;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::ClientConfig;
pub use error::{CollectdError, Incomplete, ProtocolError, ReplyResult, Result, TransportError};
pub use network::{Connection, Transport};
pub use protocol::{Command, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of collectd-client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
