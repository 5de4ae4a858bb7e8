//! Configuration for collectd-client
//!
//! Connection settings with sensible defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Default location of the daemon's control socket
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/collectd-unixsock";

/// Settings used by [`Connection::open`](crate::network::Connection::open)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Filesystem path of the daemon's Unix socket
    pub socket_path: PathBuf,

    /// Read timeout in milliseconds (0 = block until the daemon answers)
    pub read_timeout_ms: u64,

    /// Write timeout in milliseconds (0 = block until the write completes)
    pub write_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            read_timeout_ms: 0,
            write_timeout_ms: 0,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        millis(self.write_timeout_ms)
    }
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the daemon socket path
    pub fn socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.socket_path = path.into();
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
