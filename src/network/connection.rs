//! Connection
//!
//! A client connection to the daemon and the commands it can issue.

use std::collections::HashMap;
use std::io::{BufReader, ErrorKind};
use std::time::SystemTime;

#[cfg(unix)]
use std::os::unix::net::UnixStream;
#[cfg(unix)]
use std::path::Path;

use parking_lot::Mutex;

use super::Transport;
use crate::error::{
    CollectdError, Incomplete, ProtocolError, ReplyResult, Result, TransportError,
};
use crate::protocol::{parse_listing, parse_values, read_reply, write_command, Command, Value};

#[cfg(unix)]
use crate::config::ClientConfig;

/// A connection to the daemon's control socket
///
/// ## Concurrency
/// One command is in flight at a time. The transport sits behind a mutex
/// that is held from the moment a command is written until its reply has
/// been read in full, so callers sharing a connection across threads are
/// serialized instead of corrupting each other's frames.
///
/// Nothing here times out unless the transport does. A blocked call can be
/// released by shutting the socket down from elsewhere (for instance through
/// a `try_clone` of the stream taken before wrapping it), which surfaces as
/// a transport error.
pub struct Connection<T> {
    /// Buffered reader over the transport; writes go to the inner stream
    stream: Mutex<BufReader<T>>,
}

impl<T: Transport> Connection<T> {
    /// Wrap an already connected transport
    pub fn new(transport: T) -> Self {
        Self {
            stream: Mutex::new(BufReader::new(transport)),
        }
    }

    // =========================================================================
    // Framing
    // =========================================================================

    /// Send a raw command line and return the reply lines
    ///
    /// The line is sent verbatim with a newline appended. A line that already
    /// contains `\n` (including one built from an identifier, option or
    /// message holding a newline) is refused with
    /// [`ProtocolError::EmbeddedNewline`] and nothing is written.
    pub fn send(&self, line: &str) -> ReplyResult<Vec<String>> {
        if line.contains('\n') {
            tracing::warn!("Refusing command with embedded newline: {:?}", line);
            return Err(Incomplete::empty(ProtocolError::EmbeddedNewline(
                line.to_string(),
            )));
        }

        let mut stream = self.stream.lock();

        tracing::trace!("Sending command: {}", line);

        if let Err(e) = write_command(stream.get_mut(), line) {
            tracing::warn!("Failed to write command: {}", e);
            return Err(Incomplete::empty(e));
        }

        match read_reply(&mut *stream) {
            Ok(lines) => {
                tracing::trace!("Received {} reply lines", lines.len());
                Ok(lines)
            }
            Err(incomplete) => {
                match &incomplete.error {
                    CollectdError::Protocol(e) => tracing::warn!("Command rejected: {}", e),
                    CollectdError::Transport(e) => tracing::warn!(
                        "Reply failed after {} lines: {}",
                        incomplete.partial.len(),
                        e
                    ),
                }
                Err(incomplete)
            }
        }
    }

    /// Send a structured command and return the reply lines
    pub fn execute(&self, command: &Command) -> ReplyResult<Vec<String>> {
        tracing::debug!("Executing {}", command.name());
        self.send(&command.to_string())
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Current values of an identifier, keyed by data source name
    ///
    /// On failure, values parsed from lines already received are kept.
    pub fn get_value(&self, identifier: &str) -> ReplyResult<HashMap<String, f64>> {
        let lines = self
            .execute(&Command::get_val(identifier))
            .map_err(|e| e.map(|lines| salvage(parse_values(&lines))))?;
        parse_values(&lines)
    }

    /// Submit values for an identifier
    ///
    /// With `time` set to `None` the daemon stamps the values on arrival.
    pub fn put_value<I, K, V>(
        &self,
        identifier: &str,
        options: I,
        time: Option<SystemTime>,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.execute(&Command::put_val(identifier, options, time, values))?;
        Ok(())
    }

    /// Submit a notification
    pub fn put_notification<I, K, V>(&self, options: I, message: &str) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.execute(&Command::put_notif(options, message))?;
        Ok(())
    }

    /// Every identifier the daemon knows, with the time of its last update
    pub fn list_values(&self) -> ReplyResult<HashMap<String, SystemTime>> {
        let lines = self
            .execute(&Command::ListVal)
            .map_err(|e| e.map(|lines| salvage(parse_listing(&lines))))?;
        parse_listing(&lines)
    }

    /// Flush cached data older than `timeout` seconds (-1 for no timeout)
    ///
    /// Empty `plugins` and `identifiers` flush everything.
    pub fn flush<P, I>(&self, timeout: i32, plugins: P, identifiers: I) -> Result<()>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.execute(&Command::flush(timeout, plugins, identifiers))?;
        Ok(())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Close the transport
    pub fn close(self) -> Result<()> {
        tracing::debug!("Closing connection");
        let mut stream = self.stream.into_inner();
        match stream.get_mut().close() {
            Ok(()) => Ok(()),
            // Peer already hung up
            Err(e) if e.kind() == ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(TransportError::Io(e).into()),
        }
    }

    /// Give back the transport, dropping any buffered input
    pub fn into_inner(self) -> T {
        self.stream.into_inner().into_inner()
    }
}

/// Keep whatever parsed, success or not
fn salvage<M>(parsed: ReplyResult<M>) -> M {
    parsed.unwrap_or_else(|incomplete| incomplete.partial)
}

#[cfg(unix)]
impl Connection<UnixStream> {
    /// Connect to the daemon's Unix socket at `path`
    pub fn connect(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(&ClientConfig::builder().socket_path(path.as_ref()).build())
    }

    /// Connect using the socket path and timeouts in `config`
    pub fn open(config: &ClientConfig) -> Result<Self> {
        tracing::debug!("Connecting to {}", config.socket_path.display());

        let stream = UnixStream::connect(&config.socket_path)?;
        stream.set_read_timeout(config.read_timeout())?;
        stream.set_write_timeout(config.write_timeout())?;

        Ok(Self::new(stream))
    }
}
