//! Error types for collectd-client
//!
//! Every failure is either a transport failure (the socket is probably dead)
//! or a protocol failure (the daemon said no, or said something we could not
//! parse, but the connection is still usable).

use std::fmt;
use std::num::ParseFloatError;

use thiserror::Error;

/// Result type alias using CollectdError
pub type Result<T> = std::result::Result<T, CollectdError>;

/// Result of an operation whose reply may be cut short
///
/// On failure the rows obtained before the error are kept in the `Incomplete`.
pub type ReplyResult<T> = std::result::Result<T, Incomplete<T>>;

/// Top-level error type for collectd-client operations
#[derive(Debug, Error)]
pub enum CollectdError {
    /// The underlying stream failed; the connection is likely unusable
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The daemon rejected the command or its reply was unparsable
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl CollectdError {
    /// True if the connection should be considered dead
    pub fn is_transport(&self) -> bool {
        matches!(self, CollectdError::Transport(_))
    }

    /// True if the daemon rejected the command or the reply was malformed
    pub fn is_protocol(&self) -> bool {
        matches!(self, CollectdError::Protocol(_))
    }
}

impl From<std::io::Error> for CollectdError {
    fn from(err: std::io::Error) -> Self {
        CollectdError::Transport(TransportError::Io(err))
    }
}

/// Failures of the underlying byte stream or of reply framing
#[derive(Debug, Error)]
pub enum TransportError {
    // -------------------------------------------------------------------------
    // Stream Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection closed before a complete status line was read")]
    ClosedBeforeStatus,

    #[error("connection closed after {received} of {expected} reply lines")]
    ShortReply { expected: usize, received: usize },

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("malformed status line: {0:?}")]
    MalformedStatus(String),
}

/// Rejections reported by the daemon, unparsable reply lines and command
/// lines refused before sending
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Negative status; carries the daemon's own message
    #[error("{0}")]
    Rejected(String),

    #[error("could not parse value {value:?}: {source}")]
    InvalidValue {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("could not parse timestamp {0:?}")]
    InvalidTimestamp(String),

    #[error("malformed reply line: {0:?}")]
    MalformedLine(String),

    /// Command line containing a newline, which would split it into two frames
    #[error("command line contains a newline: {0:?}")]
    EmbeddedNewline(String),
}

impl ProtocolError {
    /// The daemon's message, if this is a rejection
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            ProtocolError::Rejected(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Partial Results
// =============================================================================

/// An error together with whatever the reply yielded before it occurred
///
/// Converts into [`CollectdError`] so `?` can discard the partial rows.
pub struct Incomplete<T> {
    /// Rows read or parsed before the failure
    pub partial: T,

    /// What went wrong
    pub error: CollectdError,
}

impl<T> Incomplete<T> {
    pub fn new(partial: T, error: impl Into<CollectdError>) -> Self {
        Self {
            partial,
            error: error.into(),
        }
    }

    /// An incomplete result with nothing salvaged
    pub fn empty(error: impl Into<CollectdError>) -> Self
    where
        T: Default,
    {
        Self::new(T::default(), error)
    }

    pub fn into_error(self) -> CollectdError {
        self.error
    }

    pub fn into_parts(self) -> (T, CollectdError) {
        (self.partial, self.error)
    }

    /// Transform the salvaged rows, keeping the error
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Incomplete<U> {
        Incomplete {
            partial: f(self.partial),
            error: self.error,
        }
    }
}

impl<T> From<Incomplete<T>> for CollectdError {
    fn from(incomplete: Incomplete<T>) -> Self {
        incomplete.error
    }
}

impl<T: fmt::Debug> fmt::Debug for Incomplete<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Incomplete")
            .field("partial", &self.partial)
            .field("error", &self.error)
            .finish()
    }
}

impl<T> fmt::Display for Incomplete<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<T: fmt::Debug> std::error::Error for Incomplete<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.error)
    }
}
