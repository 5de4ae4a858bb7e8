//! Protocol codec
//!
//! Line framing for requests and replies.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! COMMAND arg1 "quoted arg" key="value"\n
//! ```
//!
//! ### Reply
//! ```text
//! <count> <status text>\n      count >= 0: exactly `count` lines follow
//! <line 1>\n                   count <  0: status text is the error message
//! ...
//! <line count>\n
//! ```

use std::io::{self, BufRead, Write};

use super::StatusLine;
use crate::error::{Incomplete, ProtocolError, ReplyResult, TransportError};

/// Upper bound on lines preallocated for a reply, whatever the status claims
pub const MAX_PREALLOCATED_LINES: usize = 1024;

// =============================================================================
// Requests
// =============================================================================

/// Write one command line, newline-terminated, and flush it
pub fn write_command<W: Write>(writer: &mut W, line: &str) -> Result<(), TransportError> {
    let mut bytes = Vec::with_capacity(line.len() + 1);
    bytes.extend_from_slice(line.as_bytes());
    bytes.push(b'\n');

    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Replies
// =============================================================================

/// Read one newline-terminated line, newline stripped
///
/// Returns `None` if the stream ends before a newline arrives. Invalid UTF-8
/// is replaced with U+FFFD rather than failing the read.
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf)?;
    if n == 0 || buf.last() != Some(&b'\n') {
        return Ok(None);
    }
    buf.pop();
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Read and parse the status line of a reply
pub fn read_status<R: BufRead>(reader: &mut R) -> Result<StatusLine, TransportError> {
    let line = read_line(reader)?.ok_or(TransportError::ClosedBeforeStatus)?;
    StatusLine::parse(&line)
}

/// Read a complete reply
///
/// A negative status yields [`ProtocolError::Rejected`] with no lines. If the
/// stream breaks partway through, the lines already read travel with the
/// transport error.
pub fn read_reply<R: BufRead>(reader: &mut R) -> ReplyResult<Vec<String>> {
    let status = read_status(reader).map_err(Incomplete::empty)?;

    let Some(count) = status.line_count() else {
        return Err(Incomplete::empty(ProtocolError::Rejected(status.message)));
    };

    let mut lines = Vec::with_capacity(count.min(MAX_PREALLOCATED_LINES));
    while lines.len() < count {
        match read_line(reader) {
            Ok(Some(line)) => lines.push(line),
            Ok(None) => {
                let received = lines.len();
                return Err(Incomplete::new(
                    lines,
                    TransportError::ShortReply {
                        expected: count,
                        received,
                    },
                ));
            }
            Err(e) => return Err(Incomplete::new(lines, TransportError::Io(e))),
        }
    }

    Ok(lines)
}
