//! Response definitions
//!
//! The status line that opens every reply, and parsers that turn the raw
//! reply lines of GETVAL and LISTVAL into typed maps.

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::{Incomplete, ProtocolError, ReplyResult, TransportError};

/// First line of a reply: `<signed count> <free text>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Number of lines that follow, or negative on error
    pub code: i64,

    /// Free text; the error message when `code` is negative
    pub message: String,
}

impl StatusLine {
    /// Parse a status line with its trailing newline already removed
    pub fn parse(line: &str) -> Result<Self, TransportError> {
        let (count, message) = line.split_once(' ').unwrap_or((line, ""));
        let code = count
            .parse::<i64>()
            .map_err(|_| TransportError::MalformedStatus(line.to_string()))?;

        Ok(Self {
            code,
            message: message.to_string(),
        })
    }

    pub fn is_error(&self) -> bool {
        self.code < 0
    }

    /// Number of lines that follow, `None` for an error status
    pub fn line_count(&self) -> Option<usize> {
        usize::try_from(self.code).ok()
    }
}

// =============================================================================
// GETVAL Replies
// =============================================================================

/// Parse one `name=value` line
pub fn parse_value_line(line: &str) -> Result<(String, f64), ProtocolError> {
    let (name, raw) = line
        .split_once('=')
        .ok_or_else(|| ProtocolError::MalformedLine(line.to_string()))?;

    let value = raw.parse::<f64>().map_err(|source| ProtocolError::InvalidValue {
        value: raw.to_string(),
        source,
    })?;

    Ok((name.to_string(), value))
}

/// Parse a GETVAL reply, keeping the values parsed before any failure
pub fn parse_values(lines: &[String]) -> ReplyResult<HashMap<String, f64>> {
    let mut values = HashMap::with_capacity(lines.len());
    for line in lines {
        match parse_value_line(line) {
            Ok((name, value)) => {
                values.insert(name, value);
            }
            Err(e) => return Err(Incomplete::new(values, e)),
        }
    }
    Ok(values)
}

// =============================================================================
// LISTVAL Replies
// =============================================================================

/// Parse `<seconds>[.<milliseconds>]` into a point in time
///
/// The fractional part counts milliseconds. If it is missing or not a
/// number the timestamp falls on the whole second.
pub fn parse_timestamp(raw: &str) -> Result<SystemTime, ProtocolError> {
    let invalid = || ProtocolError::InvalidTimestamp(raw.to_string());

    let (secs, frac) = match raw.split_once('.') {
        Some((secs, frac)) => (secs, Some(frac)),
        None => (raw, None),
    };

    let secs = secs.parse::<i64>().map_err(|_| invalid())?;
    let millis = frac.and_then(|f| f.parse::<u64>().ok()).unwrap_or(0);

    let whole = Duration::from_secs(secs.unsigned_abs());
    let base = if secs >= 0 {
        UNIX_EPOCH.checked_add(whole)
    } else {
        UNIX_EPOCH.checked_sub(whole)
    };

    base.and_then(|t| t.checked_add(Duration::from_nanos(millis.saturating_mul(1_000_000))))
        .ok_or_else(invalid)
}

/// Split a point in time into whole epoch seconds (rounded towards negative
/// infinity) and the nanoseconds past that second
///
/// Seconds saturate at the bounds of `i64`.
pub(crate) fn split_epoch(t: SystemTime) -> (i64, u32) {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => (
            i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
            d.subsec_nanos(),
        ),
        Err(e) => {
            let before = e.duration();
            let secs = i64::try_from(before.as_secs()).map_or(i64::MIN, i64::saturating_neg);
            match before.subsec_nanos() {
                0 => (secs, 0),
                nanos => (secs.saturating_sub(1), 1_000_000_000 - nanos),
            }
        }
    }
}

/// Render a point in time the way LISTVAL does: `<seconds>.<milliseconds>`
///
/// Times before the epoch keep their sign, with the milliseconds counted
/// forward from the (negative) second, so the output parses back with
/// [`parse_timestamp`].
pub fn format_timestamp(t: SystemTime) -> String {
    let (secs, nanos) = split_epoch(t);
    format!("{}.{:03}", secs, nanos / 1_000_000)
}

/// Parse one `<timestamp> <identifier>` line
pub fn parse_listval_line(line: &str) -> Result<(String, SystemTime), ProtocolError> {
    let (raw_time, identifier) = line
        .split_once(' ')
        .ok_or_else(|| ProtocolError::MalformedLine(line.to_string()))?;

    Ok((identifier.to_string(), parse_timestamp(raw_time)?))
}

/// Parse a LISTVAL reply, keeping the entries parsed before any failure
pub fn parse_listing(lines: &[String]) -> ReplyResult<HashMap<String, SystemTime>> {
    let mut listing = HashMap::with_capacity(lines.len());
    for line in lines {
        match parse_listval_line(line) {
            Ok((identifier, time)) => {
                listing.insert(identifier, time);
            }
            Err(e) => return Err(Incomplete::new(listing, e)),
        }
    }
    Ok(listing)
}
