//! Command definitions
//!
//! Commands sent to the daemon. `Display` renders the exact wire line
//! (without the trailing newline).

use std::fmt;
use std::time::SystemTime;

use super::response::split_epoch;

/// A single measurement submitted with PUTVAL
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f64),

    /// No data for this slot (`U` on the wire)
    Undefined,
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<Option<f64>> for Value {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Value::Undefined, Value::Number)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{}", v),
            Value::Undefined => f.write_str("U"),
        }
    }
}

/// A command understood by the daemon
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Read the current values of one identifier
    GetVal { identifier: String },

    /// Submit values for one identifier
    PutVal {
        identifier: String,
        options: Vec<(String, String)>,
        /// `None` lets the daemon stamp the values itself
        time: Option<SystemTime>,
        values: Vec<Value>,
    },

    /// Submit a notification
    PutNotif {
        options: Vec<(String, String)>,
        message: String,
    },

    /// List every identifier with its last update time
    ListVal,

    /// Flush cached data older than `timeout` seconds (-1 = everything)
    Flush {
        timeout: i32,
        plugins: Vec<String>,
        identifiers: Vec<String>,
    },

    /// Any other command line, sent verbatim
    Raw(String),
}

impl Command {
    pub fn get_val(identifier: impl Into<String>) -> Self {
        Command::GetVal {
            identifier: identifier.into(),
        }
    }

    pub fn put_val<I, K, V>(
        identifier: impl Into<String>,
        options: I,
        time: Option<SystemTime>,
        values: impl IntoIterator<Item = Value>,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Command::PutVal {
            identifier: identifier.into(),
            options: collect_options(options),
            time,
            values: values.into_iter().collect(),
        }
    }

    pub fn put_notif<I, K, V>(options: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Command::PutNotif {
            options: collect_options(options),
            message: message.into(),
        }
    }

    pub fn flush<P, I>(timeout: i32, plugins: P, identifiers: I) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Command::Flush {
            timeout,
            plugins: plugins.into_iter().map(Into::into).collect(),
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }

    /// Command keyword, used for logging
    pub fn name(&self) -> &str {
        match self {
            Command::GetVal { .. } => "GETVAL",
            Command::PutVal { .. } => "PUTVAL",
            Command::PutNotif { .. } => "PUTNOTIF",
            Command::ListVal => "LISTVAL",
            Command::Flush { .. } => "FLUSH",
            Command::Raw(line) => line.split_whitespace().next().unwrap_or(""),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::GetVal { identifier } => write!(f, "GETVAL \"{}\"", identifier),
            Command::PutVal {
                identifier,
                options,
                time,
                values,
            } => {
                write!(f, "PUTVAL \"{}\"", identifier)?;
                write_options(f, options)?;
                match time {
                    Some(t) => write!(f, " {}", split_epoch(*t).0)?,
                    None => f.write_str(" N")?,
                }
                for value in values {
                    write!(f, ":{}", value)?;
                }
                Ok(())
            }
            Command::PutNotif { options, message } => {
                f.write_str("PUTNOTIF")?;
                write_options(f, options)?;
                write!(f, " message=\"{}\"", message)
            }
            Command::ListVal => f.write_str("LISTVAL"),
            Command::Flush {
                timeout,
                plugins,
                identifiers,
            } => {
                write!(f, "FLUSH timeout={}", timeout)?;
                for plugin in plugins {
                    write!(f, " plugin=\"{}\"", plugin)?;
                }
                for identifier in identifiers {
                    write!(f, " identifier=\"{}\"", identifier)?;
                }
                Ok(())
            }
            Command::Raw(line) => f.write_str(line),
        }
    }
}

// =============================================================================
// Option Encoding
// =============================================================================

/// Render options as space-separated `key="value"` pairs
///
/// Values are quoted but not escaped; the daemon's parser does not unescape.
pub fn encode_options<I, K, V>(options: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    options
        .into_iter()
        .map(|(k, v)| format!("{}=\"{}\"", k.as_ref(), v.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_options(f: &mut fmt::Formatter<'_>, options: &[(String, String)]) -> fmt::Result {
    if options.is_empty() {
        return Ok(());
    }
    write!(f, " {}", encode_options(options.iter().map(|(k, v)| (k, v))))
}

fn collect_options<I, K, V>(options: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    options
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
