//! Protocol Module
//!
//! The daemon's line-oriented text protocol.
//!
//! ## Request Format
//! One ASCII line per command: the keyword, then space-separated arguments.
//! String arguments are double-quoted (no escaping), options are `key="value"`.
//!
//! ## Response Format
//! ```text
//! ┌─────────────────────────────┐
//! │ <count> <status text>\n     │  status line
//! ├─────────────────────────────┤
//! │ <line>\n  × count           │  only when count >= 0
//! └─────────────────────────────┘
//! ```
//!
//! ## Commands
//! - GETVAL   - `GETVAL "host/plugin/type"`
//! - PUTVAL   - `PUTVAL "host/plugin/type" interval="10" N:1:U`
//! - PUTNOTIF - `PUTNOTIF severity="warning" message="text"`
//! - LISTVAL  - `LISTVAL`
//! - FLUSH    - `FLUSH timeout=-1 plugin="rrdtool" identifier="..."`

mod codec;
mod command;
mod response;

pub use codec::{read_reply, read_status, write_command, MAX_PREALLOCATED_LINES};
pub use command::{encode_options, Command, Value};
pub use response::{
    format_timestamp, parse_listing, parse_listval_line, parse_timestamp, parse_value_line,
    parse_values, StatusLine,
};
