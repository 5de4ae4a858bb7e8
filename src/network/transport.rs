//! Transport
//!
//! The byte stream a connection runs over.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};

#[cfg(unix)]
use std::os::unix::net::UnixStream;

/// A bidirectional byte stream that can be closed explicitly
pub trait Transport: Read + Write {
    /// Close the stream; pending and future reads see end-of-stream
    fn close(&mut self) -> io::Result<()>;
}

#[cfg(unix)]
impl Transport for UnixStream {
    fn close(&mut self) -> io::Result<()> {
        self.shutdown(Shutdown::Both)
    }
}

impl Transport for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        self.shutdown(Shutdown::Both)
    }
}
