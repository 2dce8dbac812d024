//! Byte transports feeding the race: a serial port, an in-memory script for
//! replays and tests, and a reader thread that forwards bytes to the UI in
//! arrival order.

mod reader;
mod scripted;
mod serial;

pub use reader::{spawn_reader, ReaderHandle, TransportEvent};
pub use scripted::ScriptedSource;
pub use serial::{list_ports, SerialSource};

use crate::error::TransportError;

/// A source of protocol bytes, read one at a time.
pub trait ByteSource {
    /// Next byte, or `Ok(None)` when nothing arrived within the read timeout.
    /// `Err(TransportError::Closed)` means no more bytes will ever arrive.
    fn receive(&mut self) -> Result<Option<u8>, TransportError>;

    /// Human-readable name for logs and the status line.
    fn describe(&self) -> String;
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn receive(&mut self) -> Result<Option<u8>, TransportError> {
        (**self).receive()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
