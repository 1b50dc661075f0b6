//! # Printer Transport Layer
//!
//! The encoder only needs an ordered byte sink. This module defines that
//! capability and the backends that provide it.
//!
//! ## Available Transports
//!
//! - [`device`]: OS device nodes and plain files (`/dev/usb/lp0`, `/dev/ttyUSB0`)
//! - [`memory`]: In-memory sink for tests and dry runs
//! - [`discovery`]: Finding printer device nodes under `/dev`
//!
//! ## Ownership
//!
//! A sink is owned by exactly one session. Two sessions writing to the same
//! physical printer interleave their bytes and corrupt the command stream;
//! keeping them apart is the caller's job.

use std::io;

pub mod device;
pub mod discovery;
pub mod memory;

pub use device::{DeviceChannel, DeviceSink};
pub use discovery::{DeviceInfo, DeviceKind, discover, find_device};
pub use memory::{MemoryHandle, MemorySink};

/// Something bytes can be written to, and optionally read from.
///
/// All calls block until the underlying channel accepts or rejects the data.
pub trait ByteSink {
    /// Write the whole buffer.
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Push buffered bytes to the device.
    fn flush(&mut self) -> io::Result<()>;

    /// Release the channel. Writes after `close` fail.
    fn close(&mut self) -> io::Result<()>;

    /// Read status bytes from a bidirectional channel.
    ///
    /// Write-only channels keep this default, which reports
    /// [`io::ErrorKind::Unsupported`].
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let _ = buf;
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "channel is write-only",
        ))
    }
}

/// Something that can be opened into a [`ByteSink`].
pub trait Channel {
    /// The sink produced by a successful open
    type Sink: ByteSink;

    /// Human-readable target, used in logs and errors
    fn describe(&self) -> String;

    /// Open the channel
    fn open(self) -> io::Result<Self::Sink>;
}
