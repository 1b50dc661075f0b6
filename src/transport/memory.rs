//! # In-Memory Transport
//!
//! A [`ByteSink`] that records everything written to it. The sink and its
//! [`MemoryHandle`]s share one buffer, so the bytes stay inspectable after
//! the session that owned the sink has been closed.
//!
//! Failures can be injected to exercise error paths:
//! - [`MemorySink::refuse_open`]: opening the channel fails
//! - [`MemorySink::fail_after`]: writes fail once `n` bytes were accepted
//!
//! ## Example
//!
//! ```
//! use escp::printer::PrinterProfile;
//! use escp::session::Session;
//! use escp::transport::MemorySink;
//!
//! let sink = MemorySink::new();
//! let output = sink.handle();
//!
//! let mut session = Session::open(PrinterProfile::NINE_PIN, sink)?;
//! session.line_feed()?;
//! session.close()?;
//!
//! assert!(output.is_closed());
//! assert!(output.bytes().ends_with(&[0x0D, 0x0A]));
//! # Ok::<(), escp::EscpError>(())
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::io;
use std::rc::Rc;

use super::{ByteSink, Channel};

#[derive(Debug, Default)]
struct MemoryState {
    bytes: Vec<u8>,
    status: VecDeque<u8>,
    flushes: usize,
    closed: bool,
    refuse_open: bool,
    fail_after: Option<usize>,
}

/// In-memory byte sink
#[derive(Debug, Default)]
pub struct MemorySink {
    state: Rc<RefCell<MemoryState>>,
}

/// Read-only view of a [`MemorySink`]'s recorded output
#[derive(Debug, Clone)]
pub struct MemoryHandle {
    state: Rc<RefCell<MemoryState>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Make [`Channel::open`] fail with `ConnectionRefused`
    pub fn refuse_open(self) -> Self {
        self.state.borrow_mut().refuse_open = true;
        self
    }

    /// Accept `n` bytes in total, then fail every write with `BrokenPipe`.
    ///
    /// A write that crosses the limit is accepted partially, like a cable
    /// pulled in the middle of a command.
    pub fn fail_after(self, n: usize) -> Self {
        self.state.borrow_mut().fail_after = Some(n);
        self
    }

    /// Queue status bytes returned by [`ByteSink::read`]
    pub fn with_status(self, status: &[u8]) -> Self {
        self.state.borrow_mut().status.extend(status);
        self
    }

    /// Handle for inspecting the output
    pub fn handle(&self) -> MemoryHandle {
        MemoryHandle {
            state: Rc::clone(&self.state),
        }
    }
}

impl MemoryHandle {
    /// Copy of everything written so far
    pub fn bytes(&self) -> Vec<u8> {
        self.state.borrow().bytes.clone()
    }

    /// Number of completed flushes
    pub fn flush_count(&self) -> usize {
        self.state.borrow().flushes
    }

    /// Whether the sink has been closed
    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }

    /// Output rendered as hex, 16 bytes per line
    pub fn hex(&self) -> String {
        hex_dump(&self.state.borrow().bytes)
    }
}

impl Channel for MemorySink {
    type Sink = Self;

    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn open(self) -> io::Result<Self> {
        if self.state.borrow().refuse_open {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "memory sink refused to open",
            ));
        }
        Ok(self)
    }
}

impl ByteSink for MemorySink {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        if state.closed {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "sink is closed"));
        }

        if let Some(limit) = state.fail_after {
            let room = limit.saturating_sub(state.bytes.len());
            if bytes.len() > room {
                state.bytes.extend_from_slice(&bytes[..room]);
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "injected write failure"));
            }
        }

        state.bytes.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        if state.closed {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "sink is closed"));
        }
        state.flushes += 1;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.state.borrow_mut().closed = true;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        let n = buf.len().min(state.status.len());
        for (slot, byte) in buf.iter_mut().zip(state.status.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

/// Render bytes as space-separated uppercase hex, 16 bytes per line.
///
/// ```
/// use escp::transport::memory::hex_dump;
///
/// assert_eq!(hex_dump(&[0x1B, 0x40]), "1B 40");
/// ```
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, line) in bytes.chunks(16).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for (j, byte) in line.iter().enumerate() {
            if j > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{:02X}", byte);
        }
    }
    out
}
