//! # Printer Session
//!
//! A [`Session`] is an open channel to one printer plus the profile it was
//! opened with. Holding a `Session` means the channel is open and the printer
//! has received the reset sequence; formatting commands exist only as
//! methods on it, and [`Session::close`] consumes it. Using a printer before
//! it is opened or after it is closed does not compile.
//!
//! ```text
//!   (no session) ──open()──► Session ──close()──► (no session)
//!                               │
//!                        write failure
//!                               ▼
//!                     poisoned: commands return InvalidState,
//!                     close() still releases the channel
//! ```
//!
//! ## Reset Sequence
//!
//! Sent by [`Session::open`] and [`Session::reset`]:
//!
//! | Command | Bytes |
//! |---------|-------|
//! | Initialize | 1B 40 |
//! | 10 cpi | 1B 50 |
//! | Draft | 1B 78 30 |
//! | USA table | 1B 28 74 03 00 01 01 00 1B 74 01 |
//!
//! ## Blocking
//!
//! Every method writes straight to the sink and returns when the write
//! completes. There is no timeout: a hung printer hangs the calling thread.
//! One session per physical printer; concurrent sessions interleave bytes.

use std::io::{self, Read};

use tracing::{debug, error, info, instrument, warn};

use crate::error::{EscpError, EscpResult};
use crate::printer::PrinterProfile;
use crate::protocol::charset::{self, CharacterSet};
use crate::protocol::{commands, motion, text};
use crate::transport::{ByteSink, Channel};

const POISONED: &str = "session poisoned by an earlier write failure";

/// Job streaming buffer size
const JOB_BUFFER: usize = 4096;

/// # Open Printer Session
///
/// ## Example
///
/// ```
/// use escp::printer::PrinterProfile;
/// use escp::session::Session;
/// use escp::transport::MemorySink;
///
/// let sink = MemorySink::new();
/// let output = sink.handle();
///
/// let mut session = Session::open(PrinterProfile::TWENTY_FOUR_PIN, sink)?;
/// session.select_15cpi()?;
/// session.advance_vertical(5.0)?;
/// session.set_absolute_horizontal_position(5.0)?;
/// session.bold(true)?;
/// session.print("Let's print some matrix text ;)")?;
/// session.bold(false)?;
/// session.form_feed()?;
/// session.close()?;
///
/// assert!(output.bytes().ends_with(&[0x0D, 0x0C]));
/// # Ok::<(), escp::EscpError>(())
/// ```
#[derive(Debug)]
pub struct Session<S: ByteSink> {
    sink: Option<S>,
    profile: PrinterProfile,
    charset: CharacterSet,
    poisoned: bool,
    channel: String,
}

impl<S: ByteSink> Session<S> {
    /// Open `channel` and send the reset sequence.
    ///
    /// ## Errors
    ///
    /// - [`EscpError::ChannelOpenFailed`] if the channel cannot be opened
    /// - [`EscpError::WriteFailed`] if the reset sequence cannot be written;
    ///   the channel is released before returning
    #[instrument(skip_all, fields(channel = %channel.describe(), profile = %profile.name))]
    pub fn open<C>(profile: PrinterProfile, channel: C) -> EscpResult<Self>
    where
        C: Channel<Sink = S>,
    {
        let target = channel.describe();
        let sink = channel.open().map_err(|source| {
            error!(error = %source, "failed to open channel");
            EscpError::ChannelOpenFailed {
                target: target.clone(),
                source,
            }
        })?;

        let mut session = Self {
            sink: Some(sink),
            profile,
            charset: CharacterSet::USA,
            poisoned: false,
            channel: target,
        };

        if let Err(e) = session.reset() {
            if let Err(release_err) = session.release() {
                warn!(error = %release_err, "release after failed reset also failed");
            }
            return Err(e);
        }

        info!("session open");
        Ok(session)
    }

    /// Re-send the reset sequence: initialize, 10 cpi, draft, USA table.
    pub fn reset(&mut self) -> EscpResult<()> {
        self.emit(&commands::init())?;
        self.select_10cpi()?;
        self.draft_quality()?;
        self.set_character_set(CharacterSet::USA)
    }

    /// Profile this session was opened with
    pub fn profile(&self) -> &PrinterProfile {
        &self.profile
    }

    /// Character table most recently selected through this session
    pub fn character_set(&self) -> CharacterSet {
        self.charset
    }

    /// Description of the open channel
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Whether a write failure has ended this session
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    // === Pitch & Quality ===

    /// 10 characters per inch
    pub fn select_10cpi(&mut self) -> EscpResult<()> {
        debug!("select 10 cpi");
        self.emit(&text::select_10cpi())
    }

    /// 15 characters per inch
    pub fn select_15cpi(&mut self) -> EscpResult<()> {
        debug!("select 15 cpi");
        self.emit(&text::select_15cpi())
    }

    /// Draft printing
    pub fn draft_quality(&mut self) -> EscpResult<()> {
        debug!("select draft quality");
        self.emit(&text::draft())
    }

    /// Letter-quality printing
    pub fn letter_quality(&mut self) -> EscpResult<()> {
        debug!("select letter quality");
        self.emit(&text::letter_quality())
    }

    pub fn bold(&mut self, enabled: bool) -> EscpResult<()> {
        debug!(enabled, "bold");
        self.emit(&text::bold(enabled))
    }

    pub fn proportional(&mut self, enabled: bool) -> EscpResult<()> {
        debug!(enabled, "proportional mode");
        self.emit(&text::proportional(enabled))
    }

    // === Character Set ===

    /// Assign `set` to table slot 1 and select it.
    ///
    /// Subsequent [`Session::print`] calls encode text for this table.
    pub fn set_character_set(&mut self, set: CharacterSet) -> EscpResult<()> {
        debug!(code = set.code(), "select character table");
        self.emit(&charset::character_set(set))?;
        self.charset = set;
        Ok(())
    }

    // === Movement ===

    /// Feed the paper forward by `centimeters`.
    ///
    /// Sent as `ESC J` commands of at most 127 units each; the unit scale
    /// comes from the profile's pin class.
    pub fn advance_vertical(&mut self, centimeters: f32) -> EscpResult<()> {
        let bytes = motion::advance_vertical(centimeters, self.profile.pin_class);
        debug!(
            centimeters,
            units = motion::vertical_units(centimeters, self.profile.pin_class),
            commands = bytes.len() / 3,
            "advance vertical"
        );
        for cmd in bytes.chunks(3) {
            self.emit(cmd)?;
        }
        Ok(())
    }

    /// Move the print position right by `centimeters` (1/120" units)
    pub fn advance_horizontal(&mut self, centimeters: f32) -> EscpResult<()> {
        debug!(centimeters, "advance horizontal");
        self.emit(&motion::advance_horizontal(centimeters))
    }

    /// Set the print position to `centimeters` from the left margin
    /// (1/60" units, unlike [`Session::advance_horizontal`])
    pub fn set_absolute_horizontal_position(&mut self, centimeters: f32) -> EscpResult<()> {
        debug!(centimeters, "absolute horizontal position");
        self.emit(&motion::absolute_horizontal(centimeters))
    }

    // === Layout ===

    /// Left and right margins in columns (1-255, not checked)
    pub fn set_margins(&mut self, left: u8, right: u8) -> EscpResult<()> {
        debug!(left, right, "set margins");
        self.emit(&text::margins(left, right))
    }

    /// Send `n` horizontal tabs
    pub fn horizontal_tab(&mut self, n: usize) -> EscpResult<()> {
        self.emit(&commands::horizontal_tab(n))
    }

    /// CR LF
    pub fn line_feed(&mut self) -> EscpResult<()> {
        self.emit(&commands::line_feed())
    }

    /// CR FF, ejects the sheet
    pub fn form_feed(&mut self) -> EscpResult<()> {
        debug!("form feed");
        self.emit(&commands::form_feed())
    }

    // === Data ===

    /// Print text encoded for the current character table.
    ///
    /// Characters the table cannot represent are printed as `?`.
    pub fn print(&mut self, text: &str) -> EscpResult<()> {
        let bytes = self.charset.encode(text);
        self.emit(&bytes)
    }

    /// Write bytes unchanged
    pub fn write_raw(&mut self, bytes: &[u8]) -> EscpResult<()> {
        self.emit(bytes)
    }

    /// Stream a prepared ESC/P job (e.g. a `.prn` file) to the printer.
    ///
    /// Returns the number of bytes sent. Errors reading `job` are reported
    /// as [`EscpError::Io`] and leave the session usable.
    #[instrument(skip_all, fields(channel = %self.channel))]
    pub fn send_job<R: Read>(&mut self, mut job: R) -> EscpResult<u64> {
        let mut buf = [0u8; JOB_BUFFER];
        let mut total = 0u64;

        loop {
            let n = match job.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(EscpError::Io(e)),
            };
            self.emit(&buf[..n])?;
            total += n as u64;
        }

        info!(bytes = total, "job sent");
        Ok(total)
    }

    /// Read status bytes from a bidirectional channel
    pub fn read_status(&mut self, buf: &mut [u8]) -> EscpResult<usize> {
        let sink = self.sink_mut()?;
        sink.read(buf).map_err(EscpError::ReadFailed)
    }

    /// Flush buffered bytes to the device
    pub fn flush(&mut self) -> EscpResult<()> {
        if self.poisoned {
            return Err(EscpError::InvalidState(POISONED));
        }
        let result = self.sink_mut()?.flush();
        result.map_err(|e| self.fail(e))
    }

    // === Lifecycle ===

    /// Flush and release the channel.
    ///
    /// Both steps are attempted even on a poisoned session; the first
    /// failure is returned as [`EscpError::WriteFailed`].
    ///
    /// `close` takes the session by value, so a closed session cannot be
    /// closed again:
    ///
    /// ```compile_fail,E0382
    /// use escp::{PrinterProfile, Session, transport::MemorySink};
    ///
    /// let session = Session::open(PrinterProfile::NINE_PIN, MemorySink::new())?;
    /// session.close()?;
    /// session.close()?;
    /// # Ok::<(), escp::EscpError>(())
    /// ```
    ///
    /// or written to:
    ///
    /// ```compile_fail,E0382
    /// use escp::{PrinterProfile, Session, transport::MemorySink};
    ///
    /// let mut session = Session::open(PrinterProfile::NINE_PIN, MemorySink::new())?;
    /// session.close()?;
    /// session.line_feed()?;
    /// # Ok::<(), escp::EscpError>(())
    /// ```
    #[instrument(skip_all, fields(channel = %self.channel))]
    pub fn close(mut self) -> EscpResult<()> {
        let result = self.release();
        match &result {
            Ok(()) => info!("session closed"),
            Err(e) => error!(error = %e, "session closed with error"),
        }
        result.map_err(EscpError::WriteFailed)
    }

    fn sink_mut(&mut self) -> EscpResult<&mut S> {
        self.sink
            .as_mut()
            .ok_or(EscpError::InvalidState("session is closed"))
    }

    fn emit(&mut self, bytes: &[u8]) -> EscpResult<()> {
        if self.poisoned {
            return Err(EscpError::InvalidState(POISONED));
        }
        if bytes.is_empty() {
            return Ok(());
        }
        let result = self.sink_mut()?.write_all(bytes);
        result.map_err(|e| self.fail(e))
    }

    fn fail(&mut self, e: io::Error) -> EscpError {
        error!(channel = %self.channel, error = %e, "write failed, session poisoned");
        self.poisoned = true;
        EscpError::WriteFailed(e)
    }

    fn release(&mut self) -> io::Result<()> {
        let Some(mut sink) = self.sink.take() else {
            return Ok(());
        };
        let flushed = sink.flush();
        let closed = sink.close();
        flushed.and(closed)
    }
}

impl<S: ByteSink> Drop for Session<S> {
    fn drop(&mut self) {
        if self.sink.is_some() {
            warn!(channel = %self.channel, "session dropped without close, releasing channel");
            if let Err(e) = self.release() {
                error!(channel = %self.channel, error = %e, "release on drop failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemorySink;

    const RESET: [u8; 18] = [
        0x1B, 0x40, 0x1B, 0x50, 0x1B, 0x78, 0x30, 0x1B, 0x28, 0x74, 0x03, 0x00, 0x01, 0x01,
        0x00, 0x1B, 0x74, 0x01,
    ];

    #[test]
    fn test_open_sends_reset_sequence() {
        let sink = MemorySink::new();
        let output = sink.handle();
        let session = Session::open(PrinterProfile::NINE_PIN, sink).unwrap();
        assert_eq!(output.bytes(), RESET.to_vec());
        assert_eq!(session.character_set(), CharacterSet::USA);
        assert_eq!(session.channel(), "memory");
        session.close().unwrap();
    }

    #[test]
    fn test_drop_releases_channel() {
        let sink = MemorySink::new();
        let output = sink.handle();
        {
            let _session = Session::open(PrinterProfile::NINE_PIN, sink).unwrap();
        }
        assert!(output.is_closed());
        assert_eq!(output.flush_count(), 1);
    }

    #[test]
    fn test_poisoned_session_rejects_commands() {
        let sink = MemorySink::new().fail_after(RESET.len() + 1);
        let mut session = Session::open(PrinterProfile::NINE_PIN, sink).unwrap();

        assert!(matches!(session.bold(true), Err(EscpError::WriteFailed(_))));
        assert!(session.is_poisoned());
        assert!(matches!(session.line_feed(), Err(EscpError::InvalidState(_))));
        assert!(matches!(session.horizontal_tab(0), Err(EscpError::InvalidState(_))));
        assert!(matches!(session.flush(), Err(EscpError::InvalidState(_))));
    }

    #[test]
    fn test_character_set_tracks_selection() {
        let mut session = Session::open(PrinterProfile::NINE_PIN, MemorySink::new()).unwrap();
        session.set_character_set(CharacterSet::BRAZIL).unwrap();
        assert_eq!(session.character_set(), CharacterSet::BRAZIL);
        session.reset().unwrap();
        assert_eq!(session.character_set(), CharacterSet::USA);
        session.close().unwrap();
    }
}
