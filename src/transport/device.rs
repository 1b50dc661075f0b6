//! # Device Transport
//!
//! Writes to a printer through its OS device node, or to a plain file.
//!
//! | Device | Typical path |
//! |--------|--------------|
//! | USB printer class | `/dev/usb/lp0` |
//! | Parallel port | `/dev/lp0` |
//! | USB-serial adapter | `/dev/ttyUSB0` |
//! | Capture to file | any path, see [`DeviceChannel::file`] |
//!
//! ## TTY Configuration
//!
//! Serial devices are switched to raw mode on open so binary command bytes
//! pass through unmodified:
//!
//! - **No output processing**: OPOST off, so LF is not expanded to CR LF
//! - **No flow control**: XON/XOFF off, 0x11 and 0x13 are ordinary bytes
//! - **8-bit characters**: CS8, no parity
//!
//! ## Chunked Writes
//!
//! Writes larger than the chunk size (4096 bytes by default) are split, with
//! an optional delay between chunks for printers with small input buffers.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, instrument};

use super::{ByteSink, Channel};

/// Default chunk size for writes (bytes)
pub const CHUNK_SIZE: usize = 4096;

/// # Device Channel
///
/// An unopened printer device. [`Channel::open`] turns it into a
/// [`DeviceSink`].
///
/// ## Example
///
/// ```no_run
/// use escp::printer::PrinterProfile;
/// use escp::session::Session;
/// use escp::transport::DeviceChannel;
///
/// let channel = DeviceChannel::new("/dev/usb/lp0");
/// let mut session = Session::open(PrinterProfile::TWENTY_FOUR_PIN, channel)?;
/// session.print("Hello")?;
/// session.form_feed()?;
/// session.close()?;
/// # Ok::<(), escp::EscpError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DeviceChannel {
    path: PathBuf,
    duplex: bool,
    create: bool,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceChannel {
    /// Existing device node, opened write-only
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            duplex: false,
            create: false,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::ZERO,
        }
    }

    /// Plain output file, created or truncated on open
    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            create: true,
            ..Self::new(path)
        }
    }

    /// Open read+write so printer status can be read back.
    ///
    /// Many parallel and USB printer nodes refuse read access; keep this off
    /// unless the device is known to be bidirectional.
    pub fn duplex(mut self, duplex: bool) -> Self {
        self.duplex = duplex;
        self
    }

    /// Set the chunk size for large writes. Default is 4096 bytes.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Set the delay between chunks. Default is no delay.
    pub fn chunk_delay(mut self, delay: Duration) -> Self {
        self.chunk_delay = delay;
        self
    }

    /// Device path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Channel for DeviceChannel {
    type Sink = DeviceSink;

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self), fields(path = %self.path.display(), duplex = self.duplex))]
    fn open(self) -> io::Result<DeviceSink> {
        let file = OpenOptions::new()
            .write(true)
            .read(self.duplex)
            .create(self.create)
            .truncate(self.create)
            .open(&self.path)?;

        if is_tty(&file) {
            debug!("configuring tty for raw mode");
            configure_tty_raw(&file)?;
        }

        info!("device opened");
        Ok(DeviceSink {
            file: Some(file),
            path: self.path,
            duplex: self.duplex,
            chunk_size: self.chunk_size,
            chunk_delay: self.chunk_delay,
        })
    }
}

/// # Open Device
///
/// Byte sink over an open device node or file.
#[derive(Debug)]
pub struct DeviceSink {
    file: Option<File>,
    path: PathBuf,
    duplex: bool,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceSink {
    /// Device path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&mut self) -> io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "device is closed"))
    }
}

impl ByteSink for DeviceSink {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let chunk_size = self.chunk_size;
        let chunk_delay = self.chunk_delay;
        let file = self.file()?;

        if bytes.len() <= chunk_size {
            return file.write_all(bytes);
        }

        for chunk in bytes.chunks(chunk_size) {
            file.write_all(chunk)?;
            if !chunk_delay.is_zero() {
                thread::sleep(chunk_delay);
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file()?.flush()
    }

    fn close(&mut self) -> io::Result<()> {
        match self.file.take() {
            Some(mut file) => {
                let flushed = file.flush();
                drop(file);
                debug!(path = %self.path.display(), "device closed");
                flushed
            }
            None => Ok(()),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.duplex {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "device was opened write-only",
            ));
        }
        self.file()?.read(buf)
    }
}

#[cfg(unix)]
fn is_tty(file: &File) -> bool {
    use std::os::unix::io::AsRawFd;

    unsafe { libc::isatty(file.as_raw_fd()) == 1 }
}

#[cfg(not(unix))]
fn is_tty(_file: &File) -> bool {
    false
}

/// Configure a serial device for raw 8-bit transfer.
///
/// ## What Gets Disabled
///
/// - **Input flags**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR, ICRNL, IXON, IXOFF, IXANY
/// - **Output flags**: OPOST
/// - **Local flags**: ECHO, ECHONL, ICANON, ISIG, IEXTEN
/// - **Control flags**: CSIZE, PARENB (then CS8 is set)
#[cfg(unix)]
fn configure_tty_raw(file: &File) -> io::Result<()> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();

    let mut termios = MaybeUninit::uninit();
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_device_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let err = DeviceChannel::new(dir.path().join("lp9")).open().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_file_channel_writes_and_closes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.prn");

        let mut sink = DeviceChannel::file(&path).open().unwrap();
        sink.write_all(&[0x1B, 0x40]).unwrap();
        sink.flush().unwrap();
        sink.close().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), vec![0x1B, 0x40]);
        assert_eq!(
            sink.write_all(&[0x0D]).unwrap_err().kind(),
            io::ErrorKind::NotConnected
        );
        // closing twice is harmless at the sink level
        sink.close().unwrap();
    }

    #[test]
    fn test_chunked_write_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunks.prn");
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();

        let mut sink = DeviceChannel::file(&path).chunk_size(64).open().unwrap();
        sink.write_all(&data).unwrap();
        sink.close().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), data);
    }

    #[test]
    fn test_existing_node_is_not_truncated_or_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lp0");
        std::fs::write(&path, b"abc").unwrap();

        let mut sink = DeviceChannel::new(&path).open().unwrap();
        sink.write_all(b"X").unwrap();
        sink.close().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"Xbc");
    }

    #[test]
    fn test_read_requires_duplex() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lp0");
        std::fs::write(&path, [0x12]).unwrap();

        let mut write_only = DeviceChannel::new(&path).open().unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(
            write_only.read(&mut buf).unwrap_err().kind(),
            io::ErrorKind::Unsupported
        );

        let mut duplex = DeviceChannel::new(&path).duplex(true).open().unwrap();
        assert_eq!(duplex.read(&mut buf).unwrap(), 1);
        assert_eq!(buf[0], 0x12);
    }
}
