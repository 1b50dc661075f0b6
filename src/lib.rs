//! # escp - ESC/P Dot-Matrix Printer Library
//!
//! escp drives Epson-compatible dot-matrix printers (ESC/P and ESC/P2) by
//! writing raw escape sequences to the printer device. It provides:
//!
//! - **Protocol implementation**: byte-exact ESC/P command builders
//! - **Sessions**: an open printer channel with typed open/close
//! - **Unit conversion**: centimeters to the printer's feed and position units
//! - **Transport**: device nodes, files, and an in-memory sink
//!
//! ## Quick Start
//!
//! ```no_run
//! use escp::{PrinterProfile, Session, transport::DeviceChannel};
//!
//! // Open the printer; this also resets it to 10 cpi, draft, USA table
//! let mut escp = Session::open(PrinterProfile::NINE_PIN, DeviceChannel::new("/dev/usb/lp0"))?;
//!
//! escp.select_15cpi()?;
//! escp.advance_vertical(5.0)?; // 5cm down
//! escp.set_absolute_horizontal_position(5.0)?; // 5cm from the left margin
//! escp.bold(true)?;
//! escp.print("Let's print some matrix text ;)")?;
//! escp.bold(false)?;
//! escp.form_feed()?; // eject the sheet
//!
//! escp.close()?;
//! # Ok::<(), escp::EscpError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/P command builders |
//! | [`session`] | Open printer session |
//! | [`transport`] | Byte sinks, devices, discovery |
//! | [`printer`] | Printer profiles |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Any printer that understands ESC/P (9-pin) or ESC/P2 (24/48-pin), e.g.
//! Epson LX-300, FX-890, LQ-570. The pin class only changes the vertical
//! feed unit.

pub mod error;
pub mod printer;
pub mod protocol;
pub mod session;
pub mod transport;

// Re-exports for convenience
pub use error::{EscpError, EscpResult};
pub use printer::{PinClass, PrinterProfile};
pub use protocol::charset::CharacterSet;
pub use session::Session;
