//! # ESC/P Protocol Implementation
//!
//! Low-level command builders for the ESC/P and ESC/P2 protocols used by
//! Epson-compatible dot-matrix printers. Every function returns the exact
//! bytes of one command; nothing here performs I/O.
//!
//! ## Module Structure
//!
//! - [`commands`]: Control codes, reset, line/form feed, tabs
//! - [`text`]: Pitch, print quality, bold, proportional mode, margins
//! - [`charset`]: Character table assignment and text encoding
//! - [`motion`]: Vertical feeds and horizontal positioning in centimeters
//!
//! ## Usage Example
//!
//! ```
//! use escp::printer::PinClass;
//! use escp::protocol::{charset, commands, motion, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::select_15cpi());
//! data.extend(motion::advance_vertical(5.0, PinClass::Nine));
//! data.extend(motion::absolute_horizontal(5.0));
//! data.extend(text::bold_on());
//! data.extend(charset::CharacterSet::USA.encode("Hello"));
//! data.extend(text::bold_off());
//! data.extend(commands::form_feed());
//!
//! // Send `data` to a printer via a session or transport...
//! ```

pub mod charset;
pub mod commands;
pub mod motion;
pub mod text;
