//! # ESC/P Control Codes and Basic Commands
//!
//! This module holds the control bytes of the ESC/P and ESC/P2 protocol used
//! by Epson-compatible dot-matrix printers (LX-300, LQ-570, FX-890, ...) and
//! the commands that are not tied to text styling or head movement.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `CR`, `LF`, `FF`, `HT`
//! - Two bytes: `ESC @`, `ESC P`, `ESC E`
//! - With parameters: `ESC J n`, `ESC $ nL nH`, `ESC ( t nL nH d1 d2 d3`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x01D8 is sent as bytes `[0xD8, 0x01]`
//!
//! ## Reference
//!
//! Based on the Epson "ESC/P Reference Manual" (ESC/P and ESC/P2 command
//! sets for 9-pin and 24/48-pin printers).

// ============================================================================
// CONTROL CODES
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// Every ESC/P command with parameters starts with ESC (0x1B).
pub const ESC: u8 = 0x1B;

/// CR (Carriage Return) - Move the print position to the left margin
pub const CR: u8 = 0x0D;

/// LF (Line Feed) - Advance the paper by the current line spacing
pub const LF: u8 = 0x0A;

/// FF (Form Feed) - Advance to the top of the next page (ejects single sheets)
pub const FF: u8 = 0x0C;

/// HT (Horizontal Tab) - Move to the next horizontal tab stop
///
/// Default tab stops sit every 8 characters at the current pitch.
pub const HT: u8 = 0x09;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on defaults.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## What Gets Reset
///
/// - Pitch, print quality and character styles
/// - Margins and tab stops
/// - Line spacing (back to 1/6 inch)
/// - The print position (the paper does not move)
///
/// ## What Does NOT Reset
///
/// - Data already in the input buffer
/// - User-defined characters on older 9-pin models
/// - Panel (DIP switch) settings
///
/// ## Example
///
/// ```
/// use escp::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// LINE AND PAGE CONTROL
// ============================================================================

/// # New Line (CR LF)
///
/// Returns the head to the left margin and advances one line.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | CR LF |
/// | Hex     | 0D 0A |
///
/// CR is always sent first: the reference manual requires it to guarantee
/// the horizontal position resets on printers whose panel setting does not
/// add an automatic CR to LF.
///
/// ## Example
///
/// ```
/// use escp::protocol::commands;
///
/// assert_eq!(commands::line_feed(), vec![0x0D, 0x0A]);
/// ```
#[inline]
pub fn line_feed() -> Vec<u8> {
    vec![CR, LF]
}

/// # Eject Page (CR FF)
///
/// Returns the head to the left margin and feeds to the top of the next
/// page. With single sheets this ejects the current sheet.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | CR FF |
/// | Hex     | 0D 0C |
#[inline]
pub fn form_feed() -> Vec<u8> {
    vec![CR, FF]
}

/// # Horizontal Tabs (HT × n)
///
/// Emits `n` tab bytes. `n = 0` produces an empty sequence.
///
/// ## Example
///
/// ```
/// use escp::protocol::commands;
///
/// assert_eq!(commands::horizontal_tab(3), vec![0x09, 0x09, 0x09]);
/// assert!(commands::horizontal_tab(0).is_empty());
/// ```
#[inline]
pub fn horizontal_tab(n: usize) -> Vec<u8> {
    vec![HT; n]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// Equivalent to `low = value % 256`, `high = value / 256`.
///
/// ## Example
///
/// ```
/// use escp::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(472), [0xD8, 0x01]); // 10cm relative move
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
