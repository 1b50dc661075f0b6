//! # ESC/P Text Styling Commands
//!
//! Character pitch, print quality, emphasis and margins.
//!
//! ## Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | 10 cpi | ESC P | Pica, condensed mode available |
//! | 15 cpi | ESC g | Condensed mode not available |
//! | Quality | ESC x n | Draft (fast) or LQ/NLQ (slow) |
//! | Bold | ESC E / ESC F | Emphasized text |
//! | Proportional | ESC p n | Proportional or fixed pitch |
//! | Margins | ESC l n / ESC Q n | Left/right margin in columns |
//!
//! All of these are plain one-shot commands: sending the same one twice has
//! the same effect as sending it once.

use super::commands::ESC;

// ============================================================================
// CHARACTER PITCH
// ============================================================================

/// Fixed character pitches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pitch {
    /// 10 characters per inch (pica)
    #[default]
    Cpi10,
    /// 15 characters per inch
    Cpi15,
}

/// # Select Character Pitch (ESC P / ESC g)
///
/// ## Protocol Details
///
/// | Pitch  | ASCII | Hex   |
/// |--------|-------|-------|
/// | 10 cpi | ESC P | 1B 50 |
/// | 15 cpi | ESC g | 1B 67 |
///
/// ## Behavior
///
/// - Cancels proportional mode on ESC/P2 printers
/// - Condensed printing (SI) only combines with 10 cpi
///
/// ## Example
///
/// ```
/// use escp::protocol::text::{pitch, Pitch};
///
/// assert_eq!(pitch(Pitch::Cpi15), vec![0x1B, 0x67]);
/// ```
pub fn pitch(p: Pitch) -> Vec<u8> {
    match p {
        Pitch::Cpi10 => vec![ESC, b'P'],
        Pitch::Cpi15 => vec![ESC, b'g'],
    }
}

/// Convenience function for 10 cpi
#[inline]
pub fn select_10cpi() -> Vec<u8> {
    pitch(Pitch::Cpi10)
}

/// Convenience function for 15 cpi
#[inline]
pub fn select_15cpi() -> Vec<u8> {
    pitch(Pitch::Cpi15)
}

// ============================================================================
// PRINT QUALITY
// ============================================================================

/// Print quality modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    /// Draft: single pass, fastest
    #[default]
    Draft = 0,
    /// Letter quality (NLQ on 9-pin printers)
    Letter = 1,
}

/// # Select Print Quality (ESC x n)
///
/// ## Protocol Details
///
/// | Format  | Bytes      |
/// |---------|------------|
/// | ASCII   | ESC x n    |
/// | Hex     | 1B 78 n    |
///
/// ## Parameters
///
/// - `n = '0'` (0x30): draft
/// - `n = '1'` (0x31): letter quality
///
/// The ASCII digit form is used rather than the binary 0/1 form; both are
/// accepted by the firmware.
///
/// ## Example
///
/// ```
/// use escp::protocol::text::{quality, Quality};
///
/// assert_eq!(quality(Quality::Draft), vec![0x1B, 0x78, 0x30]);
/// assert_eq!(quality(Quality::Letter), vec![0x1B, 0x78, 0x31]);
/// ```
pub fn quality(q: Quality) -> Vec<u8> {
    vec![ESC, b'x', b'0' + q as u8]
}

/// Convenience function for draft printing
#[inline]
pub fn draft() -> Vec<u8> {
    quality(Quality::Draft)
}

/// Convenience function for letter-quality printing
#[inline]
pub fn letter_quality() -> Vec<u8> {
    quality(Quality::Letter)
}

// ============================================================================
// EMPHASIS
// ============================================================================

/// # Bold On (ESC E)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC E |
/// | Hex     | 1B 45 |
#[inline]
pub fn bold_on() -> Vec<u8> {
    vec![ESC, b'E']
}

/// # Bold Off (ESC F)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC F |
/// | Hex     | 1B 46 |
#[inline]
pub fn bold_off() -> Vec<u8> {
    vec![ESC, b'F']
}

/// Bold on or off
#[inline]
pub fn bold(enabled: bool) -> Vec<u8> {
    if enabled { bold_on() } else { bold_off() }
}

// ============================================================================
// PROPORTIONAL SPACING
// ============================================================================

/// # Proportional Mode (ESC p n)
///
/// ## Protocol Details
///
/// | Mode   | Bytes    |
/// |--------|----------|
/// | On     | 1B 70 31 |
/// | Off    | 1B 70 30 |
///
/// ## Behavior
///
/// Turning proportional mode off returns to the last selected fixed pitch.
///
/// ## Example
///
/// ```
/// use escp::protocol::text::proportional;
///
/// assert_eq!(proportional(true), vec![0x1B, 0x70, 0x31]);
/// ```
pub fn proportional(enabled: bool) -> Vec<u8> {
    vec![ESC, b'p', if enabled { b'1' } else { b'0' }]
}

// ============================================================================
// MARGINS
// ============================================================================

/// # Set Left Margin (ESC l n)
///
/// `n` is a column count at the current pitch. The protocol accepts
/// 1-255; 0 is invalid but is sent as-is.
#[inline]
pub fn left_margin(columns: u8) -> Vec<u8> {
    vec![ESC, b'l', columns]
}

/// # Set Right Margin (ESC Q n)
///
/// `n` is a column count at the current pitch, 1-255.
#[inline]
pub fn right_margin(columns: u8) -> Vec<u8> {
    vec![ESC, b'Q', columns]
}

/// # Set Both Margins (ESC l n, ESC Q n)
///
/// ## Example
///
/// ```
/// use escp::protocol::text::margins;
///
/// assert_eq!(margins(5, 75), vec![0x1B, 0x6C, 5, 0x1B, 0x51, 75]);
/// ```
pub fn margins(left: u8, right: u8) -> Vec<u8> {
    let mut cmd = left_margin(left);
    cmd.extend(right_margin(right));
    cmd
}

// ============================================================================
// TESTS
// ============================================================================
