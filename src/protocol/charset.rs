//! # Character Tables
//!
//! ESC/P2 printers select a character table in two steps:
//!
//! 1. **Assign** a registered table to one of the selectable slots
//!    (`ESC ( t 3 0 d1 d2 d3`)
//! 2. **Select** the slot as the active table (`ESC t n`)
//!
//! Assigning alone has no visible effect; both commands are always sent.
//!
//! ## Registered Tables
//!
//! | Name | ID | Text encoding in this crate |
//! |------|----|-----------------------------|
//! | USA (PC437) | 1 | Code page 437 |
//! | BRAZIL (BRASCII) | 25 | Latin-1 range maps to itself |
//! | anything else | n | ASCII only |
//!
//! Table IDs are sent unvalidated. Printers ignore IDs they do not know.

use tracing::warn;

use super::commands::ESC;

/// Slot used for every table assignment
pub const TABLE_SLOT: u8 = 1;

/// ESC/P registered character table ID.
///
/// A plain value: any `u8` is accepted and sent to the printer as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharacterSet(pub u8);

impl CharacterSet {
    /// PC437 (USA)
    pub const USA: Self = Self(1);

    /// BRASCII (Brazil)
    pub const BRAZIL: Self = Self(25);

    /// Registered table ID
    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Parse a table name (`usa`, `pc437`, `brazil`, `brascii`) or a numeric ID.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "usa" | "pc437" => Some(Self::USA),
            "brazil" | "brascii" => Some(Self::BRAZIL),
            other => other.parse().ok().map(Self),
        }
    }

    /// Encode text for this table.
    ///
    /// ASCII always passes through. Characters the table cannot represent
    /// are replaced with `?` and logged.
    pub fn encode(self, text: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len());
        for ch in text.chars() {
            match self.encode_char(ch) {
                Some(byte) => out.push(byte),
                None => {
                    warn!(
                        table = self.0,
                        "unmapped character '{}' (U+{:04X}), replacing with '?'",
                        ch,
                        ch as u32
                    );
                    out.push(b'?');
                }
            }
        }
        out
    }

    fn encode_char(self, ch: char) -> Option<u8> {
        if ch.is_ascii() {
            return Some(ch as u8);
        }
        match self {
            Self::USA => PC437_HIGH
                .chars()
                .position(|c| c == ch)
                .map(|i| 0x80 + i as u8),
            Self::BRAZIL => matches!(ch, '\u{A0}'..='\u{FF}').then_some(ch as u8),
            _ => None,
        }
    }
}

impl Default for CharacterSet {
    fn default() -> Self {
        Self::USA
    }
}

impl From<u8> for CharacterSet {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

/// Bytes 0x80-0xFF of code page 437, in order.
const PC437_HIGH: &str = concat!(
    "ÇüéâäàåçêëèïîìÄÅÉæÆôöòûùÿÖÜ¢£¥₧ƒ",
    "áíóúñÑªº¿⌐¬½¼¡«»░▒▓│┤╡╢╖╕╣║╗╝╜╛┐",
    "└┴┬├─┼╞╟╚╔╩╦╠═╬╧╨╤╥╙╘╒╓╫╪┘┌█▄▌▐▀",
    "αßΓπΣσµτΦΘΩδ∞φε∩≡±≥≤⌠⌡÷≈°∙·√ⁿ²■\u{A0}",
);

// ============================================================================
// COMMANDS
// ============================================================================

/// # Assign Character Table (ESC ( t nL nH d1 d2 d3)
///
/// Registers table `code` into selectable slot `slot` (0-3).
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC ( t 3 0 d1 d2 d3 |
/// | Hex     | 1B 28 74 03 00 d1 d2 d3 |
///
/// ## Parameters
///
/// - `nL nH = 3 0`: three data bytes follow
/// - `d1`: slot
/// - `d2`: registered table ID
/// - `d3`: always 0 for the tables used here
pub fn assign_table(slot: u8, code: u8) -> Vec<u8> {
    vec![ESC, b'(', b't', 3, 0, slot, code, 0]
}

/// # Select Character Table (ESC t n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC t n |
/// | Hex     | 1B 74 n |
#[inline]
pub fn select_table(slot: u8) -> Vec<u8> {
    vec![ESC, b't', slot]
}

/// # Switch to a Character Set
///
/// Assigns `set` to slot 1 and selects slot 1.
///
/// ## Example
///
/// ```
/// use escp::protocol::charset::{character_set, CharacterSet};
///
/// assert_eq!(
///     character_set(CharacterSet::BRAZIL),
///     vec![0x1B, 0x28, 0x74, 0x03, 0x00, 0x01, 0x19, 0x00, 0x1B, 0x74, 0x01]
/// );
/// ```
pub fn character_set(set: CharacterSet) -> Vec<u8> {
    let mut cmd = assign_table(TABLE_SLOT, set.code());
    cmd.extend(select_table(TABLE_SLOT));
    cmd
}

// ============================================================================
// TESTS
// ============================================================================
