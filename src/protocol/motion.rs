//! # ESC/P Head and Paper Movement
//!
//! Converts physical distances in centimeters to ESC/P movement commands.
//!
//! ## Unit Scales
//!
//! | Command | Direction | Unit |
//! |---------|-----------|------|
//! | `ESC J n` | Paper feed, forward | 1/216" (9-pin), 1/180" (24/48-pin) |
//! | `ESC \ nL nH` | Relative horizontal | 1/120" |
//! | `ESC $ nL nH` | Absolute horizontal | 1/60" |
//!
//! The relative and absolute horizontal commands use different units. That
//! is how the printers implement them; do not unify the two scales.
//!
//! ## Truncation
//!
//! Every conversion truncates toward zero after scaling, in `f32`:
//!
//! ```text
//! units = trunc((centimeters / 2.54) * units_per_inch)
//! ```
//!
//! Negative distances are outside the protocol and saturate to 0 units.
//! Vertical feeds saturate at [`MAX_VERTICAL_UNITS`] and horizontal moves
//! at 65535 units, so an infinite or absurd distance yields a bounded
//! command stream.

use super::commands::{ESC, u16_le};
use crate::printer::PinClass;

/// Centimeters per inch
pub const CM_PER_INCH: f32 = 2.54;

/// Largest `ESC J` parameter emitted in one command.
///
/// The protocol allows 0-255, but values near 255 misbehave on real
/// hardware (observed at 1.5 cm feeds). 127 has no known failures. This is
/// an empirical limit, not a documented one.
pub const MAX_FEED_UNITS: u8 = 127;

/// Largest vertical distance converted in one call, in `ESC J` units.
///
/// About 7.7 m at 1/216", well past any form length; larger requests are
/// clamped to it (517 commands).
pub const MAX_VERTICAL_UNITS: u32 = u16::MAX as u32;

/// Units per inch of the relative horizontal move (`ESC \`)
pub const RELATIVE_UNITS_PER_INCH: u16 = 120;

/// Units per inch of the absolute horizontal position (`ESC $`)
pub const ABSOLUTE_UNITS_PER_INCH: u16 = 60;

/// Convert centimeters to device units, truncating toward zero.
///
/// ## Example
///
/// ```
/// use escp::protocol::motion::cm_to_units;
///
/// // 5cm at 180 units/inch: 1.9685" * 180 = 354.33
/// assert_eq!(cm_to_units(5.0, 180), 354);
/// assert_eq!(cm_to_units(0.0, 180), 0);
/// ```
#[inline]
pub fn cm_to_units(centimeters: f32, units_per_inch: u16) -> u32 {
    let inches = centimeters / CM_PER_INCH;
    // float-to-int `as` saturates: negative and NaN become 0
    (inches * units_per_inch as f32) as u32
}

// ============================================================================
// VERTICAL
// ============================================================================

/// # Micro Feed (ESC J n)
///
/// Advances the paper by `n` vertical units without a carriage return.
///
/// ## Protocol Details
///
/// | Format  | Bytes     |
/// |---------|-----------|
/// | ASCII   | ESC J n   |
/// | Hex     | 1B 4A n   |
/// | Decimal | 27 74 n   |
#[inline]
pub fn feed_units(n: u8) -> Vec<u8> {
    vec![ESC, b'J', n]
}

/// Vertical units for a distance, for the given head class, clamped to
/// [`MAX_VERTICAL_UNITS`]
#[inline]
pub fn vertical_units(centimeters: f32, pins: PinClass) -> u32 {
    cm_to_units(centimeters, pins.vertical_units_per_inch()).min(MAX_VERTICAL_UNITS)
}

/// # Advance Paper (ESC J n, repeated)
///
/// Converts the distance to units once, then emits `ESC J 127` while more
/// than 127 units remain, followed by a single `ESC J n` for the rest.
/// Distances that truncate to 0 units produce no bytes.
///
/// ## Example
///
/// ```
/// use escp::printer::PinClass;
/// use escp::protocol::motion::advance_vertical;
///
/// // 2.54cm = 1 inch = 180 units on a 24-pin printer: 127 + 53
/// assert_eq!(
///     advance_vertical(2.54, PinClass::TwentyFour),
///     vec![0x1B, 0x4A, 127, 0x1B, 0x4A, 53]
/// );
/// ```
pub fn advance_vertical(centimeters: f32, pins: PinClass) -> Vec<u8> {
    let mut units = vertical_units(centimeters, pins);
    let mut out = Vec::with_capacity(3 * units.div_ceil(MAX_FEED_UNITS as u32) as usize);

    while units > 0 {
        let n = units.min(MAX_FEED_UNITS as u32) as u8;
        out.extend(feed_units(n));
        units -= n as u32;
    }

    out
}

// ============================================================================
// HORIZONTAL
// ============================================================================

/// Clamp a unit count into the 16-bit parameter range.
#[inline]
fn to_param(units: u32) -> u16 {
    units.min(u16::MAX as u32) as u16
}

/// # Relative Horizontal Move (ESC \ nL nH)
///
/// Moves the print position right by `cm` in 1/120" units.
///
/// ## Protocol Details
///
/// | Format  | Bytes          |
/// |---------|----------------|
/// | ASCII   | ESC \ nL nH    |
/// | Hex     | 1B 5C nL nH    |
///
/// `nL = units % 256`, `nH = units / 256`.
///
/// ## Example
///
/// ```
/// use escp::protocol::motion::advance_horizontal;
///
/// // 10cm: 3.937" * 120 = 472.44 -> 472 = 0x01D8
/// assert_eq!(advance_horizontal(10.0), vec![0x1B, 0x5C, 0xD8, 0x01]);
/// ```
pub fn advance_horizontal(centimeters: f32) -> Vec<u8> {
    let units = to_param(cm_to_units(centimeters, RELATIVE_UNITS_PER_INCH));
    let [low, high] = u16_le(units);
    vec![ESC, b'\\', low, high]
}

/// # Absolute Horizontal Position (ESC $ nL nH)
///
/// Sets the print position to `cm` from the left margin, in 1/60" units.
/// Half the resolution of [`advance_horizontal`].
///
/// ## Protocol Details
///
/// | Format  | Bytes          |
/// |---------|----------------|
/// | ASCII   | ESC $ nL nH    |
/// | Hex     | 1B 24 nL nH    |
///
/// ## Example
///
/// ```
/// use escp::protocol::motion::absolute_horizontal;
///
/// // 10cm: 3.937" * 60 = 236.22 -> 236
/// assert_eq!(absolute_horizontal(10.0), vec![0x1B, 0x24, 0xEC, 0x00]);
/// ```
pub fn absolute_horizontal(centimeters: f32) -> Vec<u8> {
    let units = to_param(cm_to_units(centimeters, ABSOLUTE_UNITS_PER_INCH));
    let [low, high] = u16_le(units);
    vec![ESC, b'$', low, high]
}

// ============================================================================
// TESTS
// ============================================================================
