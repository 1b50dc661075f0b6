//! # Printer Configuration
//!
//! Hardware classes of ESC/P printers and the unit scales they imply.
//!
//! ## Supported Printer Classes
//!
//! | Profile | Command set | `ESC J` unit | Examples |
//! |---------|-------------|--------------|----------|
//! | 9-pin | ESC/P | 1/216 inch | FX-890, LX-300 |
//! | 24-pin | ESC/P2 | 1/180 inch | LQ-570, LQ-590 |
//! | 48-pin | ESC/P2 | 1/180 inch | SQ/48-pin models |
//!
//! ## Usage
//!
//! ```
//! use escp::printer::{PinClass, PrinterProfile};
//!
//! let profile = PrinterProfile::parse("24pin")?;
//! assert_eq!(profile.pin_class, PinClass::TwentyFour);
//! assert_eq!(profile.vertical_units_per_inch(), 180);
//! # Ok::<(), escp::EscpError>(())
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::EscpError;

/// Print head class.
///
/// Only the vertical feed unit differs between the classes; every other
/// command in this crate is encoded the same way for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinClass {
    /// 9-pin ESC/P printers
    Nine,
    /// 24-pin and 48-pin ESC/P2 printers
    TwentyFour,
}

impl PinClass {
    /// Units per inch of the `ESC J n` micro feed
    #[inline]
    pub const fn vertical_units_per_inch(self) -> u16 {
        match self {
            Self::Nine => 216,
            Self::TwentyFour => 180,
        }
    }
}

/// # Printer Profile
///
/// Immutable description of the target printer, fixed when a session is
/// opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterProfile {
    /// Display name
    pub name: Cow<'static, str>,

    /// Head class, selects the vertical unit scale
    pub pin_class: PinClass,
}

impl PrinterProfile {
    /// Generic 9-pin ESC/P printer
    pub const NINE_PIN: Self = Self {
        name: Cow::Borrowed("9-pin ESC/P"),
        pin_class: PinClass::Nine,
    };

    /// Generic 24-pin ESC/P2 printer
    pub const TWENTY_FOUR_PIN: Self = Self {
        name: Cow::Borrowed("24-pin ESC/P2"),
        pin_class: PinClass::TwentyFour,
    };

    /// Generic 48-pin ESC/P2 printer (same units as 24-pin)
    pub const FORTY_EIGHT_PIN: Self = Self {
        name: Cow::Borrowed("48-pin ESC/P2"),
        pin_class: PinClass::TwentyFour,
    };

    /// Create a named profile
    pub fn new(name: impl Into<Cow<'static, str>>, pin_class: PinClass) -> Self {
        Self {
            name: name.into(),
            pin_class,
        }
    }

    /// Built-in profile for a pin count (9, 24 or 48)
    pub fn from_pins(pins: u8) -> Result<Self, EscpError> {
        match pins {
            9 => Ok(Self::NINE_PIN),
            24 => Ok(Self::TWENTY_FOUR_PIN),
            48 => Ok(Self::FORTY_EIGHT_PIN),
            other => Err(EscpError::InvalidConfig(format!(
                "Unsupported pin count {}. Use 9, 24 or 48",
                other
            ))),
        }
    }

    /// Parse a profile string (CLI args, env vars).
    ///
    /// Formats:
    /// - `"9"`, `"9pin"`, `"9-pin"`, `"escp"` → 9-pin
    /// - `"24"`, `"24pin"`, `"24-pin"`, `"escp2"` → 24-pin
    /// - `"48"`, `"48pin"`, `"48-pin"` → 48-pin
    /// - Any built-in profile's display name (e.g. `"24-pin ESC/P2"`)
    pub fn parse(s: &str) -> Result<Self, EscpError> {
        if let Some(profile) = Self::built_in().into_iter().find(|p| p.name == s) {
            return Ok(profile);
        }

        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "escp" => return Ok(Self::NINE_PIN),
            "escp2" => return Ok(Self::TWENTY_FOUR_PIN),
            _ => {}
        }

        let digits = lower
            .strip_suffix("pin")
            .map(|d| d.trim_end_matches(['-', ' ']))
            .unwrap_or(&lower);

        let pins: u8 = digits.parse().map_err(|_| {
            EscpError::InvalidConfig(format!(
                "Unknown printer profile '{}'. Use 9pin, 24pin or 48pin",
                s
            ))
        })?;
        Self::from_pins(pins)
    }

    /// List all built-in profiles.
    pub fn built_in() -> Vec<Self> {
        vec![Self::NINE_PIN, Self::TWENTY_FOUR_PIN, Self::FORTY_EIGHT_PIN]
    }

    /// Units per inch of the `ESC J n` micro feed for this profile
    #[inline]
    pub fn vertical_units_per_inch(&self) -> u16 {
        self.pin_class.vertical_units_per_inch()
    }
}

impl Default for PrinterProfile {
    fn default() -> Self {
        Self::NINE_PIN
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_units() {
        assert_eq!(PinClass::Nine.vertical_units_per_inch(), 216);
        assert_eq!(PinClass::TwentyFour.vertical_units_per_inch(), 180);
        assert_eq!(PrinterProfile::FORTY_EIGHT_PIN.vertical_units_per_inch(), 180);
    }

    #[test]
    fn test_default_is_nine_pin() {
        assert_eq!(PrinterProfile::default(), PrinterProfile::NINE_PIN);
    }

    #[test]
    fn test_from_pins() {
        assert_eq!(PrinterProfile::from_pins(9).unwrap().pin_class, PinClass::Nine);
        assert_eq!(
            PrinterProfile::from_pins(48).unwrap(),
            PrinterProfile::FORTY_EIGHT_PIN
        );
        assert!(matches!(
            PrinterProfile::from_pins(12),
            Err(EscpError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_parse_variants() {
        for s in ["9", "9pin", "9-pin", "9 pin", "ESCP", "9-pin ESC/P"] {
            assert_eq!(PrinterProfile::parse(s).unwrap(), PrinterProfile::NINE_PIN, "{s}");
        }
        for s in ["24", "24PIN", "24-pin", "escp2"] {
            assert_eq!(
                PrinterProfile::parse(s).unwrap(),
                PrinterProfile::TWENTY_FOUR_PIN,
                "{s}"
            );
        }
        assert_eq!(
            PrinterProfile::parse("48pin").unwrap(),
            PrinterProfile::FORTY_EIGHT_PIN
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PrinterProfile::parse("").is_err());
        assert!(PrinterProfile::parse("laser").is_err());
        assert!(PrinterProfile::parse("16pin").is_err());
    }

    #[test]
    fn test_serde_roundtrip_custom_name() {
        let profile = PrinterProfile::new("Epson LQ-570", PinClass::TwentyFour);
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(json, r#"{"name":"Epson LQ-570","pin_class":"twenty_four"}"#);
        let back: PrinterProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
