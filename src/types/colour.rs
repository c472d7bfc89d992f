//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque RGB colour. Palette entries never carry transparency; empty
/// cells are expressed with the grid sentinel instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Alpha of every colour.
    pub const ALPHA: u8 = 255;

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex colour string.
    ///
    /// Supports `#RGB` and `#RRGGBB`, with or without the leading `#`.
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(format!("Invalid hex colour: {}", s));
        }

        match hex.len() {
            3 => {
                let r = parse_hex_byte(&hex[0..1])?;
                let g = parse_hex_byte(&hex[1..2])?;
                let b = parse_hex_byte(&hex[2..3])?;
                Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                Ok(Self::rgb(r, g, b))
            }
            _ => Err(format!("Invalid hex colour: {} (use #RGB or #RRGGBB)", s)),
        }
    }

    /// Convert to an RGBA array with full opacity.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, Self::ALPHA]
    }
}

impl FromStr for Colour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn parse_hex_byte(s: &str) -> Result<u8, String> {
    u8::from_str_radix(s, 16).map_err(|_| format!("Invalid hex digits: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_6digit() {
        assert_eq!(Colour::from_hex("#FF0000").unwrap(), Colour::rgb(255, 0, 0));
        assert_eq!(Colour::from_hex("1a1a2e").unwrap(), Colour::rgb(0x1a, 0x1a, 0x2e));
    }

    #[test]
    fn test_from_hex_3digit() {
        assert_eq!(Colour::from_hex("#ABC").unwrap(), Colour::rgb(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("").is_err());
        assert!(Colour::from_hex("#ÿÿ").is_err());
    }

    #[test]
    fn test_rgba_is_opaque() {
        assert_eq!(Colour::rgb(1, 2, 3).to_rgba(), [1, 2, 3, 255]);
    }

    #[test]
    fn test_display_roundtrips_through_serde() {
        let json = serde_json::to_string(&Colour::rgb(255, 0, 16)).unwrap();
        assert_eq!(json, "\"#FF0010\"");
        let back: Colour = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Colour::rgb(255, 0, 16));
    }
}
