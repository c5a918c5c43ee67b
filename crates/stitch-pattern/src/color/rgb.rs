//! 8-bit RGB color type

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color with 8-bit red, green and blue channels.
///
/// Used for image pixels, quantized palette entries and thread reference
/// entries alike. Channel values are always within `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    ///
    /// # Example
    /// ```
    /// use stitch_pattern::Rgb;
    /// let white = Rgb::from_bytes([255, 255, 255]);
    /// assert_eq!(white.g, 255);
    /// ```
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Create a color from floating point channels.
    ///
    /// Rounds and clamps each channel to `0..=255`. Cluster centres come out
    /// of the quantizer as real-valued means and pass through here.
    ///
    /// # Example
    /// ```
    /// use stitch_pattern::Rgb;
    /// let c = Rgb::from_f64([12.4, 300.0, -3.0]);
    /// assert_eq!(c.to_bytes(), [12, 255, 0]);
    /// ```
    #[inline]
    pub fn from_f64(channels: [f64; 3]) -> Self {
        let q = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Self::new(q(channels[0]), q(channels[1]), q(channels[2]))
    }

    /// Channels as floating point values, for clustering arithmetic.
    #[inline]
    pub fn to_f64(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// CSS functional notation, e.g. `rgb(199,43,59)`.
    pub fn to_css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// Uppercase hex notation with a leading hash, e.g. `#C72B3B`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`. Parsing is
    /// case-insensitive and surrounding whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use stitch_pattern::Rgb;
    ///
    /// let white: Rgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white, Rgb::new(255, 255, 255));
    ///
    /// let red: Rgb = "f00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        let c: Rgb = "#C72B3B".parse().unwrap();
        assert_eq!(c, Rgb::new(199, 43, 59));
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        let c: Rgb = "  #c72b3b ".parse().unwrap();
        assert_eq!(c, Rgb::new(199, 43, 59));
    }

    #[test]
    fn test_parse_shorthand() {
        let c: Rgb = "#0F8".parse().unwrap();
        assert_eq!(c, Rgb::new(0, 255, 136));
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert!(matches!(
            "#12345".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength)
        ));
        assert!(matches!("".parse::<Rgb>(), Err(ParseColorError::InvalidLength)));
    }

    #[test]
    fn test_parse_rejects_bad_digit() {
        assert!(matches!(
            "#GG0000".parse::<Rgb>(),
            Err(ParseColorError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_parse_rejects_multibyte_input() {
        assert!("#ééé".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_from_f64_rounds_and_clamps() {
        assert_eq!(Rgb::from_f64([0.49, 0.5, 254.6]).to_bytes(), [0, 1, 255]);
        assert_eq!(Rgb::from_f64([-10.0, 1e9, 128.0]).to_bytes(), [0, 255, 128]);
    }

    #[test]
    fn test_formatting() {
        let c = Rgb::new(7, 128, 255);
        assert_eq!(c.to_css(), "rgb(7,128,255)");
        assert_eq!(c.to_hex(), "#0780FF");
        assert_eq!(c.to_string(), "#0780FF");
    }
}
