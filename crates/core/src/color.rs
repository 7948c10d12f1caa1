//! RGB color primitives shared by the analyzer, palette and product ranking.

use serde::Serialize;

use crate::error::CoreError;

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb` (either case).
    pub fn from_hex(hex: &str) -> Result<Self, CoreError> {
        parse_hex(hex).ok_or_else(|| CoreError::Validation(format!("Invalid hex color '{hex}'")))
    }

    /// Lower-case `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Build a color from floating-point channels, clamping to `0..=255`.
    pub fn from_f64(channels: [f64; 3]) -> Self {
        let c = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Self::new(c(channels[0]), c(channels[1]), c(channels[2]))
    }

    pub fn channels(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Euclidean distance in RGB space.
    pub fn distance(self, other: Rgb) -> f64 {
        distance(self.channels(), other.channels())
    }

    /// Mean of the three channels.
    pub fn brightness(self) -> f64 {
        brightness(self.channels())
    }

    /// `(max - min) / max`, zero for black.
    pub fn saturation(self) -> f64 {
        saturation(self.channels())
    }
}

/// A color with a human-readable name, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedColor {
    pub name: String,
    pub hex: String,
}

impl NamedColor {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}

/// Returns `true` for `#rrggbb` / `rrggbb` strings.
pub fn is_valid_hex(hex: &str) -> bool {
    parse_hex(hex).is_some()
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let s = hex.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 || !s.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some(Rgb::new(r, g, b))
}

/// Euclidean distance between two float triples.
pub fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

pub fn brightness(c: [f64; 3]) -> f64 {
    (c[0] + c[1] + c[2]) / 3.0
}

pub fn saturation(c: [f64; 3]) -> f64 {
    let max = c[0].max(c[1]).max(c[2]);
    let min = c[0].min(c[1]).min(c[2]);
    if max > 0.0 {
        (max - min) / max
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#F6EDE4").unwrap(), Rgb::new(246, 237, 228));
        assert_eq!(Rgb::from_hex("292420").unwrap(), Rgb::new(41, 36, 32));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_matches!(Rgb::from_hex("#fff"), Err(CoreError::Validation(_)));
        assert_matches!(Rgb::from_hex("zzzzzz"), Err(CoreError::Validation(_)));
        assert!(!is_valid_hex("#12345g"));
        assert!(!is_valid_hex(""));
        assert!(!is_valid_hex("#ééé"));
    }

    #[test]
    fn formats_lower_case() {
        assert_eq!(Rgb::new(255, 0, 127).to_hex(), "#ff007f");
    }

    #[test]
    fn distance_and_brightness() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert!((black.distance(white) - (3.0f64 * 255.0 * 255.0).sqrt()).abs() < 1e-9);
        assert_eq!(white.brightness(), 255.0);
        assert_eq!(black.saturation(), 0.0);
        assert!((Rgb::new(200, 100, 100).saturation() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn from_f64_clamps_and_rounds() {
        assert_eq!(Rgb::from_f64([-4.0, 127.6, 300.0]), Rgb::new(0, 128, 255));
    }
}
