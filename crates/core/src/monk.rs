//! The Monk Skin Tone scale (Monk01..Monk10).
//!
//! Every recommendation and product filter is keyed by one of these ten
//! tones. Clients send tones in several spellings (`Monk03`, `Monk 3`,
//! `MST3`); [`MonkTone::parse`] accepts all of them.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::color::Rgb;
use crate::error::CoreError;
use crate::season::SeasonalType;

static MONK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:monk|mst)[\s_-]*0*(\d{1,2})\s*$").expect("valid regex")
});

/// One of the ten Monk skin tones, lightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MonkTone {
    Monk01,
    Monk02,
    Monk03,
    Monk04,
    Monk05,
    Monk06,
    Monk07,
    Monk08,
    Monk09,
    Monk10,
}

/// Coarse depth grouping of the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    Light,
    Medium,
    Deep,
}

impl MonkTone {
    pub const ALL: [MonkTone; 10] = [
        MonkTone::Monk01,
        MonkTone::Monk02,
        MonkTone::Monk03,
        MonkTone::Monk04,
        MonkTone::Monk05,
        MonkTone::Monk06,
        MonkTone::Monk07,
        MonkTone::Monk08,
        MonkTone::Monk09,
        MonkTone::Monk10,
    ];

    /// 1-based position on the scale.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1..=10 => Some(Self::ALL[(n - 1) as usize]),
            _ => None,
        }
    }

    /// Canonical identifier, e.g. `Monk05`.
    pub fn id(self) -> String {
        format!("Monk{:02}", self.number())
    }

    /// Human-readable label, e.g. `Monk 5`.
    pub fn display_name(self) -> String {
        format!("Monk {}", self.number())
    }

    /// Reference swatch for this tone.
    pub fn hex(self) -> &'static str {
        match self {
            MonkTone::Monk01 => "#f6ede4",
            MonkTone::Monk02 => "#f3e7db",
            MonkTone::Monk03 => "#f7ead0",
            MonkTone::Monk04 => "#eadaba",
            MonkTone::Monk05 => "#d7bd96",
            MonkTone::Monk06 => "#a07e56",
            MonkTone::Monk07 => "#825c43",
            MonkTone::Monk08 => "#604134",
            MonkTone::Monk09 => "#3a312a",
            MonkTone::Monk10 => "#292420",
        }
    }

    pub fn rgb(self) -> Rgb {
        match self {
            MonkTone::Monk01 => Rgb::new(0xf6, 0xed, 0xe4),
            MonkTone::Monk02 => Rgb::new(0xf3, 0xe7, 0xdb),
            MonkTone::Monk03 => Rgb::new(0xf7, 0xea, 0xd0),
            MonkTone::Monk04 => Rgb::new(0xea, 0xda, 0xba),
            MonkTone::Monk05 => Rgb::new(0xd7, 0xbd, 0x96),
            MonkTone::Monk06 => Rgb::new(0xa0, 0x7e, 0x56),
            MonkTone::Monk07 => Rgb::new(0x82, 0x5c, 0x43),
            MonkTone::Monk08 => Rgb::new(0x60, 0x41, 0x34),
            MonkTone::Monk09 => Rgb::new(0x3a, 0x31, 0x2a),
            MonkTone::Monk10 => Rgb::new(0x29, 0x24, 0x20),
        }
    }

    pub fn depth(self) -> Depth {
        match self.number() {
            1..=4 => Depth::Light,
            5..=7 => Depth::Medium,
            _ => Depth::Deep,
        }
    }

    pub fn seasonal_type(self) -> SeasonalType {
        match self {
            MonkTone::Monk01 | MonkTone::Monk02 => SeasonalType::LightSpring,
            MonkTone::Monk03 => SeasonalType::ClearSpring,
            MonkTone::Monk04 => SeasonalType::WarmSpring,
            MonkTone::Monk05 => SeasonalType::SoftAutumn,
            MonkTone::Monk06 => SeasonalType::WarmAutumn,
            MonkTone::Monk07 => SeasonalType::DeepAutumn,
            MonkTone::Monk08 => SeasonalType::DeepWinter,
            MonkTone::Monk09 => SeasonalType::CoolWinter,
            MonkTone::Monk10 => SeasonalType::ClearWinter,
        }
    }

    /// Accepts `Monk03`, `Monk3`, `Monk 3`, `monk 03`, `MST3`.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        MONK_RE
            .captures(input)
            .and_then(|caps| caps[1].parse::<u8>().ok())
            .and_then(Self::from_number)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid Monk skin tone '{input}'. Expected Monk01..Monk10"
                ))
            })
    }

    /// Nearest reference swatch by plain RGB distance. Ties keep the lighter tone.
    pub fn closest_to(color: Rgb) -> Self {
        let mut best = MonkTone::Monk01;
        let mut best_distance = f64::INFINITY;
        for tone in Self::ALL {
            let d = color.distance(tone.rgb());
            if d < best_distance {
                best_distance = d;
                best = tone;
            }
        }
        best
    }
}

impl FromStr for MonkTone {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for MonkTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Monk{:02}", self.number())
    }
}

impl Serialize for MonkTone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_spellings() {
        for input in ["Monk03", "Monk3", "Monk 3", "monk 03", "MST3", " mst-03 "] {
            assert_eq!(MonkTone::parse(input).unwrap(), MonkTone::Monk03, "{input}");
        }
        assert_eq!(MonkTone::parse("Monk10").unwrap(), MonkTone::Monk10);
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        for input in ["Monk0", "Monk11", "Monk", "Fair", "", "3"] {
            assert!(MonkTone::parse(input).is_err(), "{input}");
        }
    }

    #[test]
    fn ids_and_display_names() {
        assert_eq!(MonkTone::Monk05.id(), "Monk05");
        assert_eq!(MonkTone::Monk10.display_name(), "Monk 10");
        assert_eq!(MonkTone::Monk07.to_string(), "Monk07");
    }

    #[test]
    fn hex_and_rgb_agree() {
        for tone in MonkTone::ALL {
            assert_eq!(tone.rgb().to_hex(), tone.hex());
        }
    }

    #[test]
    fn depth_bands() {
        assert_eq!(MonkTone::Monk04.depth(), Depth::Light);
        assert_eq!(MonkTone::Monk05.depth(), Depth::Medium);
        assert_eq!(MonkTone::Monk07.depth(), Depth::Medium);
        assert_eq!(MonkTone::Monk08.depth(), Depth::Deep);
    }

    #[test]
    fn reference_swatches_match_themselves() {
        for tone in MonkTone::ALL {
            assert_eq!(MonkTone::closest_to(tone.rgb()), tone);
        }
    }

    #[test]
    fn seasonal_mapping() {
        assert_eq!(MonkTone::Monk02.seasonal_type(), SeasonalType::LightSpring);
        assert_eq!(MonkTone::Monk05.seasonal_type(), SeasonalType::SoftAutumn);
        assert_eq!(MonkTone::Monk10.seasonal_type(), SeasonalType::ClearWinter);
    }
}
