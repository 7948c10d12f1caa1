//! Seasonal color types and undertones.

use serde::{Serialize, Serializer};

/// Seasonal palette families used for color recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonalType {
    LightSpring,
    ClearSpring,
    WarmSpring,
    SoftAutumn,
    WarmAutumn,
    DeepAutumn,
    DeepWinter,
    CoolWinter,
    ClearWinter,
}

/// Skin undertone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Undertone {
    Warm,
    Cool,
    Neutral,
}

impl Undertone {
    pub fn as_str(self) -> &'static str {
        match self {
            Undertone::Warm => "warm",
            Undertone::Cool => "cool",
            Undertone::Neutral => "neutral",
        }
    }
}

impl SeasonalType {
    pub const ALL: [SeasonalType; 9] = [
        SeasonalType::LightSpring,
        SeasonalType::ClearSpring,
        SeasonalType::WarmSpring,
        SeasonalType::SoftAutumn,
        SeasonalType::WarmAutumn,
        SeasonalType::DeepAutumn,
        SeasonalType::DeepWinter,
        SeasonalType::CoolWinter,
        SeasonalType::ClearWinter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SeasonalType::LightSpring => "Light Spring",
            SeasonalType::ClearSpring => "Clear Spring",
            SeasonalType::WarmSpring => "Warm Spring",
            SeasonalType::SoftAutumn => "Soft Autumn",
            SeasonalType::WarmAutumn => "Warm Autumn",
            SeasonalType::DeepAutumn => "Deep Autumn",
            SeasonalType::DeepWinter => "Deep Winter",
            SeasonalType::CoolWinter => "Cool Winter",
            SeasonalType::ClearWinter => "Clear Winter",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub fn undertone(self) -> Undertone {
        match self {
            SeasonalType::SoftAutumn => Undertone::Neutral,
            SeasonalType::DeepWinter | SeasonalType::CoolWinter | SeasonalType::ClearWinter => {
                Undertone::Cool
            }
            _ => Undertone::Warm,
        }
    }
}

impl std::fmt::Display for SeasonalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for SeasonalType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for season in SeasonalType::ALL {
            assert_eq!(SeasonalType::from_name(season.name()), Some(season));
        }
        assert_eq!(
            SeasonalType::from_name("deep autumn"),
            Some(SeasonalType::DeepAutumn)
        );
        assert_eq!(SeasonalType::from_name("Summer"), None);
    }

    #[test]
    fn winters_are_cool() {
        assert_eq!(SeasonalType::CoolWinter.undertone(), Undertone::Cool);
        assert_eq!(SeasonalType::WarmSpring.undertone(), Undertone::Warm);
        assert_eq!(SeasonalType::SoftAutumn.undertone(), Undertone::Neutral);
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_value(SeasonalType::ClearWinter).unwrap();
        assert_eq!(json, "Clear Winter");
        let json = serde_json::to_value(Undertone::Neutral).unwrap();
        assert_eq!(json, "neutral");
    }
}
