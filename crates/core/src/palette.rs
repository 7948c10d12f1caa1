//! The static color table keyed by seasonal type.
//!
//! A Monk tone resolves to a seasonal type, and the seasonal type selects a
//! recommended palette and an avoid-list. When nothing can be resolved the
//! universal fallback list is returned instead.

use serde::{Deserialize, Serialize};

use crate::color::{is_valid_hex, NamedColor, Rgb};
use crate::error::CoreError;
use crate::monk::MonkTone;
use crate::season::{SeasonalType, Undertone};

/// Upper bound on colors in a single palette.
pub const MAX_PALETTE_COLORS: usize = 50;

pub const MATCHED_MESSAGE: &str =
    "We've matched your skin tone to colors that will complement your natural complexion.";
pub const FALLBACK_MESSAGE: &str =
    "We couldn't determine your skin tone, so here are colors that flatter most complexions.";

type Swatch = (&'static str, &'static str);

const CLEAR_SPRING: &[Swatch] = &[
    ("Light Yellow", "#FFF9D7"),
    ("Pale Yellow", "#F1EB9C"),
    ("Cream Yellow", "#F5E1A4"),
    ("Peach", "#F8CFA9"),
    ("Bright Yellow", "#FCE300"),
    ("Golden Yellow", "#FDD26E"),
    ("Sunflower Yellow", "#FFCD00"),
    ("Amber", "#FFB81C"),
    ("Coral", "#FF7F50"),
    ("Warm Coral", "#FF6B53"),
    ("Bright Coral", "#FF4040"),
    ("Salmon Pink", "#FF91A4"),
    ("Warm Pink", "#FF9999"),
    ("Bright Pink", "#FF69B4"),
    ("Watermelon", "#FD5B78"),
    ("Bright Red", "#FF0000"),
    ("Tomato Red", "#FF6347"),
    ("Warm Red", "#E32636"),
    ("Bright Orange", "#FF4500"),
    ("Tangerine", "#F28500"),
    ("Golden Orange", "#FFA000"),
    ("Apricot", "#FBCEB1"),
    ("Peach Orange", "#FFCC99"),
    ("Spring Green", "#00FF7F"),
    ("Bright Green", "#66FF00"),
    ("Apple Green", "#8DB600"),
    ("Grass Green", "#7CFC00"),
    ("Lime Green", "#32CD32"),
    ("Mint Green", "#98FB98"),
    ("Aquamarine", "#7FFFD4"),
    ("Turquoise", "#40E0D0"),
    ("Sky Blue", "#87CEEB"),
    ("Bright Blue", "#007FFF"),
    ("Periwinkle", "#CCCCFF"),
    ("Clear Blue", "#1F75FE"),
    ("Bright Purple", "#9370DB"),
    ("Lavender", "#E6E6FA"),
    ("Lilac", "#C8A2C8"),
    ("Orchid", "#DA70D6"),
    ("Fuchsia", "#FF00FF"),
];

const LIGHT_SPRING: &[Swatch] = &[
    ("Light Yellow", "#FFF9D7"),
    ("Pale Yellow", "#F1EB9C"),
    ("Cream Yellow", "#F5E1A4"),
    ("Peach", "#F8CFA9"),
    ("Soft Coral", "#F88379"),
    ("Light Coral", "#F08080"),
    ("Pastel Pink", "#FFD1DC"),
    ("Blush Pink", "#FFB6C1"),
    ("Light Apricot", "#FDD5B1"),
    ("Pale Orange", "#FFDAB9"),
    ("Soft Peach", "#FFDAB9"),
    ("Light Mint", "#98FB98"),
    ("Pastel Green", "#77DD77"),
    ("Soft Aqua", "#7FFFD4"),
    ("Light Turquoise", "#AFEEEE"),
    ("Pale Blue", "#B0E0E6"),
    ("Baby Blue", "#89CFF0"),
    ("Soft Periwinkle", "#CCCCFF"),
    ("Pastel Lavender", "#D8BFD8"),
    ("Light Lilac", "#C8A2C8"),
];

const WARM_SPRING: &[Swatch] = &[
    ("Bright Yellow", "#FCE300"),
    ("Golden Yellow", "#FDD26E"),
    ("Sunflower Yellow", "#FFCD00"),
    ("Amber", "#FFB81C"),
    ("Warm Coral", "#FF6B53"),
    ("Terracotta", "#E2725B"),
    ("Rust", "#B7410E"),
    ("Pumpkin", "#FF7518"),
    ("Warm Orange", "#FF8C00"),
    ("Golden Orange", "#FFA000"),
    ("Honey", "#E6C200"),
    ("Mustard", "#FFDB58"),
    ("Olive Green", "#808000"),
    ("Moss Green", "#8A9A5B"),
    ("Avocado", "#568203"),
    ("Warm Teal", "#008080"),
    ("Peacock Blue", "#005F69"),
    ("Warm Turquoise", "#30D5C8"),
    ("Warm Periwinkle", "#8F99FB"),
    ("Golden Brown", "#996515"),
];

const SOFT_AUTUMN: &[Swatch] = &[
    ("Camel", "#C19A6B"),
    ("Soft Gold", "#D4AF37"),
    ("Muted Olive", "#6B8E23"),
    ("Sage Green", "#9CAF88"),
    ("Dusty Teal", "#4F7369"),
    ("Soft Burgundy", "#8D4E85"),
    ("Muted Coral", "#F08080"),
    ("Dusty Rose", "#C08081"),
    ("Soft Rust", "#CD5C5C"),
    ("Terracotta", "#E2725B"),
    ("Warm Taupe", "#AF8F6F"),
    ("Soft Brown", "#A67B5B"),
    ("Muted Orange", "#E67F33"),
    ("Soft Mustard", "#DEBA13"),
    ("Muted Gold", "#D4AF37"),
    ("Soft Khaki", "#BDB76B"),
    ("Muted Turquoise", "#66CDAA"),
    ("Dusty Blue", "#6699CC"),
    ("Soft Navy", "#39537B"),
    ("Muted Purple", "#8B7B8B"),
];

const WARM_AUTUMN: &[Swatch] = &[
    ("Rust", "#B7410E"),
    ("Burnt Orange", "#CC5500"),
    ("Pumpkin", "#FF7518"),
    ("Copper", "#B87333"),
    ("Bronze", "#CD7F32"),
    ("Olive Green", "#808000"),
    ("Moss Green", "#8A9A5B"),
    ("Forest Green", "#228B22"),
    ("Warm Brown", "#8B4513"),
    ("Chocolate", "#7B3F00"),
    ("Caramel", "#C68E17"),
    ("Mustard", "#FFDB58"),
    ("Golden Yellow", "#FFDF00"),
    ("Amber", "#FFBF00"),
    ("Warm Teal", "#008080"),
    ("Deep Turquoise", "#00CED1"),
    ("Warm Burgundy", "#8C001A"),
    ("Tomato Red", "#FF6347"),
    ("Brick Red", "#CB4154"),
    ("Terracotta", "#E2725B"),
];

const DEEP_AUTUMN: &[Swatch] = &[
    ("Burgundy", "#800020"),
    ("Deep Red", "#8B0000"),
    ("Ruby", "#9B111E"),
    ("Brick Red", "#CB4154"),
    ("Rust", "#B7410E"),
    ("Burnt Orange", "#CC5500"),
    ("Copper", "#B87333"),
    ("Chocolate", "#7B3F00"),
    ("Coffee", "#6F4E37"),
    ("Deep Olive", "#556B2F"),
    ("Forest Green", "#228B22"),
    ("Deep Teal", "#004D40"),
    ("Dark Turquoise", "#00868B"),
    ("Deep Purple", "#301934"),
    ("Plum", "#8E4585"),
    ("Aubergine", "#614051"),
    ("Deep Gold", "#B8860B"),
    ("Amber", "#FFBF00"),
    ("Mustard", "#FFDB58"),
    ("Deep Moss", "#4A5D23"),
];

const DEEP_WINTER: &[Swatch] = &[
    ("Black", "#000000"),
    ("Charcoal", "#36454F"),
    ("Navy", "#000080"),
    ("Royal Blue", "#4169E1"),
    ("Deep Purple", "#301934"),
    ("Plum", "#8E4585"),
    ("Burgundy", "#800020"),
    ("Deep Red", "#8B0000"),
    ("Ruby", "#9B111E"),
    ("Emerald", "#046307"),
    ("Forest Green", "#228B22"),
    ("Deep Teal", "#004D40"),
    ("Dark Turquoise", "#00868B"),
    ("Sapphire", "#0F52BA"),
    ("Deep Magenta", "#8B008B"),
    ("Aubergine", "#614051"),
    ("Deep Fuchsia", "#C154C1"),
    ("Deep Raspberry", "#872657"),
    ("Deep Violet", "#9400D3"),
    ("Deep Indigo", "#4B0082"),
];

const COOL_WINTER: &[Swatch] = &[
    ("Black", "#000000"),
    ("Charcoal", "#36454F"),
    ("Navy", "#000080"),
    ("Royal Blue", "#4169E1"),
    ("Ice Blue", "#99FFFF"),
    ("Cool Pink", "#FF69B4"),
    ("Magenta", "#FF00FF"),
    ("Fuchsia", "#FF00FF"),
    ("Blue Red", "#FF0038"),
    ("Cherry Red", "#D2042D"),
    ("Cool Purple", "#800080"),
    ("Violet", "#8F00FF"),
    ("Lavender", "#E6E6FA"),
    ("Cool Emerald", "#50C878"),
    ("Pine Green", "#01796F"),
    ("Cool Teal", "#008080"),
    ("Silver", "#C0C0C0"),
    ("Cool Gray", "#808080"),
    ("Raspberry", "#E30B5C"),
    ("Cool Burgundy", "#8C001A"),
];

const CLEAR_WINTER: &[Swatch] = &[
    ("Black", "#000000"),
    ("White", "#FFFFFF"),
    ("Bright Red", "#FF0000"),
    ("Cherry Red", "#D2042D"),
    ("Fuchsia", "#FF00FF"),
    ("Magenta", "#FF00FF"),
    ("Royal Blue", "#4169E1"),
    ("Electric Blue", "#0000FF"),
    ("Ice Blue", "#99FFFF"),
    ("Bright Purple", "#9370DB"),
    ("Violet", "#8F00FF"),
    ("Emerald", "#50C878"),
    ("Bright Green", "#66FF00"),
    ("Bright Turquoise", "#00FFEF"),
    ("Hot Pink", "#FF69B4"),
    ("Bright Yellow", "#FFFF00"),
    ("Silver", "#C0C0C0"),
    ("Bright Teal", "#008080"),
    ("Bright Raspberry", "#E30B5C"),
    ("Bright Navy", "#000080"),
];

// Avoid-lists: the washed-out or clashing extremes for each family.
const AVOID_LIGHT: &[Swatch] = &[
    ("Black", "#000000"),
    ("Charcoal", "#36454F"),
    ("Deep Burgundy", "#4A0000"),
    ("Dark Brown", "#3B2F2F"),
    ("Deep Indigo", "#4B0082"),
];

const AVOID_WARM_SPRING: &[Swatch] = &[
    ("Black", "#000000"),
    ("Icy Pink", "#F8E1EC"),
    ("Cool Gray", "#808080"),
    ("Silver", "#C0C0C0"),
    ("Blue Red", "#FF0038"),
];

const AVOID_AUTUMN: &[Swatch] = &[
    ("Pure White", "#FFFFFF"),
    ("Icy Blue", "#99FFFF"),
    ("Fuchsia", "#FF00FF"),
    ("Silver", "#C0C0C0"),
    ("Pastel Pink", "#FFD1DC"),
    ("Electric Blue", "#0000FF"),
];

const AVOID_WINTER: &[Swatch] = &[
    ("Beige", "#F5F5DC"),
    ("Camel", "#C19A6B"),
    ("Mustard", "#FFDB58"),
    ("Warm Taupe", "#AF8F6F"),
    ("Orange", "#FFA500"),
    ("Khaki", "#BDB76B"),
];

const UNIVERSAL: &[Swatch] = &[
    ("Navy Blue", "#000080"),
    ("Forest Green", "#228B22"),
    ("Burgundy", "#800020"),
    ("Charcoal Gray", "#36454F"),
    ("Deep Purple", "#301934"),
    ("Olive Green", "#556B2F"),
    ("Teal", "#008080"),
    ("Maroon", "#800000"),
    ("Royal Blue", "#4169E1"),
    ("Emerald Green", "#50C878"),
    ("Ruby Red", "#E0115F"),
    ("Sapphire Blue", "#0F52BA"),
];

/// Coarse suggestions for clients that only know a broad skin tone label.
const SUGGESTIONS: &[(&str, &str)] = &[
    ("Fair", "Navy Blue, Emerald Green, Ruby Red, Cool Pink"),
    ("Medium", "Warm Brown, Orange, Coral, Olive Green"),
    ("Dark", "Bright Yellow, Royal Blue, Magenta, White"),
    ("Deep", "Vibrant Colors, Jewel Tones, Bright Contrasts"),
];

fn recommended_swatches(season: SeasonalType) -> &'static [Swatch] {
    match season {
        SeasonalType::LightSpring => LIGHT_SPRING,
        SeasonalType::ClearSpring => CLEAR_SPRING,
        SeasonalType::WarmSpring => WARM_SPRING,
        SeasonalType::SoftAutumn => SOFT_AUTUMN,
        SeasonalType::WarmAutumn => WARM_AUTUMN,
        SeasonalType::DeepAutumn => DEEP_AUTUMN,
        SeasonalType::DeepWinter => DEEP_WINTER,
        SeasonalType::CoolWinter => COOL_WINTER,
        SeasonalType::ClearWinter => CLEAR_WINTER,
    }
}

fn avoid_swatches(season: SeasonalType) -> &'static [Swatch] {
    match season {
        SeasonalType::LightSpring | SeasonalType::ClearSpring => AVOID_LIGHT,
        SeasonalType::WarmSpring => AVOID_WARM_SPRING,
        SeasonalType::SoftAutumn | SeasonalType::WarmAutumn | SeasonalType::DeepAutumn => {
            AVOID_AUTUMN
        }
        SeasonalType::DeepWinter | SeasonalType::CoolWinter | SeasonalType::ClearWinter => {
            AVOID_WINTER
        }
    }
}

fn to_named(swatches: &[Swatch]) -> Vec<NamedColor> {
    swatches
        .iter()
        .map(|(name, hex)| NamedColor::new(*name, *hex))
        .collect()
}

/// Recommended colors for a seasonal type.
pub fn recommended_colors(season: SeasonalType) -> Vec<NamedColor> {
    to_named(recommended_swatches(season))
}

/// Colors a seasonal type should avoid.
pub fn colors_to_avoid(season: SeasonalType) -> Vec<NamedColor> {
    to_named(avoid_swatches(season))
}

/// Fallback colors that suit most complexions.
pub fn universal_colors() -> Vec<NamedColor> {
    to_named(UNIVERSAL)
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// What a color is recommended for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCategory {
    Clothing,
    Makeup,
    Accessories,
    General,
}

impl ColorCategory {
    pub const ALL: [ColorCategory; 4] = [
        ColorCategory::Clothing,
        ColorCategory::Makeup,
        ColorCategory::Accessories,
        ColorCategory::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorCategory::Clothing => "clothing",
            ColorCategory::Makeup => "makeup",
            ColorCategory::Accessories => "accessories",
            ColorCategory::General => "general",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid color category '{value}'. Must be one of: clothing, makeup, accessories, general"
                ))
            })
    }
}

/// Name words for shades worn as lipstick, blush, bronzer or eyeshadow.
const MAKEUP_WORDS: &[&str] = &[
    "pink", "coral", "red", "rose", "raspberry", "plum", "peach", "apricot", "burgundy",
    "maroon", "ruby", "cherry", "fuchsia", "magenta", "brown", "bronze", "copper", "rust",
    "terracotta", "brick", "caramel", "honey", "taupe", "beige", "watermelon", "salmon",
    "blush", "chocolate", "coffee", "orchid", "aubergine",
];

/// Metals, neutrals and gemstone shades used for bags, belts and jewelry.
const ACCESSORY_WORDS: &[&str] = &[
    "gold", "golden", "silver", "bronze", "copper", "black", "white", "navy", "charcoal",
    "gray", "brown", "camel", "khaki", "taupe", "beige", "chocolate", "coffee", "cream",
    "amber", "turquoise", "emerald", "ruby", "sapphire",
];

fn has_word(color_name: &str, words: &[&str]) -> bool {
    color_name
        .split_whitespace()
        .any(|w| words.iter().any(|k| k.eq_ignore_ascii_case(w)))
}

/// Categories a named color is listed under.
///
/// Every color is `general` and `clothing`. Makeup and accessory shades are
/// picked from the words in the name.
pub fn categories_for(color_name: &str) -> Vec<ColorCategory> {
    let mut categories = vec![ColorCategory::General, ColorCategory::Clothing];
    if has_word(color_name, MAKEUP_WORDS) {
        categories.push(ColorCategory::Makeup);
    }
    if has_word(color_name, ACCESSORY_WORDS) {
        categories.push(ColorCategory::Accessories);
    }
    categories
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Inputs accepted by the recommendation endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaletteQuery {
    pub skin_tone: Option<String>,
    pub hex_color: Option<String>,
}

/// A resolved set of colors for one skin tone.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub colors_that_suit: Vec<NamedColor>,
    pub colors_to_avoid: Vec<NamedColor>,
    pub seasonal_type: Option<SeasonalType>,
    pub monk_skin_tone: Option<MonkTone>,
    pub undertone: Option<Undertone>,
    pub message: &'static str,
}

impl Recommendation {
    pub fn for_tone(tone: MonkTone) -> Self {
        let season = tone.seasonal_type();
        Self {
            colors_that_suit: recommended_colors(season),
            colors_to_avoid: colors_to_avoid(season),
            seasonal_type: Some(season),
            monk_skin_tone: Some(tone),
            undertone: Some(season.undertone()),
            message: MATCHED_MESSAGE,
        }
    }

    pub fn fallback() -> Self {
        Self {
            colors_that_suit: universal_colors(),
            colors_to_avoid: Vec::new(),
            seasonal_type: None,
            monk_skin_tone: None,
            undertone: None,
            message: FALLBACK_MESSAGE,
        }
    }
}

/// Resolve a tone from the query: explicit Monk id first, then the nearest
/// swatch to `hex_color`.
pub fn resolve_tone(query: &PaletteQuery) -> Option<MonkTone> {
    if let Some(tone) = query
        .skin_tone
        .as_deref()
        .and_then(|s| MonkTone::parse(s).ok())
    {
        return Some(tone);
    }
    query
        .hex_color
        .as_deref()
        .and_then(|hex| Rgb::from_hex(hex).ok())
        .map(MonkTone::closest_to)
}

/// Resolve a query to a recommendation, falling back to universal colors.
pub fn recommend(query: &PaletteQuery) -> Recommendation {
    match resolve_tone(query) {
        Some(tone) => Recommendation::for_tone(tone),
        None => Recommendation::fallback(),
    }
}

// ---------------------------------------------------------------------------
// Coarse suggestions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ColorSuggestion {
    pub skin_tone: &'static str,
    pub suitable_colors: &'static str,
}

/// Coarse suggestions, filtered by case-insensitive substring when given.
pub fn suggestions(filter: Option<&str>) -> Vec<ColorSuggestion> {
    let filter = filter.map(str::to_lowercase);
    SUGGESTIONS
        .iter()
        .filter(|(tone, _)| match &filter {
            Some(f) => tone.to_lowercase().contains(f.as_str()),
            None => true,
        })
        .map(|(skin_tone, suitable_colors)| ColorSuggestion {
            skin_tone,
            suitable_colors,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Table rows
// ---------------------------------------------------------------------------

/// One row of the denormalized color table.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteRow {
    pub hex_code: String,
    pub color_name: String,
    pub suitable_skin_tone: MonkTone,
    pub seasonal_palette: SeasonalType,
    pub category: ColorCategory,
    pub is_avoid: bool,
}

/// Flatten the static palettes into table rows, one per tone, color and
/// category (see [`categories_for`]). The `general` rows alone hold each
/// tone's full palette once.
pub fn palette_rows() -> Vec<PaletteRow> {
    let mut rows = Vec::new();
    for tone in MonkTone::ALL {
        let season = tone.seasonal_type();
        let tagged = recommended_swatches(season)
            .iter()
            .map(|s| (s, false))
            .chain(avoid_swatches(season).iter().map(|s| (s, true)));
        for ((name, hex), is_avoid) in tagged {
            for category in categories_for(name) {
                rows.push(PaletteRow {
                    hex_code: hex.to_string(),
                    color_name: name.to_string(),
                    suitable_skin_tone: tone,
                    seasonal_palette: season,
                    category,
                    is_avoid,
                });
            }
        }
    }
    rows
}

/// Check that a palette is non-empty, bounded, and uses valid hex codes.
pub fn validate_palette(colors: &[NamedColor]) -> Result<(), CoreError> {
    if colors.is_empty() {
        return Err(CoreError::Validation(
            "Color palette must contain at least one color".to_string(),
        ));
    }
    if colors.len() > MAX_PALETTE_COLORS {
        return Err(CoreError::Validation(format!(
            "Color palette cannot contain more than {MAX_PALETTE_COLORS} colors"
        )));
    }
    if let Some(bad) = colors.iter().find(|c| !is_valid_hex(&c.hex)) {
        return Err(CoreError::Validation(format!(
            "Invalid hex color '{}' for '{}'",
            bad.hex, bad.name
        )));
    }
    Ok(())
}
