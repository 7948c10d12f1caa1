//! Product filtering, ranking and pagination rules.
//!
//! Storage lives in the db crate; everything here is pure so handlers can
//! apply the same rules to rows fetched from Postgres.

use crate::color::Rgb;
use crate::error::CoreError;
use crate::monk::MonkTone;
use crate::season::SeasonalType;

pub const DEFAULT_PAGE_SIZE: i64 = 24;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Product types reported when the catalog has none.
pub const DEFAULT_MAKEUP_TYPES: [&str; 14] = [
    "Foundation",
    "Concealer",
    "Powder",
    "Blush",
    "Bronzer",
    "Highlighter",
    "Eyeshadow",
    "Eyeliner",
    "Mascara",
    "Lipstick",
    "Lip Gloss",
    "Lip Liner",
    "Primer",
    "Setting Spray",
];

/// Canonical Monk id for a product filter. `"Monk 3"` becomes `"Monk03"`;
/// strings that are not Monk tones pass through trimmed.
pub fn normalize_mst(mst: &str) -> String {
    match MonkTone::parse(mst) {
        Ok(tone) => tone.id(),
        Err(_) => mst.trim().to_string(),
    }
}

/// Split a comma-separated query value, dropping blank entries.
pub fn parse_csv_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Order items by RGB distance from `target`, closest first.
///
/// The sort is stable. Items whose hex does not parse keep their relative
/// order after every valid item.
pub fn rank_by_color<T, F>(items: Vec<T>, target: Rgb, hex_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut valid: Vec<(f64, T)> = Vec::with_capacity(items.len());
    let mut invalid = Vec::new();
    for item in items {
        match Rgb::from_hex(hex_of(&item)) {
            Ok(rgb) => valid.push((rgb.distance(target), item)),
            Err(_) => invalid.push(item),
        }
    }
    valid.sort_by(|a, b| a.0.total_cmp(&b.0));
    valid
        .into_iter()
        .map(|(_, item)| item)
        .chain(invalid)
        .collect()
}

/// Validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Apply defaults and reject out-of-range values.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, CoreError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if page < 1 {
            return Err(CoreError::Validation(format!(
                "page must be at least 1, got {page}"
            )));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(CoreError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}, got {limit}"
            )));
        }
        if (page - 1).checked_mul(limit).is_none() {
            return Err(CoreError::Validation(format!("page {page} is out of range")));
        }
        Ok(Self { page, limit })
    }

    /// Rows skipped before this page. Cannot overflow for a value built by
    /// [`Pagination::new`].
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    pub fn total_pages(&self, total_items: i64) -> i64 {
        if total_items <= 0 {
            0
        } else {
            (total_items + self.limit - 1) / self.limit
        }
    }

    /// Cut one page out of an in-memory result set.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset() as usize)
            .take(self.limit as usize)
            .collect()
    }
}

/// Overall fit of a product for a tone and season, in `0.0..=1.0`.
///
/// A rating contributes only when present and positive. Empty tone or
/// season lists mean the product makes no claim and counts as compatible.
pub fn compatibility_score(
    rating: Option<f64>,
    skin_tones: &[MonkTone],
    seasons: &[SeasonalType],
    tone: MonkTone,
    season: SeasonalType,
) -> f64 {
    let mut score = 0.0;
    let mut factors = 0.0;

    if let Some(rating) = rating.filter(|r| *r > 0.0) {
        score += (rating.min(5.0) / 5.0) * 0.3;
        factors += 0.3;
    }

    if skin_tones.is_empty() || skin_tones.contains(&tone) {
        score += 0.4;
    }
    factors += 0.4;

    if seasons.is_empty() || seasons.contains(&season) {
        score += 0.3;
    }
    factors += 0.3;

    score / factors
}

fn words(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whether an apparel base colour matches any palette color name.
///
/// Matching is case-insensitive on whole words in either direction, so
/// `Blue` matches `Navy Blue` and `Navy Blue` matches `Blue`.
pub fn matches_base_colour<'a>(
    base_colour: &str,
    palette: impl IntoIterator<Item = &'a str>,
) -> bool {
    let base = words(base_colour);
    if base.is_empty() {
        return false;
    }
    palette.into_iter().any(|name| {
        let candidate = words(name);
        !candidate.is_empty()
            && (base.iter().all(|w| candidate.contains(w))
                || candidate.iter().all(|w| base.contains(w)))
    })
}
