//! User feedback on products, colors, recommendations and analyses.

use serde::Serialize;

use crate::error::CoreError;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;
pub const MAX_COMMENT_CHARS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Like,
    Dislike,
    Rating,
    Comment,
}

impl FeedbackKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackKind::Like => "like",
            FeedbackKind::Dislike => "dislike",
            FeedbackKind::Rating => "rating",
            FeedbackKind::Comment => "comment",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "like" => Ok(FeedbackKind::Like),
            "dislike" => Ok(FeedbackKind::Dislike),
            "rating" => Ok(FeedbackKind::Rating),
            "comment" => Ok(FeedbackKind::Comment),
            _ => Err(CoreError::Validation(format!(
                "Unknown feedback type '{s}'. Expected like, dislike, rating or comment"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTarget {
    Product,
    Color,
    Recommendation,
    Analysis,
}

impl FeedbackTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackTarget::Product => "product",
            FeedbackTarget::Color => "color",
            FeedbackTarget::Recommendation => "recommendation",
            FeedbackTarget::Analysis => "analysis",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "product" => Ok(FeedbackTarget::Product),
            "color" => Ok(FeedbackTarget::Color),
            "recommendation" => Ok(FeedbackTarget::Recommendation),
            "analysis" => Ok(FeedbackTarget::Analysis),
            _ => Err(CoreError::Validation(format!(
                "Unknown feedback target '{s}'. Expected product, color, recommendation or analysis"
            ))),
        }
    }
}

/// Feedback that passed validation, with the comment trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFeedback {
    pub kind: FeedbackKind,
    pub target: FeedbackTarget,
    pub target_id: String,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

/// Check a raw submission.
///
/// A `rating` submission needs a rating, a `comment` submission needs a
/// comment. Any rating or comment supplied with other kinds is still
/// range-checked and kept.
pub fn validate(
    kind: &str,
    target: &str,
    target_id: &str,
    rating: Option<i32>,
    comment: Option<&str>,
) -> Result<ValidatedFeedback, CoreError> {
    let kind = FeedbackKind::parse(kind)?;
    let target = FeedbackTarget::parse(target)?;

    let target_id = target_id.trim();
    if target_id.is_empty() {
        return Err(CoreError::Validation("target_id must not be empty".into()));
    }

    if let Some(r) = rating {
        if !(MIN_RATING..=MAX_RATING).contains(&r) {
            return Err(CoreError::Validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {r}"
            )));
        }
    }

    let comment = match comment.map(str::trim) {
        Some("") => {
            return Err(CoreError::Validation("comment must not be empty".into()));
        }
        Some(c) if c.chars().count() > MAX_COMMENT_CHARS => {
            return Err(CoreError::Validation(format!(
                "comment must be at most {MAX_COMMENT_CHARS} characters"
            )));
        }
        other => other.map(str::to_string),
    };

    match kind {
        FeedbackKind::Rating if rating.is_none() => {
            return Err(CoreError::Validation(
                "rating feedback requires a rating".into(),
            ));
        }
        FeedbackKind::Comment if comment.is_none() => {
            return Err(CoreError::Validation(
                "comment feedback requires a comment".into(),
            ));
        }
        _ => {}
    }

    Ok(ValidatedFeedback {
        kind,
        target,
        target_id: target_id.to_string(),
        rating,
        comment,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn like_needs_only_a_target() {
        let fb = validate("Like", "product", " 42 ", None, None).unwrap();
        assert_eq!(fb.kind, FeedbackKind::Like);
        assert_eq!(fb.target, FeedbackTarget::Product);
        assert_eq!(fb.target_id, "42");
    }

    #[test]
    fn rating_bounds() {
        assert!(validate("rating", "color", "#ff0000", Some(1), None).is_ok());
        assert!(validate("rating", "color", "#ff0000", Some(5), None).is_ok());
        assert_matches!(
            validate("rating", "color", "#ff0000", Some(0), None),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate("rating", "color", "#ff0000", Some(6), None),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate("rating", "color", "#ff0000", None, None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn comment_rules() {
        let fb = validate("comment", "analysis", "7", None, Some("  love it ")).unwrap();
        assert_eq!(fb.comment.as_deref(), Some("love it"));

        assert_matches!(
            validate("comment", "analysis", "7", None, Some("   ")),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate("comment", "analysis", "7", None, None),
            Err(CoreError::Validation(_))
        );
        let long = "x".repeat(MAX_COMMENT_CHARS + 1);
        assert_matches!(
            validate("comment", "analysis", "7", None, Some(&long)),
            Err(CoreError::Validation(_))
        );
        let exact = "é".repeat(MAX_COMMENT_CHARS);
        assert!(validate("comment", "analysis", "7", None, Some(&exact)).is_ok());
    }

    #[test]
    fn rejects_unknown_kind_target_and_empty_id() {
        assert_matches!(
            validate("love", "product", "1", None, None),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate("like", "user", "1", None, None),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate("like", "product", "  ", None, None),
            Err(CoreError::Validation(_))
        );
    }
}
