//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Default number of rows returned by offset-paginated listings.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Upper bound for offset-paginated listings.
pub const MAX_LIST_LIMIT: i64 = 200;

/// Generic offset pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Limit clamped to `1..=MAX_LIST_LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT)
    }

    /// Offset, never negative.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// `?session=` tag linking an HTTP request to a WebSocket session.
#[derive(Debug, Default, Deserialize)]
pub struct SessionParams {
    pub session: Option<String>,
}

impl SessionParams {
    /// Trimmed session id; blank values count as absent.
    pub fn session_id(&self) -> Option<String> {
        self.session
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_params_are_clamped() {
        let p = PaginationParams {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(p.limit(), MAX_LIST_LIMIT);
        assert_eq!(p.offset(), 0);

        let p = PaginationParams::default();
        assert_eq!(p.limit(), DEFAULT_LIST_LIMIT);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn blank_session_is_ignored() {
        let s = SessionParams {
            session: Some("   ".into()),
        };
        assert_eq!(s.session_id(), None);

        let s = SessionParams {
            session: Some(" abc ".into()),
        };
        assert_eq!(s.session_id().as_deref(), Some("abc"));
    }
}
