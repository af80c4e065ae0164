//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its click counter.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Link {
    pub code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(code: String, original_url: String, clicks: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            original_url,
            clicks,
            created_at,
        }
    }
}

/// Input data for creating a new link.
///
/// `created_at` is stamped by the registry; the store persists it verbatim
/// and starts the counter at zero.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewLink {
    pub fn new(code: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            original_url: original_url.into(),
            created_at: Utc::now(),
        }
    }

    /// Overrides the creation timestamp.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

impl From<NewLink> for Link {
    fn from(new_link: NewLink) -> Self {
        Link::new(new_link.code, new_link.original_url, 0, new_link.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            3,
            now,
        );

        assert_eq!(link.code, "abc123");
        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.clicks, 3);
        assert_eq!(link.created_at, now);
    }

    #[test]
    fn test_new_link_starts_with_zero_clicks() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let link: Link = NewLink::new("xyz789", "https://rust-lang.org")
            .created_at(created)
            .into();

        assert_eq!(link.clicks, 0);
        assert_eq!(link.created_at, created);
        assert_eq!(link.original_url, "https://rust-lang.org");
    }
}
