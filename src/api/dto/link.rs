//! Link representation returned by the stats and list endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// A link as seen by API clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            code: link.code,
            original_url: link.original_url,
            clicks: link.clicks,
            created_at: link.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_serializes_camel_case() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let link = Link::new("q1w2e3".into(), "https://example.com".into(), 7, created);

        let json = serde_json::to_value(LinkResponse::from(link)).unwrap();

        assert_eq!(json["code"], "q1w2e3");
        assert_eq!(json["originalUrl"], "https://example.com");
        assert_eq!(json["clicks"], 7);
        assert_eq!(json["createdAt"], "2025-03-01T12:00:00Z");
        assert!(json.get("original_url").is_none());
    }
}
