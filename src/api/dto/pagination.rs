//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};

/// Query parameters of the list endpoint.
///
/// Parsing is lenient: a missing, empty or non-numeric value becomes `None`
/// and the registry applies its defaults. A value is numeric only as a
/// whole, so `3abc` counts as non-numeric.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListQueryParams {
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub limit: Option<i64>,

    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn parse(uri: &'static str) -> ListQueryParams {
        let uri: Uri = uri.parse().unwrap();
        Query::<ListQueryParams>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn test_absent_params() {
        let params = parse("/api/list");
        assert_eq!(params.limit, None);
        assert_eq!(params.offset, None);
    }

    #[test]
    fn test_numeric_params() {
        let params = parse("/api/list?limit=5&offset=10");
        assert_eq!(params.limit, Some(5));
        assert_eq!(params.offset, Some(10));
    }

    #[test]
    fn test_partly_numeric_params_are_ignored() {
        let params = parse("/api/list?limit=3abc&offset=7x");
        assert_eq!(params.limit, None);
        assert_eq!(params.offset, None);
    }

    #[test]
    fn test_non_numeric_params_are_ignored() {
        let params = parse("/api/list?limit=lots&offset=");
        assert_eq!(params.limit, None);
        assert_eq!(params.offset, None);
    }

    #[test]
    fn test_negative_values_are_passed_through() {
        let params = parse("/api/list?limit=-1&offset=-4");
        assert_eq!(params.limit, Some(-1));
        assert_eq!(params.offset, Some(-4));
    }
}
