//! Unit tests for catalog error types

#[cfg(test)]
mod tests {
    use crate::api::error::ApiError;
    use std::error::Error;

    #[test]
    fn test_timeout_error_display() {
        let error = ApiError::Timeout {
            url: "https://example.test/items".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Request to https://example.test/items timed out"
        );
    }

    #[test]
    fn test_status_error_display() {
        let error = ApiError::Status {
            url: "https://example.test/items/1/".to_string(),
            status: 404,
        };
        let display = error.to_string();
        assert!(display.contains("404"));
        assert!(display.contains("https://example.test/items/1/"));
    }

    #[test]
    fn test_decode_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: ApiError = serde_err.into();
        assert!(matches!(error, ApiError::Decode(_)));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_unavailable_has_no_source() {
        let error = ApiError::Unavailable("maintenance".to_string());
        assert!(error.source().is_none());
        assert_eq!(error.to_string(), "Catalog unavailable: maintenance");
    }

    #[test]
    fn test_invalid_url_debug() {
        let error = ApiError::InvalidUrl("::nope".to_string());
        let debug = format!("{error:?}");
        assert!(debug.contains("InvalidUrl"));
        assert!(debug.contains("::nope"));
    }
}
