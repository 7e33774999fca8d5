//! Unit tests for gallery error types

#[cfg(test)]
mod tests {
    use crate::api::ApiError;
    use crate::error::GalleryError;
    use std::error::Error;
    use std::sync::Arc;

    #[test]
    fn test_transport_from_api_error() {
        let error: GalleryError = ApiError::Unavailable("down".to_string()).into();
        assert!(matches!(error, GalleryError::Transport(_)));
        assert_eq!(error.to_string(), "Transport error: Catalog unavailable: down");
    }

    #[test]
    fn test_transport_from_shared_error() {
        let shared = Arc::new(ApiError::Timeout {
            url: "https://example.test".to_string(),
        });
        let a: GalleryError = Arc::clone(&shared).into();
        let b: GalleryError = shared.into();
        assert_eq!(a.to_string(), b.to_string());
        assert!(a.source().is_some());
    }

    #[test]
    fn test_empty_result_display() {
        let error = GalleryError::EmptyResult {
            page: 4,
            total_count: 12,
        };
        assert_eq!(error.to_string(), "No items on page 4 (12 total)");
        assert!(error.is_empty_result());
    }

    #[test]
    fn test_config_error_is_not_empty_result() {
        let error = GalleryError::Config("page size must be greater than zero".to_string());
        assert!(!error.is_empty_result());
        assert!(error.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_settings_error_wraps_config_crate() {
        let error: GalleryError = ::config::ConfigError::Message("bad toml".to_string()).into();
        match error {
            GalleryError::Settings(inner) => assert!(inner.to_string().contains("bad toml")),
            _ => panic!("Expected Settings variant"),
        }
    }
}
