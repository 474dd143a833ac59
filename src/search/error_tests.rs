//! Unit tests for search error types

#[cfg(test)]
mod tests {
    use crate::search::error::{BackendError, SearchError};
    use std::error::Error;
    use std::time::Duration;

    #[test]
    fn test_empty_query_display() {
        let error = SearchError::EmptyQuery;
        assert_eq!(error.to_string(), "Please enter a question");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_busy_display() {
        let error = SearchError::Busy;
        assert_eq!(error.to_string(), "A search is already in progress");
    }

    #[test]
    fn test_status_error_display() {
        let error = BackendError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Server responded with status 502: bad gateway"
        );
    }

    #[test]
    fn test_timeout_display() {
        let error = BackendError::Timeout(Duration::from_secs(60));
        assert_eq!(error.to_string(), "Search timed out after 60s");
    }

    #[test]
    fn test_search_failed_from_backend_error() {
        let backend = BackendError::Backend("index unavailable".to_string());
        let error: SearchError = backend.into();

        match &error {
            SearchError::SearchFailed(e) => {
                assert!(e.to_string().contains("index unavailable"));
            }
            _ => panic!("Expected SearchFailed variant"),
        }
        assert!(error.source().is_some());
        assert!(error.to_string().starts_with("Search failed"));
    }

    #[test]
    fn test_error_chaining() {
        let error = SearchError::SearchFailed(BackendError::Malformed("missing field `answer`".into()));
        let message = error.to_string();
        assert!(message.contains("Malformed response"));
        assert!(message.contains("answer"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
        assert_send_sync::<BackendError>();
    }
}
