//! Unit tests for history error types

#[cfg(test)]
mod tests {
    use crate::history::error::HistoryError;
    use std::error::Error;

    #[test]
    fn test_index_out_of_range_display() {
        let error = HistoryError::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(
            error.to_string(),
            "Index 5 is out of range for a view of 3 item(s)"
        );
    }

    #[test]
    fn test_stale_index_display() {
        let error = HistoryError::StaleIndex { index: 1 };
        assert!(error.to_string().contains("no longer refers"));
    }

    #[test]
    fn test_error_source_none() {
        let error = HistoryError::IndexOutOfRange { index: 0, len: 0 };
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HistoryError>();
    }

    #[test]
    fn test_error_pattern_matching() {
        let errors = vec![
            HistoryError::IndexOutOfRange { index: 2, len: 1 },
            HistoryError::StaleIndex { index: 0 },
        ];

        for error in errors {
            match error {
                HistoryError::IndexOutOfRange { index, len } => {
                    assert!(index >= len);
                }
                HistoryError::StaleIndex { index } => {
                    assert_eq!(index, 0);
                }
            }
        }
    }
}
