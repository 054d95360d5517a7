//! Error types for search operations

use crate::error::AppError;

/// Result type for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while compiling, executing or assembling a search
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A filter, pagination or sort value could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A document returned by the store could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The store call failed or returned a non-success reply
    #[error("Store error: {0}")]
    Store(String),

    /// Requested document does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Store(err.to_string())
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Parse(msg) => AppError::Validation(msg),
            SearchError::Decode(msg) => AppError::Serialization(msg),
            SearchError::Store(msg) => AppError::Store(msg),
            SearchError::NotFound(msg) => AppError::NotFound(msg),
            SearchError::InvalidConfiguration(msg) => AppError::Configuration(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_parse_error_is_a_bad_request() {
        let err: AppError = SearchError::Parse("bad point".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_error_is_a_bad_gateway() {
        let err: AppError = SearchError::Store("connection refused".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), "STORE_ERROR");
    }

    #[test]
    fn test_remaining_kinds_map_to_server_errors() {
        let err: AppError = SearchError::Decode("bad hit".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let err: AppError = SearchError::InvalidConfiguration("bad url".to_string()).into();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");

        let err: AppError = SearchError::NotFound("a-1".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
