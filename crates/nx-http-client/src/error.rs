//! HTTP error types

use thiserror::Error;

/// Errors surfaced while building or dispatching a request
#[derive(Debug, Error)]
pub enum HttpError {
    /// HTTP error with status code
    ///
    /// Only produced by [`crate::FetchResponse::error_for_status`]; dispatch itself
    /// never inspects the status code.
    #[error("HTTP error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },
    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),
    /// Request timeout
    #[error("Request timeout")]
    Timeout,
    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
    /// Unknown request method literal
    #[error("Invalid method: {0}")]
    InvalidMethod(String),
    /// Reading an attachment from disk failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Client or request build error
    #[error("Build error: {0}")]
    Build(String),
    /// Settings could not be loaded
    #[error("Config error: {0}")]
    Config(String),
    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpError::Timeout
        } else if err.is_builder() {
            HttpError::Build(err.to_string())
        } else if err.is_connect() {
            HttpError::Connection(err.to_string())
        } else if err.is_decode() {
            HttpError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            HttpError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            HttpError::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::Decode(err.to_string())
    }
}

impl From<config::ConfigError> for HttpError {
    fn from(err: config::ConfigError) -> Self {
        HttpError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_status_display() {
        let error = HttpError::Status {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(format!("{}", error), "HTTP error (404): Not Found");
    }

    #[test]
    fn test_http_error_connection_display() {
        let error = HttpError::Connection("connection refused".to_string());
        assert_eq!(format!("{}", error), "Connection error: connection refused");
    }

    #[test]
    fn test_http_error_timeout_display() {
        assert_eq!(format!("{}", HttpError::Timeout), "Request timeout");
    }

    #[test]
    fn test_http_error_invalid_method_display() {
        let error = HttpError::InvalidMethod("PATCH".to_string());
        assert_eq!(format!("{}", error), "Invalid method: PATCH");
    }

    #[test]
    fn test_http_error_other_display() {
        let error = HttpError::Other("unknown error".to_string());
        assert_eq!(format!("{}", error), "unknown error");
    }

    #[test]
    fn test_from_serde_json_error_is_decode() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("not valid json");
        let json_error = result.expect_err("Invalid JSON should produce an error");
        let http_error: HttpError = json_error.into();

        match http_error {
            HttpError::Decode(msg) => {
                assert!(
                    msg.contains("expected"),
                    "Error message should describe JSON error"
                );
            }
            _ => panic!("Expected HttpError::Decode"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
        let http_error: HttpError = io.into();
        assert!(matches!(http_error, HttpError::Io(_)));
        assert_eq!(format!("{}", http_error), "IO error: missing.txt");
    }
}
