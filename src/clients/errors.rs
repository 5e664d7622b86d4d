//! Error types for the request execution engine.
//!
//! Every failure of [`RequestRunner::run`](crate::clients::RequestRunner::run)
//! surfaces as a [`RequestError`]. Nothing is suppressed internally except a
//! 429 response when the runner is configured to wait and retry.
//!
//! # Example
//!
//! ```rust,ignore
//! use bigcommerce_api::clients::RequestError;
//!
//! match runner.run(HttpMethod::Get, "/orders", None).await {
//!     Ok(outcome) => println!("{outcome:?}"),
//!     Err(RequestError::RateLimited { retry_after, .. }) => {
//!         println!("Try again in {retry_after}s");
//!     }
//!     Err(RequestError::HttpStatus { code, response_body, .. }) => {
//!         println!("API error {code}: {response_body}");
//!     }
//!     Err(other) => println!("{other}"),
//! }
//! ```

use thiserror::Error;

/// Errors produced while executing a request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// A 429 response was received and the runner is configured to fail fast.
    #[error("{message}")]
    RateLimited {
        /// Seconds the server asked the client to wait.
        retry_after: f64,
        /// Human-readable description of the limit.
        message: String,
    },

    /// The response status code was in `[400, 600)`.
    #[error("{message}")]
    HttpStatus {
        /// The HTTP status code.
        code: u16,
        /// Message embedding the status code and the body text.
        message: String,
        /// The (decompressed) body text.
        response_body: String,
    },

    /// A JSON success body reported a failure through `error` or `errors`.
    #[error("{message}")]
    Upstream {
        /// The `error` string, or the serialized `errors` value.
        message: String,
    },

    /// The body was declared as JSON but could not be parsed.
    #[error("{message}")]
    Parse {
        /// The parser's description of the failure.
        message: String,
        /// The raw body text, kept for diagnostics.
        response_body: String,
    },

    /// A `gzip` or `deflate` body could not be decompressed.
    #[error("Failed to decompress response body: {0}")]
    Decompression(#[source] std::io::Error),

    /// Connection, DNS, timeout or other transport failure, passed through unmodified.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The HTTP method is not one the API accepts.
    #[error("Invalid Http method {method}.")]
    InvalidMethod {
        /// The method that was provided.
        method: String,
    },
}

impl RequestError {
    /// Returns the HTTP status code associated with this error, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { code, .. } => Some(*code),
            Self::RateLimited { .. } => Some(429),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns the raw response body carried by this error, if any.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { response_body, .. } | Self::Parse { response_body, .. } => {
                Some(response_body)
            }
            _ => None,
        }
    }
}

// Verify RequestError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_error_exposes_code_and_body() {
        let error = RequestError::HttpStatus {
            code: 404,
            message: "Request returned error code: 404 and body: not found".to_string(),
            response_body: "not found".to_string(),
        };
        assert_eq!(error.status_code(), Some(404));
        assert_eq!(error.response_body(), Some("not found"));
        assert!(error.to_string().contains("404"));
    }

    #[test]
    fn test_rate_limited_error_reports_429() {
        let error = RequestError::RateLimited {
            retry_after: 0.5,
            message: "rate limit".to_string(),
        };
        assert_eq!(error.status_code(), Some(429));
        assert!(error.response_body().is_none());
    }

    #[test]
    fn test_upstream_error_displays_message_verbatim() {
        let error = RequestError::Upstream {
            message: "boom".to_string(),
        };
        assert_eq!(error.to_string(), "boom");
        assert!(error.status_code().is_none());
    }

    #[test]
    fn test_parse_error_carries_body() {
        let error = RequestError::Parse {
            message: "expected value at line 1 column 1".to_string(),
            response_body: "<malformed>".to_string(),
        };
        assert_eq!(error.response_body(), Some("<malformed>"));
    }

    #[test]
    fn test_invalid_method_message() {
        let error = RequestError::InvalidMethod {
            method: "patch".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid Http method patch.");
    }
}
