//! HTTP request execution for the BigCommerce API.
//!
//! # Overview
//!
//! - [`RequestConfig`]: Immutable host, header, agent and rate-limit settings
//! - [`RequestRunner`]: Executes one logical request against the configured host
//! - [`RequestOutcome`]: A parsed JSON body or the raw text of a non-JSON body
//! - [`RequestError`]: Every way a request can fail
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`Sleeper`]: The wait used between rate-limited attempts
//!
//! # Response Handling
//!
//! Each response goes through the same steps:
//!
//! 1. **429**: wait the `X-Retry-After` window and re-execute the request, or
//!    fail with [`RequestError::RateLimited`] when `fail_on_limit_reached` is set
//! 2. **Decompression**: `gzip` and `deflate` bodies are decoded after buffering
//! 3. **4xx/5xx**: [`RequestError::HttpStatus`] with the body text
//! 4. **Non-JSON or blank body**: [`RequestOutcome::Text`]
//! 5. **JSON with `error`/`errors`**: [`RequestError::Upstream`]
//! 6. **Otherwise**: [`RequestOutcome::Json`]
//!
//! Transport failures are returned as [`RequestError::Transport`] and never retried.

mod errors;
mod http_request;
mod http_response;
mod request_runner;
mod retry;

pub use errors::RequestError;
pub use http_request::{HttpMethod, RequestConfig, RequestConfigBuilder, Scheme};
pub use http_response::{
    classify_response, is_error_status, ContentEncoding, RateLimitSignal, RequestOutcome,
    DEFAULT_RETRY_AFTER_SECS, RETRY_AFTER_HEADER,
};
pub use request_runner::{RequestRunner, SDK_USER_AGENT, SDK_VERSION};
pub use retry::{RateLimitDecision, RateLimitPolicy, Sleeper, TokioSleeper};
