//! The request execution engine.
//!
//! [`RequestRunner`] turns a `(method, path, body)` triple into a
//! [`RequestOutcome`] or a [`RequestError`], handling compressed bodies,
//! 429 backpressure and the API's heterogeneous error shapes.

use std::sync::Arc;

use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT,
};
use serde_json::Value;

use crate::clients::errors::RequestError;
use crate::clients::http_request::{HttpMethod, RequestConfig};
use crate::clients::http_response::{
    classify_response, ContentEncoding, RateLimitSignal, RequestOutcome,
};
use crate::clients::retry::{RateLimitDecision, RateLimitPolicy, Sleeper, TokioSleeper};

/// Client version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `User-Agent` sent with every request: `<client-id>/<version>`.
pub const SDK_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Executes requests against one upstream host.
///
/// The runner holds no mutable state. Any number of [`run`](Self::run) calls
/// may be in flight at once, and a supplied pooled agent is shared by all of them.
///
/// # Example
///
/// ```rust,ignore
/// use bigcommerce_api::clients::{HttpMethod, RequestConfig, RequestRunner};
/// use serde_json::json;
///
/// let config = RequestConfig::builder("api.bigcommerce.com")
///     .header("X-Auth-Client", "client-id")
///     .header("X-Auth-Token", "access-token")
///     .build()?;
/// let runner = RequestRunner::new(config)?;
///
/// let orders = runner.run(HttpMethod::Get, "/stores/x62tqn/v2/orders", None).await?;
/// let created = runner
///     .run(HttpMethod::Post, "/stores/x62tqn/v3/catalog/products", Some(&json!({"name": "Mug"})))
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct RequestRunner {
    config: RequestConfig,
    client: reqwest::Client,
    policy: RateLimitPolicy,
    sleeper: Arc<dyn Sleeper>,
}

// Verify RequestRunner is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestRunner>();
};

impl RequestRunner {
    /// Creates a runner that waits out rate limits with `tokio::time::sleep`.
    ///
    /// Uses the configured agent, or builds a dedicated rustls client if none was supplied.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Transport`] if the HTTP client cannot be
    /// initialized (e.g. TLS backend failure).
    pub fn new(config: RequestConfig) -> Result<Self, RequestError> {
        Self::with_sleeper(config, Arc::new(TokioSleeper))
    }

    /// Creates a runner that waits out rate limits with the given [`Sleeper`].
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Transport`] if the HTTP client cannot be initialized.
    pub fn with_sleeper(
        config: RequestConfig,
        sleeper: Arc<dyn Sleeper>,
    ) -> Result<Self, RequestError> {
        let client = match config.agent() {
            Some(agent) => agent.clone(),
            None => reqwest::Client::builder().use_rustls_tls().build()?,
        };
        let policy = RateLimitPolicy::from_fail_on_limit_reached(config.fail_on_limit_reached());

        Ok(Self {
            config,
            client,
            policy,
            sleeper,
        })
    }

    /// Returns the configuration this runner is bound to.
    #[must_use]
    pub const fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// Returns the headers sent for a body of `body_len` bytes (`None` for no body).
    ///
    /// Defaults are `User-Agent`, `Content-Type: application/json` and
    /// `Accept-Encoding: gzip, deflate`; configured headers override them, and
    /// `Content-Length` is added only when a body exists.
    #[must_use]
    pub fn request_headers(&self, body_len: Option<usize>) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(self.config.headers().len() + 4);
        headers.insert(USER_AGENT, HeaderValue::from_static(SDK_USER_AGENT));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));

        for (name, value) in self.config.headers() {
            headers.insert(name.clone(), value.clone());
        }

        if let Some(len) = body_len {
            headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
        }

        headers
    }

    /// Executes one logical request.
    ///
    /// `body`, when present, is sent as JSON text. A 429 response is either
    /// reported or waited out and the whole request re-executed, depending on
    /// `fail_on_limit_reached`; the result is always that of the final exchange.
    ///
    /// # Errors
    ///
    /// - [`RequestError::Transport`] for connection, DNS or timeout failures (never retried)
    /// - [`RequestError::RateLimited`] for a 429 when failing fast
    /// - [`RequestError::Decompression`] for a corrupt `gzip`/`deflate` body
    /// - [`RequestError::HttpStatus`] for status codes in `[400, 600)`
    /// - [`RequestError::Parse`] for a JSON content type with an unparsable body
    /// - [`RequestError::Upstream`] for a JSON body carrying `error` or `errors`
    pub async fn run(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<RequestOutcome, RequestError> {
        let url = self.config.url_for(path);
        let payload: Option<Vec<u8>> = body.map(|value| value.to_string().into_bytes());
        let headers = self.request_headers(payload.as_ref().map(Vec::len));

        tracing::debug!("Requesting data from {url} using the {method} method");

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let mut request = self
                .client
                .request(method.into(), &url)
                .headers(headers.clone());
            if let Some(payload) = &payload {
                tracing::debug!("Sending {} byte body", payload.len());
                request = request.body(payload.clone());
            }

            let response = request.send().await?;
            let status = response.status().as_u16();
            tracing::debug!(
                "Status returned: {status} (attempt {attempt}), headers: {:?}",
                response.headers()
            );

            if status == 429 {
                let signal = RateLimitSignal::from_headers(response.headers());
                match self.policy.decide(signal) {
                    RateLimitDecision::Fail { retry_after } => {
                        tracing::warn!(
                            "Rate limit reached for {url}, failing (retry in {retry_after} seconds)"
                        );
                        return Err(RequestError::RateLimited {
                            retry_after,
                            message: format!(
                                "You have reached the rate limit for the BigCommerce API. Please retry in {retry_after} seconds."
                            ),
                        });
                    }
                    RateLimitDecision::RetryAfter(delay) => {
                        tracing::warn!(
                            "Rate limit reached for {url}, retrying in {} seconds",
                            signal.retry_after
                        );
                        self.sleeper.sleep(delay).await;
                        tracing::debug!("Restarting request after suggested wait");
                        continue;
                    }
                }
            }

            let encoding = ContentEncoding::from_headers(response.headers());
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);

            let raw = response.bytes().await?;
            tracing::debug!("Request complete, received {} bytes", raw.len());

            let decoded = encoding
                .decode(&raw)
                .map_err(RequestError::Decompression)?;
            if encoding != ContentEncoding::Identity {
                tracing::debug!(
                    "Decoded {encoding:?} body from {} to {} bytes",
                    raw.len(),
                    decoded.len()
                );
            }

            let text = String::from_utf8_lossy(&decoded).into_owned();
            return classify_response(status, content_type.as_deref(), text);
        }
    }
}
