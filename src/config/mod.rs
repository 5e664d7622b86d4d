//! Configuration types for the BigCommerce API client.
//!
//! # Overview
//!
//! - [`BigCommerceConfig`]: All settings for a [`BigCommerce`](crate::BigCommerce) client
//! - [`BigCommerceConfigBuilder`]: A builder for constructing [`BigCommerceConfig`] instances
//! - [`ClientId`], [`ClientSecret`], [`AccessToken`], [`StoreHash`]: Validated newtypes
//! - [`ApiVersion`], [`ResponseType`]: API version and body format
//!
//! Credentials are optional at build time. Each call checks for the fields it
//! needs and fails with [`ConfigError::MissingRequiredField`] when one is absent,
//! so a config holding only a secret is enough to verify signed payloads.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::{BigCommerceConfig, ClientId, ClientSecret, AccessToken, StoreHash, ApiVersion};
//!
//! let config = BigCommerceConfig::builder()
//!     .client_id(ClientId::new("hjasdfhj09sasd80dsf04dfhg90rsds").unwrap())
//!     .secret(ClientSecret::new("odpdf83m40fmxcv0345cvfgh73bdwjc").unwrap())
//!     .access_token(AccessToken::new("ly8cl3wwcyj12vpechm34fd20oqpnl").unwrap())
//!     .store_hash(StoreHash::new("x62tqn").unwrap())
//!     .api_version(ApiVersion::V3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_version(), ApiVersion::V3);
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, ClientId, ClientSecret, StoreHash};
pub use version::{ApiVersion, ResponseType};

use crate::clients::Scheme;
use crate::error::ConfigError;

/// Default host for store API calls.
pub const DEFAULT_API_HOSTNAME: &str = "api.bigcommerce.com";

/// Default host for the OAuth token endpoint.
pub const DEFAULT_LOGIN_HOSTNAME: &str = "login.bigcommerce.com";

/// Configuration for the BigCommerce API client.
///
/// # Thread Safety
///
/// `BigCommerceConfig` is `Clone`, `Send`, and `Sync`. Every config holds an
/// HTTP agent, supplied or built once in [`BigCommerceConfigBuilder::build`];
/// clones and every request made from them share its connection pool.
#[derive(Clone, Debug)]
pub struct BigCommerceConfig {
    client_id: Option<ClientId>,
    secret: Option<ClientSecret>,
    callback: Option<String>,
    access_token: Option<AccessToken>,
    store_hash: Option<StoreHash>,
    api_version: ApiVersion,
    response_type: ResponseType,
    fail_on_limit_reached: bool,
    agent: reqwest::Client,
    api_hostname: String,
    login_hostname: String,
    scheme: Scheme,
}

impl BigCommerceConfig {
    /// Creates a new builder for constructing a `BigCommerceConfig`.
    #[must_use]
    pub fn builder() -> BigCommerceConfigBuilder {
        BigCommerceConfigBuilder::new()
    }

    /// Returns the client ID, if configured.
    #[must_use]
    pub const fn client_id(&self) -> Option<&ClientId> {
        self.client_id.as_ref()
    }

    /// Returns the client secret, if configured.
    #[must_use]
    pub const fn secret(&self) -> Option<&ClientSecret> {
        self.secret.as_ref()
    }

    /// Returns the OAuth callback URL, if configured.
    #[must_use]
    pub fn callback(&self) -> Option<&str> {
        self.callback.as_deref()
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the store hash, if configured.
    #[must_use]
    pub const fn store_hash(&self) -> Option<&StoreHash> {
        self.store_hash.as_ref()
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns the requested response format.
    #[must_use]
    pub const fn response_type(&self) -> ResponseType {
        self.response_type
    }

    /// Returns whether rate-limited requests fail instead of waiting.
    #[must_use]
    pub const fn fail_on_limit_reached(&self) -> bool {
        self.fail_on_limit_reached
    }

    /// Returns the pooled HTTP agent used for every call.
    #[must_use]
    pub const fn agent(&self) -> &reqwest::Client {
        &self.agent
    }

    /// Returns the hostname used for store API calls.
    #[must_use]
    pub fn api_hostname(&self) -> &str {
        &self.api_hostname
    }

    /// Returns the hostname used for the OAuth token exchange.
    #[must_use]
    pub fn login_hostname(&self) -> &str {
        &self.login_hostname
    }

    /// Returns the URL scheme used for every call.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub(crate) fn require_client_id(&self) -> Result<&ClientId, ConfigError> {
        self.client_id
            .as_ref()
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })
    }

    pub(crate) fn require_secret(&self) -> Result<&ClientSecret, ConfigError> {
        self.secret
            .as_ref()
            .ok_or(ConfigError::MissingRequiredField { field: "secret" })
    }

    pub(crate) fn require_callback(&self) -> Result<&str, ConfigError> {
        self.callback()
            .ok_or(ConfigError::MissingRequiredField { field: "callback" })
    }
}

// Verify BigCommerceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BigCommerceConfig>();
};

/// Builder for constructing [`BigCommerceConfig`] instances.
///
/// # Defaults
///
/// - `api_version`: [`ApiVersion::V2`]
/// - `response_type`: [`ResponseType::Json`]
/// - `fail_on_limit_reached`: `false`
/// - `api_hostname`: `api.bigcommerce.com`
/// - `login_hostname`: `login.bigcommerce.com`
/// - `scheme`: [`Scheme::Https`]
/// - `agent`: a rustls `reqwest::Client` built once by [`build`](Self::build)
/// - every credential: `None`
#[derive(Debug, Default)]
pub struct BigCommerceConfigBuilder {
    client_id: Option<ClientId>,
    secret: Option<ClientSecret>,
    callback: Option<String>,
    access_token: Option<AccessToken>,
    store_hash: Option<StoreHash>,
    api_version: Option<ApiVersion>,
    response_type: Option<ResponseType>,
    fail_on_limit_reached: bool,
    agent: Option<reqwest::Client>,
    api_hostname: Option<String>,
    login_hostname: Option<String>,
    scheme: Option<Scheme>,
}

impl BigCommerceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the app client ID.
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the app client secret.
    #[must_use]
    pub fn secret(mut self, secret: ClientSecret) -> Self {
        self.secret = Some(secret);
        self
    }

    /// Sets the OAuth callback URL sent as `redirect_uri`.
    #[must_use]
    pub fn callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    /// Sets the store access token.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the store hash.
    #[must_use]
    pub fn store_hash(mut self, hash: StoreHash) -> Self {
        self.store_hash = Some(hash);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the response format.
    #[must_use]
    pub const fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    /// Fail with [`RequestError::RateLimited`](crate::clients::RequestError::RateLimited)
    /// instead of waiting out a 429.
    #[must_use]
    pub const fn fail_on_limit_reached(mut self, fail: bool) -> Self {
        self.fail_on_limit_reached = fail;
        self
    }

    /// Sets a pooled HTTP agent shared by every request of the client.
    #[must_use]
    pub fn agent(mut self, agent: reqwest::Client) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Overrides the store API hostname (e.g. a proxy or a local test server).
    #[must_use]
    pub fn api_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.api_hostname = Some(hostname.into());
        self
    }

    /// Overrides the OAuth login hostname.
    #[must_use]
    pub fn login_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.login_hostname = Some(hostname.into());
        self
    }

    /// Overrides the URL scheme.
    #[must_use]
    pub const fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Builds the [`BigCommerceConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyHostname`] if a hostname override is blank,
    /// and [`ConfigError::HttpClient`] if no agent was supplied and the default
    /// one cannot be created.
    pub fn build(self) -> Result<BigCommerceConfig, ConfigError> {
        let api_hostname = non_empty_hostname(self.api_hostname, DEFAULT_API_HOSTNAME)?;
        let login_hostname = non_empty_hostname(self.login_hostname, DEFAULT_LOGIN_HOSTNAME)?;

        let agent = match self.agent {
            Some(agent) => agent,
            None => reqwest::Client::builder()
                .use_rustls_tls()
                .build()
                .map_err(|e| ConfigError::HttpClient {
                    reason: e.to_string(),
                })?,
        };

        Ok(BigCommerceConfig {
            client_id: self.client_id,
            secret: self.secret,
            callback: self.callback,
            access_token: self.access_token,
            store_hash: self.store_hash,
            api_version: self.api_version.unwrap_or_default(),
            response_type: self.response_type.unwrap_or_default(),
            fail_on_limit_reached: self.fail_on_limit_reached,
            agent,
            api_hostname,
            login_hostname,
            scheme: self.scheme.unwrap_or_default(),
        })
    }
}

fn non_empty_hostname(hostname: Option<String>, default: &str) -> Result<String, ConfigError> {
    match hostname {
        Some(hostname) if hostname.trim().is_empty() => Err(ConfigError::EmptyHostname),
        Some(hostname) => Ok(hostname.trim().to_string()),
        None => Ok(default.to_string()),
    }
}
