//! Request-side types: HTTP methods, URL schemes and the immutable
//! [`RequestConfig`] a [`RequestRunner`](crate::clients::RequestRunner) is bound to.

use std::fmt;
use std::str::FromStr;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::clients::errors::RequestError;
use crate::error::ConfigError;

/// HTTP methods supported by the BigCommerce API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case wire name of the method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "delete" => Ok(Self::Delete),
            _ => Err(RequestError::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// URL scheme used to reach the upstream host.
///
/// The API is only served over TLS; [`Scheme::Http`] exists for local
/// proxies and test servers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// `https://` (default).
    #[default]
    Https,
    /// Plain `http://`.
    Http,
}

impl Scheme {
    /// Returns the scheme name without the `://` separator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }
}

/// Immutable settings for one [`RequestRunner`](crate::clients::RequestRunner).
///
/// Built once per logical API client and never mutated, so a runner can be
/// shared by any number of concurrent calls.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::clients::RequestConfig;
///
/// let config = RequestConfig::builder("api.bigcommerce.com")
///     .header("X-Auth-Client", "client-id")
///     .header("X-Auth-Token", "access-token")
///     .fail_on_limit_reached(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.hostname(), "api.bigcommerce.com");
/// assert!(config.fail_on_limit_reached());
/// ```
#[derive(Clone, Debug)]
pub struct RequestConfig {
    hostname: String,
    headers: HeaderMap,
    fail_on_limit_reached: bool,
    agent: Option<reqwest::Client>,
    scheme: Scheme,
}

impl RequestConfig {
    /// Creates a new builder bound to `hostname`.
    #[must_use]
    pub fn builder(hostname: impl Into<String>) -> RequestConfigBuilder {
        RequestConfigBuilder::new(hostname)
    }

    /// Returns the upstream hostname (optionally with a port).
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Returns the caller-supplied headers, merged over the defaults on every call.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns whether a 429 response fails instead of being retried.
    #[must_use]
    pub const fn fail_on_limit_reached(&self) -> bool {
        self.fail_on_limit_reached
    }

    /// Returns the pooled agent, if one was supplied.
    #[must_use]
    pub const fn agent(&self) -> Option<&reqwest::Client> {
        self.agent.as_ref()
    }

    /// Returns the URL scheme.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the absolute URL for `path` on this host.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}://{}{}", self.scheme.as_str(), self.hostname, path)
    }
}

/// Builder for [`RequestConfig`].
#[derive(Debug)]
pub struct RequestConfigBuilder {
    hostname: String,
    headers: Vec<(String, String)>,
    fail_on_limit_reached: bool,
    agent: Option<reqwest::Client>,
    scheme: Scheme,
}

impl RequestConfigBuilder {
    fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            headers: Vec::new(),
            fail_on_limit_reached: false,
            agent: None,
            scheme: Scheme::default(),
        }
    }

    /// Adds a header. Later values replace earlier ones, case-insensitively.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds several headers at once.
    #[must_use]
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Fail with [`RequestError::RateLimited`] on a 429 instead of waiting (default `false`).
    #[must_use]
    pub const fn fail_on_limit_reached(mut self, fail: bool) -> Self {
        self.fail_on_limit_reached = fail;
        self
    }

    /// Sets the pooled agent used for every call.
    #[must_use]
    pub fn agent(mut self, agent: reqwest::Client) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Sets the URL scheme (default [`Scheme::Https`]).
    #[must_use]
    pub const fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Builds the [`RequestConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyHostname`] if the hostname is blank, and
    /// [`ConfigError::InvalidHeader`] if a header name or value cannot be sent.
    pub fn build(self) -> Result<RequestConfig, ConfigError> {
        let hostname = self.hostname.trim().to_string();
        if hostname.is_empty() {
            return Err(ConfigError::EmptyHostname);
        }

        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ConfigError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(&value).map_err(|e| ConfigError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }

        Ok(RequestConfig {
            hostname,
            headers,
            fail_on_limit_reached: self.fail_on_limit_reached,
            agent: self.agent,
            scheme: self.scheme,
        })
    }
}
