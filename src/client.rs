//! The [`BigCommerce`] client: one configured entry point for signed payload
//! verification, the OAuth exchange and store API calls.

use serde_json::Value;

use crate::auth::{self, AuthQuery};
use crate::clients::{HttpMethod, RequestConfig, RequestOutcome, RequestRunner};
use crate::config::BigCommerceConfig;
use crate::error::{BigCommerceError, ConfigError};

/// A configured BigCommerce API client.
///
/// Every call builds a lightweight [`RequestRunner`] around the config's
/// agent, so all calls share one connection pool and the client holds no
/// mutable state.
///
/// # Example
///
/// ```rust,ignore
/// use bigcommerce_api::{AccessToken, ApiVersion, BigCommerce, BigCommerceConfig, ClientId, StoreHash};
/// use serde_json::json;
///
/// let bigcommerce = BigCommerce::new(
///     BigCommerceConfig::builder()
///         .client_id(ClientId::new("hjasdfhj09sasd80dsf04dfhg90rsds")?)
///         .access_token(AccessToken::new("ly8cl3wwcyj12vpechm34fd20oqpnl")?)
///         .store_hash(StoreHash::new("x62tqn")?)
///         .api_version(ApiVersion::V3)
///         .build()?,
/// );
///
/// let products = bigcommerce.get("/catalog/products").await?;
/// let created = bigcommerce
///     .post("/catalog/products", &json!({"name": "Mug", "type": "physical", "price": 12.5}))
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct BigCommerce {
    config: BigCommerceConfig,
}

// Verify BigCommerce is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BigCommerce>();
};

impl BigCommerce {
    /// Creates a client from `config`.
    #[must_use]
    pub const fn new(config: BigCommerceConfig) -> Self {
        Self { config }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &BigCommerceConfig {
        &self.config
    }

    /// Verifies a signed payload with the configured client secret.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if no secret is configured
    /// - [`BigCommerceError::SignedPayload`] if the payload is malformed or forged
    pub fn verify(&self, signed_request: &str) -> Result<Value, BigCommerceError> {
        let secret = self.config.require_secret()?;
        Ok(auth::verify_signed_payload(signed_request, secret.as_ref())?)
    }

    /// Exchanges an OAuth authorization code for an access token.
    ///
    /// # Errors
    ///
    /// See [`auth::authorize`].
    pub async fn authorize(&self, query: &AuthQuery) -> Result<RequestOutcome, BigCommerceError> {
        auth::authorize(&self.config, query).await
    }

    /// Builds a [`RequestRunner`] bound to the store API host.
    ///
    /// The runner sends `Accept` for the configured response type, plus
    /// `X-Auth-Client` and `X-Auth-Token` when those credentials are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if a credential cannot be sent
    /// as a header value.
    pub fn create_api_request(&self) -> Result<RequestRunner, BigCommerceError> {
        let mut builder = RequestConfig::builder(self.config.api_hostname())
            .header("Accept", self.config.response_type().as_accept())
            .fail_on_limit_reached(self.config.fail_on_limit_reached())
            .scheme(self.config.scheme())
            .agent(self.config.agent().clone());

        if let Some(client_id) = self.config.client_id() {
            builder = builder.header("X-Auth-Client", AsRef::<str>::as_ref(client_id));
        }
        if let Some(token) = self.config.access_token() {
            builder = builder.header("X-Auth-Token", AsRef::<str>::as_ref(token));
        }

        Ok(RequestRunner::new(builder.build()?)?)
    }

    /// Returns the full API path for `path`: `/stores/<hash>/<version><path>`.
    ///
    /// For versions that take a format extension and an XML response type,
    /// `.xml` is inserted before the query string (or appended).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] unless both the access
    /// token and the store hash are configured.
    pub fn api_path(&self, path: &str) -> Result<String, ConfigError> {
        if self.config.access_token().is_none() {
            return Err(ConfigError::MissingRequiredField {
                field: "access_token",
            });
        }
        let store_hash = self
            .config
            .store_hash()
            .ok_or(ConfigError::MissingRequiredField { field: "store_hash" })?;

        let version = self.config.api_version();
        let mut full_path = format!("/stores/{store_hash}/{version}{path}");

        if version.uses_format_extension() {
            let extension = self.config.response_type().path_extension();
            if !extension.is_empty() {
                let prefix_len = full_path.len() - path.len();
                let at = path.find('?').map_or(full_path.len(), |i| prefix_len + i);
                full_path.insert_str(at, extension);
            }
        }

        Ok(full_path)
    }

    /// Sends a request to the store API.
    ///
    /// `path` is relative to the store and version, e.g. `/orders?page=2`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] without an access token and store hash
    /// - [`BigCommerceError::Request`] for any failure described on [`RequestRunner::run`]
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<RequestOutcome, BigCommerceError> {
        let full_path = self.api_path(path)?;
        let runner = self.create_api_request()?;
        Ok(runner.run(method, &full_path, body).await?)
    }

    /// Sends a `GET` request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get(&self, path: &str) -> Result<RequestOutcome, BigCommerceError> {
        self.request(HttpMethod::Get, path, None).await
    }

    /// Sends a `POST` request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn post(&self, path: &str, body: &Value) -> Result<RequestOutcome, BigCommerceError> {
        self.request(HttpMethod::Post, path, Some(body)).await
    }

    /// Sends a `PUT` request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn put(&self, path: &str, body: &Value) -> Result<RequestOutcome, BigCommerceError> {
        self.request(HttpMethod::Put, path, Some(body)).await
    }

    /// Sends a `DELETE` request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn delete(&self, path: &str) -> Result<RequestOutcome, BigCommerceError> {
        self.request(HttpMethod::Delete, path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, ApiVersion, ClientId, ClientSecret, ResponseType, StoreHash};

    fn config_builder() -> crate::config::BigCommerceConfigBuilder {
        BigCommerceConfig::builder()
            .client_id(ClientId::new("123456abcdef").unwrap())
            .secret(ClientSecret::new("123456abcdef").unwrap())
            .access_token(AccessToken::new("abcdef123456").unwrap())
    }

    fn client(hash: &str, version: ApiVersion, response_type: ResponseType) -> BigCommerce {
        BigCommerce::new(
            config_builder()
                .store_hash(StoreHash::new(hash).unwrap())
                .api_version(version)
                .response_type(response_type)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_api_path_for_v3_json() {
        let client = client("12abc", ApiVersion::V3, ResponseType::Json);
        assert_eq!(client.api_path("/themes").unwrap(), "/stores/12abc/v3/themes");
    }

    #[test]
    fn test_api_path_never_adds_extension_for_v3() {
        let client = client("12abc", ApiVersion::V3, ResponseType::Xml);
        assert_eq!(client.api_path("/themes").unwrap(), "/stores/12abc/v3/themes");
    }

    #[test]
    fn test_api_path_appends_xml_extension() {
        let client = client("abcd/1", ApiVersion::V2, ResponseType::Xml);
        assert_eq!(client.api_path("/foo").unwrap(), "/stores/abcd/1/v2/foo.xml");
    }

    #[test]
    fn test_api_path_inserts_xml_extension_before_query() {
        let client = client("abcd", ApiVersion::V2, ResponseType::Xml);
        assert_eq!(
            client.api_path("/orders?page=2&limit=5").unwrap(),
            "/stores/abcd/v2/orders.xml?page=2&limit=5"
        );
    }

    #[test]
    fn test_api_path_json_v2_has_no_extension() {
        let client = client("abcd", ApiVersion::V2, ResponseType::Json);
        assert_eq!(
            client.api_path("/orders?page=2").unwrap(),
            "/stores/abcd/v2/orders?page=2"
        );
    }

    #[test]
    fn test_api_path_requires_access_token() {
        let client = BigCommerce::new(
            BigCommerceConfig::builder()
                .store_hash(StoreHash::new("abcd").unwrap())
                .build()
                .unwrap(),
        );
        assert!(matches!(
            client.api_path("/orders"),
            Err(ConfigError::MissingRequiredField {
                field: "access_token"
            })
        ));
    }

    #[test]
    fn test_api_path_requires_store_hash() {
        let client = BigCommerce::new(config_builder().build().unwrap());
        assert!(matches!(
            client.api_path("/orders"),
            Err(ConfigError::MissingRequiredField { field: "store_hash" })
        ));
    }

    #[test]
    fn test_create_api_request_sets_auth_headers() {
        let client = client("12abc", ApiVersion::V3, ResponseType::Json);
        let runner = client.create_api_request().unwrap();
        let headers = runner.config().headers();

        assert_eq!(headers["accept"], "application/json");
        assert_eq!(headers["x-auth-client"], "123456abcdef");
        assert_eq!(headers["x-auth-token"], "abcdef123456");
        assert_eq!(runner.config().hostname(), "api.bigcommerce.com");
    }

    #[test]
    fn test_create_api_request_accepts_xml() {
        let client = client("12abc", ApiVersion::V2, ResponseType::Xml);
        let runner = client.create_api_request().unwrap();
        assert_eq!(runner.config().headers()["accept"], "application/xml");
    }

    #[test]
    fn test_create_api_request_omits_unset_credentials() {
        let client = BigCommerce::new(BigCommerceConfig::builder().build().unwrap());
        let runner = client.create_api_request().unwrap();
        let headers = runner.config().headers();

        assert!(headers.get("x-auth-client").is_none());
        assert!(headers.get("x-auth-token").is_none());
    }

    #[test]
    fn test_create_api_request_carries_limit_and_agent() {
        let client = BigCommerce::new(
            config_builder()
                .fail_on_limit_reached(true)
                .agent(reqwest::Client::new())
                .build()
                .unwrap(),
        );
        let runner = client.create_api_request().unwrap();

        assert!(runner.config().fail_on_limit_reached());
        assert!(runner.config().agent().is_some());
    }

    #[test]
    fn test_default_agent_is_handed_to_every_runner() {
        let client = BigCommerce::new(BigCommerceConfig::builder().build().unwrap());

        assert!(client.create_api_request().unwrap().config().agent().is_some());
        assert!(client.create_api_request().unwrap().config().agent().is_some());
    }

    #[test]
    fn test_verify_uses_configured_secret() {
        let client = client("12abc", ApiVersion::V3, ResponseType::Json);
        let signed = "eyJmb28iOiJmb28ifQ==.YjMzMTQ2ZGU4ZTUzNWJiOTI3NTI1ODJmNzhiZGM5NzBjNGQ3MjZkZDdkMDY1MjdkZGYxZDA0NGZjNDVjYmNkMA==";

        let payload = client.verify(signed).unwrap();
        assert_eq!(payload["foo"], "foo");
    }

    #[test]
    fn test_verify_requires_secret() {
        let client = BigCommerce::new(BigCommerceConfig::builder().build().unwrap());
        assert!(matches!(
            client.verify("a.b"),
            Err(BigCommerceError::Config(ConfigError::MissingRequiredField {
                field: "secret"
            }))
        ));
    }

    #[tokio::test]
    async fn test_request_without_credentials_fails_before_sending() {
        let client = BigCommerce::new(BigCommerceConfig::builder().build().unwrap());
        let result = client.get("/orders").await;
        assert!(matches!(
            result,
            Err(BigCommerceError::Config(ConfigError::MissingRequiredField { .. }))
        ));
    }
}
