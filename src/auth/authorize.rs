//! OAuth authorization-code exchange.
//!
//! After a merchant installs an app, the platform redirects to the app's
//! callback URL with `code`, `scope` and `context` query parameters.
//! [`authorize`] trades them for a permanent access token by posting to
//! `https://login.bigcommerce.com/oauth2/token`.
//!
//! # Example
//!
//! ```rust,ignore
//! use bigcommerce_api::auth::{authorize, AuthQuery};
//!
//! let query = AuthQuery::new("qr6h3thvbvag2ffq", "store_v2_orders", "stores/g5cd38");
//! let token = authorize(&config, &query).await?;
//! let access_token = token.as_json().and_then(|body| body["access_token"].as_str());
//! ```

use serde::Deserialize;
use serde_json::json;

use crate::clients::{HttpMethod, RequestConfig, RequestOutcome, RequestRunner};
use crate::config::BigCommerceConfig;
use crate::error::BigCommerceError;

/// Path of the token endpoint on the login host.
pub const TOKEN_PATH: &str = "/oauth2/token";

const GRANT_TYPE: &str = "authorization_code";

/// Query parameters received on the OAuth callback.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthQuery {
    /// The temporary authorization code.
    pub code: String,
    /// The space-separated scopes granted by the merchant.
    pub scope: String,
    /// The store context, e.g. `stores/g5cd38`.
    pub context: String,
}

impl AuthQuery {
    /// Creates a query from its three parameters.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        scope: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            scope: scope.into(),
            context: context.into(),
        }
    }
}

/// Exchanges an authorization code for an access token.
///
/// The request goes to the configured login host through the config's shared
/// agent and honours its scheme and `fail_on_limit_reached` setting.
///
/// # Errors
///
/// - [`ConfigError::MissingRequiredField`](crate::ConfigError::MissingRequiredField)
///   if `client_id`, `secret` or `callback` is not configured
/// - [`BigCommerceError::Request`] if the exchange fails
pub async fn authorize(
    config: &BigCommerceConfig,
    query: &AuthQuery,
) -> Result<RequestOutcome, BigCommerceError> {
    let client_id: &str = config.require_client_id()?.as_ref();
    let secret: &str = config.require_secret()?.as_ref();
    let callback = config.require_callback()?;

    let body = json!({
        "client_id": client_id,
        "client_secret": secret,
        "redirect_uri": callback,
        "grant_type": GRANT_TYPE,
        "code": query.code,
        "scope": query.scope,
        "context": query.context,
    });

    let request_config = RequestConfig::builder(config.login_hostname())
        .fail_on_limit_reached(config.fail_on_limit_reached())
        .scheme(config.scheme())
        .agent(config.agent().clone())
        .build()?;
    let runner = RequestRunner::new(request_config)?;

    tracing::debug!(
        "Exchanging authorization code for {} at {}",
        query.context,
        config.login_hostname()
    );

    Ok(runner.run(HttpMethod::Post, TOKEN_PATH, Some(&body)).await?)
}
