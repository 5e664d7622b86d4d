//! Error types for the BigCommerce API client.
//!
//! Configuration problems are reported through [`ConfigError`]. The
//! [`BigCommerceError`] enum is the error returned by the high-level
//! [`BigCommerce`](crate::BigCommerce) facade and wraps the configuration,
//! signed payload and request errors raised by the lower layers.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

use crate::auth::SignedPayloadError;
use crate::clients::RequestError;

/// Errors that can occur while building or using a configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide a valid BigCommerce client ID.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide a valid BigCommerce client secret.")]
    EmptyClientSecret,

    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid BigCommerce access token.")]
    EmptyAccessToken,

    /// Store hash cannot be empty.
    #[error("Store hash cannot be empty. Please provide the hash of the store to call.")]
    EmptyStoreHash,

    /// The hostname is required to make the call to the server.
    #[error("The hostname is required to make the call to the server.")]
    EmptyHostname,

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected 'v2' or 'v3'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Response type is invalid.
    #[error("Invalid response type '{response_type}'. Expected 'json' or 'xml'.")]
    InvalidResponseType {
        /// The invalid response type that was provided.
        response_type: String,
    },

    /// A header name or value cannot be sent over HTTP.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
        /// Why the header was rejected.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set in the configuration for this call.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The default HTTP agent could not be created.
    #[error("Failed to initialize the HTTP client: {reason}")]
    HttpClient {
        /// The underlying client builder error.
        reason: String,
    },
}

/// Unified error type for the [`BigCommerce`](crate::BigCommerce) facade.
///
/// # Example
///
/// ```rust,ignore
/// use bigcommerce_api::BigCommerceError;
///
/// match client.get("/products").await {
///     Ok(outcome) => println!("{outcome:?}"),
///     Err(BigCommerceError::Config(e)) => eprintln!("misconfigured: {e}"),
///     Err(BigCommerceError::Request(e)) => eprintln!("request failed: {e}"),
///     Err(BigCommerceError::SignedPayload(e)) => eprintln!("untrusted payload: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum BigCommerceError {
    /// The configuration is missing something the call needs.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP exchange failed.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// A signed payload could not be verified.
    #[error(transparent)]
    SignedPayload(#[from] SignedPayloadError),
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConfigError>();
    assert_send_sync::<BigCommerceError>();
};
