//! # BigCommerce API Rust Client
//!
//! An async client for the BigCommerce store API and app authentication flows.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`BigCommerceConfig`] and [`BigCommerceConfigBuilder`]
//! - Validated newtypes for credentials and the store hash
//! - Verification of signed payloads from the load, uninstall and remove-user callbacks
//! - The OAuth authorization-code exchange via [`auth::authorize`]
//! - A request runner that waits out rate limits, decodes compressed bodies and
//!   classifies the API's error shapes
//!
//! ## Quick Start
//!
//! ```rust
//! use bigcommerce_api::{BigCommerce, BigCommerceConfig, ClientId, AccessToken, StoreHash, ApiVersion};
//!
//! let config = BigCommerceConfig::builder()
//!     .client_id(ClientId::new("hjasdfhj09sasd80dsf04dfhg90rsds").unwrap())
//!     .access_token(AccessToken::new("ly8cl3wwcyj12vpechm34fd20oqpnl").unwrap())
//!     .store_hash(StoreHash::new("x62tqn").unwrap())
//!     .api_version(ApiVersion::V3)
//!     .build()
//!     .unwrap();
//!
//! let bigcommerce = BigCommerce::new(config);
//! assert_eq!(
//!     bigcommerce.api_path("/catalog/products").unwrap(),
//!     "/stores/x62tqn/v3/catalog/products"
//! );
//! ```
//!
//! ## App Callbacks
//!
//! ```rust,ignore
//! use bigcommerce_api::{AuthQuery, BigCommerce, BigCommerceConfig, ClientId, ClientSecret};
//!
//! let bigcommerce = BigCommerce::new(
//!     BigCommerceConfig::builder()
//!         .client_id(ClientId::new("hjasdfhj09sasd80dsf04dfhg90rsds")?)
//!         .secret(ClientSecret::new("odpdf83m40fmxcv0345cvfgh73bdwjc")?)
//!         .callback("https://myapplication.com/auth")
//!         .build()?,
//! );
//!
//! // Install: exchange the temporary code for a permanent token
//! let token = bigcommerce.authorize(&query).await?;
//!
//! // Load: trust the payload only after its signature checks out
//! let payload = bigcommerce.verify(&signed_payload)?;
//! ```
//!
//! ## Logging
//!
//! Requests and verification results are reported through [`tracing`]. No
//! events are emitted unless a subscriber is installed; request bodies and
//! secrets are never logged.
//!
//! ## Thread Safety
//!
//! Every public type is `Send + Sync`. A [`RequestRunner`] holds no mutable
//! state, so one runner can serve any number of concurrent requests.

pub mod auth;
pub mod client;
pub mod clients;
pub mod config;
pub mod error;

pub use auth::{
    authorize, sign_payload, verify_signed_payload, AuthQuery, SignedPayload, SignedPayloadError,
};
pub use client::BigCommerce;
pub use clients::{HttpMethod, RequestConfig, RequestError, RequestOutcome, RequestRunner};
pub use config::{
    AccessToken, ApiVersion, BigCommerceConfig, BigCommerceConfigBuilder, ClientId, ClientSecret,
    ResponseType, StoreHash,
};
pub use error::{BigCommerceError, ConfigError};
