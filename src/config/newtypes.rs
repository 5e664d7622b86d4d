//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated BigCommerce app client ID.
///
/// Sent as the `X-Auth-Client` header and as `client_id` during the
/// authorization-code exchange.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::ClientId;
///
/// let id = ClientId::new("hjasdfhj09sasd80dsf04dfhg90rsds").unwrap();
/// assert_eq!(id.as_ref(), "hjasdfhj09sasd80dsf04dfhg90rsds");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the ID is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated BigCommerce client secret.
///
/// The secret keys the HMAC over signed payloads and is posted during the
/// authorization-code exchange. Its `Debug` output is masked so it cannot
/// leak into logs.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::ClientSecret;
///
/// let secret = ClientSecret::new("odpdf83m40fmxcv0345cvfgh73bdwjc").unwrap();
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Creates a new validated client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyClientSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

/// A validated store access token, sent as the `X-Auth-Token` header.
///
/// Like [`ClientSecret`], the `Debug` output is masked.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// The hash identifying a store, used as the `/stores/<hash>` path segment.
///
/// The value is inserted into request paths verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreHash(String);

impl StoreHash {
    /// Creates a new validated store hash.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyStoreHash`] if the hash is empty or whitespace.
    pub fn new(hash: impl Into<String>) -> Result<Self, ConfigError> {
        let hash = hash.into();
        let hash = hash.trim();
        if hash.is_empty() {
            return Err(ConfigError::EmptyStoreHash);
        }
        Ok(Self(hash.to_string()))
    }
}

impl AsRef<str> for StoreHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_rejects_empty_string() {
        assert!(matches!(ClientId::new(""), Err(ConfigError::EmptyClientId)));
    }

    #[test]
    fn test_client_secret_rejects_empty_string() {
        assert!(matches!(
            ClientSecret::new(""),
            Err(ConfigError::EmptyClientSecret)
        ));
    }

    #[test]
    fn test_client_secret_masks_value_in_debug() {
        let secret = ClientSecret::new("super-secret-key").unwrap();
        let debug_output = format!("{:?}", secret);
        assert_eq!(debug_output, "ClientSecret(*****)");
        assert!(!debug_output.contains("super-secret-key"));
    }

    #[test]
    fn test_access_token_masks_value_in_debug() {
        let token = AccessToken::new("ly8cl3wwcyj12vpechm34fd20oqpnl").unwrap();
        let debug_output = format!("{:?}", token);
        assert_eq!(debug_output, "AccessToken(*****)");
        assert_eq!(token.as_ref(), "ly8cl3wwcyj12vpechm34fd20oqpnl");
    }

    #[test]
    fn test_store_hash_trims_and_rejects_blank() {
        assert_eq!(StoreHash::new(" x62tqn ").unwrap().as_ref(), "x62tqn");
        assert!(matches!(
            StoreHash::new("   "),
            Err(ConfigError::EmptyStoreHash)
        ));
    }

    #[test]
    fn test_store_hash_is_kept_verbatim() {
        let hash = StoreHash::new("abcd/1").unwrap();
        assert_eq!(hash.to_string(), "abcd/1");
    }
}
