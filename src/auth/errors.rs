//! Errors raised while verifying signed payloads.

use thiserror::Error;

/// Errors that can occur while verifying a signed payload.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::auth::{verify_signed_payload, SignedPayloadError};
///
/// let result = verify_signed_payload("12345", "secret");
/// assert!(matches!(result, Err(SignedPayloadError::MalformedInput { .. })));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignedPayloadError {
    /// The signed request is absent or does not have two `.`-separated parts.
    #[error("{reason}")]
    MalformedInput {
        /// What is wrong with the input.
        reason: String,
    },

    /// The signature does not match the HMAC of the payload.
    #[error("Signature is invalid")]
    InvalidSignature,

    /// A segment is not valid base64, or the payload is not UTF-8 JSON.
    #[error("Failed to decode signed payload: {message}")]
    Parse {
        /// The underlying decoder or parser message.
        message: String,
    },
}
