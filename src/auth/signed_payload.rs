//! Verification of payloads signed by the platform.
//!
//! The install/load callbacks and customer-login assertions arrive as a single
//! string `<base64 JSON>.<base64 hex HMAC>`. The HMAC is
//! `HMAC-SHA256(client_secret, json_bytes)` rendered as lowercase hex.
//! Nothing in the payload can be trusted until [`verify_signed_payload`] succeeds.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::auth::{sign_payload, verify_signed_payload};
//! use serde_json::json;
//!
//! let signed = sign_payload(&json!({"store_hash": "x62tqn"}), "client-secret");
//! let payload = verify_signed_payload(&signed, "client-secret").unwrap();
//! assert_eq!(payload["store_hash"], "x62tqn");
//! ```

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::errors::SignedPayloadError;
use crate::auth::hmac::{compute_signature, constant_time_compare};

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

/// Standard alphabet, padding optional.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// URL-safe alphabet, padding optional.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// A signed request split into its decoded halves, not yet verified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedPayload {
    payload: String,
    signature: String,
}

impl SignedPayload {
    /// Splits `signed_request` on its first `.` and base64-decodes both halves.
    ///
    /// Everything after the first `.` belongs to the signature segment.
    ///
    /// # Errors
    ///
    /// - [`SignedPayloadError::MalformedInput`] if the input is empty or has no `.`
    /// - [`SignedPayloadError::Parse`] if a segment is not base64 or the payload is not UTF-8
    pub fn decode(signed_request: &str) -> Result<Self, SignedPayloadError> {
        if signed_request.is_empty() {
            return Err(SignedPayloadError::MalformedInput {
                reason: "The signed request is required to verify the call.".to_string(),
            });
        }

        let (payload_segment, signature_segment) =
            signed_request
                .split_once('.')
                .ok_or_else(|| SignedPayloadError::MalformedInput {
                    reason: "The signed request will come in two parts separated by a .(full stop). \
                             This signed request contains less than 2 parts."
                        .to_string(),
                })?;

        let payload = String::from_utf8(decode_segment(payload_segment)?).map_err(|e| {
            SignedPayloadError::Parse {
                message: e.to_string(),
            }
        })?;
        let signature = String::from_utf8_lossy(&decode_segment(signature_segment)?).into_owned();

        tracing::debug!(
            "Decoded signed payload: {} byte JSON, {} byte signature",
            payload.len(),
            signature.len()
        );

        Ok(Self { payload, signature })
    }

    /// Returns the decoded JSON text of the payload.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Returns the decoded hex signature.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Checks the signature against `secret` and parses the payload.
    ///
    /// The payload is parsed only after the signature matches, so an unsigned
    /// payload that is also not JSON fails with
    /// [`SignedPayloadError::InvalidSignature`] rather than
    /// [`SignedPayloadError::Parse`]. Parse errors are reported only for
    /// correctly signed payloads.
    ///
    /// # Errors
    ///
    /// - [`SignedPayloadError::InvalidSignature`] if the signature does not match
    /// - [`SignedPayloadError::Parse`] if the authenticated payload is not JSON
    pub fn verify(&self, secret: &str) -> Result<Value, SignedPayloadError> {
        let expected = compute_signature(self.payload.as_bytes(), secret);

        if !constant_time_compare(&expected, &self.signature) {
            tracing::warn!("Signed payload rejected: signature is invalid");
            return Err(SignedPayloadError::InvalidSignature);
        }

        tracing::debug!("Signature is valid");

        serde_json::from_str(&self.payload).map_err(|e| SignedPayloadError::Parse {
            message: e.to_string(),
        })
    }
}

/// Verifies a signed request and returns its JSON payload unchanged.
///
/// # Errors
///
/// - [`SignedPayloadError::MalformedInput`] if `signed_request` is empty or has no `.`
/// - [`SignedPayloadError::Parse`] if a segment cannot be decoded or the payload is not JSON
/// - [`SignedPayloadError::InvalidSignature`] if the HMAC does not match
pub fn verify_signed_payload(signed_request: &str, secret: &str) -> Result<Value, SignedPayloadError> {
    SignedPayload::decode(signed_request)?.verify(secret)
}

/// Verifies a signed request and deserializes its payload into `T`.
///
/// # Errors
///
/// Same as [`verify_signed_payload`], plus [`SignedPayloadError::Parse`] if
/// the payload does not match the shape of `T`.
pub fn verify_signed_payload_as<T: DeserializeOwned>(
    signed_request: &str,
    secret: &str,
) -> Result<T, SignedPayloadError> {
    let value = verify_signed_payload(signed_request, secret)?;
    serde_json::from_value(value).map_err(|e| SignedPayloadError::Parse {
        message: e.to_string(),
    })
}

/// Produces a signed request for `payload`, the inverse of [`verify_signed_payload`].
#[must_use]
pub fn sign_payload(payload: &Value, secret: &str) -> String {
    let json = payload.to_string();
    let signature = compute_signature(json.as_bytes(), secret);
    format!("{}.{}", STANDARD.encode(json), STANDARD.encode(signature))
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, SignedPayloadError> {
    STANDARD_LENIENT
        .decode(segment)
        .or_else(|_| URL_SAFE_LENIENT.decode(segment))
        .map_err(|e| SignedPayloadError::Parse {
            message: e.to_string(),
        })
}
