//! Authentication for BigCommerce apps.
//!
//! # Overview
//!
//! - [`verify_signed_payload`]: Checks a `<payload>.<signature>` string from the
//!   load, uninstall or remove-user callbacks and returns its JSON payload
//! - [`SignedPayload`]: The decoded halves of a signed request
//! - [`authorize`]: Exchanges an OAuth authorization code for an access token
//! - [`hmac`]: The HMAC-SHA256 and constant-time comparison primitives
//!
//! # Signed Payloads
//!
//! The signature is the lowercase hex HMAC-SHA256 of the decoded payload JSON,
//! keyed with the app's client secret. Verification compares signatures in
//! constant time and only parses the payload once the signature matches.
//!
//! ```rust
//! use bigcommerce_api::auth::{verify_signed_payload, SignedPayloadError};
//!
//! let signed = "eyJmb28iOiJmb28ifQ==.YjMzMTQ2ZGU4ZTUzNWJiOTI3NTI1ODJmNzhiZGM5NzBjNGQ3MjZkZDdkMDY1MjdkZGYxZDA0NGZjNDVjYmNkMA==";
//!
//! let payload = verify_signed_payload(signed, "123456abcdef").unwrap();
//! assert_eq!(payload["foo"], "foo");
//!
//! let tampered = verify_signed_payload(signed, "another-secret");
//! assert_eq!(tampered, Err(SignedPayloadError::InvalidSignature));
//! ```

mod authorize;
mod errors;
pub mod hmac;
mod signed_payload;

pub use authorize::{authorize, AuthQuery, TOKEN_PATH};
pub use errors::SignedPayloadError;
pub use signed_payload::{
    sign_payload, verify_signed_payload, verify_signed_payload_as, SignedPayload,
};
