//! HMAC-SHA256 primitives for signed payload verification.
//!
//! # Security
//!
//! Signature comparison goes through [`constant_time_compare`], which never
//! short-circuits on the first differing byte. Unequal lengths are rejected
//! before the comparator runs; the length of a hex digest is public anyway.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::auth::hmac::{compute_signature, constant_time_compare};
//!
//! let signature = compute_signature(br#"{"foo":"foo"}"#, "123456abcdef");
//! assert_eq!(signature.len(), 64);
//! assert!(constant_time_compare(&signature, &signature.clone()));
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes `HMAC-SHA256(secret, message)` as a lowercase hex string.
///
/// # Note
///
/// HMAC-SHA256 accepts keys of any length, so key setup cannot fail.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(message: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Compares two strings without leaking where they differ.
///
/// Returns `false` immediately when the lengths differ; equal-length inputs are
/// compared in constant time.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    if a_bytes.len() != b_bytes.len() {
        return false;
    }

    a_bytes.ct_eq(b_bytes).into()
}
