//! Response-side types and the pure steps of response processing:
//! rate-limit signal parsing, body decompression and result classification.

use std::io::Read;
use std::time::Duration;

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::clients::errors::RequestError;

/// Response header carrying the rate-limit window in seconds.
pub const RETRY_AFTER_HEADER: &str = "x-retry-after";

/// Wait used when a 429 carries no usable retry-after value.
pub const DEFAULT_RETRY_AFTER_SECS: f64 = 1.0;

/// The successful result of one logical request.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::clients::RequestOutcome;
/// use serde_json::json;
///
/// let outcome = RequestOutcome::Json(json!({"order": true}));
/// assert_eq!(outcome.as_json().unwrap()["order"], true);
///
/// let outcome = RequestOutcome::Text("<xml></xml>".to_string());
/// assert_eq!(outcome.as_text(), Some("<xml></xml>"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A parsed JSON body.
    Json(Value),
    /// A non-JSON or empty body, returned unchanged.
    Text(String),
}

impl RequestOutcome {
    /// Returns the JSON value, if the body was JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Returns the raw text, if the body was not JSON.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }

    /// Consumes the outcome, returning the JSON value if there is one.
    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Consumes the outcome, returning the raw text if there is one.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }
}

/// A 429 response and the wait it advertises.
///
/// Exists only for the duration of one retry decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateLimitSignal {
    /// Seconds to wait, as advertised by the server. Never negative.
    pub retry_after: f64,
}

impl RateLimitSignal {
    /// Reads the signal from the `X-Retry-After` response header.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::from_header_value(
            headers
                .get(RETRY_AFTER_HEADER)
                .and_then(|value| value.to_str().ok()),
        )
    }

    /// Parses a header value such as `"0.1"` or `"15"`.
    ///
    /// Missing or non-numeric values fall back to [`DEFAULT_RETRY_AFTER_SECS`];
    /// negative values clamp to zero.
    #[must_use]
    pub fn from_header_value(value: Option<&str>) -> Self {
        let retry_after = value
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite())
            .map_or(DEFAULT_RETRY_AFTER_SECS, |secs| secs.max(0.0));
        Self { retry_after }
    }

    /// Returns the wait as a [`Duration`] (`0.1` becomes 100ms).
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.retry_after).unwrap_or(Duration::MAX)
    }
}

/// Encodings the runner asks for and knows how to undo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentEncoding {
    /// No transformation.
    Identity,
    /// `Content-Encoding: gzip`.
    Gzip,
    /// `Content-Encoding: deflate`.
    Deflate,
}

impl ContentEncoding {
    /// Reads the encoding from the `Content-Encoding` header.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::from_header_value(
            headers
                .get(reqwest::header::CONTENT_ENCODING)
                .and_then(|value| value.to_str().ok()),
        )
    }

    /// Maps a header value to an encoding; anything unrecognized is passed through.
    #[must_use]
    pub fn from_header_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("gzip") => Self::Gzip,
            Some("deflate") => Self::Deflate,
            _ => Self::Identity,
        }
    }

    /// Decodes a fully buffered body.
    ///
    /// `deflate` is read as zlib-wrapped data first and as raw DEFLATE if the
    /// zlib header is missing.
    ///
    /// # Errors
    ///
    /// Returns the decoder's I/O error when the bytes are not valid for the encoding.
    pub fn decode(self, body: &[u8]) -> std::io::Result<Vec<u8>> {
        match self {
            Self::Identity => Ok(body.to_vec()),
            Self::Gzip => {
                let mut decoded = Vec::with_capacity(body.len().saturating_mul(2));
                GzDecoder::new(body).read_to_end(&mut decoded)?;
                Ok(decoded)
            }
            Self::Deflate => {
                let mut decoded = Vec::with_capacity(body.len().saturating_mul(2));
                if ZlibDecoder::new(body).read_to_end(&mut decoded).is_err() {
                    decoded.clear();
                    DeflateDecoder::new(body).read_to_end(&mut decoded)?;
                }
                Ok(decoded)
            }
        }
    }
}

/// Returns `true` if `status` is treated as a failure.
#[must_use]
pub fn is_error_status(status: u16) -> bool {
    (400..600).contains(&status)
}

/// Turns a completed exchange into an outcome or a typed error.
///
/// `body` is the decompressed body text. The order of checks is: error
/// status, non-JSON or blank body, JSON parse, self-reported `error`/`errors`.
///
/// # Errors
///
/// - [`RequestError::HttpStatus`] for status codes in `[400, 600)`
/// - [`RequestError::Parse`] for a JSON content type with an unparsable body
/// - [`RequestError::Upstream`] for a JSON body carrying `error` or `errors`
pub fn classify_response(
    status: u16,
    content_type: Option<&str>,
    body: String,
) -> Result<RequestOutcome, RequestError> {
    if is_error_status(status) {
        return Err(RequestError::HttpStatus {
            code: status,
            message: format!("Request returned error code: {status} and body: {body}"),
            response_body: body,
        });
    }

    let is_json = content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));
    if !is_json || body.trim().is_empty() {
        return Ok(RequestOutcome::Text(body));
    }

    let json: Value = match serde_json::from_str(&body) {
        Ok(json) => json,
        Err(e) => {
            return Err(RequestError::Parse {
                message: e.to_string(),
                response_body: body,
            })
        }
    };

    if let Some(message) = upstream_error_message(&json) {
        return Err(RequestError::Upstream { message });
    }

    Ok(RequestOutcome::Json(json))
}

/// Extracts the failure a 2xx JSON body reports about itself, if any.
///
/// `error` wins over `errors`. A string `error` is used as-is; any other
/// value is serialized to JSON text.
fn upstream_error_message(json: &Value) -> Option<String> {
    let object = json.as_object()?;

    if let Some(error) = object.get("error").filter(|v| is_reported(v)) {
        return Some(
            error
                .as_str()
                .map_or_else(|| error.to_string(), ToString::to_string),
        );
    }

    object
        .get("errors")
        .filter(|v| is_reported(v))
        .map(ToString::to_string)
}

/// `null`, `false`, `0` and `""` mark the absence of an error.
fn is_reported(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::{GzEncoder, ZlibEncoder};
    use flate2::Compression;
    use serde_json::json;
    use std::io::Write;

    const JSON: Option<&str> = Some("application/json; charset=utf-8");

    #[test]
    fn test_retry_after_parses_fractional_seconds() {
        let signal = RateLimitSignal::from_header_value(Some("0.1"));
        assert!((signal.retry_after - 0.1).abs() < f64::EPSILON);
        assert_eq!(signal.delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_retry_after_defaults_when_missing_or_garbage() {
        assert!(
            (RateLimitSignal::from_header_value(None).retry_after - DEFAULT_RETRY_AFTER_SECS).abs()
                < f64::EPSILON
        );
        assert!(
            (RateLimitSignal::from_header_value(Some("soon")).retry_after
                - DEFAULT_RETRY_AFTER_SECS)
                .abs()
                < f64::EPSILON
        );
        assert!(
            (RateLimitSignal::from_header_value(Some("NaN")).retry_after
                - DEFAULT_RETRY_AFTER_SECS)
                .abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn test_retry_after_clamps_negative_values() {
        let signal = RateLimitSignal::from_header_value(Some("-3"));
        assert_eq!(signal.delay(), Duration::ZERO);
    }

    #[test]
    fn test_retry_after_read_from_header_map() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Retry-After", "2.5".parse().unwrap());
        let signal = RateLimitSignal::from_headers(&headers);
        assert_eq!(signal.delay(), Duration::from_millis(2500));
    }

    #[test]
    fn test_content_encoding_detection() {
        assert_eq!(
            ContentEncoding::from_header_value(Some("gzip")),
            ContentEncoding::Gzip
        );
        assert_eq!(
            ContentEncoding::from_header_value(Some(" Deflate ")),
            ContentEncoding::Deflate
        );
        assert_eq!(
            ContentEncoding::from_header_value(Some("br")),
            ContentEncoding::Identity
        );
        assert_eq!(
            ContentEncoding::from_header_value(None),
            ContentEncoding::Identity
        );
    }

    #[test]
    fn test_identity_decode_returns_body_unchanged() {
        let decoded = ContentEncoding::Identity.decode(b"{\"id\":1}").unwrap();
        assert_eq!(decoded, b"{\"id\":1}");
        assert!(ContentEncoding::Identity.decode(b"").unwrap().is_empty());
    }

    #[test]
    fn test_gzip_decode() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(br#"{"order":true}"#).unwrap();
        let zipped = encoder.finish().unwrap();

        let decoded = ContentEncoding::Gzip.decode(&zipped).unwrap();
        assert_eq!(decoded, br#"{"order":true}"#);
    }

    #[test]
    fn test_deflate_decode_zlib_wrapped() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"hello deflate").unwrap();
        let compressed = encoder.finish().unwrap();

        let decoded = ContentEncoding::Deflate.decode(&compressed).unwrap();
        assert_eq!(decoded, b"hello deflate");
    }

    #[test]
    fn test_deflate_decode_raw_stream() {
        let mut encoder = flate2::write::DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"raw deflate body").unwrap();
        let compressed = encoder.finish().unwrap();

        let decoded = ContentEncoding::Deflate.decode(&compressed).unwrap();
        assert_eq!(decoded, b"raw deflate body");
    }

    #[test]
    fn test_gzip_decode_rejects_garbage() {
        assert!(ContentEncoding::Gzip.decode(b"definitely not gzip").is_err());
    }

    #[test]
    fn test_error_status_range() {
        assert!(!is_error_status(200));
        assert!(!is_error_status(399));
        assert!(is_error_status(400));
        assert!(is_error_status(599));
        assert!(!is_error_status(600));
    }

    #[test]
    fn test_classify_error_status_keeps_body() {
        let result = classify_response(400, JSON, r#"{"title":"bad"}"#.to_string());
        match result {
            Err(RequestError::HttpStatus {
                code,
                message,
                response_body,
            }) => {
                assert_eq!(code, 400);
                assert!(message.contains("Request returned error code: 400"));
                assert!(message.contains(r#"{"title":"bad"}"#));
                assert_eq!(response_body, r#"{"title":"bad"}"#);
            }
            other => panic!("Expected HttpStatus, got: {other:?}"),
        }
    }

    #[test]
    fn test_classify_non_json_returns_raw_text() {
        let result = classify_response(200, Some("application/xml"), "<xml></xml>".to_string());
        assert_eq!(
            result.unwrap(),
            RequestOutcome::Text("<xml></xml>".to_string())
        );
    }

    #[test]
    fn test_classify_missing_content_type_returns_raw_text() {
        let result = classify_response(200, None, r#"{"order":true}"#.to_string());
        assert_eq!(
            result.unwrap(),
            RequestOutcome::Text(r#"{"order":true}"#.to_string())
        );
    }

    #[test]
    fn test_classify_blank_json_body_returns_raw_text() {
        let result = classify_response(204, JSON, "  \n".to_string());
        assert_eq!(result.unwrap(), RequestOutcome::Text("  \n".to_string()));
    }

    #[test]
    fn test_classify_parses_json() {
        let result = classify_response(200, JSON, r#"{"order":true}"#.to_string());
        assert_eq!(result.unwrap(), RequestOutcome::Json(json!({"order": true})));
    }

    #[test]
    fn test_classify_malformed_json_is_parse_error() {
        let result = classify_response(200, JSON, "<malformed>".to_string());
        match result {
            Err(RequestError::Parse { response_body, .. }) => {
                assert_eq!(response_body, "<malformed>");
            }
            other => panic!("Expected Parse, got: {other:?}"),
        }
    }

    #[test]
    fn test_classify_error_key_uses_string() {
        let result = classify_response(200, JSON, r#"{"error":"boom"}"#.to_string());
        match result {
            Err(RequestError::Upstream { message }) => assert_eq!(message, "boom"),
            other => panic!("Expected Upstream, got: {other:?}"),
        }
    }

    #[test]
    fn test_classify_errors_key_is_serialized() {
        let result = classify_response(200, JSON, r#"{"errors":["a","b"]}"#.to_string());
        match result {
            Err(RequestError::Upstream { message }) => assert_eq!(message, r#"["a","b"]"#),
            other => panic!("Expected Upstream, got: {other:?}"),
        }
    }

    #[test]
    fn test_classify_error_wins_over_errors() {
        let result = classify_response(
            200,
            JSON,
            r#"{"error":"first","errors":["second"]}"#.to_string(),
        );
        assert!(matches!(
            result,
            Err(RequestError::Upstream { message }) if message == "first"
        ));
    }

    #[test]
    fn test_classify_ignores_empty_error_markers() {
        let result = classify_response(
            200,
            JSON,
            r#"{"error":null,"errors":false,"id":7}"#.to_string(),
        );
        assert_eq!(
            result.unwrap(),
            RequestOutcome::Json(json!({"error": null, "errors": false, "id": 7}))
        );
    }

    #[test]
    fn test_classify_zero_error_marker_is_not_reported() {
        let result = classify_response(200, JSON, r#"{"error":0,"errors":0.0}"#.to_string());
        assert_eq!(
            result.unwrap(),
            RequestOutcome::Json(json!({"error": 0, "errors": 0.0}))
        );

        let result = classify_response(200, JSON, r#"{"error":0,"errors":-3}"#.to_string());
        assert!(matches!(
            result,
            Err(RequestError::Upstream { message }) if message == "-3"
        ));
    }

    #[test]
    fn test_classify_json_array_is_not_an_upstream_error() {
        let result = classify_response(200, JSON, r#"[{"error":"nested"}]"#.to_string());
        assert!(matches!(result, Ok(RequestOutcome::Json(Value::Array(_)))));
    }

    #[test]
    fn test_outcome_accessors() {
        let json = RequestOutcome::Json(json!({"id": 1}));
        assert!(json.as_text().is_none());
        assert_eq!(json.clone().into_json(), Some(json!({"id": 1})));
        assert!(json.into_text().is_none());

        let text = RequestOutcome::Text("ok".to_string());
        assert!(text.as_json().is_none());
        assert_eq!(text.into_text(), Some("ok".to_string()));
    }
}
