//! BigCommerce API version and response format definitions.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// BigCommerce API version.
///
/// The version is a path segment (`/stores/<hash>/v2/...`). Version 2 is the
/// default and is the only one that supports the XML response format.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::ApiVersion;
///
/// let version: ApiVersion = "v3".parse().unwrap();
/// assert_eq!(version, ApiVersion::V3);
/// assert_eq!(ApiVersion::default().to_string(), "v2");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// The legacy v2 REST API.
    #[default]
    V2,
    /// The v3 REST API.
    V3,
}

impl ApiVersion {
    /// Returns the path segment for this version.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V2 => "v2",
            Self::V3 => "v3",
        }
    }

    /// Returns `true` if paths for this version take a format extension
    /// such as `.xml`.
    #[must_use]
    pub const fn uses_format_extension(&self) -> bool {
        !matches!(self, Self::V3)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v2" => Ok(Self::V2),
            "v3" => Ok(Self::V3),
            _ => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
        }
    }
}

/// The body format requested from the API.
///
/// Determines the `Accept` header and, for v2 paths, the `.xml` extension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResponseType {
    /// JSON bodies (`application/json`).
    #[default]
    Json,
    /// XML bodies (`application/xml`), returned to the caller as raw text.
    Xml,
}

impl ResponseType {
    /// Returns the MIME type used for the `Accept` header.
    #[must_use]
    pub const fn as_accept(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
        }
    }

    /// Returns the path extension for v2 requests.
    #[must_use]
    pub const fn path_extension(&self) -> &'static str {
        match self {
            Self::Json => "",
            Self::Xml => ".xml",
        }
    }
}

impl FromStr for ResponseType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            _ => Err(ConfigError::InvalidResponseType {
                response_type: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parses_case_insensitively() {
        assert_eq!("v2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
        assert_eq!("V3".parse::<ApiVersion>().unwrap(), ApiVersion::V3);
    }

    #[test]
    fn test_version_rejects_unknown() {
        assert!(matches!(
            "v4".parse::<ApiVersion>(),
            Err(ConfigError::InvalidApiVersion { version }) if version == "v4"
        ));
    }

    #[test]
    fn test_default_version_is_v2() {
        assert_eq!(ApiVersion::default(), ApiVersion::V2);
    }

    #[test]
    fn test_only_v3_skips_format_extension() {
        assert!(ApiVersion::V2.uses_format_extension());
        assert!(!ApiVersion::V3.uses_format_extension());
    }

    #[test]
    fn test_response_type_headers_and_extensions() {
        assert_eq!(ResponseType::Json.as_accept(), "application/json");
        assert_eq!(ResponseType::Xml.as_accept(), "application/xml");
        assert_eq!(ResponseType::Json.path_extension(), "");
        assert_eq!(ResponseType::Xml.path_extension(), ".xml");
    }

    #[test]
    fn test_response_type_parsing() {
        assert_eq!("xml".parse::<ResponseType>().unwrap(), ResponseType::Xml);
        assert!("yaml".parse::<ResponseType>().is_err());
    }
}
