use std::fmt;

use reqwest::Url;

use crate::error::ApiError;

/// Validated server base address, e.g. `http://192.168.0.10:5000`.
///
/// Stored without a trailing slash; request paths are appended with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    /// Android emulator alias for the host machine's loopback.
    pub const DEFAULT: &'static str = "http://10.0.2.2:5000";

    /// Parse user input: `host:port`, `host`, or a full `http(s)://` URL
    /// (optionally with a path prefix).
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let invalid = |reason: &str| ApiError::InvalidEndpoint {
            input: raw.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid("address is empty"));
        }

        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };

        let url = Url::parse(&with_scheme).map_err(|e| invalid(&e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid("only http and https are supported"));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("query strings and fragments are not allowed"));
        }

        Ok(Self {
            base: url.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Absolute URL for a path below the base, e.g. `app/chapas/12345`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            base: Self::DEFAULT.to_string(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_port_gets_http_scheme() {
        let ep = Endpoint::parse("192.168.0.10:5000").unwrap();
        assert_eq!(ep.as_str(), "http://192.168.0.10:5000");
    }

    #[test]
    fn trailing_slashes_and_whitespace_are_dropped() {
        let ep = Endpoint::parse("  http://server.local:8080/ \n").unwrap();
        assert_eq!(ep.as_str(), "http://server.local:8080");
        assert_eq!(ep.url("app/health"), "http://server.local:8080/app/health");
    }

    #[test]
    fn path_prefix_is_preserved() {
        let ep = Endpoint::parse("https://yard.example.com/qualicam/").unwrap();
        assert_eq!(
            ep.url("/app/chapas/12345"),
            "https://yard.example.com/qualicam/app/chapas/12345"
        );
    }

    #[test]
    fn default_is_emulator_loopback() {
        let ep = Endpoint::default();
        assert_eq!(ep.as_str(), "http://10.0.2.2:5000");
        assert_eq!(Endpoint::parse(Endpoint::DEFAULT).unwrap(), ep);
    }

    #[test]
    fn rejects_bad_input() {
        for bad in ["", "   ", "ftp://host", "http://", "http://host:5000/?x=1", "http://host/#frag", "http://host:notaport"] {
            assert!(
                matches!(Endpoint::parse(bad), Err(ApiError::InvalidEndpoint { .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
