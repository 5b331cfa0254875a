//! Client request descriptor.
//!
//! # Responsibilities
//! - Carry the protocol version the client spoke
//! - Expose the client's headers read-only to the response passes
//!
//! # Design Decisions
//! - Version is optional; an unknown version never matches "1.0"
//! - For HTTP/2 and later the URI authority stands in for a missing Host header

use std::fmt;
use std::str::FromStr;

use axum::http::{header, Request, Version};

use crate::http::headers::Headers;

/// HTTP protocol version tokens a client may speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVersion {
    Http09,
    Http10,
    Http11,
    Http2,
    Http3,
}

impl HttpVersion {
    /// The version token as it appears after `HTTP/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVersion::Http09 => "0.9",
            HttpVersion::Http10 => "1.0",
            HttpVersion::Http11 => "1.1",
            HttpVersion::Http2 => "2.0",
            HttpVersion::Http3 => "3.0",
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a version token is not one of the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown HTTP version token: {0:?}")]
pub struct UnknownVersion(pub String);

impl FromStr for HttpVersion {
    type Err = UnknownVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0.9" => Ok(HttpVersion::Http09),
            "1.0" => Ok(HttpVersion::Http10),
            "1.1" => Ok(HttpVersion::Http11),
            "2" | "2.0" => Ok(HttpVersion::Http2),
            "3" | "3.0" => Ok(HttpVersion::Http3),
            other => Err(UnknownVersion(other.to_string())),
        }
    }
}

impl TryFrom<Version> for HttpVersion {
    type Error = UnknownVersion;

    fn try_from(v: Version) -> Result<Self, Self::Error> {
        match v {
            Version::HTTP_09 => Ok(HttpVersion::Http09),
            Version::HTTP_10 => Ok(HttpVersion::Http10),
            Version::HTTP_11 => Ok(HttpVersion::Http11),
            Version::HTTP_2 => Ok(HttpVersion::Http2),
            Version::HTTP_3 => Ok(HttpVersion::Http3),
            other => Err(UnknownVersion(format!("{:?}", other))),
        }
    }
}

/// Read-only view of the inbound client request.
#[derive(Debug, Clone, Default)]
pub struct RequestDescriptor {
    pub http_version: Option<HttpVersion>,
    pub headers: Headers,
}

impl RequestDescriptor {
    pub fn new(http_version: Option<HttpVersion>, headers: Headers) -> Self {
        Self {
            http_version,
            headers,
        }
    }

    /// True only when the client spoke exactly HTTP/1.0.
    pub fn is_http10(&self) -> bool {
        self.http_version == Some(HttpVersion::Http10)
    }

    /// Single-string value of a request header.
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers.get_str(name)
    }

    /// Capture the version and headers of an `http` request.
    pub fn from_request<B>(req: &Request<B>) -> Self {
        let http_version = match HttpVersion::try_from(req.version()) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::debug!(error = %e, "Client version not recognised");
                None
            }
        };

        let mut headers = Headers::from_header_map(req.headers());
        if !headers.contains(header::HOST.as_str()) {
            if let Some(authority) = req.uri().authority() {
                headers.set(header::HOST.as_str(), authority.as_str());
            }
        }

        Self {
            http_version,
            headers,
        }
    }
}
