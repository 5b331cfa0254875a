//! Upstream response descriptor and the outgoing response writer.
//!
//! # Responsibilities
//! - Hold the status and headers received from the backend
//! - Define the writer capability the passes use to talk to the client
//! - Buffer writes and turn them into an `http::Response`
//!
//! # Design Decisions
//! - The writer has two states: headers open, then committed
//! - Header writes after commit are rejected, never silently applied
//! - `set-cookie` sequences become one header line per element

use axum::body::Body;
use axum::http::response::Parts;
use axum::http::{HeaderName, HeaderValue, Response, StatusCode};
use thiserror::Error;

use crate::http::headers::{encode_field, FieldValue, Headers};

/// Errors raised by an outgoing response writer.
#[derive(Debug, Error)]
pub enum OutgoingError {
    /// A header was written after the status line was committed.
    #[error("header {0:?} written after the status line was committed")]
    HeadersClosed(String),

    /// The status line was committed twice.
    #[error("status line already committed with {0}")]
    AlreadyCommitted(u16),

    /// The response was converted before the status line was committed.
    #[error("status line was never committed")]
    NotCommitted,

    /// Status code outside the valid range.
    #[error("invalid status code: {0}")]
    InvalidStatus(u16),

    /// Header name not valid on the wire.
    #[error("invalid header name: {0:?}")]
    InvalidHeaderName(String),

    /// Header value not valid on the wire.
    #[error("invalid value for header {0:?}")]
    InvalidHeaderValue(String),
}

/// Mutable view of the response received from the upstream target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status_code: u16,
    pub headers: Headers,
}

impl UpstreamResponse {
    pub fn new(status_code: u16, headers: Headers) -> Self {
        Self {
            status_code,
            headers,
        }
    }

    /// Capture status and headers from the head of an `http` response.
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            status_code: parts.status.as_u16(),
            headers: Headers::from_header_map(&parts.headers),
        }
    }
}

/// The response channel back to the client.
pub trait OutgoingResponse {
    /// Set a header, overwriting any prior value for that name.
    fn set_header(&mut self, name: &str, value: &FieldValue) -> Result<(), OutgoingError>;

    /// Commit the status line. Closes the header-writing window.
    fn write_head(&mut self, status_code: u16) -> Result<(), OutgoingError>;

    /// True once the status line has been committed.
    fn headers_sent(&self) -> bool;
}

/// In-memory writer that records headers and status for later conversion.
#[derive(Debug, Clone, Default)]
pub struct BufferedResponse {
    headers: Headers,
    status: Option<u16>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Committed status code, if any.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Convert into an `http` response around the given body.
    pub fn into_response(self, body: Body) -> Result<Response<Body>, OutgoingError> {
        let code = self.status.ok_or(OutgoingError::NotCommitted)?;
        let status = StatusCode::from_u16(code).map_err(|_| OutgoingError::InvalidStatus(code))?;

        let mut response = Response::new(body);
        *response.status_mut() = status;

        let map = response.headers_mut();
        for (name, value) in self.headers.iter() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| OutgoingError::InvalidHeaderName(name.to_string()))?;
            for v in value.iter() {
                let header_value = HeaderValue::from_bytes(&encode_field(v))
                    .map_err(|_| OutgoingError::InvalidHeaderValue(name.to_string()))?;
                map.append(header_name.clone(), header_value);
            }
        }

        Ok(response)
    }
}

impl OutgoingResponse for BufferedResponse {
    fn set_header(&mut self, name: &str, value: &FieldValue) -> Result<(), OutgoingError> {
        if self.status.is_some() {
            return Err(OutgoingError::HeadersClosed(name.to_string()));
        }
        self.headers.set(name, value.clone());
        Ok(())
    }

    fn write_head(&mut self, status_code: u16) -> Result<(), OutgoingError> {
        if let Some(prev) = self.status {
            return Err(OutgoingError::AlreadyCommitted(prev));
        }
        self.status = Some(status_code);
        Ok(())
    }

    fn headers_sent(&self) -> bool {
        self.status.is_some()
    }
}
