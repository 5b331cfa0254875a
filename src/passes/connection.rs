//! Connection header normalization.
//!
//! HTTP/1.0 connections close unless the client asked otherwise. Later
//! versions persist by default, and an explicit upstream `connection`
//! header is relayed untouched.

use crate::http::request::RequestDescriptor;
use crate::http::response::{OutgoingResponse, UpstreamResponse};
use crate::passes::Pass;

const CONNECTION: &str = "connection";

/// Picks the `connection` header value presented to the client.
pub fn set_connection(
    req: &RequestDescriptor,
    upstream: &mut UpstreamResponse,
    _outgoing: &mut dyn OutgoingResponse,
) {
    // Empty values count as absent
    let client = req.header(CONNECTION).filter(|v| !v.is_empty());
    let upstream_has_connection = upstream
        .headers
        .get_str(CONNECTION)
        .is_some_and(|v| !v.is_empty());

    if req.is_http10() {
        let value = client.unwrap_or_else(|| "close".to_string());
        tracing::debug!(connection = %value, "Set connection for HTTP/1.0 client");
        upstream.headers.set(CONNECTION, value);
    } else if !upstream_has_connection {
        let value = client.unwrap_or_else(|| "keep-alive".to_string());
        tracing::debug!(connection = %value, "Defaulted missing upstream connection header");
        upstream.headers.set(CONNECTION, value);
    } else {
        tracing::trace!("Upstream connection header kept");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SetConnection;

impl Pass for SetConnection {
    fn name(&self) -> &'static str {
        "set_connection"
    }

    fn apply(
        &self,
        req: &RequestDescriptor,
        upstream: &mut UpstreamResponse,
        outgoing: &mut dyn OutgoingResponse,
    ) {
        set_connection(req, upstream, outgoing)
    }
}
