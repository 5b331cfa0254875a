//! Chunked transfer cleanup for HTTP/1.0 clients.

use crate::http::request::RequestDescriptor;
use crate::http::response::{OutgoingResponse, UpstreamResponse};
use crate::passes::Pass;

const TRANSFER_ENCODING: &str = "transfer-encoding";

/// Drops `transfer-encoding` when the client spoke HTTP/1.0.
///
/// HTTP/1.0 has no chunked framing, so the upstream's encoding must not
/// reach the client.
pub fn remove_chunked(
    req: &RequestDescriptor,
    upstream: &mut UpstreamResponse,
    _outgoing: &mut dyn OutgoingResponse,
) {
    if !req.is_http10() {
        return;
    }

    if let Some(removed) = upstream.headers.remove(TRANSFER_ENCODING) {
        tracing::debug!(
            transfer_encoding = %removed,
            "Removed transfer-encoding for HTTP/1.0 client"
        );
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveChunked;

impl Pass for RemoveChunked {
    fn name(&self) -> &'static str {
        "remove_chunked"
    }

    fn apply(
        &self,
        req: &RequestDescriptor,
        upstream: &mut UpstreamResponse,
        outgoing: &mut dyn OutgoingResponse,
    ) {
        remove_chunked(req, upstream, outgoing)
    }
}
