//! Status line commit.

use crate::http::request::RequestDescriptor;
use crate::http::response::{OutgoingResponse, UpstreamResponse};
use crate::passes::Pass;

/// Commits the upstream status code. Must run after every header pass.
pub fn write_status_code(
    _req: &RequestDescriptor,
    upstream: &mut UpstreamResponse,
    outgoing: &mut dyn OutgoingResponse,
) {
    if let Err(e) = outgoing.write_head(upstream.status_code) {
        tracing::warn!(status = upstream.status_code, error = %e, "Failed to commit status line");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WriteStatusCode;

impl Pass for WriteStatusCode {
    fn name(&self) -> &'static str {
        "write_status_code"
    }

    fn apply(
        &self,
        req: &RequestDescriptor,
        upstream: &mut UpstreamResponse,
        outgoing: &mut dyn OutgoingResponse,
    ) {
        write_status_code(req, upstream, outgoing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::headers::Headers;
    use crate::http::response::BufferedResponse;

    #[test]
    fn test_commits_upstream_status() {
        let req = RequestDescriptor::default();
        let mut up = UpstreamResponse::new(404, Headers::new());
        let mut out = BufferedResponse::new();

        write_status_code(&req, &mut up, &mut out);
        assert!(out.headers_sent());
        assert_eq!(out.status(), Some(404));
    }

    #[test]
    fn test_second_commit_keeps_first_status() {
        let req = RequestDescriptor::default();
        let mut out = BufferedResponse::new();

        write_status_code(&req, &mut UpstreamResponse::new(502, Headers::new()), &mut out);
        write_status_code(&req, &mut UpstreamResponse::new(200, Headers::new()), &mut out);
        assert_eq!(out.status(), Some(502));
    }
}
