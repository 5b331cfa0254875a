//! Glue between the pipeline and `axum`/`hyper` responses.

use axum::body::Body;
use axum::http::{Request, Response};

use crate::http::request::RequestDescriptor;
use crate::http::response::{BufferedResponse, OutgoingError, UpstreamResponse};
use crate::passes::Pipeline;

/// Run the pipeline over an upstream response and build the client response.
///
/// The upstream body is relayed untouched.
pub fn rewrite_response<B>(
    pipeline: &Pipeline,
    request: &Request<B>,
    upstream: Response<Body>,
) -> Result<Response<Body>, OutgoingError> {
    let descriptor = RequestDescriptor::from_request(request);
    let (parts, body) = upstream.into_parts();
    let mut upstream = UpstreamResponse::from_parts(&parts);
    let mut outgoing = BufferedResponse::new();

    pipeline.run(&descriptor, &mut upstream, &mut outgoing);

    outgoing.into_response(body)
}
