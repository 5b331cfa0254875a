//! Shared builders for integration tests.

use web_outgoing::http::{FieldValue, Headers, HttpVersion, RequestDescriptor, UpstreamResponse};

/// Build a client request descriptor from a version token and header pairs.
#[allow(dead_code)]
pub fn request(version: &str, headers: &[(&str, &str)]) -> RequestDescriptor {
    RequestDescriptor::new(
        Some(version.parse::<HttpVersion>().unwrap()),
        headers.iter().copied().collect(),
    )
}

/// Build an upstream response with optional `set-cookie` entries.
#[allow(dead_code)]
pub fn upstream(status: u16, headers: &[(&str, &str)], cookies: &[&str]) -> UpstreamResponse {
    let mut map: Headers = headers.iter().copied().collect();
    if !cookies.is_empty() {
        map.set(
            "set-cookie",
            FieldValue::Multi(cookies.iter().map(|c| c.to_string()).collect()),
        );
    }
    UpstreamResponse::new(status, map)
}
