//! Header copy with cookie domain rewriting.
//!
//! # Responsibilities
//! - Rewrite `Set-Cookie` entries scoped to the backend host so they apply
//!   to the host the client actually sees
//! - Copy every upstream header onto the outgoing response
//!
//! # Design Decisions
//! - The backend host is matched as a literal substring, never as a pattern
//! - Every occurrence is replaced, not only the `Domain=` attribute
//! - Trailing `:<port>` is stripped from both hosts before matching

use crate::http::headers::{FieldValue, SET_COOKIE};
use crate::http::request::RequestDescriptor;
use crate::http::response::{OutgoingResponse, UpstreamResponse};
use crate::passes::Pass;

const HOST: &str = "host";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Strip a trailing `:<digits>` port suffix.
pub fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            name
        }
        _ => host,
    }
}

/// Replace every occurrence of the backend host in each cookie entry.
///
/// Entry order is preserved. Returns the number of entries changed.
pub fn rewrite_cookie_domains(cookies: &mut FieldValue, source: &str, target: &str) -> usize {
    if target.is_empty() {
        return 0;
    }

    let rewrite = |cookie: &mut String| {
        if cookie.contains(target) {
            *cookie = cookie.replace(target, source);
            true
        } else {
            false
        }
    };

    match cookies {
        FieldValue::Single(cookie) => usize::from(rewrite(cookie)),
        FieldValue::Multi(entries) => entries.iter_mut().map(rewrite).filter(|&c| c).count(),
    }
}

/// Copies upstream headers to the client, rewriting cookie domains first.
pub fn write_headers(
    req: &RequestDescriptor,
    upstream: &mut UpstreamResponse,
    outgoing: &mut dyn OutgoingResponse,
) {
    rewrite_upstream_cookies(req, upstream);
    copy_headers(upstream, outgoing);
}

fn rewrite_upstream_cookies(req: &RequestDescriptor, upstream: &mut UpstreamResponse) {
    let present = |name: &str| req.header(name).filter(|v| !v.is_empty());
    let (Some(source), Some(target)) = (present(HOST), present(X_FORWARDED_HOST)) else {
        return;
    };
    let Some(cookies) = upstream.headers.get_mut(SET_COOKIE) else {
        return;
    };
    if cookies.is_empty() {
        return;
    }

    let source = strip_port(&source);
    let target = strip_port(&target);
    let rewritten = rewrite_cookie_domains(cookies, source, target);

    tracing::debug!(
        source = %source,
        target = %target,
        rewritten,
        total = cookies.len(),
        "Rewrote cookie domains"
    );
}

fn copy_headers(upstream: &UpstreamResponse, outgoing: &mut dyn OutgoingResponse) {
    for (name, value) in upstream.headers.iter() {
        if let Err(e) = outgoing.set_header(name, value) {
            tracing::warn!(header = %name, error = %e, "Failed to copy upstream header");
        }
    }
}

/// Header copy pass. Cookie rewriting can be switched off by configuration.
#[derive(Debug, Clone, Copy)]
pub struct WriteHeaders {
    rewrite_cookie_domain: bool,
}

impl WriteHeaders {
    pub fn new(rewrite_cookie_domain: bool) -> Self {
        Self {
            rewrite_cookie_domain,
        }
    }
}

impl Default for WriteHeaders {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Pass for WriteHeaders {
    fn name(&self) -> &'static str {
        "write_headers"
    }

    fn apply(
        &self,
        req: &RequestDescriptor,
        upstream: &mut UpstreamResponse,
        outgoing: &mut dyn OutgoingResponse,
    ) {
        if self.rewrite_cookie_domain {
            write_headers(req, upstream, outgoing)
        } else {
            copy_headers(upstream, outgoing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::headers::Headers;
    use crate::http::request::HttpVersion;
    use crate::http::response::BufferedResponse;

    fn request(host: Option<&str>, forwarded: Option<&str>) -> RequestDescriptor {
        let mut headers = Headers::new();
        if let Some(h) = host {
            headers.set("host", h);
        }
        if let Some(f) = forwarded {
            headers.set("x-forwarded-host", f);
        }
        RequestDescriptor::new(Some(HttpVersion::Http11), headers)
    }

    fn upstream(cookies: &[&str]) -> UpstreamResponse {
        let mut headers = Headers::new();
        headers.set("content-type", "text/html");
        headers.set(
            "set-cookie",
            FieldValue::Multi(cookies.iter().map(|c| c.to_string()).collect()),
        );
        UpstreamResponse::new(200, headers)
    }

    fn cookies_of(out: &BufferedResponse) -> Vec<String> {
        out.headers()
            .get("set-cookie")
            .map(|v| v.iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("backend.internal:8080"), "backend.internal");
        assert_eq!(strip_port("example.com"), "example.com");
        assert_eq!(strip_port("example.com:"), "example.com:");
        assert_eq!(strip_port("example.com:http"), "example.com:http");
    }

    #[test]
    fn test_rewrites_domain_and_strips_port() {
        let req = request(Some("example.com"), Some("backend.internal:8080"));
        let mut up = upstream(&["sid=1; Domain=backend.internal; Path=/"]);
        let mut out = BufferedResponse::new();

        write_headers(&req, &mut up, &mut out);

        assert_eq!(cookies_of(&out), vec!["sid=1; Domain=example.com; Path=/"]);
        assert_eq!(out.headers().get_str("content-type").as_deref(), Some("text/html"));
    }

    #[test]
    fn test_replaces_every_occurrence_in_order() {
        let req = request(Some("example.com:443"), Some("api.local"));
        let mut up = upstream(&[
            "a=1; Domain=api.local",
            "b=2; Path=/",
            "c=api.local|api.local; Domain=api.local",
        ]);
        let mut out = BufferedResponse::new();

        write_headers(&req, &mut up, &mut out);

        assert_eq!(
            cookies_of(&out),
            vec![
                "a=1; Domain=example.com",
                "b=2; Path=/",
                "c=example.com|example.com; Domain=example.com",
            ]
        );
    }

    #[test]
    fn test_target_matched_literally() {
        // A pattern match would let '.' match any character
        let req = request(Some("example.com"), Some("a.b"));
        let mut up = upstream(&["x=1; Domain=axb", "y=2; Domain=a.b"]);
        let mut out = BufferedResponse::new();

        write_headers(&req, &mut up, &mut out);

        assert_eq!(cookies_of(&out), vec!["x=1; Domain=axb", "y=2; Domain=example.com"]);
    }

    #[test]
    fn test_no_forwarded_host_passes_through() {
        let cookies = ["sid=1; Domain=backend.internal; Path=/"];
        for host in [Some("example.com"), None] {
            let req = request(host, None);
            let mut up = upstream(&cookies);
            let mut out = BufferedResponse::new();

            write_headers(&req, &mut up, &mut out);
            assert_eq!(cookies_of(&out), cookies);
        }
    }

    #[test]
    fn test_no_host_passes_through() {
        let req = request(None, Some("backend.internal"));
        let mut up = upstream(&["sid=1; Domain=backend.internal"]);
        let mut out = BufferedResponse::new();

        write_headers(&req, &mut up, &mut out);
        assert_eq!(cookies_of(&out), vec!["sid=1; Domain=backend.internal"]);
    }

    #[test]
    fn test_empty_hosts_pass_through() {
        let cookies = ["sid=1; Domain=backend.internal; Path=/"];
        for (host, forwarded) in [("", "backend.internal"), ("example.com", "")] {
            let req = request(Some(host), Some(forwarded));
            let mut up = upstream(&cookies);
            let mut out = BufferedResponse::new();

            write_headers(&req, &mut up, &mut out);
            assert_eq!(cookies_of(&out), cookies);
        }
    }

    #[test]
    fn test_strip_port_ipv6() {
        assert_eq!(strip_port("[::1]:8080"), "[::1]");
        assert_eq!(strip_port("[::1]"), "[::1]");
        assert_eq!(strip_port("[2001:db8::1]:443"), "[2001:db8::1]");
    }

    #[test]
    fn test_single_cookie_value_rewritten() {
        let req = request(Some("example.com"), Some("backend.internal:8080"));
        let mut up = UpstreamResponse::new(200, Headers::new());
        up.headers.set("Set-Cookie", "sid=1; Domain=backend.internal");
        let mut out = BufferedResponse::new();

        write_headers(&req, &mut up, &mut out);

        assert_eq!(
            out.headers().get("set-cookie"),
            Some(&FieldValue::from("sid=1; Domain=example.com"))
        );
    }

    #[test]
    fn test_without_cookies_copies_headers() {
        let req = request(Some("example.com"), Some("backend.internal"));
        let mut up = UpstreamResponse::new(
            200,
            [("content-type", "text/plain"), ("x-backend", "backend.internal")]
                .into_iter()
                .collect(),
        );
        let mut out = BufferedResponse::new();

        write_headers(&req, &mut up, &mut out);

        assert!(!out.headers().contains("set-cookie"));
        // Only cookies are rewritten
        assert_eq!(out.headers().get_str("x-backend").as_deref(), Some("backend.internal"));
    }

    #[test]
    fn test_empty_target_is_ignored() {
        let mut cookies = FieldValue::Multi(vec!["a=1".into()]);
        assert_eq!(rewrite_cookie_domains(&mut cookies, "example.com", ""), 0);
        assert_eq!(cookies, FieldValue::Multi(vec!["a=1".into()]));
    }

    #[test]
    fn test_rewrite_disabled() {
        let req = request(Some("example.com"), Some("backend.internal"));
        let mut up = upstream(&["sid=1; Domain=backend.internal"]);
        let mut out = BufferedResponse::new();

        WriteHeaders::new(false).apply(&req, &mut up, &mut out);
        assert_eq!(cookies_of(&out), vec!["sid=1; Domain=backend.internal"]);
    }

    #[test]
    fn test_copy_after_commit_is_absorbed() {
        let req = request(None, None);
        let mut up = upstream(&["a=1"]);
        let mut out = BufferedResponse::new();
        out.write_head(200).unwrap();

        write_headers(&req, &mut up, &mut out);
        assert!(out.headers().is_empty());
    }
}
