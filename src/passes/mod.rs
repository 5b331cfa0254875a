//! Response header passes.
//!
//! # Data Flow
//! ```text
//! Upstream response (status, headers)
//!     → chunked.rs (drop transfer-encoding for HTTP/1.0 clients)
//!     → connection.rs (pick the connection header)
//!     → headers.rs (rewrite cookie domains, copy headers to client)
//!     → status.rs (commit status line, closes header window)
//!     → Outgoing response
//! ```
//!
//! # Design Decisions
//! - Pass order is an explicit list built at construction
//! - Passes never fail; missing inputs are no-op guards
//! - No state outlives a single exchange

pub mod chunked;
pub mod connection;
pub mod headers;
pub mod status;

use std::fmt;

use crate::config::PipelineConfig;
use crate::http::request::RequestDescriptor;
use crate::http::response::{OutgoingResponse, UpstreamResponse};

pub use chunked::{remove_chunked, RemoveChunked};
pub use connection::{set_connection, SetConnection};
pub use headers::{write_headers, WriteHeaders};
pub use status::{write_status_code, WriteStatusCode};

/// A single transformation step over one proxied exchange.
pub trait Pass: Send + Sync {
    /// Stable name used to address the pass.
    fn name(&self) -> &'static str;

    /// Inspect the request and upstream response, mutating the upstream
    /// response or the outgoing writer in place.
    fn apply(
        &self,
        req: &RequestDescriptor,
        upstream: &mut UpstreamResponse,
        outgoing: &mut dyn OutgoingResponse,
    );
}

/// Ordered list of passes run against each exchange.
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
}

impl Pipeline {
    /// Build a pipeline from an explicit pass order.
    pub fn new(passes: Vec<Box<dyn Pass>>) -> Self {
        Self { passes }
    }

    /// The standard order: chunked cleanup, connection, headers, status.
    pub fn standard() -> Self {
        Self::from_config(&PipelineConfig::default())
    }

    /// The standard order with pass options taken from configuration.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(vec![
            Box::new(RemoveChunked),
            Box::new(SetConnection),
            Box::new(WriteHeaders::new(config.cookies.rewrite_domain)),
            Box::new(WriteStatusCode),
        ])
    }

    /// Run every pass in order.
    pub fn run(
        &self,
        req: &RequestDescriptor,
        upstream: &mut UpstreamResponse,
        outgoing: &mut dyn OutgoingResponse,
    ) {
        let _span = tracing::debug_span!(
            "web_outgoing",
            status = upstream.status_code,
            version = ?req.http_version,
        )
        .entered();

        for pass in &self.passes {
            tracing::trace!(pass = pass.name(), "Applying pass");
            pass.apply(req, upstream, outgoing);
        }
    }

    /// Look up a pass by name.
    pub fn get(&self, name: &str) -> Option<&dyn Pass> {
        self.passes
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    /// Pass names in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("passes", &self.names())
            .finish()
    }
}
