//! Response header pipeline for a reverse proxy.
//!
//! After an upstream server answers a proxied request, the pipeline adjusts
//! the headers and status line before they are relayed to the client.
//!
//! ```text
//! Backend response ──→ remove_chunked ──→ set_connection
//!                  ──→ write_headers (cookie domains) ──→ write_status_code ──→ Client
//! ```

pub mod config;
pub mod http;
pub mod observability;
pub mod passes;

pub use config::PipelineConfig;
pub use http::{BufferedResponse, OutgoingResponse, RequestDescriptor, UpstreamResponse};
pub use passes::{Pass, Pipeline};
