//! HTTP data model and stack integration.
//!
//! # Data Flow
//! ```text
//! Client request ──→ request.rs (RequestDescriptor)
//! Upstream response ──→ response.rs (UpstreamResponse)
//!     → passes (Pipeline::run)
//!     → response.rs (BufferedResponse → http::Response)
//!     → Send to client
//! ```

pub mod forward;
pub mod headers;
pub mod request;
pub mod response;

pub use forward::rewrite_response;
pub use headers::{FieldValue, Headers};
pub use request::{HttpVersion, RequestDescriptor};
pub use response::{BufferedResponse, OutgoingError, OutgoingResponse, UpstreamResponse};
