//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Pipeline passes:
//!     → tracing events (debug for rewrites, warn for rejected writes)
//!     → logging.rs (subscriber installed by the embedding proxy)
//! ```

pub mod logging;
