//! Observability.
//!
//! # Data Flow
//! ```text
//! handlers, layers
//!     → logging.rs (structured tracing events, pretty or JSON)
//!     → metrics.rs (per-route counters and latency histograms)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint (when enabled)
//! ```
//!
//! The request ID set by the HTTP layer is recorded on the request span, so
//! every event logged while serving a request carries it.

pub mod logging;
pub mod metrics;
