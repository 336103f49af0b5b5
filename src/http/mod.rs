//! HTTP layer.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → NormalizePath (trailing slash trimmed)
//!     → request.rs (request ID assigned, request span opened)
//!     → concurrency limit, timeout, body limit
//!     → server.rs router → lesson handler
//!     → response (request ID echoed back)
//! ```

pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
