//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! SIGTERM / Ctrl+C (signals.rs)
//!     → Shutdown::trigger (shutdown.rs)
//!     → server stops accepting, drains in-flight requests, returns
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
