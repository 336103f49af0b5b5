//! Request Guide
//!
//! A small HTTP service that demonstrates, lesson by lesson, how request
//! inputs are declared, coerced and validated: path and query parameters,
//! JSON bodies, constraints, aliases and query models. Every rejected input is
//! reported in one structured 422 error report.

// Request input handling
pub mod params;
pub mod error;

// Domain
pub mod catalog;
pub mod models;
pub mod lessons;

// Service
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
