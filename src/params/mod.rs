//! Request parameter extraction and validation.
//!
//! # Data Flow
//! ```text
//! path segments ─┐
//! query string ──┼─▶ checker.rs (coerce.rs + rules.rs per input)
//! JSON body ─────┘        │
//!                         ├─ all inputs valid → typed values to the handler
//!                         └─ any failure      → 422 {"detail": [ErrorDetail, ...]}
//! ```
//!
//! # Design Decisions
//! - Errors are collected, never short-circuited (except malformed JSON)
//! - Defaults are applied by the caller and never validated
//! - Repeated scalar query keys resolve to the last value

pub mod body;
pub mod checker;
pub mod coerce;
pub mod detail;
pub mod query;
pub mod rules;

pub use body::{Fields, FromFields, JsonBody};
pub use checker::Checker;
pub use coerce::Choice;
pub use detail::{ErrorDetail, Loc, Source, Violation};
pub use query::QueryMap;
pub use rules::{IntRules, StrRules};
