//! Data shapes shared by the lessons.
//!
//! Models are built per request from validated input and echoed back; none
//! of them outlive the request.

pub mod choices;
pub mod filter;
pub mod item;

pub use choices::{ModelName, OrderBy};
pub use filter::FilterParams;
pub use item::{Item, User};
