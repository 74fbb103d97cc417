//! Order records and their dispatch actions.

mod actions;
pub mod entity;
mod error;

pub use actions::*;
pub use error::OrderError;
