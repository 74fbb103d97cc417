//! Barber records and their self-service actions.

mod actions;
pub mod entity;
mod error;

pub use actions::*;
pub use error::BarberError;
