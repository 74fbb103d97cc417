//! Typed handles over the record actors.

#[macro_use]
mod macros;
mod barber_client;
mod order_client;

pub use barber_client::BarberClient;
pub use order_client::OrderClient;
