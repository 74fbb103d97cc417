//! Order dispatch and job lifecycle for an on-demand barber service.
//!
//! Orders and barbers each live in their own [`actor_framework::ResourceActor`]. The
//! [`dispatch::DispatchService`] handlers read from them, run the job state machine
//! inside the order actor, and send notifications once a change has been committed.
//! [`app_system::DispatchSystem`] wires it all together.

pub mod actor_framework;
pub mod app_system;
pub mod auth;
pub mod availability;
pub mod barber_actor;
pub mod clients;
pub mod clock;
pub mod commission;
pub mod dispatch;
pub mod domain;
pub mod earnings;
pub mod error;
pub mod notifications;
pub mod order_actor;
pub mod state_machine;

#[cfg(test)]
mod mock_framework;

pub use error::{DispatchError, DispatchResult};
