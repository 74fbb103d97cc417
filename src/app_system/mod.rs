//! System wiring, configuration, startup and shutdown.

pub mod config;
pub mod dispatch_system;
pub mod tracing;

pub use self::config::DispatchConfig;
pub use self::dispatch_system::DispatchSystem;
pub use self::tracing::setup_tracing;
