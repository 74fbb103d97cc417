//! Business records. Pure data structures with no actor-specific concerns.

pub mod availability;
pub mod barber;
pub mod job_status;
pub mod order;

pub use availability::*;
pub use barber::*;
pub use job_status::*;
pub use order::*;
