use crate::domain::Order;
use crate::state_machine::{JobAction, JobTransition};

/// Custom actions for Order records, beyond plain create/get/patch.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Drive the dispatch lifecycle through the job state machine.
    Job(JobAction),
    /// Store the customer's rating for a completed job.
    ///
    /// # Errors
    /// Fails unless the job is completed, not yet rated, and the rating is 1-5.
    RecordReview { rating: u8 },
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    Job(JobTransition),
    RecordReview(Order),
}
