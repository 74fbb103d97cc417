use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Order, OrderCreate, OrderPatch};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::state_machine::{JobAction, JobTransition};

/// Client for the Order record actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

crate::impl_basic_client!(OrderClient, Order, OrderError, order);

impl OrderClient {
    /// Store a checkout. Returns the generated order id.
    #[instrument(skip(self, order), fields(order_number = %order.order_number))]
    pub async fn create_order(&self, order: OrderCreate) -> Result<String, OrderError> {
        debug!("Sending request");
        self.inner.create(order).await
    }

    /// Record the payment outcome reported upstream.
    #[instrument(skip(self, patch))]
    pub async fn update_payment(&self, id: &str, patch: OrderPatch) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner.update(id.to_string(), patch).await
    }

    /// Run a job command inside the order actor; the conditional check and the write
    /// happen in the same step.
    #[instrument(skip(self, action), fields(event = action.command.event_type(), expected = %action.expected))]
    pub async fn apply_job(&self, id: &str, action: JobAction) -> Result<JobTransition, OrderError> {
        debug!("Sending request");
        match self.inner.perform_action(id.to_string(), OrderAction::Job(action)).await {
            Ok(OrderActionResult::Job(transition)) => Ok(transition),
            Ok(_) => Err(OrderError::ActorCommunicationError("Unexpected result".to_string())),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn record_review(&self, id: &str, rating: u8) -> Result<Order, OrderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id.to_string(), OrderAction::RecordReview { rating })
            .await
        {
            Ok(OrderActionResult::RecordReview(order)) => Ok(order),
            Ok(_) => Err(OrderError::ActorCommunicationError("Unexpected result".to_string())),
            Err(e) => Err(e),
        }
    }
}
