use tracing::{info, instrument, warn};

use crate::auth::{authorize, Actor, Role};
use crate::domain::{JobStatus, Order};
use crate::error::{DispatchError, DispatchResult};
use crate::notifications::templates;
use crate::state_machine::{JobAction, JobCommand, JobTransition};

use super::DispatchService;

impl DispatchService {
    #[instrument(skip(self, actor), fields(order_id = %order_id))]
    pub async fn accept_order(&self, actor: Option<&Actor>, order_id: &str) -> DispatchResult<Order> {
        let barber_id = authorize(actor, Role::Barber)?;
        self.run_barber_command(
            order_id,
            JobCommand::Accept {
                barber_id: barber_id.to_string(),
            },
        )
        .await
    }

    #[instrument(skip(self, actor, reason), fields(order_id = %order_id))]
    pub async fn decline_order(
        &self,
        actor: Option<&Actor>,
        order_id: &str,
        reason: &str,
    ) -> DispatchResult<Order> {
        let barber_id = authorize(actor, Role::Barber)?;
        self.run_barber_command(
            order_id,
            JobCommand::Decline {
                barber_id: barber_id.to_string(),
                reason: reason.to_string(),
            },
        )
        .await
    }

    #[instrument(skip(self, actor), fields(order_id = %order_id, target = %target))]
    pub async fn advance_order(
        &self,
        actor: Option<&Actor>,
        order_id: &str,
        target: JobStatus,
    ) -> DispatchResult<Order> {
        let barber_id = authorize(actor, Role::Barber)?;
        self.run_barber_command(
            order_id,
            JobCommand::Advance {
                barber_id: barber_id.to_string(),
                target,
            },
        )
        .await
    }

    /// Fresh read, ownership check, conditional write, then the follow-ups.
    async fn run_barber_command(&self, order_id: &str, command: JobCommand) -> DispatchResult<Order> {
        let barber_id = command.barber_id().to_string();
        let order = self
            .orders
            .get_order(order_id)
            .await?
            .filter(|o| o.is_assigned_to(&barber_id))
            .ok_or_else(|| DispatchError::order_unavailable(order_id))?;

        let transition = self
            .orders
            .apply_job(order_id, JobAction::new(command, order.job_status, self.now()))
            .await?;
        info!(from = %transition.from, to = %transition.to, "Order updated by barber");

        self.after_barber_transition(&barber_id, &transition).await;
        Ok(transition.order)
    }

    async fn after_barber_transition(&self, barber_id: &str, transition: &JobTransition) {
        if transition.to == JobStatus::Completed {
            if let Err(e) = self.barbers.record_booking(barber_id).await {
                warn!(error = %e, barber_id, "Failed to update booking count");
            }
        }

        let barber = match self.barbers.get_barber(barber_id).await {
            Ok(barber) => barber,
            Err(e) => {
                warn!(error = %e, barber_id, "Barber lookup for notification failed");
                None
            }
        };
        self.notify(templates::for_transition(
            transition,
            barber.as_ref(),
            &self.config.operator_channel,
        ));
    }
}
