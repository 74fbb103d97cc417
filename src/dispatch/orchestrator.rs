use tracing::{info, instrument};

use crate::auth::{authorize, Actor, Role};
use crate::availability::evaluate_barber;
use crate::domain::{Barber, OrderSummary};
use crate::error::{DispatchError, DispatchResult};
use crate::notifications::templates;
use crate::state_machine::{JobAction, JobCommand};

use super::DispatchService;

impl DispatchService {
    /// Attach `barber_id` to an unassigned or declined order.
    #[instrument(skip(self, actor), fields(order_id = %order_id, barber_id = %barber_id))]
    pub async fn assign_barber_to_order(
        &self,
        actor: Option<&Actor>,
        order_id: &str,
        barber_id: &str,
    ) -> DispatchResult<OrderSummary> {
        authorize(actor, Role::Operator)?;

        let order = self.orders.require_order(order_id).await?;
        let barber = self.barbers.require_barber(barber_id).await?;
        if !barber.is_active() {
            return Err(DispatchError::barber_inactive(&barber.id, barber.status));
        }

        let now = self.now();
        if self.config.require_dispatch_eligibility {
            let status = evaluate_barber(&barber, &self.calendar.localize(now));
            if !status.is_available {
                let reason = if status.is_online {
                    "outside working hours"
                } else {
                    "offline"
                };
                return Err(DispatchError::InvalidBarberState {
                    barber_id: barber.id.clone(),
                    reason: reason.to_string(),
                });
            }
        }

        let command = JobCommand::Assign {
            barber_id: barber.id.clone(),
            barber_status: barber.status,
        };
        let transition = self
            .orders
            .apply_job(order_id, JobAction::new(command, order.job_status, now))
            .await?;
        info!(from = %transition.from, "Barber assigned");

        let barber_notice = templates::new_assignment(&transition.order, &barber);
        let customer_notice = templates::barber_assigned(&transition.order, &barber);
        self.notify(std::iter::once(barber_notice).chain(customer_notice));

        Ok(OrderSummary::from(&transition.order))
    }

    /// Active barbers who could take a job right now, best rated first.
    #[instrument(skip(self, actor))]
    pub async fn find_eligible_barbers(&self, actor: Option<&Actor>) -> DispatchResult<Vec<Barber>> {
        authorize(actor, Role::Operator)?;

        let moment = self.local_now();
        let mut barbers = self
            .barbers
            .find_barbers(move |b| b.is_active() && evaluate_barber(b, &moment).is_available)
            .await?;
        barbers.sort_by(|a, b| {
            b.rating_avg
                .total_cmp(&a.rating_avg)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(barbers)
    }
}
