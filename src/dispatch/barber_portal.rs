use std::collections::HashSet;
use tracing::{info, instrument, warn};

use crate::auth::{authorize, Actor, Role};
use crate::availability::{evaluate, evaluate_barber, AvailabilityStatus};
use crate::domain::{AvailabilityWindow, Barber, JobStatus, Order};
use crate::earnings::{compute_earnings, dashboard_stats, period_start, DashboardStats, EarningsPeriod, EarningsSummary};
use crate::error::{DispatchError, DispatchResult};

use super::DispatchService;

impl DispatchService {
    async fn current_barber(&self, actor: Option<&Actor>) -> DispatchResult<Barber> {
        let barber_id = authorize(actor, Role::Barber)?;
        Ok(self.barbers.require_barber(barber_id).await?)
    }

    async fn orders_of(&self, barber_id: &str) -> DispatchResult<Vec<Order>> {
        let barber_id = barber_id.to_string();
        let orders = self
            .orders
            .find_orders(move |o| o.is_assigned_to(&barber_id))
            .await?;
        Ok(orders)
    }

    #[instrument(skip(self, actor))]
    pub async fn get_online_status(&self, actor: Option<&Actor>) -> DispatchResult<AvailabilityStatus> {
        let barber = self.current_barber(actor).await?;
        Ok(evaluate_barber(&barber, &self.local_now()))
    }

    #[instrument(skip(self, actor))]
    pub async fn set_online_status(
        &self,
        actor: Option<&Actor>,
        is_online: bool,
    ) -> DispatchResult<AvailabilityStatus> {
        let barber = self.current_barber(actor).await?;
        let is_online = self.barbers.set_online(&barber.id, is_online).await?;
        info!(barber_id = %barber.id, is_online, "Online status changed");
        Ok(evaluate(is_online, &barber.availability, &self.local_now()))
    }

    /// Orders held by the calling barber, newest first. `statuses` narrows the list.
    #[instrument(skip(self, actor))]
    pub async fn list_barber_orders(
        &self,
        actor: Option<&Actor>,
        statuses: Option<&[JobStatus]>,
    ) -> DispatchResult<Vec<Order>> {
        let barber = self.current_barber(actor).await?;
        let wanted: Option<HashSet<JobStatus>> = statuses.map(|s| s.iter().copied().collect());

        let mut orders = self.orders_of(&barber.id).await?;
        if let Some(wanted) = wanted {
            orders.retain(|o| wanted.contains(&o.job_status));
        }
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    #[instrument(skip(self, actor))]
    pub async fn get_earnings(
        &self,
        actor: Option<&Actor>,
        period: EarningsPeriod,
    ) -> DispatchResult<EarningsSummary> {
        let barber = self.current_barber(actor).await?;
        let orders = self.orders_of(&barber.id).await?;
        let since = period_start(period, self.config.month_window, self.now(), &self.calendar);
        Ok(compute_earnings(
            &orders,
            &barber,
            self.commission_rate(&barber),
            period,
            since,
        ))
    }

    #[instrument(skip(self, actor))]
    pub async fn get_dashboard_stats(&self, actor: Option<&Actor>) -> DispatchResult<DashboardStats> {
        let barber = self.current_barber(actor).await?;
        let orders = self.orders_of(&barber.id).await?;
        Ok(dashboard_stats(
            &orders,
            &barber,
            self.commission_rate(&barber),
            self.calendar.start_of_day(self.now()),
        ))
    }

    /// Replace the caller's weekly schedule. Returns the windows that were kept.
    #[instrument(skip(self, actor, windows), fields(window_count = windows.len()))]
    pub async fn replace_availability(
        &self,
        actor: Option<&Actor>,
        windows: Vec<AvailabilityWindow>,
    ) -> DispatchResult<Vec<AvailabilityWindow>> {
        let barber = self.current_barber(actor).await?;
        Ok(self.barbers.replace_availability(&barber.id, windows).await?)
    }

    /// A customer rates a completed order; the rating feeds the barber's average.
    #[instrument(skip(self, actor), fields(order_id = %order_id))]
    pub async fn record_review(
        &self,
        actor: Option<&Actor>,
        order_id: &str,
        rating: u8,
    ) -> DispatchResult<Order> {
        let customer_id = authorize(actor, Role::Customer)?;
        let order = self
            .orders
            .get_order(order_id)
            .await?
            .filter(|o| o.customer.customer_id.as_deref() == Some(customer_id))
            .ok_or_else(|| DispatchError::NotFound(format!("Order {order_id}")))?;
        let barber_id = order
            .assigned_barber_id
            .clone()
            .ok_or_else(|| DispatchError::InvalidState {
                current: order.job_status,
                requested: JobStatus::Completed,
            })?;

        let reviewed = self.orders.record_review(order_id, rating).await?;
        match self.barbers.record_review(&barber_id, rating).await {
            Ok((rating_avg, total_reviews)) => {
                info!(barber_id = %barber_id, rating_avg, total_reviews, "Barber rating updated")
            }
            Err(e) => warn!(error = %e, barber_id = %barber_id, "Failed to update barber rating"),
        }
        Ok(reviewed)
    }
}
