use rust_decimal::Decimal;

use crate::actor_framework::Entity;
use crate::domain::{JobStatus, Order, OrderCreate, OrderPatch, OrderStatus, PaymentStatus};
use crate::state_machine;

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = OrderPatch;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = OrderError;

    const KIND: &'static str = "Order";

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new, unassigned Order from checkout data.
    ///
    /// # Notes
    /// The total is always recomputed from the line items. Paid orders start out
    /// `CONFIRMED`, everything else `PENDING`.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError(
                "An order needs at least one service".to_string(),
            ));
        }
        let total_amount = params.items.iter().map(|item| item.total_price).sum::<Decimal>();
        let status = if params.payment_status == PaymentStatus::Paid {
            OrderStatus::Confirmed
        } else {
            OrderStatus::Pending
        };

        Ok(Self {
            id,
            order_number: params.order_number,
            items: params.items,
            total_amount,
            payment_status: params.payment_status,
            payment_method: params.payment_method,
            status,
            customer: params.customer,
            job_status: JobStatus::Unassigned,
            assigned_barber_id: None,
            decline_reason: None,
            review_rating: None,
            timeline: Vec::new(),
            created_at: params.created_at,
            updated_at: params.created_at,
            completed_at: None,
        })
    }

    /// Applies payment updates reported by the upstream payment collaborator.
    fn on_update(&mut self, patch: OrderPatch) -> Result<(), OrderError> {
        if let Some(payment_status) = patch.payment_status {
            self.payment_status = payment_status;
            if payment_status == PaymentStatus::Paid && self.status == OrderStatus::Pending {
                self.status = OrderStatus::Confirmed;
            }
        }
        if let Some(method) = patch.payment_method {
            self.payment_method = method;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::Job(job) => state_machine::apply(self, job).map(OrderActionResult::Job),
            OrderAction::RecordReview { rating } => {
                if !(1..=5).contains(&rating) {
                    return Err(OrderError::ValidationError(format!(
                        "Rating must be between 1 and 5, got {rating}"
                    )));
                }
                if self.job_status != JobStatus::Completed {
                    return Err(OrderError::InvalidState {
                        current: self.job_status,
                        requested: JobStatus::Completed,
                    });
                }
                if self.review_rating.is_some() {
                    return Err(OrderError::ValidationError(format!(
                        "Order {} has already been reviewed",
                        self.id
                    )));
                }
                self.review_rating = Some(rating);
                Ok(OrderActionResult::RecordReview(self.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerRef, LineItem};
    use chrono::{TimeZone, Utc};

    fn checkout(items: Vec<LineItem>, payment_status: PaymentStatus) -> OrderCreate {
        OrderCreate {
            order_number: "BK-0001".into(),
            items,
            payment_status,
            payment_method: "card".into(),
            customer: CustomerRef::default(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_total_is_recomputed_from_items() {
        let items = vec![
            LineItem::new("Haircut", 1, Decimal::from(80)),
            LineItem::new("Beard trim", 2, Decimal::from(25)),
        ];
        let order = Order::from_create_params("order_1".into(), checkout(items, PaymentStatus::Paid)).unwrap();
        assert_eq!(order.total_amount, Decimal::from(130));
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.job_status, JobStatus::Unassigned);
    }

    #[test]
    fn test_payment_update_confirms_pending_order() {
        let items = vec![LineItem::new("Haircut", 1, Decimal::from(80))];
        let mut order = Order::from_create_params("order_1".into(), checkout(items, PaymentStatus::Pending)).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);

        order
            .on_update(OrderPatch {
                payment_status: Some(PaymentStatus::Paid),
                payment_method: Some("transfer".into()),
            })
            .unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.payment_method, "transfer");
    }

    #[test]
    fn test_empty_order_is_rejected() {
        let result = Order::from_create_params("order_1".into(), checkout(Vec::new(), PaymentStatus::Pending));
        assert!(matches!(result, Err(OrderError::ValidationError(_))));
    }

    #[test]
    fn test_review_requires_completed_job() {
        let items = vec![LineItem::new("Haircut", 1, Decimal::from(80))];
        let mut order = Order::from_create_params("order_1".into(), checkout(items, PaymentStatus::Paid)).unwrap();

        let err = order.handle_action(OrderAction::RecordReview { rating: 5 }).unwrap_err();
        assert!(matches!(err, OrderError::InvalidState { .. }));

        order.job_status = JobStatus::Completed;
        let err = order.handle_action(OrderAction::RecordReview { rating: 0 }).unwrap_err();
        assert!(matches!(err, OrderError::ValidationError(_)));

        assert!(order.handle_action(OrderAction::RecordReview { rating: 4 }).is_ok());
        assert_eq!(order.review_rating, Some(4));
        assert!(order.handle_action(OrderAction::RecordReview { rating: 5 }).is_err());
    }
}
