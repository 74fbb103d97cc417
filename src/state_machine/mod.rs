//! Order dispatch lifecycle.
//!
//! ```text
//! UNASSIGNED         --assign-->      PENDING_ACCEPTANCE
//! PENDING_ACCEPTANCE --accept-->      ACCEPTED
//! PENDING_ACCEPTANCE --decline-->     DECLINED
//! DECLINED           --assign-->      PENDING_ACCEPTANCE
//! ACCEPTED           --advance-->     ON_THE_WAY --advance--> ARRIVED --advance--> COMPLETED
//! ```
//!
//! [`apply`] runs all guards first and only then writes, so a rejected command leaves
//! the order exactly as it was.

pub mod events;
pub mod guards;

pub use events::*;

use tracing::{debug, info};

use crate::domain::{Order, OrderStatus, PaymentStatus, TimelineEntry};
use crate::order_actor::OrderError;

pub fn apply(order: &mut Order, action: JobAction) -> Result<JobTransition, OrderError> {
    let JobAction { command, expected, at } = action;
    debug!(
        order_id = %order.id,
        event = command.event_type(),
        current = %order.job_status,
        "Applying job command"
    );

    guards::check(order, &command, expected)?;

    let from = order.job_status;
    let to = command.target_status();
    let barber_id = command.barber_id().to_string();

    match command {
        JobCommand::Assign { barber_id, .. } => {
            order.assigned_barber_id = Some(barber_id);
            order.decline_reason = None;
        }
        JobCommand::Accept { .. } => {}
        JobCommand::Decline { reason, .. } => {
            order.decline_reason = Some(reason.trim().to_string());
        }
        JobCommand::Advance { .. } => {
            if to.is_terminal() {
                order.status = OrderStatus::Completed;
                order.completed_at = Some(at);
                // Completing the job settles an order nobody recorded a payment for.
                if order.payment_status == PaymentStatus::Pending {
                    order.payment_status = PaymentStatus::Paid;
                }
            }
        }
    }

    order.job_status = to;
    order.updated_at = at;
    order.timeline.push(TimelineEntry {
        from,
        to,
        barber_id,
        at,
    });

    info!(order_id = %order.id, %from, %to, "Job transition committed");
    Ok(JobTransition {
        from,
        to,
        order: order.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BarberStatus, CustomerRef, JobStatus, LineItem};
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
    }

    fn new_order() -> Order {
        let items = vec![LineItem::new("Haircut", 1, Decimal::from(100))];
        Order {
            id: "order_1".into(),
            order_number: "BK-0001".into(),
            total_amount: Decimal::from(100),
            items,
            payment_status: PaymentStatus::Pending,
            payment_method: "cash".into(),
            status: OrderStatus::Confirmed,
            customer: CustomerRef {
                name: "Dana".into(),
                ..CustomerRef::default()
            },
            job_status: JobStatus::Unassigned,
            assigned_barber_id: None,
            decline_reason: None,
            review_rating: None,
            timeline: Vec::new(),
            created_at: now(),
            updated_at: now(),
            completed_at: None,
        }
    }

    fn assign(barber: &str) -> JobCommand {
        JobCommand::Assign {
            barber_id: barber.into(),
            barber_status: BarberStatus::Active,
        }
    }

    fn accept(barber: &str) -> JobCommand {
        JobCommand::Accept { barber_id: barber.into() }
    }

    fn advance(barber: &str, target: JobStatus) -> JobCommand {
        JobCommand::Advance {
            barber_id: barber.into(),
            target,
        }
    }

    /// Apply with `expected` taken from the order itself, like a caller with a fresh read.
    fn run(order: &mut Order, command: JobCommand) -> Result<JobTransition, OrderError> {
        let expected = order.job_status;
        apply(order, JobAction::new(command, expected, now()))
    }

    #[test]
    fn test_happy_path_to_completion() {
        let mut order = new_order();
        run(&mut order, assign("b1")).unwrap();
        assert_eq!(order.job_status, JobStatus::PendingAcceptance);
        assert_eq!(order.assigned_barber_id.as_deref(), Some("b1"));

        run(&mut order, accept("b1")).unwrap();
        run(&mut order, advance("b1", JobStatus::OnTheWay)).unwrap();
        run(&mut order, advance("b1", JobStatus::Arrived)).unwrap();
        let done = run(&mut order, advance("b1", JobStatus::Completed)).unwrap();

        assert_eq!(done.from, JobStatus::Arrived);
        assert_eq!(done.to, JobStatus::Completed);
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.completed_at, Some(now()));
        assert_eq!(order.timeline.len(), 5);
    }

    #[test]
    fn test_completion_keeps_recorded_payment_outcome() {
        let mut order = new_order();
        order.payment_status = PaymentStatus::Refunded;
        run(&mut order, assign("b1")).unwrap();
        run(&mut order, accept("b1")).unwrap();
        run(&mut order, advance("b1", JobStatus::OnTheWay)).unwrap();
        run(&mut order, advance("b1", JobStatus::Arrived)).unwrap();
        run(&mut order, advance("b1", JobStatus::Completed)).unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Refunded);
    }

    #[test]
    fn test_decline_then_reassign_clears_reason() {
        let mut order = new_order();
        run(&mut order, assign("b1")).unwrap();
        run(
            &mut order,
            JobCommand::Decline {
                barber_id: "b1".into(),
                reason: "  sick ".into(),
            },
        )
        .unwrap();
        assert_eq!(order.job_status, JobStatus::Declined);
        assert_eq!(order.decline_reason.as_deref(), Some("sick"));

        run(&mut order, assign("b2")).unwrap();
        assert_eq!(order.job_status, JobStatus::PendingAcceptance);
        assert_eq!(order.decline_reason, None);
        assert_eq!(order.assigned_barber_id.as_deref(), Some("b2"));
    }

    #[test]
    fn test_blank_decline_reason_is_rejected() {
        let mut order = new_order();
        run(&mut order, assign("b1")).unwrap();
        let err = run(
            &mut order,
            JobCommand::Decline {
                barber_id: "b1".into(),
                reason: "   ".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, OrderError::ValidationError(_)));
        assert_eq!(order.job_status, JobStatus::PendingAcceptance);
    }

    #[test]
    fn test_assign_over_in_flight_order_is_rejected() {
        let mut order = new_order();
        run(&mut order, assign("b1")).unwrap();
        run(&mut order, accept("b1")).unwrap();
        let before = order.clone();

        let err = run(&mut order, assign("b2")).unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidState {
                current: JobStatus::Accepted,
                requested: JobStatus::PendingAcceptance,
            }
        );
        assert_eq!(order, before);
    }

    #[test]
    fn test_assign_requires_active_barber() {
        let mut order = new_order();
        let err = run(
            &mut order,
            JobCommand::Assign {
                barber_id: "b1".into(),
                barber_status: BarberStatus::Suspended,
            },
        )
        .unwrap_err();
        assert!(matches!(err, OrderError::InvalidBarberState { .. }));
        assert_eq!(order.job_status, JobStatus::Unassigned);
    }

    #[test]
    fn test_non_owner_sees_not_found() {
        let mut order = new_order();
        run(&mut order, assign("b1")).unwrap();
        let err = run(&mut order, accept("b2")).unwrap_err();
        assert!(matches!(err, OrderError::NotFound(_)));
        let err = run(&mut order, advance("b2", JobStatus::OnTheWay)).unwrap_err();
        assert!(matches!(err, OrderError::NotFound(_)));
    }

    #[test]
    fn test_accept_twice_is_invalid_state() {
        let mut order = new_order();
        run(&mut order, assign("b1")).unwrap();
        run(&mut order, accept("b1")).unwrap();
        let err = run(&mut order, accept("b1")).unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidState {
                current: JobStatus::Accepted,
                requested: JobStatus::Accepted,
            }
        );
    }

    #[test]
    fn test_skipping_a_step_is_invalid_transition() {
        let mut order = new_order();
        run(&mut order, assign("b1")).unwrap();
        run(&mut order, accept("b1")).unwrap();
        let err = run(&mut order, advance("b1", JobStatus::Completed)).unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                current: JobStatus::Accepted,
                requested: JobStatus::Completed,
            }
        );
    }

    #[test]
    fn test_stale_expected_status_is_rejected() {
        let mut order = new_order();
        run(&mut order, assign("b1")).unwrap();
        run(&mut order, accept("b1")).unwrap();

        // A second writer that read PENDING_ACCEPTANCE before the accept landed.
        let stale = JobAction::new(
            JobCommand::Decline {
                barber_id: "b1".into(),
                reason: "busy".into(),
            },
            JobStatus::PendingAcceptance,
            now(),
        );
        let err = apply(&mut order, stale).unwrap_err();
        assert!(matches!(err, OrderError::InvalidState { .. }));
        assert_eq!(order.job_status, JobStatus::Accepted);
        assert_eq!(order.decline_reason, None);
    }

    fn arbitrary_command() -> impl Strategy<Value = JobCommand> {
        let barber = prop::sample::select(vec!["b1", "b2"]);
        let status = prop::sample::select(JobStatus::ALL.to_vec());
        let reason = prop::sample::select(vec!["", "late", "sick"]);
        prop_oneof![
            barber.clone().prop_map(assign),
            barber.clone().prop_map(accept),
            (barber.clone(), reason).prop_map(|(b, r)| JobCommand::Decline {
                barber_id: b.into(),
                reason: r.into(),
            }),
            (barber, status).prop_map(|(b, s)| advance(b, s)),
        ]
    }

    proptest! {
        #[test]
        fn any_command_sequence_stays_on_the_graph(commands in prop::collection::vec(arbitrary_command(), 0..40)) {
            let mut order = new_order();
            for command in commands {
                let before = order.clone();
                if run(&mut order, command).is_err() {
                    prop_assert_eq!(&order, &before);
                }
                let assigned = order.assigned_barber_id.is_some();
                prop_assert_eq!(assigned, order.job_status != JobStatus::Unassigned);
                prop_assert_eq!(order.decline_reason.is_some(), order.job_status == JobStatus::Declined);
            }
            let mut previous = JobStatus::Unassigned;
            for entry in &order.timeline {
                prop_assert_eq!(entry.from, previous);
                prop_assert!(entry.from.can_transition_to(entry.to), "{} -> {}", entry.from, entry.to);
                previous = entry.to;
            }
        }
    }
}
