//! Human-readable messages for each committed transition.

use crate::domain::{Barber, JobStatus, Order};
use crate::state_machine::JobTransition;

use super::{Notification, Recipient};

fn to_customer(order: &Order, subject: String, body: String) -> Option<Notification> {
    let Some(email) = order.customer.email.clone() else {
        tracing::debug!(order_id = %order.id, "Customer has no email, skipping notification");
        return None;
    };
    Some(Notification {
        recipient: Recipient::Customer { email },
        subject,
        body,
    })
}

fn barber_name(barber: Option<&Barber>) -> String {
    barber.map_or_else(|| "Your barber".to_string(), |b| b.name.clone())
}

/// Message for the barber who was just handed a job.
pub fn new_assignment(order: &Order, barber: &Barber) -> Notification {
    let services = order
        .items
        .iter()
        .map(|item| format!("{} x{}", item.title, item.quantity))
        .collect::<Vec<_>>()
        .join(", ");
    let location = order.customer.location.as_deref().unwrap_or("location not provided");
    Notification {
        recipient: Recipient::Barber {
            barber_id: barber.id.clone(),
            email: barber.email.clone(),
        },
        subject: format!("New job assigned: {}", order.order_number),
        body: format!(
            "Hi {}, you have a new job for {} at {}: {}. Please accept or decline it.",
            barber.name, order.customer.name, location, services
        ),
    }
}

/// Message for the customer after a barber has been attached.
pub fn barber_assigned(order: &Order, barber: &Barber) -> Option<Notification> {
    to_customer(
        order,
        format!("A barber has been assigned to booking {}", order.order_number),
        format!(
            "{} ({}) will take care of your booking {}.",
            barber.name, barber.code, order.order_number
        ),
    )
}

/// Messages describing a transition driven by the barber.
///
/// Assignment is covered by [`new_assignment`] and [`barber_assigned`] because it
/// goes to two parties separately.
pub fn for_transition(
    transition: &JobTransition,
    barber: Option<&Barber>,
    operator_channel: &str,
) -> Option<Notification> {
    let order = &transition.order;
    let number = &order.order_number;
    let who = barber_name(barber);

    match transition.to {
        JobStatus::Accepted => to_customer(
            order,
            format!("Booking {number} accepted"),
            format!("{who} accepted your booking {number}."),
        ),
        JobStatus::OnTheWay => to_customer(
            order,
            format!("Your barber is on the way ({number})"),
            format!("{who} is heading to you now."),
        ),
        JobStatus::Arrived => to_customer(
            order,
            format!("Your barber has arrived ({number})"),
            format!("{who} has arrived at your location."),
        ),
        JobStatus::Completed => to_customer(
            order,
            format!("Booking {number} completed"),
            format!(
                "Your booking {number} is complete. Total: {}. Thank you!",
                order.total_amount
            ),
        ),
        JobStatus::Declined => Some(Notification {
            recipient: Recipient::Operator {
                channel: operator_channel.to_string(),
            },
            subject: format!("Order {number} declined"),
            body: format!(
                "Barber {} declined order {number}: {}. The order needs reassignment.",
                order.assigned_barber_id.as_deref().unwrap_or("unknown"),
                order.decline_reason.as_deref().unwrap_or("no reason given")
            ),
        }),
        JobStatus::Unassigned | JobStatus::PendingAcceptance => None,
    }
}
